//! The traversal engine: one cursor on one curve, advanced once per tick.
//!
//! # Tick anatomy
//!
//! ```text
//! tick(dt)
//!   ├─ idle?        stopped, < 2 points, zero-length curve, no speed, dt <= 0
//!   ├─ Delayed      re-pin; wait until the dwell has elapsed, then resume
//!   │               with one movement step in the recorded direction
//!   └─ Moving       rescale to the new curve length, resolve speed, step
//!
//! step(speed)
//!   ├─ in range     report points between old and new section, in order;
//!   │               the first point with a delay pins the cursor
//!   └─ overflow     report points up to the breached end, apply the
//!                   policy, then report points from the landing end
//! ```
//!
//! Sections and points follow the convention of [`cw_curve::math`]: moving
//! forward from section `a` to section `b` crosses points `a+1 ..= b`,
//! moving backward crosses `a, a-1, …, b+1`.

use std::iter;

use rustc_hash::FxHashSet;
use tracing::{debug, error, trace, warn};

use cw_core::{
    CwError, EPSILON, FieldId, OverflowControl, PointIndex, SPEED_THRESHOLD, SimClock, Tick,
    Timestamp, TraversalConfig,
};
use cw_curve::{CurveMath, FieldResolver};

use crate::{
    DelayResolver, Dwell, EventEmitter, Phase, PointObserver, PointReached, Resolved,
    SpeedResolver, TraversalState, TraverseError, TraverseResult,
};

/// What a tick did.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TickOutcome {
    /// Nothing moved.
    Idle,
    /// The cursor is pinned to this point (dwell started or continues).
    Dwelling(PointIndex),
    /// The cursor moved within the curve.
    Moved,
    /// The cursor ran past an end and the policy was applied.
    Overflowed(OverflowControl),
}

/// Drives a cursor along a curve at the configured speed.
///
/// The engine owns the cursor distance, the [`TraversalState`], a
/// monotonic [`SimClock`] for dwell timing, and the [`EventEmitter`].  The
/// curve and its fields are borrowed per call, so the host is free to edit
/// them between ticks.
///
/// # Example
///
/// ```
/// use cw_core::TraversalConfig;
/// use cw_curve::{ArcTable, NoFields};
/// use cw_traverse::TraversalEngine;
///
/// let curve = ArcTable::open(&[0.0, 5.0, 12.0]).unwrap();
/// let mut engine = TraversalEngine::new(TraversalConfig::default().with_speed(2.0)).unwrap();
/// engine.tick(1.0, &curve, &NoFields).unwrap();
/// assert_eq!(engine.distance(), 2.0);
/// ```
#[derive(Debug)]
pub struct TraversalEngine {
    config:        TraversalConfig,
    state:         TraversalState,
    distance:      f32,
    /// Curve length seen by the previous tick, for proportional rescaling.
    cached_length: f32,
    /// `state.section` was not tracked during the last step.
    section_stale: bool,
    clock:         SimClock,
    emitter:       EventEmitter,
    /// Field fallbacks already reported; each is warned about once.
    fallbacks:     FxHashSet<(PointIndex, FieldId)>,
}

impl TraversalEngine {
    /// Create an engine at distance 0, moving.
    pub fn new(config: TraversalConfig) -> TraverseResult<Self> {
        config.validate()?;
        Ok(Self {
            config,
            state:         TraversalState::new(),
            distance:      0.0,
            cached_length: 0.0,
            section_stale: false,
            clock:         SimClock::new(),
            emitter:       EventEmitter::new(),
            fallbacks:     FxHashSet::default(),
        })
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    #[inline]
    pub fn distance(&self) -> f32 {
        self.distance
    }

    /// Cursor position as a fraction of the curve length, in `[0, 1]`.
    pub fn distance_ratio<M: CurveMath + ?Sized>(&self, curve: &M) -> f32 {
        let total = curve.total_length();
        if total <= EPSILON { 0.0 } else { (self.distance / total).clamp(0.0, 1.0) }
    }

    /// Index of the section holding the cursor.
    ///
    /// Section lookups are skipped while no crossing check or speed field
    /// depends on them; a lagging index is recomputed from `curve` here.
    pub fn section<M: CurveMath + ?Sized>(&self, curve: &M) -> usize {
        if self.section_stale && curve.point_count() > 0 {
            curve.section_index_at(self.distance)
        } else {
            self.state.section
        }
    }

    #[inline]
    pub fn phase(&self) -> Phase {
        self.state.phase
    }

    pub fn dwell(&self) -> Option<&Dwell> {
        match &self.state.phase {
            Phase::Delayed(dwell) => Some(dwell),
            _ => None,
        }
    }

    #[inline]
    pub fn is_stopped(&self) -> bool {
        matches!(self.state.phase, Phase::Stopped)
    }

    #[inline]
    pub fn is_reversed(&self) -> bool {
        self.state.reversed
    }

    pub fn state(&self) -> &TraversalState {
        &self.state
    }

    pub fn config(&self) -> &TraversalConfig {
        &self.config
    }

    /// Direct access to the configuration.  Nothing is validated here;
    /// the `set_*` methods reject non-finite values.
    pub fn config_mut(&mut self) -> &mut TraversalConfig {
        self.fallbacks.clear();
        &mut self.config
    }

    /// Simulated time accumulated from every `dt` handed to [`tick`](Self::tick).
    pub fn now(&self) -> Timestamp {
        self.clock.now()
    }

    pub fn ticks(&self) -> Tick {
        self.clock.ticks()
    }

    // ── Configuration ─────────────────────────────────────────────────────

    /// Replace the whole configuration.  Transient state is kept.
    pub fn set_config(&mut self, config: TraversalConfig) -> TraverseResult<()> {
        config.validate()?;
        self.config = config;
        self.fallbacks.clear();
        Ok(())
    }

    pub fn set_speed(&mut self, speed: f32) -> TraverseResult<()> {
        if !speed.is_finite() {
            return Err(CwError::InvalidValue { what: "speed", value: speed }.into());
        }
        self.config.speed = speed;
        Ok(())
    }

    pub fn set_speed_field(&mut self, field: Option<FieldId>) {
        self.config.speed_field = field;
        self.fallbacks.clear();
    }

    pub fn set_delay(&mut self, delay: f32) -> TraverseResult<()> {
        if !delay.is_finite() || delay < 0.0 {
            return Err(CwError::InvalidValue { what: "delay", value: delay }.into());
        }
        self.config.delay = delay;
        Ok(())
    }

    pub fn set_delay_field(&mut self, field: Option<FieldId>) {
        self.config.delay_field = field;
        self.fallbacks.clear();
    }

    pub fn set_overflow(&mut self, overflow: OverflowControl) {
        self.config.overflow = overflow;
    }

    pub fn set_adjust_by_total_length(&mut self, adjust: bool) {
        self.config.adjust_by_total_length = adjust;
    }

    // ── Subscriptions ─────────────────────────────────────────────────────

    pub fn emitter_mut(&mut self) -> &mut EventEmitter {
        &mut self.emitter
    }

    pub fn subscribe(&mut self, observer: Box<dyn PointObserver>) -> cw_core::SubscriptionId {
        self.emitter.subscribe(observer)
    }

    pub fn subscribe_fn<F>(&mut self, f: F) -> cw_core::SubscriptionId
    where
        F: FnMut(PointReached) + 'static,
    {
        self.emitter.subscribe_fn(f)
    }

    pub fn unsubscribe(&mut self, id: cw_core::SubscriptionId) -> bool {
        self.emitter.unsubscribe(id)
    }

    // ── Host control ──────────────────────────────────────────────────────

    /// Move the cursor to `distance`, clamped into the curve.
    ///
    /// Resynchronizes the section without reporting any point and cancels
    /// a dwell in progress.  A stopped engine stays stopped.
    pub fn set_distance<M: CurveMath + ?Sized>(&mut self, distance: f32, curve: &M) -> TraverseResult<()> {
        if !distance.is_finite() {
            return Err(TraverseError::InvalidDistance(distance));
        }
        let total = curve.total_length().max(0.0);
        self.distance = distance.clamp(0.0, total);
        self.cached_length = total;
        self.state.section = if curve.point_count() > 0 {
            curve.section_index_at(self.distance)
        } else {
            0
        };
        self.section_stale = false;
        self.state.skip_seam = false;
        if let Phase::Delayed(_) = self.state.phase {
            self.state.phase = Phase::Moving;
        }
        Ok(())
    }

    /// [`set_distance`](Self::set_distance) as a fraction of the curve length.
    pub fn set_distance_ratio<M: CurveMath + ?Sized>(&mut self, ratio: f32, curve: &M) -> TraverseResult<()> {
        if !ratio.is_finite() {
            return Err(TraverseError::InvalidDistance(ratio));
        }
        self.set_distance(ratio.clamp(0.0, 1.0) * curve.total_length().max(0.0), curve)
    }

    /// Halt the cursor.  Observed at the top of the next tick.
    ///
    /// A dwell in progress is settled first so resuming later does not
    /// report the dwell point again.
    pub fn stop(&mut self) {
        if let Phase::Delayed(dwell) = self.state.phase {
            self.settle(dwell);
        }
        self.state.phase = Phase::Stopped;
    }

    /// Leave the stopped state.  No effect otherwise.
    pub fn resume(&mut self) {
        if self.is_stopped() {
            self.state.phase = Phase::Moving;
        }
    }

    /// Back to the start of the curve with fresh transient state.  The
    /// clock keeps running.
    pub fn reset<M: CurveMath + ?Sized>(&mut self, curve: &M) {
        self.state = TraversalState::new();
        self.fallbacks.clear();
        self.distance = 0.0;
        self.cached_length = curve.total_length();
        self.section_stale = false;
    }

    // ── Tick ──────────────────────────────────────────────────────────────

    /// Advance the cursor by one scheduling step of `dt` seconds.
    pub fn tick<M, F>(&mut self, dt: f32, curve: &M, fields: &F) -> TraverseResult<TickOutcome>
    where
        M: CurveMath + ?Sized,
        F: FieldResolver + ?Sized,
    {
        self.clock.advance(dt);

        if self.is_idle(dt, curve) {
            let total = curve.total_length().max(0.0);
            if self.distance > total {
                self.distance = total;
            }
            return Ok(TickOutcome::Idle);
        }

        let last_section = curve.section_count() - 1;
        self.state.section = self.state.section.min(last_section);

        match self.state.phase {
            Phase::Delayed(dwell) => self.tick_delayed(dwell, dt, curve, fields),
            _                     => self.tick_moving(dt, curve, fields),
        }
    }

    fn is_idle<M: CurveMath + ?Sized>(&self, dt: f32, curve: &M) -> bool {
        self.is_stopped()
            || !(dt.is_finite() && dt > 0.0)
            || curve.point_count() < 2
            || curve.total_length() <= EPSILON
            || (self.config.speed_field.is_none() && self.config.speed.abs() < SPEED_THRESHOLD)
    }

    fn tick_delayed<M, F>(&mut self, mut dwell: Dwell, dt: f32, curve: &M, fields: &F) -> TraverseResult<TickOutcome>
    where
        M: CurveMath + ?Sized,
        F: FieldResolver + ?Sized,
    {
        if dwell.point.index() >= curve.point_count() {
            debug!(point = %dwell.point, "dwell point left the curve, dwell cancelled");
            self.state.phase = Phase::Moving;
            self.section_stale = true;
            return self.tick_moving(dt, curve, fields);
        }

        // The curve may have changed while dwelling; the pin follows the point.
        self.distance = pin_distance(curve, dwell.point, dwell.forward, dwell.boundary);
        self.cached_length = curve.total_length();
        dwell.resume_section = resume_section(curve, &dwell);
        self.state.phase = Phase::Delayed(dwell);

        let required = self.delay_at(fields, dwell.point);
        let elapsed  = self.clock.now().since(dwell.since);
        if elapsed < required as f64 {
            return Ok(TickOutcome::Dwelling(dwell.point));
        }

        debug!(point = %dwell.point, elapsed, forward = dwell.forward, "dwell complete, resuming");
        self.settle(dwell);
        let speed = self.speed_at(fields, dwell.point).abs();
        let speed = if dwell.forward { speed } else { -speed };
        self.step(speed, dt, curve, fields)
    }

    fn tick_moving<M, F>(&mut self, dt: f32, curve: &M, fields: &F) -> TraverseResult<TickOutcome>
    where
        M: CurveMath + ?Sized,
        F: FieldResolver + ?Sized,
    {
        let total = curve.total_length();
        let mut distance = self.distance;
        if self.config.adjust_by_total_length {
            let old = self.cached_length;
            if old > EPSILON && total > EPSILON && (old - total).abs() > EPSILON {
                distance *= total / old;
                trace!(old, new = total, distance, "distance rescaled to new curve length");
            }
        }
        self.distance = distance.clamp(0.0, total);
        self.cached_length = total;

        if self.section_stale && self.needs_section() {
            self.state.section = curve.section_index_at(self.distance);
            self.section_stale = false;
        }

        let speed = self.speed_at(fields, PointIndex::from_index(self.state.section));
        self.step(speed, dt, curve, fields)
    }

    // ── Movement ──────────────────────────────────────────────────────────

    /// Move by `speed * dt`.  Going backward the cursor overflows only
    /// below 0; going forward it overflows on reaching the total length, so
    /// a closed curve's lap ends on the seam at 0 instead of parking on
    /// the end.
    fn step<M, F>(&mut self, speed: f32, dt: f32, curve: &M, fields: &F) -> TraverseResult<TickOutcome>
    where
        M: CurveMath + ?Sized,
        F: FieldResolver + ?Sized,
    {
        let total   = curve.total_length();
        let forward = speed > 0.0;
        let target  = self.distance + speed * dt;

        let outcome = if target < 0.0 || (forward && target >= total) {
            self.overflow(target, forward, curve, fields)
        } else {
            self.advance_within(target, forward, curve, fields)
        };
        self.state.skip_seam = false;
        outcome
    }

    fn advance_within<M, F>(&mut self, target: f32, forward: bool, curve: &M, fields: &F) -> TraverseResult<TickOutcome>
    where
        M: CurveMath + ?Sized,
        F: FieldResolver + ?Sized,
    {
        if !self.needs_section() {
            self.distance = target;
            self.section_stale = true;
            return Ok(TickOutcome::Moved);
        }

        let current     = self.state.section;
        let new_section = curve.section_index_at(target);
        if new_section != current && self.checks_enabled() {
            let dwell = if forward {
                self.cross(current + 1..=new_section, true, false, curve, fields)?
            } else {
                self.cross((new_section + 1..=current).rev(), false, false, curve, fields)?
            };
            if let Some(point) = dwell {
                return Ok(TickOutcome::Dwelling(point));
            }
        }

        self.distance = target;
        self.state.section = new_section;
        self.section_stale = false;
        Ok(TickOutcome::Moved)
    }

    fn overflow<M, F>(&mut self, target: f32, forward: bool, curve: &M, fields: &F) -> TraverseResult<TickOutcome>
    where
        M: CurveMath + ?Sized,
        F: FieldResolver + ?Sized,
    {
        let n            = curve.point_count();
        let total        = curve.total_length();
        let closed       = curve.is_closed();
        let last_section = curve.section_count() - 1;
        let checks       = self.checks_enabled();
        let policy       = self.config.overflow;

        // ── ① Points up to and including the breached end ─────────────────
        if checks {
            let current = self.state.section;
            let mut dwell = if forward {
                let interior_end = if closed { n } else { n - 1 };
                self.cross(current + 1..interior_end, true, false, curve, fields)?
            } else {
                self.cross((1..=current).rev(), false, false, curve, fields)?
            };
            if dwell.is_none() {
                let boundary = if forward && !closed { n - 1 } else { 0 };
                if std::mem::take(&mut self.state.skip_seam) {
                    trace!(point = boundary, "boundary point already reported");
                } else {
                    dwell = self.cross(iter::once(boundary), forward, true, curve, fields)?;
                }
            }
            if let Some(point) = dwell {
                return Ok(TickOutcome::Dwelling(point));
            }
        }

        // ── ② Policy ──────────────────────────────────────────────────────
        let mut forward_after = forward;
        let landed = match policy {
            OverflowControl::Stop => {
                self.distance = if forward { total } else { 0.0 };
                self.state.section = if forward { last_section } else { 0 };
                self.state.phase = Phase::Stopped;
                self.section_stale = false;
                debug!(distance = self.distance, "end of curve reached, stopped");
                return Ok(TickOutcome::Overflowed(policy));
            }
            OverflowControl::Cycle => {
                if target < 0.0 { total + target } else { target - total }
            }
            OverflowControl::PingPong => {
                self.state.reversed = !self.state.reversed;
                forward_after = !forward;
                if target < 0.0 { -target } else { 2.0 * total - target }
            }
        };
        let landed = landed.clamp(0.0, total);
        debug!(%policy, target, landed, reversed = self.state.reversed, "overflow resolved");

        // ── ③ Points from the landing end ─────────────────────────────────
        if checks {
            // Only cycling an open curve lands on a different point than the
            // one just reported; every other combination touches the same end.
            self.state.skip_seam = !(policy == OverflowControl::Cycle && !closed);
            let landing_point = if forward_after || closed { 0 } else { n - 1 };
            if std::mem::take(&mut self.state.skip_seam) {
                trace!(point = landing_point, "landing point already reported");
            } else if let Some(point) =
                self.cross(iter::once(landing_point), forward_after, false, curve, fields)?
            {
                return Ok(TickOutcome::Dwelling(point));
            }

            let landed_section = curve.section_index_at(landed);
            let dwell = if forward_after {
                self.cross(1..=landed_section, true, false, curve, fields)?
            } else {
                self.cross((landed_section + 1..=last_section).rev(), false, false, curve, fields)?
            };
            if let Some(point) = dwell {
                return Ok(TickOutcome::Dwelling(point));
            }
            self.state.section = landed_section;
            self.section_stale = false;
        } else if self.needs_section() {
            self.state.section = curve.section_index_at(landed);
            self.section_stale = false;
        } else {
            self.section_stale = true;
        }

        self.distance = landed;
        Ok(TickOutcome::Overflowed(policy))
    }

    /// Report `points` in order.  The first one that requires a dwell pins
    /// the cursor and ends the walk.
    fn cross<I, M, F>(
        &mut self,
        points:   I,
        forward:  bool,
        boundary: bool,
        curve:    &M,
        fields:   &F,
    ) -> TraverseResult<Option<PointIndex>>
    where
        I: IntoIterator<Item = usize>,
        M: CurveMath + ?Sized,
        F: FieldResolver + ?Sized,
    {
        let limit = curve.point_count();
        let checks_delay = self.config.checks_delay();

        for (visited, i) in points.into_iter().enumerate() {
            if visited >= limit {
                error!(limit, "point crossing overran the point count");
                return Err(TraverseError::CrossingOverrun { limit });
            }
            let point = PointIndex::from_index(i);
            trace!(point = %point, forward, "point reached");
            self.emitter.emit(PointReached { point, forward });

            if checks_delay && self.delay_at(fields, point) > EPSILON {
                let mut dwell = Dwell {
                    point,
                    since: self.clock.now(),
                    forward,
                    boundary,
                    resume_section: 0,
                };
                dwell.resume_section = resume_section(curve, &dwell);
                self.distance = pin_distance(curve, point, forward, boundary);
                self.state.section = i.min(curve.section_count() - 1);
                self.state.phase = Phase::Delayed(dwell);
                self.section_stale = false;
                debug!(point = %point, since = %dwell.since, boundary, "dwell started");
                return Ok(Some(point));
            }
        }
        Ok(None)
    }

    // ── Helpers ───────────────────────────────────────────────────────────

    /// Leave a dwell: continue from the section that does not report the
    /// dwell point again.
    fn settle(&mut self, dwell: Dwell) {
        self.state.section = dwell.resume_section;
        self.state.skip_seam = dwell.boundary;
        self.state.phase = Phase::Moving;
        self.section_stale = false;
    }

    /// Point crossings are only tracked when somebody cares.
    #[inline]
    fn checks_enabled(&self) -> bool {
        self.config.checks_delay() || !self.emitter.is_empty()
    }

    #[inline]
    fn needs_section(&self) -> bool {
        self.checks_enabled() || self.config.speed_field.is_some()
    }

    fn speed_at<F: FieldResolver + ?Sized>(&mut self, fields: &F, point: PointIndex) -> f32 {
        let resolved = SpeedResolver::new(&self.config, self.state.reversed).speed(fields, point);
        if resolved.is_fallback() {
            self.report_fallback(point, self.config.speed_field.clone(), resolved, "speed");
        }
        resolved.value()
    }

    fn delay_at<F: FieldResolver + ?Sized>(&mut self, fields: &F, point: PointIndex) -> f32 {
        let resolved = DelayResolver::new(&self.config).delay(fields, point);
        if resolved.is_fallback() {
            self.report_fallback(point, self.config.delay_field.clone(), resolved, "delay");
        }
        resolved.value()
    }

    /// Warn about a missing field value the first time it is used.
    fn report_fallback(&mut self, point: PointIndex, field: Option<FieldId>, resolved: Resolved, what: &'static str) {
        let Some(field) = field else { return };
        if self.fallbacks.contains(&(point, field.clone())) {
            return;
        }
        warn!(point = %point, field = %field, value = resolved.value(), "{what} field missing on point, using constant");
        self.emitter.notify_fallback(point, &field);
        self.fallbacks.insert((point, field));
    }
}

/// Where the cursor sits while dwelling at `point`.
///
/// A boundary dwell sits on the breached end: the total length going
/// forward (the seam of a closed curve is reached from its end), 0 going
/// backward.
fn pin_distance<M: CurveMath + ?Sized>(curve: &M, point: PointIndex, forward: bool, boundary: bool) -> f32 {
    let total = curve.total_length().max(0.0);
    match (boundary, forward) {
        (true, true)  => total,
        (true, false) => 0.0,
        _             => curve.arc_offset(point).clamp(0.0, total),
    }
}

fn resume_section<M: CurveMath + ?Sized>(curve: &M, dwell: &Dwell) -> usize {
    let last_section = curve.section_count().saturating_sub(1);
    match (dwell.forward, dwell.boundary) {
        (true, true)   => last_section,
        (true, false)  => dwell.point.index().min(last_section),
        (false, true)  => 0,
        (false, false) => dwell.point.index().saturating_sub(1),
    }
}
