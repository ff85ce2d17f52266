//! Driver observer trait for progress reporting and data collection.

use cw_core::Tick;
use cw_curve::{CurveMath, FieldResolver};
use cw_traverse::{TickOutcome, TraversalEngine};

/// Callbacks invoked by [`Driver`][crate::Driver] around every engine tick.
///
/// All methods have default no-op implementations so implementors only need to
/// override what they care about.
///
/// # Example — dwell printer
///
/// ```rust,ignore
/// struct DwellPrinter;
///
/// impl DriverObserver for DwellPrinter {
///     fn on_tick_end(&mut self, tick: Tick, outcome: TickOutcome, _engine: &TraversalEngine) {
///         if let TickOutcome::Dwelling(point) = outcome {
///             println!("{tick}: waiting at {point}");
///         }
///     }
/// }
/// ```
pub trait DriverObserver {
    /// Called right before the engine ticks.
    fn on_tick_start(&mut self, _tick: Tick) {}

    /// Called right after the engine ticked, with read-only access to it.
    fn on_tick_end(&mut self, _tick: Tick, _outcome: TickOutcome, _engine: &TraversalEngine) {}

    /// Called after [`on_tick_end`](Self::on_tick_end) with the curve the
    /// engine ran on, so dependents can sample fields at the cursor without
    /// the driver knowing about them.
    fn on_sample(
        &mut self,
        _tick:   Tick,
        _engine: &TraversalEngine,
        _curve:  &dyn CurveMath,
        _fields: &dyn FieldResolver,
    ) {}

    /// Called once at the end of [`Driver::run`][crate::Driver::run].
    fn on_run_end(&mut self, _final_tick: Tick) {}
}

/// A [`DriverObserver`] that does nothing.
pub struct NoopObserver;

impl DriverObserver for NoopObserver {}

/// Forward every hook to `A`, then to `B`.
impl<A: DriverObserver, B: DriverObserver> DriverObserver for (A, B) {
    fn on_tick_start(&mut self, tick: Tick) {
        self.0.on_tick_start(tick);
        self.1.on_tick_start(tick);
    }

    fn on_tick_end(&mut self, tick: Tick, outcome: TickOutcome, engine: &TraversalEngine) {
        self.0.on_tick_end(tick, outcome, engine);
        self.1.on_tick_end(tick, outcome, engine);
    }

    fn on_sample(
        &mut self,
        tick:   Tick,
        engine: &TraversalEngine,
        curve:  &dyn CurveMath,
        fields: &dyn FieldResolver,
    ) {
        self.0.on_sample(tick, engine, curve, fields);
        self.1.on_sample(tick, engine, curve, fields);
    }

    fn on_run_end(&mut self, final_tick: Tick) {
        self.0.on_run_end(final_tick);
        self.1.on_run_end(final_tick);
    }
}
