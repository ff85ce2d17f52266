//! The `Driver` struct and its frame loop.

use tracing::{debug, warn};

use cw_core::SchedulingMode;
use cw_curve::{CurveMath, FieldResolver};
use cw_traverse::{TickOutcome, TraversalEngine};

use crate::{DriverObserver, DriveResult};

/// Owns one engine together with the curve it runs on, and decides when
/// the engine ticks.
///
/// The scheduling source comes from the engine's
/// [`TraversalConfig::scheduling`][cw_core::TraversalConfig::scheduling]:
///
/// - **PerFrame**: every host frame is one tick of `frame_dt`.
/// - **PerFixedStep**: host frames fill an accumulator that is drained in
///   ticks of exactly `fixed_step`, at most `max_steps_per_frame` per
///   frame.  Time beyond that budget is dropped so a long stall cannot
///   trigger a burst of catch-up ticks.
///
/// The curve and fields are public: the host may edit them between frames,
/// the engine picks the changes up on its next tick.
///
/// Create via [`DriverBuilder`][crate::DriverBuilder].
pub struct Driver<M: CurveMath, F: FieldResolver> {
    pub engine: TraversalEngine,

    pub curve: M,

    pub fields: F,

    /// Tick length in seconds for `PerFixedStep`.
    pub(crate) fixed_step: f32,

    pub(crate) max_steps_per_frame: u32,

    /// Unconsumed frame time for `PerFixedStep`.
    pub(crate) accumulator: f32,
}

impl<M: CurveMath, F: FieldResolver> Driver<M, F> {
    // ── Public API ────────────────────────────────────────────────────────

    /// Feed one host frame of `frame_dt` seconds.  Returns the number of
    /// engine ticks that ran.
    pub fn advance<O: DriverObserver + ?Sized>(&mut self, frame_dt: f32, observer: &mut O) -> DriveResult<u32> {
        match self.engine.config().scheduling {
            SchedulingMode::PerFrame => {
                self.step(frame_dt, observer)?;
                Ok(1)
            }
            SchedulingMode::PerFixedStep => self.advance_fixed(frame_dt, observer),
        }
    }

    /// Feed `frames` host frames of `frame_dt` each, then report the end of
    /// the run.
    pub fn run<O: DriverObserver + ?Sized>(&mut self, frames: u64, frame_dt: f32, observer: &mut O) -> DriveResult<()> {
        for _ in 0..frames {
            self.advance(frame_dt, observer)?;
        }
        let final_tick = self.engine.ticks();
        debug!(%final_tick, distance = self.engine.distance(), "run finished");
        observer.on_run_end(final_tick);
        Ok(())
    }

    /// Run exactly `n` engine ticks of `dt`, bypassing the scheduling mode.
    ///
    /// Useful for tests and batch runs.
    pub fn run_ticks<O: DriverObserver + ?Sized>(&mut self, n: u64, dt: f32, observer: &mut O) -> DriveResult<()> {
        for _ in 0..n {
            self.step(dt, observer)?;
        }
        Ok(())
    }

    pub fn fixed_step(&self) -> f32 {
        self.fixed_step
    }

    pub fn max_steps_per_frame(&self) -> u32 {
        self.max_steps_per_frame
    }

    /// Frame time waiting for the next fixed step.
    pub fn pending_time(&self) -> f32 {
        self.accumulator
    }

    // ── Core tick processing ──────────────────────────────────────────────

    fn advance_fixed<O: DriverObserver + ?Sized>(&mut self, frame_dt: f32, observer: &mut O) -> DriveResult<u32> {
        if frame_dt.is_finite() && frame_dt > 0.0 {
            self.accumulator += frame_dt;
        }

        let mut steps = 0;
        while self.accumulator >= self.fixed_step && steps < self.max_steps_per_frame {
            self.step(self.fixed_step, observer)?;
            self.accumulator -= self.fixed_step;
            steps += 1;
        }

        if self.accumulator >= self.fixed_step {
            let kept = self.accumulator % self.fixed_step;
            warn!(
                dropped = self.accumulator - kept,
                steps,
                "fixed-step budget exhausted, dropping frame time"
            );
            self.accumulator = kept;
        }
        Ok(steps)
    }

    fn step<O: DriverObserver + ?Sized>(&mut self, dt: f32, observer: &mut O) -> DriveResult<TickOutcome> {
        let tick = self.engine.ticks();
        observer.on_tick_start(tick);
        let outcome = self.engine.tick(dt, &self.curve, &self.fields)?;
        observer.on_tick_end(tick, outcome, &self.engine);
        observer.on_sample(tick, &self.engine, &self.curve, &self.fields);
        Ok(outcome)
    }
}
