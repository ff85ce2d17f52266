//! Fluent builder for constructing a [`Driver`].

use cw_core::TraversalConfig;
use cw_curve::{CurveMath, FieldResolver};
use cw_traverse::TraversalEngine;

use crate::{DriveError, DriveResult, Driver};

/// Default fixed step: 50 Hz.
pub const DEFAULT_FIXED_STEP: f32 = 0.02;

/// Default catch-up budget per host frame.
pub const DEFAULT_MAX_STEPS_PER_FRAME: u32 = 8;

/// Fluent builder for [`Driver<M, F>`].
///
/// # Required inputs
///
/// - `M: CurveMath` — the curve (e.g. [`cw_curve::ArcTable`])
/// - `F: FieldResolver` — per-point fields (the same table, or
///   [`cw_curve::NoFields`])
///
/// # Optional inputs (have defaults)
///
/// | Method                     | Default                        |
/// |----------------------------|--------------------------------|
/// | `.config(c)`               | `TraversalConfig::default()`   |
/// | `.fixed_step(s)`           | `0.02` (50 Hz)                 |
/// | `.max_steps_per_frame(n)`  | `8`                            |
/// | `.initial_distance(d)`     | `0.0`                          |
///
/// # Example
///
/// ```rust,ignore
/// let mut driver = DriverBuilder::new(curve.clone(), curve)
///     .config(TraversalConfig::default().with_overflow(OverflowControl::Cycle))
///     .initial_distance(3.0)
///     .build()?;
/// driver.run(600, 1.0 / 60.0, &mut NoopObserver)?;
/// ```
pub struct DriverBuilder<M: CurveMath, F: FieldResolver> {
    curve:               M,
    fields:              F,
    config:              TraversalConfig,
    fixed_step:          f32,
    max_steps_per_frame: u32,
    initial_distance:    Option<f32>,
}

impl<M: CurveMath, F: FieldResolver> DriverBuilder<M, F> {
    /// Create a builder with all required inputs.
    pub fn new(curve: M, fields: F) -> Self {
        Self {
            curve,
            fields,
            config:              TraversalConfig::default(),
            fixed_step:          DEFAULT_FIXED_STEP,
            max_steps_per_frame: DEFAULT_MAX_STEPS_PER_FRAME,
            initial_distance:    None,
        }
    }

    pub fn config(mut self, config: TraversalConfig) -> Self {
        self.config = config;
        self
    }

    /// Tick length used when the config asks for `PerFixedStep`.
    pub fn fixed_step(mut self, seconds: f32) -> Self {
        self.fixed_step = seconds;
        self
    }

    pub fn max_steps_per_frame(mut self, steps: u32) -> Self {
        self.max_steps_per_frame = steps;
        self
    }

    /// Start the cursor here instead of at 0.  Clamped into the curve.
    pub fn initial_distance(mut self, distance: f32) -> Self {
        self.initial_distance = Some(distance);
        self
    }

    /// Validate inputs and return a ready-to-run [`Driver`].
    pub fn build(self) -> DriveResult<Driver<M, F>> {
        if !self.fixed_step.is_finite() || self.fixed_step <= 0.0 {
            return Err(DriveError::Config(format!(
                "fixed step must be a positive number of seconds, got {}",
                self.fixed_step
            )));
        }
        if self.max_steps_per_frame == 0 {
            return Err(DriveError::Config("max_steps_per_frame must be at least 1".into()));
        }

        let mut engine = TraversalEngine::new(self.config)?;
        match self.initial_distance {
            Some(d) => engine.set_distance(d, &self.curve)?,
            None    => engine.reset(&self.curve),
        }

        Ok(Driver {
            engine,
            curve:               self.curve,
            fields:              self.fields,
            fixed_step:          self.fixed_step,
            max_steps_per_frame: self.max_steps_per_frame,
            accumulator:         0.0,
        })
    }
}
