//! Host-supplied traversal configuration.
//!
//! Typically persisted by the host as plain data (JSON, RON, …) with the
//! `serde` feature and handed to the engine at construction.  Every field
//! can also be changed at runtime through the engine's setters.

use std::fmt;
use std::str::FromStr;

use crate::{CwError, CwResult, FieldId};

/// Tolerance for length comparisons and the "dwell required" threshold.
pub const EPSILON: f32 = 1e-4;

/// Constant speeds with a smaller magnitude are treated as "not moving".
pub const SPEED_THRESHOLD: f32 = 1e-5;

// ── OverflowControl ───────────────────────────────────────────────────────────

/// What happens when the cursor runs past either end of the curve.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum OverflowControl {
    /// Clamp to the breached end and stop.
    #[default]
    Stop,
    /// Wrap around to the opposite end.
    Cycle,
    /// Reflect the overshoot and reverse direction.
    #[cfg_attr(feature = "serde", serde(alias = "pingpong"))]
    PingPong,
}

impl OverflowControl {
    pub fn as_str(self) -> &'static str {
        match self {
            OverflowControl::Stop     => "stop",
            OverflowControl::Cycle    => "cycle",
            OverflowControl::PingPong => "ping_pong",
        }
    }
}

impl fmt::Display for OverflowControl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OverflowControl {
    type Err = CwError;

    fn from_str(s: &str) -> CwResult<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "stop"                                => Ok(OverflowControl::Stop),
            "cycle"                               => Ok(OverflowControl::Cycle),
            "ping_pong" | "pingpong" | "ping-pong" => Ok(OverflowControl::PingPong),
            other => Err(CwError::Config(format!("unknown overflow control '{other}'"))),
        }
    }
}

// ── SchedulingMode ────────────────────────────────────────────────────────────

/// Which scheduling source drives the engine.  Exactly one per engine.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum SchedulingMode {
    /// One tick per rendered frame with the frame's delta time.
    #[default]
    PerFrame,
    /// Fixed-size simulation steps accumulated from frame time.
    PerFixedStep,
}

impl SchedulingMode {
    pub fn as_str(self) -> &'static str {
        match self {
            SchedulingMode::PerFrame     => "per_frame",
            SchedulingMode::PerFixedStep => "per_fixed_step",
        }
    }
}

impl fmt::Display for SchedulingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SchedulingMode {
    type Err = CwError;

    fn from_str(s: &str) -> CwResult<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "per_frame" | "frame"                  => Ok(SchedulingMode::PerFrame),
            "per_fixed_step" | "fixed_step" | "fixed" => Ok(SchedulingMode::PerFixedStep),
            other => Err(CwError::Config(format!("unknown scheduling mode '{other}'"))),
        }
    }
}

// ── TraversalConfig ───────────────────────────────────────────────────────────

/// Persistent, host-owned configuration of one traversal engine.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct TraversalConfig {
    /// Signed constant speed in distance units per second.  Negative values
    /// move the cursor toward the start of the curve.
    pub speed: f32,

    /// When set, the per-point value of this field overrides `speed`.
    pub speed_field: Option<FieldId>,

    /// Constant dwell duration in seconds at every crossed point.
    pub delay: f32,

    /// When set, the per-point value of this field overrides `delay`.
    pub delay_field: Option<FieldId>,

    /// Behavior at either end of the curve.
    pub overflow: OverflowControl,

    /// Rescale the cursor distance proportionally when the curve's total
    /// length changes between ticks.
    pub adjust_by_total_length: bool,

    /// Scheduling source used by the host driver.
    pub scheduling: SchedulingMode,
}

impl Default for TraversalConfig {
    fn default() -> Self {
        Self {
            speed:                  5.0,
            speed_field:            None,
            delay:                  0.0,
            delay_field:            None,
            overflow:               OverflowControl::Stop,
            adjust_by_total_length: false,
            scheduling:             SchedulingMode::PerFrame,
        }
    }
}

impl TraversalConfig {
    pub fn with_speed(mut self, speed: f32) -> Self {
        self.speed = speed;
        self
    }

    pub fn with_speed_field(mut self, field: impl Into<FieldId>) -> Self {
        self.speed_field = Some(field.into());
        self
    }

    pub fn with_delay(mut self, delay: f32) -> Self {
        self.delay = delay;
        self
    }

    pub fn with_delay_field(mut self, field: impl Into<FieldId>) -> Self {
        self.delay_field = Some(field.into());
        self
    }

    pub fn with_overflow(mut self, overflow: OverflowControl) -> Self {
        self.overflow = overflow;
        self
    }

    pub fn with_adjust_by_total_length(mut self, adjust: bool) -> Self {
        self.adjust_by_total_length = adjust;
        self
    }

    pub fn with_scheduling(mut self, scheduling: SchedulingMode) -> Self {
        self.scheduling = scheduling;
        self
    }

    /// `true` if any dwell can be triggered (constant or per-point).
    #[inline]
    pub fn checks_delay(&self) -> bool {
        self.delay_field.is_some() || self.delay > EPSILON
    }

    /// Reject values that would poison the cursor distance.
    pub fn validate(&self) -> CwResult<()> {
        if !self.speed.is_finite() {
            return Err(CwError::InvalidValue { what: "speed", value: self.speed });
        }
        if !self.delay.is_finite() || self.delay < 0.0 {
            return Err(CwError::InvalidValue { what: "delay", value: self.delay });
        }
        Ok(())
    }
}
