//! Simulated time model.
//!
//! # Design
//!
//! Two notions of time coexist:
//!
//! - `Tick` — a monotonically increasing step counter, one per call to the
//!   engine.  Used for logging and output rows.
//! - `Timestamp` — simulated seconds since the engine was created, the sum
//!   of every `dt` handed to the engine.  Dwell timing compares two
//!   timestamps, so it tolerates variable tick rates.
//!
//! Timestamps are `f64` even though distances are `f32`: the clock keeps
//! accumulating for the whole lifetime of an engine and `f32` loses
//! sub-millisecond resolution after a few hours.

use std::fmt;

// ── Tick ─────────────────────────────────────────────────────────────────────

/// An absolute tick counter.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tick(pub u64);

impl Tick {
    pub const ZERO: Tick = Tick(0);

    /// Return the tick `n` steps after `self`.
    #[inline]
    pub fn offset(self, n: u64) -> Tick {
        Tick(self.0 + n)
    }
}

impl std::ops::Add<u64> for Tick {
    type Output = Tick;
    #[inline]
    fn add(self, rhs: u64) -> Tick {
        Tick(self.0 + rhs)
    }
}

impl std::ops::Sub for Tick {
    type Output = u64;
    #[inline]
    fn sub(self, rhs: Tick) -> u64 {
        self.0 - rhs.0
    }
}

impl fmt::Display for Tick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "T{}", self.0)
    }
}

// ── Timestamp ────────────────────────────────────────────────────────────────

/// Simulated seconds since clock creation.
#[derive(Copy, Clone, PartialEq, PartialOrd, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Timestamp(pub f64);

impl Timestamp {
    pub const ZERO: Timestamp = Timestamp(0.0);

    /// Seconds elapsed from `earlier` to `self`, never negative.
    #[inline]
    pub fn since(self, earlier: Timestamp) -> f64 {
        (self.0 - earlier.0).max(0.0)
    }

    #[inline]
    pub fn secs(self) -> f64 {
        self.0
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.3}s", self.0)
    }
}

// ── SimClock ──────────────────────────────────────────────────────────────────

/// Monotonic simulated clock advanced by the `dt` of every tick.
///
/// Negative or non-finite steps are ignored so the clock can never run
/// backwards.
#[derive(Clone, Debug, Default)]
pub struct SimClock {
    now:   Timestamp,
    ticks: Tick,
}

impl SimClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance the clock by `dt` seconds and count one tick.
    #[inline]
    pub fn advance(&mut self, dt: f32) {
        if dt.is_finite() && dt > 0.0 {
            self.now = Timestamp(self.now.0 + dt as f64);
        }
        self.ticks = self.ticks + 1;
    }

    /// Current simulated time.
    #[inline]
    pub fn now(&self) -> Timestamp {
        self.now
    }

    /// Number of ticks observed so far.
    #[inline]
    pub fn ticks(&self) -> Tick {
        self.ticks
    }
}

impl fmt::Display for SimClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.ticks, self.now)
    }
}
