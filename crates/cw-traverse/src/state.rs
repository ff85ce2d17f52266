//! Transient traversal state.

use cw_core::{PointIndex, Timestamp};

/// A dwell in progress: the cursor is pinned to `point`.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Dwell {
    pub point: PointIndex,

    /// Clock reading when the point was reached.
    pub since: Timestamp,

    /// Direction of the motion that reached the point; the cursor leaves in
    /// the same direction.
    pub forward: bool,

    /// The point is the end of the curve that the cursor was running past.
    /// The overflow policy is applied once the dwell completes.
    pub boundary: bool,

    /// Section to continue from so `point` is not reported a second time.
    pub resume_section: usize,
}

/// What the engine does on the next tick.
#[derive(Copy, Clone, Debug, PartialEq, Default)]
pub enum Phase {
    #[default]
    Moving,
    Delayed(Dwell),
    Stopped,
}

impl Phase {
    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Moving     => "moving",
            Phase::Delayed(_) => "delayed",
            Phase::Stopped    => "stopped",
        }
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Traversal state owned by one engine.  Never persisted.
#[derive(Clone, Debug, PartialEq, Default)]
pub struct TraversalState {
    /// Section the cursor was in at the end of the last tracked step.  May
    /// lag while lookups are skipped; read it through
    /// [`TraversalEngine::section`](crate::TraversalEngine::section).
    pub section: usize,

    /// Flipped by every ping-pong bounce; negates resolved speeds.
    pub reversed: bool,

    pub phase: Phase,

    /// One-shot: do not report the boundary point the next time it is
    /// crossed.  Cleared at the end of every movement step.
    pub skip_seam: bool,
}

impl TraversalState {
    pub fn new() -> Self {
        Self::default()
    }
}
