//! `cw-traverse` — the tick-driven cursor traversal engine.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                          |
//! |-------------|-------------------------------------------------------------------|
//! | [`engine`]  | `TraversalEngine` — advances the cursor, detects crossings         |
//! | [`resolve`] | `SpeedResolver`, `DelayResolver` — constant or per-point values    |
//! | [`events`]  | `PointObserver`, `EventEmitter`, `PointReached`                    |
//! | [`state`]   | `TraversalState`, `Phase`, `Dwell` — transient per-engine state    |
//! | [`error`]   | `TraverseError`, `TraverseResult<T>`                               |
//!
//! # Movement model
//!
//! The cursor is a distance along a curve measured in arc length.  Every
//! tick it moves by `speed * dt`, where `speed` comes from the configured
//! constant or from a per-point field on the section the cursor is in.
//!
//! 1. Every point strictly passed during the step is reported through the
//!    [`EventEmitter`], in traversal order.
//! 2. If a point carries a positive delay, the cursor is pinned there and
//!    the rest of the step is discarded.  After the delay has elapsed on
//!    the engine clock the cursor continues in the same direction.
//! 3. Running past either end applies the configured
//!    [`OverflowControl`][cw_core::OverflowControl]: stop, wrap around, or
//!    bounce back.  Points are reported on both sides of the end.
//!
//! Crossing detection only runs when it can matter: when a delay is
//! configured or somebody is subscribed.

pub mod engine;
pub mod error;
pub mod events;
pub mod resolve;
pub mod state;


pub use engine::{TickOutcome, TraversalEngine};
pub use error::{TraverseError, TraverseResult};
pub use events::{EventEmitter, PointObserver, PointReached};
pub use resolve::{DelayResolver, Resolved, SpeedResolver};
pub use state::{Dwell, Phase, TraversalState};
