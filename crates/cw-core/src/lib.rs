//! `cw-core` — foundational types for the `curvewalk` cursor engine.
//!
//! This crate is a dependency of every other `cw-*` crate.  It intentionally
//! has no `cw-*` dependencies and minimal external ones (only `thiserror`,
//! plus optional `serde`).
//!
//! # What lives here
//!
//! | Module          | Contents                                                   |
//! |-----------------|------------------------------------------------------------|
//! | [`ids`]         | `PointIndex`, `SubscriptionId`, `FieldId`                  |
//! | [`time`]        | `Tick`, `Timestamp`, `SimClock`                            |
//! | [`config`]      | `TraversalConfig`, `OverflowControl`, `SchedulingMode`     |
//! | [`error`]       | `CwError`, `CwResult`                                      |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |
//!           | Required by hosts that persist traversal configuration.    |

pub mod config;
pub mod error;
pub mod ids;
pub mod time;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use config::{EPSILON, OverflowControl, SPEED_THRESHOLD, SchedulingMode, TraversalConfig};
pub use error::{CwError, CwResult};
pub use ids::{FieldId, PointIndex, SubscriptionId};
pub use time::{SimClock, Tick, Timestamp};
