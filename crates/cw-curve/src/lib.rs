//! `cw-curve` — the curve-side collaborators of the traversal engine.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                        |
//! |-------------|-----------------------------------------------------------------|
//! | [`math`]    | `CurveMath` and `FieldResolver` traits, `NoFields`              |
//! | [`table`]   | `ArcTable` (precomputed arc offsets + fields), `ArcTableBuilder` |
//! | [`sample`]  | `sample_field` — per-point field interpolated at a distance     |
//! | [`error`]   | `CurveError`, `CurveResult<T>`                                  |
//!
//! The engine only ever talks to the two traits.  Hosts with their own curve
//! representation (Bezier splines, imported paths, …) implement them
//! directly; `ArcTable` is the reference implementation used by tests and
//! the demo.
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                       |
//! |---------|--------------------------------------------------------------|
//! | `serde` | Derives `Serialize`/`Deserialize` on `ArcTable`.             |

pub mod error;
pub mod math;
pub mod sample;
pub mod table;

#[cfg(test)]
mod tests;

pub use error::{CurveError, CurveResult};
pub use math::{CurveMath, FieldResolver, NoFields};
pub use sample::sample_field;
pub use table::{ArcTable, ArcTableBuilder};
