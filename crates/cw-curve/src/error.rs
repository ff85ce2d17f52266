//! Curve-subsystem error type.

use thiserror::Error;

use cw_core::PointIndex;

/// Errors produced while building an [`ArcTable`][crate::ArcTable].
#[derive(Debug, Error, PartialEq)]
pub enum CurveError {
    #[error("arc offset of {point} is not finite")]
    NonFinite { point: PointIndex },

    #[error("first point must sit at offset 0, got {0}")]
    StartNotZero(f32),

    #[error("arc offset of {point} ({offset}) is smaller than its predecessor ({previous})")]
    Decreasing { point: PointIndex, offset: f32, previous: f32 },

    #[error("closed curve length {total} is shorter than the last point offset {last}")]
    TotalTooShort { total: f32, last: f32 },

    #[error("{0} is out of range")]
    PointOutOfRange(PointIndex),
}

pub type CurveResult<T> = Result<T, CurveError>;
