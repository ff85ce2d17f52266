use cw_core::CwError;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum TraverseError {
    #[error(transparent)]
    Core(#[from] CwError),

    #[error("point crossing did not settle within {limit} points")]
    CrossingOverrun { limit: usize },

    #[error("cursor distance {0} is not finite")]
    InvalidDistance(f32),
}

pub type TraverseResult<T> = Result<T, TraverseError>;
