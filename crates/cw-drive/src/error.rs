use cw_core::CwError;
use cw_traverse::TraverseError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DriveError {
    #[error("driver configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Core(#[from] CwError),

    #[error("traversal error: {0}")]
    Traverse(#[from] TraverseError),
}

pub type DriveResult<T> = Result<T, DriveError>;
