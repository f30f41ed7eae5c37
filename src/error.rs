use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Grid dimensions must be at least 1x1")]
    InvalidDimension,
    #[error("Invalid coordinates")]
    InvalidCoords,
    #[error("No self-avoiding path of the requested length within the step budget")]
    UnreachableLength,
    #[error("Cells do not form a self-avoiding path")]
    InvalidPath,
    #[error("Operation not allowed in the current session state")]
    InvalidTransition,
}

pub type Result<T> = core::result::Result<T, GameError>;
