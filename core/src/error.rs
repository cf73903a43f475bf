use thiserror::Error;

use crate::CellCount;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Board dimensions must be non-zero")]
    EmptyBoard,
    #[error("Too many mines, requested {requested} but only {capacity} fit")]
    TooManyMines {
        requested: CellCount,
        capacity: CellCount,
    },
    #[error("Mine density must be a finite value between 0 and 1")]
    InvalidDensity,
    #[error("Cell index {index} out of range for a board of {len} cells")]
    IndexOutOfRange { index: usize, len: usize },
    #[error("Board shape does not match declared size")]
    InvalidBoardShape,
}

impl GameError {
    /// Errors raised while constructing a board or its configuration.
    pub const fn is_invalid_argument(self) -> bool {
        !matches!(self, Self::IndexOutOfRange { .. })
    }
}

pub type Result<T> = core::result::Result<T, GameError>;
