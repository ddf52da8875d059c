use std::io;
use thiserror::Error;

/// Everything that can go wrong before or around a tour. Running out of moves
/// and being cancelled are outcomes, not errors; see `tour::TourOutcome`.
#[derive(Debug, Error)]
pub enum TourError {
    #[error("start square ({row}, {col}) is outside the {size}x{size} board")]
    InvalidStart { row: i32, col: i32, size: usize },

    #[error("'{0}' is not a square; expected a file A-H followed by a rank 1-8")]
    InvalidSquare(String),

    #[error(transparent)]
    Io(#[from] io::Error),
}
