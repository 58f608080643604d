//! Error types for degree-drill

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DrillError {
    #[error("Invalid root note '{name}'. Valid options include: {valid}")]
    UnknownRoot { name: String, valid: String },
    #[error("No valid scale degrees given")]
    NoDegrees,
    #[error("No valid root notes given")]
    NoRoots,
}

pub type Result<T> = std::result::Result<T, DrillError>;
