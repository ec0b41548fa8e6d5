use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, AcoError>;

#[derive(Error, Debug)]
pub enum AcoError {
    /// Rejected at construction time: too few locations, coincident points,
    /// or hyperparameters out of range.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("line {line}: {message}")]
    Parse { line: usize, message: String },

    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A tour that is not a permutation of all locations. Always a bug.
    #[error("invariant violation: {0}")]
    InvariantViolation(String),
}
