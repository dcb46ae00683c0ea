use thiserror::Error;

/// Error type definitions
#[derive(Error, Debug)]
pub enum Error {
    #[error("Empty time range: {0}")]
    EmptyRange(String),

    #[error("Reducer returned {found} values, expected {expected}")]
    ReducerArity { expected: usize, found: usize },

    #[error("Alignment error: {0}")]
    Alignment(String),

    #[error("Inconsistent row width: expected {expected}, found {found}")]
    InconsistentRowWidth { expected: usize, found: usize },

    #[error("Length mismatch: expected {expected}, actual {actual}")]
    LengthMismatch { expected: usize, actual: usize },

    #[error("Duplicate member name: {0}")]
    DuplicateMember(String),

    #[error("Member not found: {0}")]
    MemberNotFound(String),

    #[error("Invalid frequency: {0}")]
    InvalidFrequency(String),

    #[error("JSON error")]
    Json(#[source] serde_json::Error),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Json(err)
    }
}
