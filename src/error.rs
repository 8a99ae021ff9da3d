use thiserror::Error;

/// Rejection of a pasted or loaded word list. The whole batch is refused.
#[derive(Debug, Error)]
pub enum FormatError {
    #[error("No words found. Copy two columns (English, Korean) from a spreadsheet.")]
    Empty,

    #[error("Row {row} is missing a column. Copy two columns (English, Korean) from a spreadsheet.")]
    MissingColumn { row: usize },

    #[error("could not read word list: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors surfaced by the session store.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("no stored value for `{0}`")]
    NotFound(String),

    #[error("stored value for `{key}` is corrupt: {reason}")]
    Serialization { key: String, reason: String },

    #[error("storage backend error: {0}")]
    Backend(#[from] rusqlite::Error),
}

impl StoreError {
    pub fn serialization(key: &str, reason: impl ToString) -> Self {
        Self::Serialization {
            key: key.to_string(),
            reason: reason.to_string(),
        }
    }

    /// Missing or corrupt state means "no active session": the flow goes
    /// back to intake instead of failing.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::NotFound(_) | Self::Serialization { .. })
    }
}

/// Errors that end the terminal application.
#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
