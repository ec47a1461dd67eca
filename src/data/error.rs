use std::path::PathBuf;

use thiserror::Error;

/// Errors raised by the table engine.
///
/// The `Display` text is what the interactive session prints back to the
/// user, so keep it short and human-readable.
#[derive(Debug, Error)]
pub enum DataError {
    /// Bad extension, numeric header, malformed schema row, missing region column.
    #[error("{0}")]
    Format(String),

    #[error("couldn't open the file {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Out-of-range region/column id or non-numeric selection.
    #[error("{0}")]
    Range(String),

    #[error("{0}")]
    TypeMismatch(String),
}

impl DataError {
    pub fn format(msg: impl Into<String>) -> Self {
        DataError::Format(msg.into())
    }

    pub fn range(msg: impl Into<String>) -> Self {
        DataError::Range(msg.into())
    }
}

pub type Result<T> = std::result::Result<T, DataError>;
