use std::io;

/// Errors raised while building or reading a dataset file.
///
/// None of these are recovered inside the crate: a dataset file is either
/// written completely or must be treated as invalid by the caller.
#[derive(Debug, thiserror::Error)]
pub enum DatasetError {
    /// Annotation, frame or dataset input that cannot be used as given.
    #[error("Invalid input: {0}")]
    Input(String),

    /// A record that does not fit the fixed-width length field.
    #[error("Encoding failed: {0}")]
    Encoding(String),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl From<serde_json::Error> for DatasetError {
    fn from(e: serde_json::Error) -> Self {
        DatasetError::Input(format!("failed to parse annotations: {}", e))
    }
}

pub type Result<T> = std::result::Result<T, DatasetError>;
