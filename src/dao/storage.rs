use std::error::Error;
use thiserror::Error;

/// Result alias for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Error raised by storage backends regardless of the underlying medium.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage unavailable: {message}")]
    Unavailable {
        message: String,
        #[source]
        source: Box<dyn Error + Send + Sync>,
    },
    /// Record keys double as file names, so only a safe alphabet is accepted.
    #[error("invalid record key `{key}`")]
    InvalidKey { key: String },
    #[error("failed to encode record `{key}`")]
    Encode {
        key: &'static str,
        #[source]
        source: serde_json::Error,
    },
    #[error("corrupt record `{key}`")]
    Corrupt {
        key: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

impl StorageError {
    /// Construct an unavailable error from any backend failure.
    pub fn unavailable(message: String, source: impl Error + Send + Sync + 'static) -> Self {
        StorageError::Unavailable {
            message,
            source: Box::new(source),
        }
    }
}
