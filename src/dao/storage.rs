use std::error::Error;
use thiserror::Error;

/// Result alias for game store operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Error raised by game stores regardless of the underlying database.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The backend could not be reached or refused the operation.
    #[error("storage unavailable: {message}")]
    Unavailable {
        message: String,
        #[source]
        source: Box<dyn Error + Send + Sync>,
    },
    /// A stored game no longer maps onto a quote game.
    #[error("corrupt game record: {0}")]
    Corrupt(String),
}

impl StorageError {
    /// Wrap any backend failure as an unavailable error.
    pub fn unavailable(message: String, source: impl Error + Send + Sync + 'static) -> Self {
        StorageError::Unavailable {
            message,
            source: Box::new(source),
        }
    }
}
