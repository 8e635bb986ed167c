//! Storage-specific error type.

use fieldlink_domain::error::FieldlinkError;

/// Errors originating from the in-memory storage layer.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// A thread panicked while holding the store lock.
    #[error("{0} lock poisoned")]
    Poisoned(&'static str),
}

impl From<StorageError> for FieldlinkError {
    fn from(err: StorageError) -> Self {
        Self::Storage(Box::new(err))
    }
}
