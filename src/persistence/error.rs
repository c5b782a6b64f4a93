//! Persistence error types

use thiserror::Error;

/// Errors that can occur when loading or saving the objective list
#[derive(Error, Debug)]
pub enum PersistenceError {
    /// I/O operation failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The backing store cannot be reached (e.g. storage disabled)
    #[error("Storage unavailable: {0}")]
    Unavailable(String),

    /// The backing store refused the write because it is full
    #[error("Storage quota exceeded")]
    QuotaExceeded,

    /// Stored data is not a JSON array of objectives
    #[error("Corrupt data: {0}")]
    Corrupt(String),
}

impl From<serde_json::Error> for PersistenceError {
    fn from(err: serde_json::Error) -> Self {
        PersistenceError::Corrupt(err.to_string())
    }
}

/// Result type alias for persistence operations
pub type PersistenceResult<T> = Result<T, PersistenceError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        assert_eq!(
            PersistenceError::QuotaExceeded.to_string(),
            "Storage quota exceeded"
        );
        assert_eq!(
            PersistenceError::Unavailable("no window".into()).to_string(),
            "Storage unavailable: no window"
        );
    }

    #[test]
    fn test_json_error_is_corrupt() {
        let err = serde_json::from_str::<Vec<u8>>("{").unwrap_err();
        let err: PersistenceError = err.into();
        assert!(matches!(err, PersistenceError::Corrupt(_)));
    }
}
