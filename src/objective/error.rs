//! Objective store error types

use thiserror::Error;

use super::types::ObjectiveId;

/// Errors that can occur when addressing objectives in the store
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// No objective carries this id
    #[error("Objective not found: {0}")]
    NotFound(ObjectiveId),

    /// Positional index past the end of the list
    #[error("Index {index} out of range for {len} objectives")]
    IndexOutOfRange { index: usize, len: usize },
}

/// Result type alias for store operations
pub type StoreResult<T> = Result<T, StoreError>;
