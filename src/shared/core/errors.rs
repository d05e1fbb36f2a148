// Error taxonomy shared by every use case.
//
// Ports report `StoreError`; pure decision functions report their own `DecideError`s which convert
// into `ApplicationError` so handlers can use `?` throughout.

use thiserror::Error;

use crate::shared::core::business_time::TimeBoundaryError;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("duplicate key: {0}")]
    Duplicate(String),

    #[error("version mismatch: expected {expected}, actual {actual}")]
    VersionMismatch { expected: u64, actual: u64 },

    #[error("backend error: {0}")]
    Backend(String),
}

impl StoreError {
    /// A lost creation or update race. The caller may re-read and try again.
    pub fn is_contention(&self) -> bool {
        matches!(
            self,
            StoreError::Duplicate(_) | StoreError::VersionMismatch { .. }
        )
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ApplicationError {
    #[error("validation failed: {0}")]
    Validation(String),

    #[error("conflict: {0}")]
    Conflict(String),

    #[error("invalid state: {0}")]
    InvalidState(String),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("business rule violated: {0}")]
    BusinessLogic(String),

    #[error("storage failure: {0}")]
    Storage(String),
}

impl ApplicationError {
    pub fn kind(&self) -> &'static str {
        match self {
            ApplicationError::Validation(_) => "validation_error",
            ApplicationError::Conflict(_) => "conflict_error",
            ApplicationError::InvalidState(_) => "invalid_state",
            ApplicationError::NotFound(_) => "not_found_error",
            ApplicationError::BusinessLogic(_) => "business_logic_error",
            ApplicationError::Storage(_) => "storage_error",
        }
    }
}

impl From<StoreError> for ApplicationError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Duplicate(key) => ApplicationError::Conflict(format!("duplicate {key}")),
            StoreError::VersionMismatch { .. } => ApplicationError::Conflict(err.to_string()),
            StoreError::Backend(msg) => ApplicationError::Storage(msg),
        }
    }
}

impl From<TimeBoundaryError> for ApplicationError {
    fn from(err: TimeBoundaryError) -> Self {
        ApplicationError::Validation(err.to_string())
    }
}
