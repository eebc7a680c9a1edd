//! Help desk error taxonomy.
//!
//! Validation, NotFound and Forbidden carry caller-correctable text shown to the user as is.
//! Storage failures are shown generically and logged for operators.

use helpdesk_core::CoreError;
use storage::StorageError;
use thiserror::Error;
use tracing::error;

/// Message shown to the user for any storage failure.
pub const OPERATION_FAILED: &str = "Operation failed.";

#[derive(Error, Debug)]
pub enum HelpdeskError {
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Forbidden(String),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

impl HelpdeskError {
    /// Text for the UI layer. Storage failures are logged here and replaced by a generic message.
    pub fn user_message(&self) -> String {
        match self {
            HelpdeskError::Validation(msg)
            | HelpdeskError::NotFound(msg)
            | HelpdeskError::Forbidden(msg) => msg.clone(),
            HelpdeskError::Storage(e) => {
                error!(error = %e, "Help desk storage failure");
                OPERATION_FAILED.to_string()
            }
        }
    }
}

impl From<CoreError> for HelpdeskError {
    fn from(e: CoreError) -> Self {
        HelpdeskError::Validation(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, HelpdeskError>;
