use thiserror::Error;

use crate::models::common::LifecyclePhase;

/// Custom error types for Parcelflow
#[derive(Debug, Error)]
pub enum ParcelflowError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Failed to load fixture {path}: {message}")]
    FixtureError { path: String, message: String },

    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    #[error("Property not found: {0}")]
    PropertyNotFound(String),

    #[error("Process {process_id} not found on property {property_id}")]
    ProcessNotFound { property_id: String, process_id: String },

    #[error("Process {0} must be completed before it can be archived")]
    ProcessNotCompleted(String),

    #[error("No transition rule from {from} to {to}")]
    TransitionNotDefined { from: LifecyclePhase, to: LifecyclePhase },

    #[error("Transition from {from} to {to} is not allowed: {reason}")]
    TransitionConditionsUnmet { from: LifecyclePhase, to: LifecyclePhase, reason: String },

    #[error("Workflow API error: {0}")]
    WorkflowApiError(String),

    #[error("Workflow API returned HTTP {status}: {message}")]
    WorkflowHttpError { status: u16, message: String },

    #[error(transparent)]
    IoError(#[from] std::io::Error),

    #[error(transparent)]
    JsonError(#[from] serde_json::Error),
}

/// Result type specific to Parcelflow operations
pub type ParcelflowResult<T> = Result<T, ParcelflowError>;

impl ParcelflowError {
    /// Whether retrying the same call may succeed
    pub fn is_transient(&self) -> bool {
        match self {
            ParcelflowError::WorkflowApiError(_) => true,
            ParcelflowError::WorkflowHttpError { status, .. } => *status >= 500,
            _ => false,
        }
    }
}
