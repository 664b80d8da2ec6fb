//! Error types for looms, version comparison and weaving

use thiserror::Error;

use crate::schema::Violations;

/// Result type for loom operations
pub type Result<T> = std::result::Result<T, LoomError>;

/// Loom errors
#[derive(Error, Debug)]
pub enum LoomError {
    #[error("Invalid options: {violations}")]
    OptionsValidation { violations: Violations },

    #[error("Invalid input item at index {index}: {violations}")]
    InputValidation { index: usize, violations: Violations },

    #[error("Malformed request: {0}")]
    MalformedRequest(String),

    #[error("Preset not found: {name} (available: {})", .available.join(", "))]
    PresetNotFound { name: String, available: Vec<String> },

    #[error("Schema '{name}' does not compile: {reason}")]
    InvalidSchema { name: String, reason: String },

    #[error("Invalid version: {0}")]
    InvalidVersion(String),

    #[error("Invalid comparison operator: {0}")]
    InvalidOperator(String),

    #[error("Bundled dataset not found: {0}")]
    BundledNotFound(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl LoomError {
    /// The violations behind a validation failure, if this is one
    pub fn violations(&self) -> Option<&Violations> {
        match self {
            LoomError::OptionsValidation { violations }
            | LoomError::InputValidation { violations, .. } => Some(violations),
            _ => None,
        }
    }
}

/// Errors raised by [`crate::weave::weave`]
#[derive(Error, Debug)]
pub enum WeaveError {
    #[error("Input must contain at least one template object")]
    NoTemplates,

    #[error("Amount must be a positive number")]
    InvalidAmount,

    #[error("Template {index} is not a JSON object")]
    NotAnObject { index: usize },

    #[error("Candidate for field '{field}' does not fit the template: {source}")]
    Field {
        field: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
