//! Domain error types

use thiserror::Error;

/// Domain-level errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Unknown resource: {0}")]
    UnknownResource(String),

    #[error("Unknown permission: {0}")]
    UnknownPermission(String),

    #[error("Unknown environment: {0} (expected 'dev' or 'prod')")]
    UnknownEnvironment(String),
}

/// Tool input failed schema validation.
///
/// Raised before any network call. `field` is a dotted path into the
/// arguments object (e.g. `configurations.EMAIL.subject`, `buttons[0].text`).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Invalid arguments for '{tool}': {field}: {message}")]
pub struct ValidationError {
    pub tool: String,
    pub field: String,
    pub message: String,
}

impl ValidationError {
    pub fn new(
        tool: impl Into<String>,
        field: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            tool: tool.into(),
            field: field.into(),
            message: message.into(),
        }
    }
}
