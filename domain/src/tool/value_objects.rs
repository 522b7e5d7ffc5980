//! Tool domain value objects: what a delegate hands back to the facade
//!
//! A delegate never raises vendor errors. It returns a [`ToolOutput`]:
//!
//! | Variant | Serialized as |
//! |---------|---------------|
//! | `Success(value)` | `value` itself |
//! | `Failure(..)` | `{"error": "Failed to ...", "details": "..."}` |

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Descriptive failure returned in place of a vendor error
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolFailure {
    /// Fixed per-tool message (e.g., "Failed to add user")
    pub error: String,
    /// Vendor error text, when available
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ToolFailure {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            details: None,
        }
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }
}

impl std::fmt::Display for ToolFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.error)?;
        if let Some(details) = &self.details {
            write!(f, " ({})", details)?;
        }
        Ok(())
    }
}

/// Result of running one delegate
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ToolOutput {
    Success(Value),
    Failure(ToolFailure),
}

impl ToolOutput {
    pub fn success(value: impl Into<Value>) -> Self {
        ToolOutput::Success(value.into())
    }

    pub fn failure(error: impl Into<String>, details: impl Into<String>) -> Self {
        ToolOutput::Failure(ToolFailure::new(error).with_details(details))
    }

    pub fn is_success(&self) -> bool {
        matches!(self, ToolOutput::Success(_))
    }

    /// JSON value as exposed to hosts
    pub fn to_value(&self) -> Value {
        match self {
            ToolOutput::Success(value) => value.clone(),
            ToolOutput::Failure(failure) => {
                let mut map = serde_json::Map::new();
                map.insert("error".to_string(), Value::String(failure.error.clone()));
                if let Some(details) = &failure.details {
                    map.insert("details".to_string(), Value::String(details.clone()));
                }
                Value::Object(map)
            }
        }
    }

    /// JSON text as exposed to hosts
    pub fn to_text(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}
