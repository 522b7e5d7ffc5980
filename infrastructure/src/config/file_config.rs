//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly and use domain types where appropriate.
//!
//! ```toml
//! workspace = "ws_123"
//!
//! [api]
//! env = "dev"
//! endpoint = "http://localhost:8080"
//! timeout_seconds = 30
//!
//! [logging]
//! level = "debug"
//! file = "/tmp/siren-mcp.log"
//! ```

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use siren_domain::{Context, Environment};
use thiserror::Error;

/// Configuration validation errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigValidationError {
    #[error("api.timeout_seconds cannot be 0")]
    InvalidTimeout,

    #[error("api.endpoint cannot be empty")]
    EmptyEndpoint,
}

/// Raw `[api]` section
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileApiConfig {
    /// Backend environment (dev or prod)
    pub env: Option<Environment>,
    /// Explicit base URL, overrides `env`
    pub endpoint: Option<String>,
    /// HTTP request timeout
    pub timeout_seconds: u64,
}

impl Default for FileApiConfig {
    fn default() -> Self {
        Self {
            env: None,
            endpoint: None,
            timeout_seconds: 30,
        }
    }
}

/// Raw `[logging]` section
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileLoggingConfig {
    /// Filter directive used when no `-v` flag or `RUST_LOG` is given
    pub level: Option<String>,
    /// Write logs to this file instead of stderr
    pub file: Option<PathBuf>,
}

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Workspace id (`ws_...`)
    pub workspace: Option<String>,
    /// API settings
    pub api: FileApiConfig,
    /// Logging settings
    pub logging: FileLoggingConfig,
}

impl FileConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if self.api.timeout_seconds == 0 {
            return Err(ConfigValidationError::InvalidTimeout);
        }

        if let Some(endpoint) = &self.api.endpoint
            && endpoint.trim().is_empty()
        {
            return Err(ConfigValidationError::EmptyEndpoint);
        }

        Ok(())
    }

    /// Runtime context described by this file
    pub fn to_context(&self) -> Context {
        Context {
            env: self.api.env,
            workspace: self.workspace.clone(),
            endpoint: self.api.endpoint.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_full_config() {
        let toml_str = r#"
workspace = "ws_123"

[api]
env = "dev"
endpoint = "http://localhost:8080"
timeout_seconds = 10

[logging]
level = "debug"
file = "/tmp/siren.log"
"#;

        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.workspace.as_deref(), Some("ws_123"));
        assert_eq!(config.api.env, Some(Environment::Dev));
        assert_eq!(config.api.timeout_seconds, 10);
        assert_eq!(config.logging.level.as_deref(), Some("debug"));
        assert_eq!(config.logging.file, Some(PathBuf::from("/tmp/siren.log")));
    }

    #[test]
    fn test_deserialize_partial_config() {
        let config: FileConfig = toml::from_str("[api]\nenv = \"prod\"\n").unwrap();
        assert_eq!(config.api.env, Some(Environment::Prod));
        // Defaults should apply
        assert_eq!(config.api.timeout_seconds, 30);
        assert!(config.workspace.is_none());
        assert!(config.logging.file.is_none());
    }

    #[test]
    fn test_unknown_env_rejected() {
        let result = toml::from_str::<FileConfig>("[api]\nenv = \"staging\"\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_validate_valid_config() {
        assert!(FileConfig::default().validate().is_ok());
    }

    #[test]
    fn test_validate_zero_timeout() {
        let config: FileConfig = toml::from_str("[api]\ntimeout_seconds = 0\n").unwrap();
        assert_eq!(config.validate(), Err(ConfigValidationError::InvalidTimeout));
    }

    #[test]
    fn test_validate_empty_endpoint() {
        let config: FileConfig = toml::from_str("[api]\nendpoint = \" \"\n").unwrap();
        assert_eq!(config.validate(), Err(ConfigValidationError::EmptyEndpoint));
    }

    #[test]
    fn test_to_context() {
        let config: FileConfig =
            toml::from_str("workspace = \"ws_9\"\n[api]\nendpoint = \"http://x\"\n").unwrap();
        let context = config.to_context();
        assert_eq!(context.workspace.as_deref(), Some("ws_9"));
        assert_eq!(context.endpoint.as_deref(), Some("http://x"));
        assert_eq!(context.env, None);
    }
}
