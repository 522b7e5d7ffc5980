//! Runtime context shared by tool construction and every delegate call.
//!
//! The context is read-only input: it selects which backend the vendor
//! client talks to and carries optional scoping such as a workspace id.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::core::error::DomainError;

/// Backend deployment the vendor client targets
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    Dev,
    #[default]
    Prod,
}

impl Environment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Dev => "dev",
            Environment::Prod => "prod",
        }
    }
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Environment {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "dev" => Ok(Environment::Dev),
            "prod" => Ok(Environment::Prod),
            other => Err(DomainError::UnknownEnvironment(other.to_string())),
        }
    }
}

/// Runtime context
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Context {
    /// Backend selector (defaults to prod when unset)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub env: Option<Environment>,
    /// Workspace the integration is scoped to
    #[serde(skip_serializing_if = "Option::is_none")]
    pub workspace: Option<String>,
    /// Explicit API base URL, overrides `env`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,
}

impl Context {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_env(mut self, env: Environment) -> Self {
        self.env = Some(env);
        self
    }

    pub fn with_workspace(mut self, workspace: impl Into<String>) -> Self {
        self.workspace = Some(workspace.into());
        self
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    pub fn environment(&self) -> Environment {
        self.env.unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_environment_is_prod() {
        assert_eq!(Context::new().environment(), Environment::Prod);
        assert_eq!(
            Context::new().with_env(Environment::Dev).environment(),
            Environment::Dev
        );
    }

    #[test]
    fn test_environment_from_str() {
        assert_eq!("DEV".parse::<Environment>().unwrap(), Environment::Dev);
        assert!("staging".parse::<Environment>().is_err());
    }

    #[test]
    fn test_context_rejects_unknown_fields() {
        let result = serde_json::from_str::<Context>(r#"{"env": "dev", "region": "eu"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_context_serializes_only_set_fields() {
        let ctx = Context::new().with_workspace("ws_123");
        let json = serde_json::to_value(&ctx).unwrap();
        assert_eq!(json, serde_json::json!({"workspace": "ws_123"}));
    }
}
