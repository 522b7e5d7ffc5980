//! Permission model: which tools an integration may expose.
//!
//! Every tool declares the [`RequiredActions`] it needs as a set of
//! `(Resource, Permission)` pairs. A [`Configuration`](crate::config::Configuration)
//! may carry an [`Actions`] grant set; the filter ([`is_tool_allowed`]) enables a
//! tool only when **every** required pair is explicitly granted.
//!
//! | Grant set | Result |
//! |-----------|--------|
//! | absent | every tool allowed |
//! | present, all required pairs `true` | allowed |
//! | present, any pair missing or `false` | denied |
//!
//! A tool with no required pairs is allowed under any grant set (vacuous truth).

mod actions;

pub use actions::{Actions, RequiredActions};

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::config::Configuration;
use crate::core::error::DomainError;
use crate::tool::entities::ToolDescriptor;

/// Resource category of the notification API
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Resource {
    Messaging,
    Templates,
    Users,
    Workflows,
    Webhooks,
    Chat,
}

impl Resource {
    pub const ALL: [Resource; 6] = [
        Resource::Messaging,
        Resource::Templates,
        Resource::Users,
        Resource::Workflows,
        Resource::Webhooks,
        Resource::Chat,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Resource::Messaging => "messaging",
            Resource::Templates => "templates",
            Resource::Users => "users",
            Resource::Workflows => "workflows",
            Resource::Webhooks => "webhooks",
            Resource::Chat => "chat",
        }
    }
}

impl std::fmt::Display for Resource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Resource {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Resource::ALL
            .into_iter()
            .find(|r| r.as_str() == s)
            .ok_or_else(|| DomainError::UnknownResource(s.to_string()))
    }
}

/// Permission on a resource
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Permission {
    Create,
    Read,
    Update,
    Delete,
    Trigger,
    Schedule,
    Message,
    End,
}

impl Permission {
    pub const ALL: [Permission; 8] = [
        Permission::Create,
        Permission::Read,
        Permission::Update,
        Permission::Delete,
        Permission::Trigger,
        Permission::Schedule,
        Permission::Message,
        Permission::End,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Permission::Create => "create",
            Permission::Read => "read",
            Permission::Update => "update",
            Permission::Delete => "delete",
            Permission::Trigger => "trigger",
            Permission::Schedule => "schedule",
            Permission::Message => "message",
            Permission::End => "end",
        }
    }
}

impl std::fmt::Display for Permission {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Permission {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Permission::ALL
            .into_iter()
            .find(|p| p.as_str() == s)
            .ok_or_else(|| DomainError::UnknownPermission(s.to_string()))
    }
}

/// Decide whether a tool is enabled under the given configuration.
///
/// Default-open when unconfigured, default-closed per pair when configured.
pub fn is_tool_allowed(tool: &ToolDescriptor, configuration: Option<&Configuration>) -> bool {
    let Some(actions) = configuration.and_then(|c| c.actions.as_ref()) else {
        return true;
    };

    tool.required_actions
        .iter()
        .all(|(resource, permission)| actions.is_granted(resource, permission))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn send_message_descriptor() -> ToolDescriptor {
        ToolDescriptor::new("send_message", "Send Message", "Send a message")
            .requires(Resource::Messaging, Permission::Create)
    }

    #[test]
    fn test_allowed_without_configuration() {
        assert!(is_tool_allowed(&send_message_descriptor(), None));
    }

    #[test]
    fn test_allowed_when_configuration_has_no_actions() {
        let config = Configuration::default();
        assert!(is_tool_allowed(&send_message_descriptor(), Some(&config)));
    }

    #[test]
    fn test_allowed_when_actions_match() {
        let config = Configuration::new()
            .with_actions(Actions::new().grant(Resource::Messaging, Permission::Create));
        assert!(is_tool_allowed(&send_message_descriptor(), Some(&config)));
    }

    #[test]
    fn test_denied_when_permission_false() {
        let mut actions = Actions::new();
        actions.set(Resource::Messaging, Permission::Create, false);
        let config = Configuration::new().with_actions(actions);
        assert!(!is_tool_allowed(&send_message_descriptor(), Some(&config)));
    }

    #[test]
    fn test_denied_when_resource_absent() {
        let config = Configuration::new()
            .with_actions(Actions::new().grant(Resource::Templates, Permission::Create));
        assert!(!is_tool_allowed(&send_message_descriptor(), Some(&config)));
    }

    #[test]
    fn test_partial_grant_is_denied() {
        let tool = ToolDescriptor::new("combo", "Combo", "Needs two pairs")
            .requires(Resource::Templates, Permission::Read)
            .requires(Resource::Templates, Permission::Update);
        let config = Configuration::new()
            .with_actions(Actions::new().grant(Resource::Templates, Permission::Read));
        assert!(!is_tool_allowed(&tool, Some(&config)));

        let config = Configuration::new().with_actions(
            Actions::new()
                .grant(Resource::Templates, Permission::Read)
                .grant(Resource::Templates, Permission::Update),
        );
        assert!(is_tool_allowed(&tool, Some(&config)));
    }

    #[test]
    fn test_empty_required_actions_is_vacuously_allowed() {
        let tool = ToolDescriptor::new("noop", "Noop", "Requires nothing");
        let config = Configuration::new().with_actions(Actions::new());
        assert!(is_tool_allowed(&tool, Some(&config)));
    }

    #[test]
    fn test_filter_is_pure() {
        let tool = send_message_descriptor();
        let config = Configuration::new()
            .with_actions(Actions::new().grant(Resource::Messaging, Permission::Read));
        let first = is_tool_allowed(&tool, Some(&config));
        let second = is_tool_allowed(&tool, Some(&config));
        assert_eq!(first, second);
        assert!(!first);
    }

    #[test]
    fn test_resource_from_str() {
        assert_eq!("workflows".parse::<Resource>().unwrap(), Resource::Workflows);
        assert!("billing".parse::<Resource>().is_err());
    }

    #[test]
    fn test_permission_from_str() {
        assert_eq!("schedule".parse::<Permission>().unwrap(), Permission::Schedule);
        assert_eq!(
            "send".parse::<Permission>().unwrap_err(),
            DomainError::UnknownPermission("send".to_string())
        );
    }
}
