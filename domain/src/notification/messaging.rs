//! Messaging requests

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// How `recipient_value` should be interpreted
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecipientType {
    /// A user id known to the vendor
    UserId,
    /// A raw channel address (email, phone, Slack id...)
    #[default]
    Direct,
}

impl RecipientType {
    pub fn as_str(&self) -> &'static str {
        match self {
            RecipientType::UserId => "user_id",
            RecipientType::Direct => "direct",
        }
    }
}

/// Send a message either from a template or with a literal body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SendMessageRequest {
    /// Defaults to [`RecipientType::Direct`] when omitted
    #[serde(default)]
    pub recipient_type: RecipientType,
    pub recipient_value: String,
    /// Channel name, e.g. "SLACK" or "EMAIL"
    pub channel: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template_variables: Option<Map<String, Value>>,
}
