//! Webhook requests

use serde::{Deserialize, Serialize};

/// Target for notification status or inbound message webhooks
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WebhookConfig {
    pub url: String,
    /// Shared secret used to verify webhook signatures
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secret: Option<String>,
}
