//! Notification client port
//!
//! Defines the interface to the vendor notification API. One method per
//! operation; the HTTP implementation lives in the infrastructure layer.

use async_trait::async_trait;
use serde_json::Value;
use siren_domain::notification::{
    ChatEndRequest, ChatMessageRequest, CreateTemplateRequest, ScheduleWorkflowRequest,
    SendMessageRequest, TemplateQuery, UpdateTemplateRequest, UserRequest, WebhookConfig,
    WorkflowBulkTriggerRequest, WorkflowTriggerRequest,
};
use thiserror::Error;

/// Errors that can occur while talking to the vendor API
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ClientError {
    #[error("HTTP error: {0}")]
    Http(String),

    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("Failed to decode response: {0}")]
    Decode(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    /// An id that cannot stand as a single URL path segment
    #[error("Invalid path segment: {0:?}")]
    InvalidPath(String),
}

/// Client for the vendor notification API
///
/// Delegates call exactly one method per tool invocation and turn any
/// `ClientError` into a descriptive tool failure.
#[async_trait]
pub trait NotificationClient: Send + Sync {
    /// Send a message; returns the notification id
    async fn send_message(&self, request: &SendMessageRequest) -> Result<String, ClientError>;

    async fn message_status(&self, message_id: &str) -> Result<Value, ClientError>;

    async fn message_replies(&self, message_id: &str) -> Result<Value, ClientError>;

    async fn list_templates(&self, query: &TemplateQuery) -> Result<Value, ClientError>;

    async fn create_template(&self, request: &CreateTemplateRequest)
    -> Result<Value, ClientError>;

    async fn update_template(
        &self,
        template_id: &str,
        request: &UpdateTemplateRequest,
    ) -> Result<Value, ClientError>;

    async fn delete_template(&self, template_id: &str) -> Result<bool, ClientError>;

    /// Make the latest draft of a template live
    async fn publish_template(&self, template_id: &str) -> Result<Value, ClientError>;

    /// Create a user, or update the one with the same unique id
    async fn add_user(&self, request: &UserRequest) -> Result<Value, ClientError>;

    async fn update_user(
        &self,
        unique_id: &str,
        request: &UserRequest,
    ) -> Result<Value, ClientError>;

    async fn delete_user(&self, unique_id: &str) -> Result<bool, ClientError>;

    async fn trigger_workflow(&self, request: &WorkflowTriggerRequest)
    -> Result<Value, ClientError>;

    async fn trigger_workflow_bulk(
        &self,
        request: &WorkflowBulkTriggerRequest,
    ) -> Result<Value, ClientError>;

    async fn schedule_workflow(
        &self,
        request: &ScheduleWorkflowRequest,
    ) -> Result<Value, ClientError>;

    /// Webhook receiving delivery status updates
    async fn configure_notification_webhook(
        &self,
        config: &WebhookConfig,
    ) -> Result<Value, ClientError>;

    /// Webhook receiving inbound replies
    async fn configure_inbound_webhook(&self, config: &WebhookConfig)
    -> Result<Value, ClientError>;

    async fn send_chat_message(&self, request: &ChatMessageRequest)
    -> Result<Value, ClientError>;

    async fn end_chat(&self, request: &ChatEndRequest) -> Result<Value, ClientError>;
}
