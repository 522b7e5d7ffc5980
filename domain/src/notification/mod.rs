//! Vendor request models, one submodule per resource.
//!
//! These are the typed bodies handed to a `NotificationClient`. Field names
//! follow the vendor API (camelCase on the wire) and absent optionals are
//! omitted when serialized.

pub mod chat;
pub mod messaging;
pub mod templates;
pub mod users;
pub mod webhooks;
pub mod workflows;

pub use chat::{ChatButton, ChatEndRequest, ChatMessageRequest};
pub use messaging::{RecipientType, SendMessageRequest};
pub use templates::{
    CreateTemplateRequest, EmailConfiguration, SmsConfiguration, TemplateConfigurations,
    TemplateQuery, TemplateVariable, UpdateTemplateRequest,
};
pub use users::UserRequest;
pub use webhooks::WebhookConfig;
pub use workflows::{
    CHANNEL_FIELDS, ScheduleWorkflowRequest, TriggerWorkflowInput, WorkflowBulkTriggerRequest,
    WorkflowPayload, WorkflowTriggerRequest,
};
