//! Tool registry and per-tool delegates
//!
//! Each submodule holds the tools of one vendor resource. A tool is a
//! [`ToolDescriptor`] paired with a [`ToolHandler`] that:
//!
//! 1. deserializes the (already validated) arguments into a typed request,
//! 2. calls exactly one [`NotificationClient`] method,
//! 3. wraps the response, or a fixed failure message, in a [`ToolOutput`].
//!
//! Adding an operation means adding one constructor to [`build_tools`].

pub mod chat;
pub mod messaging;
pub mod templates;
pub mod users;
pub mod webhooks;
pub mod workflows;

use std::sync::Arc;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use siren_domain::{
    Configuration, Context, ToolDescriptor, ToolOutput, ValidationError, is_tool_allowed,
};
use tracing::warn;

use crate::ports::notification_client::{ClientError, NotificationClient};

/// Executes one tool against the vendor client
#[async_trait]
pub trait ToolHandler: Send + Sync {
    /// Vendor failures come back as [`ToolOutput::Failure`]; `Err` is reserved
    /// for arguments that cannot form a request.
    async fn execute(
        &self,
        client: &dyn NotificationClient,
        context: &Context,
        args: Map<String, Value>,
    ) -> Result<ToolOutput, ValidationError>;
}

/// A descriptor plus its delegate
#[derive(Clone)]
pub struct Tool {
    pub descriptor: ToolDescriptor,
    handler: Arc<dyn ToolHandler>,
}

impl Tool {
    pub fn new(descriptor: ToolDescriptor, handler: impl ToolHandler + 'static) -> Self {
        Self {
            descriptor,
            handler: Arc::new(handler),
        }
    }

    pub fn method(&self) -> &str {
        &self.descriptor.method
    }

    pub async fn execute(
        &self,
        client: &dyn NotificationClient,
        context: &Context,
        args: Map<String, Value>,
    ) -> Result<ToolOutput, ValidationError> {
        self.handler.execute(client, context, args).await
    }
}

impl std::fmt::Debug for Tool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Tool")
            .field("method", &self.descriptor.method)
            .finish_non_exhaustive()
    }
}

/// Every tool, in a stable order.
///
/// The context is accepted so tools can specialize on it; none currently do.
pub fn build_tools(context: &Context) -> Vec<Tool> {
    vec![
        messaging::send_message(context),
        messaging::get_message_status(context),
        messaging::get_message_replies(context),
        templates::list_templates(context),
        templates::create_template(context),
        templates::update_template(context),
        templates::delete_template(context),
        templates::publish_template(context),
        users::add_user(context),
        users::update_user(context),
        users::delete_user(context),
        workflows::trigger_workflow(context),
        workflows::trigger_workflow_bulk(context),
        workflows::schedule_workflow(context),
        webhooks::configure_notification_webhooks(context),
        webhooks::configure_inbound_webhooks(context),
        chat::start_chat(context),
        chat::end_chat(context),
    ]
}

/// Registry narrowed by the configuration's grant set
pub fn filtered_tools(configuration: &Configuration) -> Vec<Tool> {
    build_tools(&configuration.context)
        .into_iter()
        .filter(|tool| is_tool_allowed(&tool.descriptor, Some(configuration)))
        .collect()
}

/// Descriptors only, e.g. for selector resolution
pub fn descriptors(context: &Context) -> Vec<ToolDescriptor> {
    build_tools(context)
        .into_iter()
        .map(|tool| tool.descriptor)
        .collect()
}

pub(crate) fn parse_args<T: DeserializeOwned>(
    tool: &str,
    args: Map<String, Value>,
) -> Result<T, ValidationError> {
    serde_json::from_value(Value::Object(args))
        .map_err(|e| ValidationError::new(tool, "arguments", e.to_string()))
}

pub(crate) fn failed(tool: &str, error: &str, cause: ClientError) -> ToolOutput {
    warn!(tool, error = %cause, "{}", error);
    ToolOutput::failure(error, cause.to_string())
}

pub(crate) fn respond(tool: &str, error: &str, result: Result<Value, ClientError>) -> ToolOutput {
    match result {
        Ok(value) => ToolOutput::Success(value),
        Err(cause) => failed(tool, error, cause),
    }
}

#[cfg(test)]
pub(crate) mod testing {
    //! Recording fake client shared by delegate and facade tests

    use std::sync::Mutex;

    use async_trait::async_trait;
    use serde::Serialize;
    use serde_json::{Value, json};
    use siren_domain::notification::{
        ChatEndRequest, ChatMessageRequest, CreateTemplateRequest, ScheduleWorkflowRequest,
        SendMessageRequest, TemplateQuery, UpdateTemplateRequest, UserRequest, WebhookConfig,
        WorkflowBulkTriggerRequest, WorkflowTriggerRequest,
    };

    use crate::ports::notification_client::{ClientError, NotificationClient};

    #[derive(Default)]
    pub struct RecordingClient {
        pub calls: Mutex<Vec<(String, Value)>>,
        pub fail: bool,
    }

    impl RecordingClient {
        pub fn failing() -> Self {
            Self {
                fail: true,
                ..Default::default()
            }
        }

        pub fn calls(&self) -> Vec<(String, Value)> {
            self.calls.lock().unwrap().clone()
        }

        fn record(&self, method: &str, payload: impl Serialize) -> Result<Value, ClientError> {
            let payload = serde_json::to_value(payload).unwrap();
            self.calls
                .lock()
                .unwrap()
                .push((method.to_string(), payload.clone()));
            if self.fail {
                Err(ClientError::Api {
                    status: 500,
                    message: "boom".to_string(),
                })
            } else {
                Ok(json!({"method": method, "echo": payload}))
            }
        }
    }

    #[async_trait]
    impl NotificationClient for RecordingClient {
        async fn send_message(&self, request: &SendMessageRequest) -> Result<String, ClientError> {
            self.record("send_message", request).map(|_| "notif-1".to_string())
        }

        async fn message_status(&self, message_id: &str) -> Result<Value, ClientError> {
            self.record("message_status", message_id)
                .map(|_| json!("DELIVERED"))
        }

        async fn message_replies(&self, message_id: &str) -> Result<Value, ClientError> {
            self.record("message_replies", message_id).map(|_| json!([]))
        }

        async fn list_templates(&self, query: &TemplateQuery) -> Result<Value, ClientError> {
            self.record("list_templates", query)
        }

        async fn create_template(
            &self,
            request: &CreateTemplateRequest,
        ) -> Result<Value, ClientError> {
            self.record("create_template", request)
        }

        async fn update_template(
            &self,
            template_id: &str,
            request: &UpdateTemplateRequest,
        ) -> Result<Value, ClientError> {
            self.record("update_template", json!({"id": template_id, "request": request}))
        }

        async fn delete_template(&self, template_id: &str) -> Result<bool, ClientError> {
            self.record("delete_template", template_id).map(|_| true)
        }

        async fn publish_template(&self, template_id: &str) -> Result<Value, ClientError> {
            self.record("publish_template", template_id)
        }

        async fn add_user(&self, request: &UserRequest) -> Result<Value, ClientError> {
            self.record("add_user", request)
        }

        async fn update_user(
            &self,
            unique_id: &str,
            request: &UserRequest,
        ) -> Result<Value, ClientError> {
            self.record("update_user", json!({"id": unique_id, "request": request}))
        }

        async fn delete_user(&self, unique_id: &str) -> Result<bool, ClientError> {
            self.record("delete_user", unique_id).map(|_| true)
        }

        async fn trigger_workflow(
            &self,
            request: &WorkflowTriggerRequest,
        ) -> Result<Value, ClientError> {
            self.record("trigger_workflow", request)
        }

        async fn trigger_workflow_bulk(
            &self,
            request: &WorkflowBulkTriggerRequest,
        ) -> Result<Value, ClientError> {
            self.record("trigger_workflow_bulk", request)
        }

        async fn schedule_workflow(
            &self,
            request: &ScheduleWorkflowRequest,
        ) -> Result<Value, ClientError> {
            self.record("schedule_workflow", request)
        }

        async fn configure_notification_webhook(
            &self,
            config: &WebhookConfig,
        ) -> Result<Value, ClientError> {
            self.record("configure_notification_webhook", config)
        }

        async fn configure_inbound_webhook(
            &self,
            config: &WebhookConfig,
        ) -> Result<Value, ClientError> {
            self.record("configure_inbound_webhook", config)
        }

        async fn send_chat_message(
            &self,
            request: &ChatMessageRequest,
        ) -> Result<Value, ClientError> {
            self.record("send_chat_message", request)
        }

        async fn end_chat(&self, request: &ChatEndRequest) -> Result<Value, ClientError> {
            self.record("end_chat", request)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use siren_domain::{Actions, Permission, Resource};
    use std::collections::HashSet;

    #[test]
    fn test_registry_has_one_tool_per_operation() {
        let tools = build_tools(&Context::default());
        assert_eq!(tools.len(), 18);

        let methods: HashSet<_> = tools.iter().map(|t| t.method()).collect();
        assert_eq!(methods.len(), tools.len(), "methods must be unique");
    }

    #[test]
    fn test_registry_order_is_stable() {
        let first: Vec<_> = descriptors(&Context::default())
            .into_iter()
            .map(|d| d.method)
            .collect();
        let second: Vec<_> = descriptors(&Context::default())
            .into_iter()
            .map(|d| d.method)
            .collect();
        assert_eq!(first, second);
        assert_eq!(first[0], "send_message");
        assert_eq!(first[17], "end_chat");
    }

    #[test]
    fn test_every_tool_requires_something() {
        for tool in build_tools(&Context::default()) {
            assert!(
                !tool.descriptor.required_actions.is_empty(),
                "{} has no required actions",
                tool.method()
            );
        }
    }

    #[test]
    fn test_required_actions_table() {
        let expected = [
            ("send_message", Resource::Messaging, Permission::Create),
            ("get_message_status", Resource::Messaging, Permission::Read),
            ("get_message_replies", Resource::Messaging, Permission::Read),
            ("list_templates", Resource::Templates, Permission::Read),
            ("create_template", Resource::Templates, Permission::Create),
            ("update_template", Resource::Templates, Permission::Update),
            ("delete_template", Resource::Templates, Permission::Delete),
            ("publish_template", Resource::Templates, Permission::Update),
            ("add_user", Resource::Users, Permission::Create),
            ("update_user", Resource::Users, Permission::Update),
            ("delete_user", Resource::Users, Permission::Delete),
            ("trigger_workflow", Resource::Workflows, Permission::Trigger),
            ("trigger_workflow_bulk", Resource::Workflows, Permission::Trigger),
            ("schedule_workflow", Resource::Workflows, Permission::Schedule),
            ("configure_notification_webhooks", Resource::Webhooks, Permission::Create),
            ("configure_inbound_webhooks", Resource::Webhooks, Permission::Create),
            ("start_chat", Resource::Chat, Permission::Message),
            ("end_chat", Resource::Chat, Permission::End),
        ];
        let tools = build_tools(&Context::default());
        for (method, resource, permission) in expected {
            let tool = tools.iter().find(|t| t.method() == method).unwrap();
            assert!(
                tool.descriptor.required_actions.contains(resource, permission),
                "{method} should require {resource}.{permission}"
            );
        }
    }

    #[test]
    fn test_filtered_tools_without_actions_exposes_everything() {
        assert_eq!(filtered_tools(&Configuration::default()).len(), 18);
    }

    #[test]
    fn test_filtered_tools_by_resource() {
        let config = Configuration::new().with_actions(
            Actions::new()
                .grant(Resource::Messaging, Permission::Create)
                .grant(Resource::Messaging, Permission::Read),
        );
        let methods: Vec<_> = filtered_tools(&config)
            .into_iter()
            .map(|t| t.descriptor.method)
            .collect();
        assert_eq!(
            methods,
            vec!["send_message", "get_message_status", "get_message_replies"]
        );
    }

    #[test]
    fn test_filtered_tools_empty_grant_set_exposes_nothing() {
        let config = Configuration::new().with_actions(Actions::new());
        assert!(filtered_tools(&config).is_empty());
    }
}
