//! API facade.
//!
//! [`SirenApi`] owns the vendor client handle, the runtime context and the
//! resolved tool list. Every framework adapter forwards `(method, args)` here.
//!
//! # Flow
//!
//! 1. Resolve the tool by `method` ([`ApiError::UnknownMethod`] otherwise)
//! 2. Drop undeclared keys, then validate arguments against the descriptor
//!    ([`ApiError::Validation`])
//! 3. Run the delegate; vendor failures come back as [`ToolOutput::Failure`]
//! 4. Serialize the output to JSON text

use std::sync::Arc;

use serde_json::{Map, Value};
use siren_domain::{
    Context, DefaultToolValidator, ToolOutput, ToolValidator, ValidationError, strip_unknown,
};
use thiserror::Error;
use tracing::{debug, warn};

use crate::ports::notification_client::NotificationClient;
use crate::tools::{Tool, build_tools};

/// Errors surfaced by the facade itself (never by a vendor call)
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Unknown method: {0}")]
    UnknownMethod(String),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Failed to serialize tool result: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Facade over the vendor client.
///
/// Immutable after construction; share it behind an `Arc`.
pub struct SirenApi {
    client: Arc<dyn NotificationClient>,
    context: Context,
    tools: Vec<Tool>,
}

impl SirenApi {
    pub fn new(client: Arc<dyn NotificationClient>, context: Context) -> Self {
        let tools = build_tools(&context);
        Self {
            client,
            context,
            tools,
        }
    }

    pub fn context(&self) -> &Context {
        &self.context
    }

    pub fn tools(&self) -> &[Tool] {
        &self.tools
    }

    pub fn tool(&self, method: &str) -> Option<&Tool> {
        self.tools.iter().find(|tool| tool.method() == method)
    }

    /// Run a tool and return the structured output.
    pub async fn execute(&self, method: &str, args: Value) -> Result<ToolOutput, ApiError> {
        let tool = self
            .tool(method)
            .ok_or_else(|| ApiError::UnknownMethod(method.to_string()))?;

        let mut args = into_object(method, args)?;
        strip_unknown(&tool.descriptor, &mut args);
        DefaultToolValidator.validate(&tool.descriptor, &args)?;

        debug!(
            method,
            workspace = self.context.workspace.as_deref().unwrap_or("-"),
            "Dispatching tool"
        );

        let output = tool
            .execute(self.client.as_ref(), &self.context, strip_nulls(args))
            .await?;

        if !output.is_success() {
            warn!(method, "Tool returned a failure");
        }
        Ok(output)
    }

    /// Run a tool and return its output as JSON text.
    pub async fn run(&self, method: &str, args: Value) -> Result<String, ApiError> {
        let output = self.execute(method, args).await?;
        Ok(output.to_text()?)
    }
}

/// `null` is accepted as "no arguments"
fn into_object(method: &str, args: Value) -> Result<Map<String, Value>, ValidationError> {
    match args {
        Value::Object(map) => Ok(map),
        Value::Null => Ok(Map::new()),
        _ => Err(ValidationError::new(
            method,
            "arguments",
            "expected a JSON object",
        )),
    }
}

/// Top-level nulls mean "absent" once validation has passed
fn strip_nulls(mut args: Map<String, Value>) -> Map<String, Value> {
    args.retain(|_, value| !value.is_null());
    args
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::testing::RecordingClient;
    use serde_json::json;

    fn api(client: Arc<RecordingClient>) -> SirenApi {
        SirenApi::new(client, Context::default())
    }

    #[tokio::test]
    async fn test_unknown_method_never_reaches_client() {
        let client = Arc::new(RecordingClient::default());
        let err = api(client.clone())
            .run("send_fax", json!({}))
            .await
            .unwrap_err();

        assert!(matches!(err, ApiError::UnknownMethod(ref m) if m == "send_fax"));
        assert!(client.calls().is_empty());
    }

    #[tokio::test]
    async fn test_validation_error_never_reaches_client() {
        let client = Arc::new(RecordingClient::default());
        let err = api(client.clone())
            .run("add_user", json!({"uniqueId": "u1", "email": "not-an-email"}))
            .await
            .unwrap_err();

        match err {
            ApiError::Validation(e) => {
                assert_eq!(e.tool, "add_user");
                assert_eq!(e.field, "email");
            }
            other => panic!("expected validation error, got {other:?}"),
        }
        assert!(client.calls().is_empty());
    }

    #[tokio::test]
    async fn test_non_object_arguments_rejected() {
        let client = Arc::new(RecordingClient::default());
        let err = api(client).run("delete_user", json!("u1")).await.unwrap_err();
        assert!(matches!(err, ApiError::Validation(_)));
    }

    #[tokio::test]
    async fn test_null_arguments_treated_as_empty() {
        let client = Arc::new(RecordingClient::default());
        let output = api(client.clone())
            .run("list_templates", Value::Null)
            .await
            .unwrap();
        let value: Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value, json!({"method": "list_templates", "echo": {}}));
    }

    #[tokio::test]
    async fn test_run_serializes_success() {
        let client = Arc::new(RecordingClient::default());
        let text = api(client.clone())
            .run(
                "send_message",
                json!({
                    "recipient_type": "direct",
                    "recipient_value": "jane@example.com",
                    "channel": "EMAIL",
                    "body": "Hi"
                }),
            )
            .await
            .unwrap();
        assert_eq!(text, r#"{"notificationId":"notif-1"}"#);
        assert_eq!(client.calls().len(), 1);
    }

    #[tokio::test]
    async fn test_send_message_without_recipient_type() {
        let client = Arc::new(RecordingClient::default());
        let text = api(client.clone())
            .run(
                "send_message",
                json!({
                    "recipient_value": "user@example.com",
                    "channel": "EMAIL",
                    "body": "hi"
                }),
            )
            .await
            .unwrap();

        let value: Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["notificationId"], "notif-1");
        let calls = client.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].1["recipient_type"], "direct");
    }

    #[tokio::test]
    async fn test_undeclared_arguments_are_dropped() {
        let client = Arc::new(RecordingClient::default());
        let text = api(client.clone())
            .run("delete_user", json!({"uniqueId": "u1", "reason": "cleanup"}))
            .await
            .unwrap();

        assert_eq!(text, r#"{"success":true}"#);
        assert_eq!(client.calls()[0], ("delete_user".to_string(), json!("u1")));
    }

    #[tokio::test]
    async fn test_vendor_failure_is_a_value_not_an_error() {
        let client = Arc::new(RecordingClient::failing());
        let text = api(client)
            .run("get_message_status", json!({"message_id": "m1"}))
            .await
            .unwrap();
        let value: Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["error"], "Failed to get message status");
    }

    #[tokio::test]
    async fn test_null_optional_fields_are_dropped() {
        let client = Arc::new(RecordingClient::default());
        api(client.clone())
            .run(
                "trigger_workflow",
                json!({"workflowName": "w", "data": null, "userId": "u1"}),
            )
            .await
            .unwrap();
        assert_eq!(client.calls()[0].1["notify"]["userId"], "u1");
    }

    #[tokio::test]
    async fn test_empty_trigger_rejected_before_network() {
        let client = Arc::new(RecordingClient::default());
        let err = api(client.clone())
            .run("trigger_workflow", json!({"workflowName": "w", "data": {}}))
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Validation(_)));
        assert!(client.calls().is_empty());
    }

    #[tokio::test]
    async fn test_concurrent_runs_share_the_facade() {
        let client = Arc::new(RecordingClient::default());
        let api = Arc::new(api(client.clone()));

        let handles: Vec<_> = (0..4)
            .map(|i| {
                let api = api.clone();
                tokio::spawn(async move {
                    api.run("delete_user", json!({"uniqueId": format!("u{i}")}))
                        .await
                })
            })
            .collect();
        for handle in handles {
            assert_eq!(handle.await.unwrap().unwrap(), r#"{"success":true}"#);
        }
        assert_eq!(client.calls().len(), 4);
    }
}
