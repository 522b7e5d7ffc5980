//! OpenAI function calling.
//!
//! `tools()` yields `{"type": "function", "function": {...}}` entries for the
//! chat-completions request; `handle_tool_call` answers one returned call with
//! a `role: "tool"` message.

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use super::AdapterError;
use crate::toolkit::SirenToolkit;

/// `function` part of a tool call; `arguments` is JSON text
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionCall {
    pub name: String,
    pub arguments: String,
}

/// One entry of `message.tool_calls`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolCall {
    pub id: String,
    #[serde(rename = "type", default = "function_kind")]
    pub kind: String,
    pub function: FunctionCall,
}

fn function_kind() -> String {
    "function".to_string()
}

/// Tool result message sent back to the model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolMessage {
    pub role: String,
    pub tool_call_id: String,
    pub content: String,
}

pub struct OpenAiToolkit {
    toolkit: SirenToolkit,
    tools: Vec<Value>,
}

impl OpenAiToolkit {
    pub fn new(toolkit: SirenToolkit) -> Self {
        let tools = toolkit
            .descriptors()
            .iter()
            .map(|descriptor| {
                json!({
                    "type": "function",
                    "function": {
                        "name": descriptor.method,
                        "description": descriptor.description,
                        "parameters": toolkit.input_schema(descriptor),
                    },
                })
            })
            .collect();

        Self { toolkit, tools }
    }

    pub fn tools(&self) -> &[Value] {
        &self.tools
    }

    pub async fn handle_tool_call(&self, call: &ToolCall) -> Result<ToolMessage, AdapterError> {
        let args: Value = if call.function.arguments.trim().is_empty() {
            json!({})
        } else {
            serde_json::from_str(&call.function.arguments)
                .map_err(AdapterError::InvalidArguments)?
        };

        let content = self.toolkit.run(&call.function.name, args).await?;

        Ok(ToolMessage {
            role: "tool".to_string(),
            tool_call_id: call.id.clone(),
            content,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::toolkit::testing::FakeClient;
    use siren_application::ApiError;
    use siren_domain::{Actions, Configuration, Permission, Resource};
    use std::sync::Arc;

    fn toolkit() -> OpenAiToolkit {
        let configuration = Configuration::new()
            .with_actions(Actions::new().grant(Resource::Messaging, Permission::Read));
        OpenAiToolkit::new(SirenToolkit::with_client(
            Arc::new(FakeClient::default()),
            configuration,
        ))
    }

    fn call(name: &str, arguments: &str) -> ToolCall {
        ToolCall {
            id: "call_abc".to_string(),
            kind: "function".to_string(),
            function: FunctionCall {
                name: name.to_string(),
                arguments: arguments.to_string(),
            },
        }
    }

    #[test]
    fn test_tools_are_function_entries() {
        let toolkit = toolkit();
        assert_eq!(toolkit.tools().len(), 2);
        let first = &toolkit.tools()[0];
        assert_eq!(first["type"], "function");
        assert_eq!(first["function"]["name"], "get_message_status");
        assert_eq!(
            first["function"]["parameters"]["required"],
            json!(["message_id"])
        );
    }

    #[tokio::test]
    async fn test_handle_tool_call_round_trips_id_and_content() {
        let message = toolkit()
            .handle_tool_call(&call("get_message_status", r#"{"message_id":"m1"}"#))
            .await
            .unwrap();

        assert_eq!(message.role, "tool");
        assert_eq!(message.tool_call_id, "call_abc");
        let content: Value = serde_json::from_str(&message.content).unwrap();
        assert_eq!(content, json!({"status": "DELIVERED"}));
    }

    #[tokio::test]
    async fn test_malformed_arguments() {
        let err = toolkit()
            .handle_tool_call(&call("get_message_status", "{oops"))
            .await
            .unwrap_err();
        assert!(matches!(err, AdapterError::InvalidArguments(_)));
    }

    #[tokio::test]
    async fn test_disabled_tool_is_unknown() {
        let err = toolkit()
            .handle_tool_call(&call("send_message", "{}"))
            .await
            .unwrap_err();
        assert!(matches!(err, AdapterError::Api(ApiError::UnknownMethod(_))));
    }

    #[test]
    fn test_tool_call_deserializes_from_wire() {
        let call: ToolCall = serde_json::from_value(json!({
            "id": "call_1",
            "type": "function",
            "function": {"name": "get_message_replies", "arguments": "{}"}
        }))
        .unwrap();
        assert_eq!(call.function.name, "get_message_replies");
        assert_eq!(call.kind, "function");
    }
}
