//! Chat tools

use async_trait::async_trait;
use serde_json::{Map, Value};
use siren_domain::notification::{ChatEndRequest, ChatMessageRequest};
use siren_domain::{
    Context, ParamType, Permission, Resource, ToolDescriptor, ToolOutput, ToolParameter,
    ValidationError,
};

use super::{Tool, ToolHandler, parse_args, respond};
use crate::ports::notification_client::NotificationClient;

const START_CHAT: &str = "start_chat";
const END_CHAT: &str = "end_chat";

fn workflow_execution_id() -> ToolParameter {
    ToolParameter::new(
        "workflowExecutionId",
        "The ID of the workflow execution this chat is associated with",
        true,
    )
}

pub fn start_chat(_context: &Context) -> Tool {
    let button = ParamType::Object(vec![
        ToolParameter::new("text", "The button text", true),
        ToolParameter::new("value", "The button value", true),
    ]);

    let descriptor = ToolDescriptor::new(
        START_CHAT,
        "Start Chat",
        "Start a chat conversation with a specific chat node",
    )
    .with_parameter(ToolParameter::new(
        "chatNodeId",
        "The ID of the chat node to start the conversation with",
        true,
    ))
    .with_parameter(workflow_execution_id())
    .with_parameter(ToolParameter::new(
        "templateId",
        "Optional template ID to use for the chat message",
        false,
    ))
    .with_parameter(
        ToolParameter::new(
            "templateVariables",
            "Optional variables to use with the template",
            false,
        )
        .with_type(ParamType::Record),
    )
    .with_parameter(ToolParameter::new("body", "The message body content", false))
    .with_parameter(ToolParameter::new(
        "subject",
        "The subject of the chat message",
        false,
    ))
    .with_parameter(
        ToolParameter::new(
            "buttons",
            "Optional interactive buttons for the chat message",
            false,
        )
        .with_type(ParamType::Array(Box::new(button))),
    )
    .requires(Resource::Chat, Permission::Message);

    Tool::new(descriptor, StartChat)
}

pub fn end_chat(_context: &Context) -> Tool {
    let descriptor = ToolDescriptor::new(
        END_CHAT,
        "End Chat",
        "End a chat conversation with a specific chat node",
    )
    .with_parameter(ToolParameter::new(
        "chatNodeId",
        "The ID of the chat node to end the conversation with",
        true,
    ))
    .with_parameter(workflow_execution_id())
    .requires(Resource::Chat, Permission::End);

    Tool::new(descriptor, EndChat)
}

struct StartChat;

#[async_trait]
impl ToolHandler for StartChat {
    async fn execute(
        &self,
        client: &dyn NotificationClient,
        _context: &Context,
        args: Map<String, Value>,
    ) -> Result<ToolOutput, ValidationError> {
        let request: ChatMessageRequest = parse_args(START_CHAT, args)?;
        let result = client.send_chat_message(&request).await;
        Ok(respond(START_CHAT, "Failed to start chat", result))
    }
}

struct EndChat;

#[async_trait]
impl ToolHandler for EndChat {
    async fn execute(
        &self,
        client: &dyn NotificationClient,
        _context: &Context,
        args: Map<String, Value>,
    ) -> Result<ToolOutput, ValidationError> {
        let request: ChatEndRequest = parse_args(END_CHAT, args)?;
        let result = client.end_chat(&request).await;
        Ok(respond(END_CHAT, "Failed to end chat", result))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::testing::RecordingClient;
    use serde_json::json;

    #[tokio::test]
    async fn test_start_chat_omits_absent_optionals() {
        let client = RecordingClient::default();
        let output = start_chat(&Context::default())
            .execute(
                &client,
                &Context::default(),
                json!({"chatNodeId": "n1", "workflowExecutionId": "e1", "body": "Hi"})
                    .as_object()
                    .cloned()
                    .unwrap(),
            )
            .await
            .unwrap();

        assert!(output.is_success());
        assert_eq!(
            client.calls()[0],
            (
                "send_chat_message".to_string(),
                json!({"chatNodeId": "n1", "workflowExecutionId": "e1", "body": "Hi"})
            )
        );
    }

    #[tokio::test]
    async fn test_end_chat_failure() {
        let client = RecordingClient::failing();
        let output = end_chat(&Context::default())
            .execute(
                &client,
                &Context::default(),
                json!({"chatNodeId": "n1", "workflowExecutionId": "e1"})
                    .as_object()
                    .cloned()
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(output.to_value()["error"], "Failed to end chat");
    }
}
