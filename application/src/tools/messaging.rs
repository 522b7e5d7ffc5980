//! Messaging tools

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{Map, Value, json};
use siren_domain::notification::SendMessageRequest;
use siren_domain::{
    Context, ParamType, Permission, Resource, ToolDescriptor, ToolOutput, ToolParameter,
    ValidationError,
};

use super::{Tool, ToolHandler, failed, parse_args};
use crate::ports::notification_client::NotificationClient;

const SEND_MESSAGE: &str = "send_message";
const GET_MESSAGE_STATUS: &str = "get_message_status";
const GET_MESSAGE_REPLIES: &str = "get_message_replies";

pub fn send_message(_context: &Context) -> Tool {
    let descriptor = ToolDescriptor::new(
        SEND_MESSAGE,
        "Send Message",
        "Send a message either using a template or directly to a recipient via a chosen channel",
    )
    .with_parameter(
        ToolParameter::new(
            "recipient_type",
            "The type of recipient (defaults to \"direct\")",
            false,
        )
            .with_type(ParamType::Enum(vec!["user_id".into(), "direct".into()])),
    )
    .with_parameter(ToolParameter::new(
        "recipient_value",
        "The identifier for the recipient (e.g., Slack user ID, email address)",
        true,
    ))
    .with_parameter(ToolParameter::new(
        "channel",
        "The channel to send the message through (e.g., \"SLACK\", \"EMAIL\")",
        true,
    ))
    .with_parameter(ToolParameter::new(
        "body",
        "Message body text (required if no template)",
        false,
    ))
    .with_parameter(ToolParameter::new(
        "template_name",
        "Template name (required if no body)",
        false,
    ))
    .with_parameter(
        ToolParameter::new(
            "template_variables",
            "Template variables for template-based messages",
            false,
        )
        .with_type(ParamType::Record),
    )
    .requires(Resource::Messaging, Permission::Create);

    Tool::new(descriptor, SendMessage)
}

pub fn get_message_status(_context: &Context) -> Tool {
    let descriptor = ToolDescriptor::new(
        GET_MESSAGE_STATUS,
        "Get Message Status",
        "Retrieve the status of a specific message (e.g., \"DELIVERED\", \"PENDING\", \"FAILED\")",
    )
    .with_parameter(ToolParameter::new(
        "message_id",
        "The ID of the message for which to retrieve the status",
        true,
    ))
    .requires(Resource::Messaging, Permission::Read);

    Tool::new(descriptor, GetMessageStatus)
}

pub fn get_message_replies(_context: &Context) -> Tool {
    let descriptor = ToolDescriptor::new(
        GET_MESSAGE_REPLIES,
        "Get Message Replies",
        "Retrieve replies for a specific message",
    )
    .with_parameter(ToolParameter::new(
        "message_id",
        "The ID of the message for which to retrieve replies",
        true,
    ))
    .requires(Resource::Messaging, Permission::Read);

    Tool::new(descriptor, GetMessageReplies)
}

#[derive(Debug, Deserialize)]
struct MessageIdArgs {
    message_id: String,
}

struct SendMessage;

#[async_trait]
impl ToolHandler for SendMessage {
    async fn execute(
        &self,
        client: &dyn NotificationClient,
        _context: &Context,
        args: Map<String, Value>,
    ) -> Result<ToolOutput, ValidationError> {
        let request: SendMessageRequest = parse_args(SEND_MESSAGE, args)?;

        Ok(match client.send_message(&request).await {
            Ok(notification_id) => ToolOutput::success(json!({ "notificationId": notification_id })),
            Err(e) => failed(SEND_MESSAGE, "Failed to send message", e),
        })
    }
}

struct GetMessageStatus;

#[async_trait]
impl ToolHandler for GetMessageStatus {
    async fn execute(
        &self,
        client: &dyn NotificationClient,
        _context: &Context,
        args: Map<String, Value>,
    ) -> Result<ToolOutput, ValidationError> {
        let args: MessageIdArgs = parse_args(GET_MESSAGE_STATUS, args)?;

        Ok(match client.message_status(&args.message_id).await {
            Ok(status) => ToolOutput::success(json!({ "status": status })),
            Err(e) => failed(GET_MESSAGE_STATUS, "Failed to get message status", e),
        })
    }
}

struct GetMessageReplies;

#[async_trait]
impl ToolHandler for GetMessageReplies {
    async fn execute(
        &self,
        client: &dyn NotificationClient,
        _context: &Context,
        args: Map<String, Value>,
    ) -> Result<ToolOutput, ValidationError> {
        let args: MessageIdArgs = parse_args(GET_MESSAGE_REPLIES, args)?;

        Ok(match client.message_replies(&args.message_id).await {
            Ok(replies) => ToolOutput::success(json!({ "replies": replies })),
            Err(e) => failed(GET_MESSAGE_REPLIES, "Failed to get message replies", e),
        })
    }
}
