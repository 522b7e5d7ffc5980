//! Webhook tools

use async_trait::async_trait;
use serde_json::{Map, Value};
use siren_domain::notification::WebhookConfig;
use siren_domain::{
    Context, Permission, Resource, StringFormat, ToolDescriptor, ToolOutput, ToolParameter,
    ValidationError,
};

use super::{Tool, ToolHandler, parse_args, respond};
use crate::ports::notification_client::NotificationClient;

const CONFIGURE_NOTIFICATION_WEBHOOKS: &str = "configure_notification_webhooks";
const CONFIGURE_INBOUND_WEBHOOKS: &str = "configure_inbound_webhooks";

fn webhook_descriptor(method: &str, display_name: &str, purpose: &str) -> ToolDescriptor {
    ToolDescriptor::new(
        method,
        display_name,
        format!("Configure webhook URL for receiving {}", purpose),
    )
    .with_parameter(
        ToolParameter::new("url", format!("Webhook URL for receiving {}", purpose), true)
            .with_format(StringFormat::Url),
    )
    .with_parameter(ToolParameter::new(
        "secret",
        "Optional secret for webhook verification",
        false,
    ))
    .requires(Resource::Webhooks, Permission::Create)
}

pub fn configure_notification_webhooks(_context: &Context) -> Tool {
    Tool::new(
        webhook_descriptor(
            CONFIGURE_NOTIFICATION_WEBHOOKS,
            "Configure Notification Webhooks",
            "status updates",
        ),
        ConfigureNotificationWebhooks,
    )
}

pub fn configure_inbound_webhooks(_context: &Context) -> Tool {
    Tool::new(
        webhook_descriptor(
            CONFIGURE_INBOUND_WEBHOOKS,
            "Configure Inbound Webhooks",
            "inbound messages",
        ),
        ConfigureInboundWebhooks,
    )
}

struct ConfigureNotificationWebhooks;

#[async_trait]
impl ToolHandler for ConfigureNotificationWebhooks {
    async fn execute(
        &self,
        client: &dyn NotificationClient,
        _context: &Context,
        args: Map<String, Value>,
    ) -> Result<ToolOutput, ValidationError> {
        let config: WebhookConfig = parse_args(CONFIGURE_NOTIFICATION_WEBHOOKS, args)?;
        let result = client.configure_notification_webhook(&config).await;
        Ok(respond(
            CONFIGURE_NOTIFICATION_WEBHOOKS,
            "Failed to configure notification webhooks",
            result,
        ))
    }
}

struct ConfigureInboundWebhooks;

#[async_trait]
impl ToolHandler for ConfigureInboundWebhooks {
    async fn execute(
        &self,
        client: &dyn NotificationClient,
        _context: &Context,
        args: Map<String, Value>,
    ) -> Result<ToolOutput, ValidationError> {
        let config: WebhookConfig = parse_args(CONFIGURE_INBOUND_WEBHOOKS, args)?;
        let result = client.configure_inbound_webhook(&config).await;
        Ok(respond(
            CONFIGURE_INBOUND_WEBHOOKS,
            "Failed to configure inbound webhooks",
            result,
        ))
    }
}
