//! Request bodies whose wire shape differs from the domain request

use serde_json::{Map, Value, json};
use siren_domain::notification::{SendMessageRequest, WebhookConfig};

/// `POST /api/v1/public/send-messages` body
pub fn send_message_body(request: &SendMessageRequest) -> Value {
    let mut body = Map::new();
    body.insert("channel".into(), json!(request.channel));
    body.insert(
        "recipient".into(),
        json!({
            "type": request.recipient_type.as_str(),
            "value": request.recipient_value,
        }),
    );
    if let Some(text) = &request.body {
        body.insert("body".into(), json!(text));
    }
    if let Some(name) = &request.template_name {
        body.insert("template".into(), json!({ "name": name }));
    }
    if let Some(variables) = &request.template_variables {
        body.insert("templateVariables".into(), Value::Object(variables.clone()));
    }
    Value::Object(body)
}

/// Webhook settings nested under `webhookConfig` or `inboundWebhookConfig`
pub fn webhook_body(key: &str, config: &WebhookConfig) -> Value {
    let mut inner = Map::new();
    inner.insert("url".into(), json!(config.url));
    if let Some(secret) = &config.secret {
        inner.insert("verificationKey".into(), json!(secret));
    }
    let mut body = Map::new();
    body.insert(key.to_string(), Value::Object(inner));
    Value::Object(body)
}
