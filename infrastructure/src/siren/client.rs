//! reqwest-backed [`NotificationClient`]

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Method, Url};
use serde::Serialize;
use serde_json::{Value, json};
use siren_application::{ClientError, NotificationClient};
use siren_domain::notification::{
    ChatEndRequest, ChatMessageRequest, CreateTemplateRequest, ScheduleWorkflowRequest,
    SendMessageRequest, TemplateQuery, UpdateTemplateRequest, UserRequest, WebhookConfig,
    WorkflowBulkTriggerRequest, WorkflowTriggerRequest,
};
use siren_domain::{Context, Environment};
use tracing::{debug, trace};

use super::envelope::unwrap_envelope;
use super::wire::{send_message_body, webhook_body};

const PROD_BASE_URL: &str = "https://api.trysiren.io";
const DEV_BASE_URL: &str = "https://api.dev.trysiren.io";

const SEND_MESSAGES: &str = "/api/v1/public/send-messages";
const MESSAGE_STATUS: &str = "/api/v1/public/message-status/{id}";
const MESSAGE_REPLIES: &str = "/api/v1/public/get-reply/{id}";
const TEMPLATES: &str = "/api/v1/public/template";
const TEMPLATE: &str = "/api/v1/public/template/{id}";
const TEMPLATE_PUBLISH: &str = "/api/v1/public/template/{id}/publish";
const USERS: &str = "/api/v1/public/users";
const USER: &str = "/api/v1/public/users/{id}";
const WORKFLOW_TRIGGER: &str = "/api/v2/workflows/trigger";
const WORKFLOW_TRIGGER_BULK: &str = "/api/v2/workflows/trigger/bulk";
const SCHEDULES: &str = "/api/v1/public/schedules";
const WEBHOOKS: &str = "/api/v1/public/webhooks";
const CHAT_MESSAGE: &str = "/api/v1/public/chat/message";
const CHAT_END: &str = "/api/v1/public/chat/end";

/// Path segment replaced by a caller-supplied id
const ID_SEGMENT: &str = "{id}";

/// Request timeout used when none is configured
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Base URL selected by the runtime context
pub fn base_url(context: &Context) -> String {
    if let Some(endpoint) = &context.endpoint {
        return endpoint.trim_end_matches('/').to_string();
    }
    match context.environment() {
        Environment::Dev => DEV_BASE_URL.to_string(),
        Environment::Prod => PROD_BASE_URL.to_string(),
    }
}

/// HTTP client for the Siren REST API.
///
/// Holds one `reqwest::Client` (connection pool) for the whole session.
#[derive(Debug, Clone)]
pub struct HttpSirenClient {
    http: reqwest::Client,
    base_url: Url,
    api_key: String,
}

impl HttpSirenClient {
    pub fn new(api_key: impl Into<String>, context: &Context) -> Result<Self, ClientError> {
        Self::with_timeout(api_key, context, Duration::from_secs(DEFAULT_TIMEOUT_SECS))
    }

    pub fn with_timeout(
        api_key: impl Into<String>,
        context: &Context,
        timeout: Duration,
    ) -> Result<Self, ClientError> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(ClientError::Configuration("API key is empty".to_string()));
        }

        let http = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("siren-agent-toolkit/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| ClientError::Configuration(e.to_string()))?;

        let base_url = Url::parse(&base_url(context))
            .map_err(|e| ClientError::Configuration(format!("invalid endpoint: {}", e)))?;
        if base_url.cannot_be_a_base() {
            return Err(ClientError::Configuration(format!(
                "endpoint {} cannot carry a path",
                base_url
            )));
        }

        Ok(Self {
            http,
            base_url,
            api_key,
        })
    }

    pub fn base_url(&self) -> &str {
        self.base_url.as_str().trim_end_matches('/')
    }

    /// Resolve a static path template against the base URL.
    ///
    /// `{id}` segments are replaced by `id`, percent-encoded as a single
    /// segment, so ids can never change which endpoint is addressed.
    fn url(&self, path: &str, id: Option<&str>) -> Result<Url, ClientError> {
        if let Some(id) = id
            && matches!(id, "" | "." | "..")
        {
            return Err(ClientError::InvalidPath(id.to_string()));
        }

        let mut url = self.base_url.clone();
        {
            let mut segments = url.path_segments_mut().map_err(|_| {
                ClientError::Configuration(format!("endpoint {} cannot carry a path", self.base_url))
            })?;
            segments.pop_if_empty();
            for segment in path.split('/').filter(|s| !s.is_empty()) {
                match (segment, id) {
                    (ID_SEGMENT, Some(id)) => segments.push(id),
                    (ID_SEGMENT, None) => return Err(ClientError::InvalidPath(String::new())),
                    _ => segments.push(segment),
                };
            }
        }
        Ok(url)
    }

    async fn request<B: Serialize + ?Sized>(
        &self,
        method: Method,
        url: Url,
        query: &[(&str, String)],
        body: Option<&B>,
    ) -> Result<Value, ClientError> {
        debug!(%method, path = url.path(), "Siren API request");

        let mut builder = self
            .http
            .request(method, url)
            .bearer_auth(&self.api_key);
        if !query.is_empty() {
            builder = builder.query(query);
        }
        if let Some(body) = body {
            builder = builder.json(body);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| ClientError::Http(e.to_string()))?;
        let status = response.status().as_u16();
        let text = response
            .text()
            .await
            .map_err(|e| ClientError::Http(e.to_string()))?;
        trace!(status, body = %text, "Siren API response");

        unwrap_envelope(status, &text)
    }

    async fn get(&self, url: Url, query: &[(&str, String)]) -> Result<Value, ClientError> {
        self.request::<Value>(Method::GET, url, query, None).await
    }

    async fn send<B: Serialize + ?Sized>(
        &self,
        method: Method,
        url: Url,
        body: &B,
    ) -> Result<Value, ClientError> {
        self.request(method, url, &[], Some(body)).await
    }

    async fn delete(&self, url: Url) -> Result<bool, ClientError> {
        self.request::<Value>(Method::DELETE, url, &[], None)
            .await
            .map(|_| true)
    }
}

fn field(value: &Value, name: &str) -> Value {
    value.get(name).cloned().unwrap_or_else(|| value.clone())
}

#[async_trait]
impl NotificationClient for HttpSirenClient {
    async fn send_message(&self, request: &SendMessageRequest) -> Result<String, ClientError> {
        let data = self
            .send(
                Method::POST,
                self.url(SEND_MESSAGES, None)?,
                &send_message_body(request),
            )
            .await?;
        data.get("notificationId")
            .and_then(Value::as_str)
            .map(str::to_string)
            .ok_or_else(|| ClientError::Decode("response has no notificationId".to_string()))
    }

    async fn message_status(&self, message_id: &str) -> Result<Value, ClientError> {
        let data = self
            .get(self.url(MESSAGE_STATUS, Some(message_id))?, &[])
            .await?;
        Ok(field(&data, "status"))
    }

    async fn message_replies(&self, message_id: &str) -> Result<Value, ClientError> {
        self.get(self.url(MESSAGE_REPLIES, Some(message_id))?, &[])
            .await
    }

    async fn list_templates(&self, query: &TemplateQuery) -> Result<Value, ClientError> {
        self.get(self.url(TEMPLATES, None)?, &query.to_pairs()).await
    }

    async fn create_template(
        &self,
        request: &CreateTemplateRequest,
    ) -> Result<Value, ClientError> {
        self.send(Method::POST, self.url(TEMPLATES, None)?, request)
            .await
    }

    async fn update_template(
        &self,
        template_id: &str,
        request: &UpdateTemplateRequest,
    ) -> Result<Value, ClientError> {
        self.send(Method::PUT, self.url(TEMPLATE, Some(template_id))?, request)
            .await
    }

    async fn delete_template(&self, template_id: &str) -> Result<bool, ClientError> {
        self.delete(self.url(TEMPLATE, Some(template_id))?).await
    }

    async fn publish_template(&self, template_id: &str) -> Result<Value, ClientError> {
        self.send(
            Method::PATCH,
            self.url(TEMPLATE_PUBLISH, Some(template_id))?,
            &json!({}),
        )
        .await
    }

    async fn add_user(&self, request: &UserRequest) -> Result<Value, ClientError> {
        self.send(Method::POST, self.url(USERS, None)?, request).await
    }

    async fn update_user(
        &self,
        unique_id: &str,
        request: &UserRequest,
    ) -> Result<Value, ClientError> {
        self.send(Method::PUT, self.url(USER, Some(unique_id))?, request)
            .await
    }

    async fn delete_user(&self, unique_id: &str) -> Result<bool, ClientError> {
        self.delete(self.url(USER, Some(unique_id))?).await
    }

    async fn trigger_workflow(
        &self,
        request: &WorkflowTriggerRequest,
    ) -> Result<Value, ClientError> {
        self.send(Method::POST, self.url(WORKFLOW_TRIGGER, None)?, request)
            .await
    }

    async fn trigger_workflow_bulk(
        &self,
        request: &WorkflowBulkTriggerRequest,
    ) -> Result<Value, ClientError> {
        self.send(Method::POST, self.url(WORKFLOW_TRIGGER_BULK, None)?, request)
            .await
    }

    async fn schedule_workflow(
        &self,
        request: &ScheduleWorkflowRequest,
    ) -> Result<Value, ClientError> {
        self.send(Method::POST, self.url(SCHEDULES, None)?, request)
            .await
    }

    async fn configure_notification_webhook(
        &self,
        config: &WebhookConfig,
    ) -> Result<Value, ClientError> {
        self.send(
            Method::PUT,
            self.url(WEBHOOKS, None)?,
            &webhook_body("webhookConfig", config),
        )
        .await
    }

    async fn configure_inbound_webhook(
        &self,
        config: &WebhookConfig,
    ) -> Result<Value, ClientError> {
        self.send(
            Method::PUT,
            self.url(WEBHOOKS, None)?,
            &webhook_body("inboundWebhookConfig", config),
        )
        .await
    }

    async fn send_chat_message(
        &self,
        request: &ChatMessageRequest,
    ) -> Result<Value, ClientError> {
        self.send(Method::POST, self.url(CHAT_MESSAGE, None)?, request)
            .await
    }

    async fn end_chat(&self, request: &ChatEndRequest) -> Result<Value, ClientError> {
        self.send(Method::POST, self.url(CHAT_END, None)?, request)
            .await
    }
}
