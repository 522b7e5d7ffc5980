//! Shared core of every framework adapter.
//!
//! A [`SirenToolkit`] owns one [`SirenApi`], the descriptors that survived the
//! permission filter, and the schema converter used to describe them. Adapters
//! only translate between their host's envelope and [`SirenToolkit::execute`].

use std::sync::Arc;
use std::time::Duration;

use serde_json::Value;
use siren_application::{
    ApiError, ClientError, NotificationClient, SirenApi, ToolSchemaPort, filtered_tools,
};
use siren_domain::{Configuration, ToolDescriptor, ToolOutput};
use siren_infrastructure::{DEFAULT_TIMEOUT_SECS, HttpSirenClient, JsonSchemaToolConverter};
use tracing::debug;

/// Facade plus the permission-filtered tool list
#[derive(Clone)]
pub struct SirenToolkit {
    api: Arc<SirenApi>,
    configuration: Configuration,
    descriptors: Vec<ToolDescriptor>,
    schema: Arc<dyn ToolSchemaPort>,
}

impl SirenToolkit {
    /// Build a toolkit talking to the Siren HTTP API.
    pub fn new(
        api_key: impl Into<String>,
        configuration: Configuration,
    ) -> Result<Self, ClientError> {
        Self::with_timeout(
            api_key,
            configuration,
            Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        )
    }

    pub fn with_timeout(
        api_key: impl Into<String>,
        configuration: Configuration,
        timeout: Duration,
    ) -> Result<Self, ClientError> {
        let client = HttpSirenClient::with_timeout(api_key, &configuration.context, timeout)?;
        Ok(Self::with_client(Arc::new(client), configuration))
    }

    /// Build a toolkit around any vendor client (fakes in tests).
    pub fn with_client(client: Arc<dyn NotificationClient>, configuration: Configuration) -> Self {
        let api = SirenApi::new(client, configuration.context.clone());
        let descriptors: Vec<ToolDescriptor> = filtered_tools(&configuration)
            .into_iter()
            .map(|tool| tool.descriptor)
            .collect();
        debug!(enabled = descriptors.len(), "Resolved tool list");

        Self {
            api: Arc::new(api),
            configuration,
            descriptors,
            schema: Arc::new(JsonSchemaToolConverter),
        }
    }

    /// Replace the schema converter (builder pattern)
    pub fn with_schema(mut self, schema: Arc<dyn ToolSchemaPort>) -> Self {
        self.schema = schema;
        self
    }

    pub fn api(&self) -> &Arc<SirenApi> {
        &self.api
    }

    pub fn configuration(&self) -> &Configuration {
        &self.configuration
    }

    /// Tools exposed to the host, in registry order
    pub fn descriptors(&self) -> &[ToolDescriptor] {
        &self.descriptors
    }

    pub fn is_enabled(&self, method: &str) -> bool {
        self.descriptors.iter().any(|d| d.method == method)
    }

    pub fn input_schema(&self, descriptor: &ToolDescriptor) -> Value {
        self.schema.input_schema(descriptor)
    }

    /// `{name, description, inputSchema}` for every exposed tool
    pub fn tools_schema(&self) -> Vec<Value> {
        self.schema.tools_schema(&self.descriptors)
    }

    /// Run an exposed tool. Filtered-out tools are reported as unknown.
    pub async fn execute(&self, method: &str, args: Value) -> Result<ToolOutput, ApiError> {
        if !self.is_enabled(method) {
            return Err(ApiError::UnknownMethod(method.to_string()));
        }
        self.api.execute(method, args).await
    }

    /// Run an exposed tool and return its JSON text.
    pub async fn run(&self, method: &str, args: Value) -> Result<String, ApiError> {
        let output = self.execute(method, args).await?;
        Ok(output.to_text()?)
    }
}

impl std::fmt::Debug for SirenToolkit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SirenToolkit")
            .field("context", &self.configuration.context)
            .field(
                "tools",
                &self.descriptors.iter().map(|d| &d.method).collect::<Vec<_>>(),
            )
            .finish_non_exhaustive()
    }
}


#[cfg(test)]
mod tests {
    use super::testing::FakeClient;
    use super::*;
    use serde_json::json;
    use siren_domain::{Actions, Permission, Resource};

    fn messaging_only() -> Configuration {
        Configuration::new().with_actions(
            Actions::new()
                .grant(Resource::Messaging, Permission::Create)
                .grant(Resource::Messaging, Permission::Read),
        )
    }

    #[test]
    fn test_unconfigured_toolkit_exposes_everything() {
        let toolkit = SirenToolkit::with_client(Arc::new(FakeClient::default()), Configuration::new());
        assert_eq!(toolkit.descriptors().len(), 18);
        assert_eq!(toolkit.tools_schema().len(), 18);
    }

    #[test]
    fn test_grant_set_narrows_descriptors() {
        let toolkit = SirenToolkit::with_client(Arc::new(FakeClient::default()), messaging_only());
        let methods: Vec<&str> = toolkit
            .descriptors()
            .iter()
            .map(|d| d.method.as_str())
            .collect();
        assert_eq!(
            methods,
            vec!["send_message", "get_message_status", "get_message_replies"]
        );
    }

    #[tokio::test]
    async fn test_filtered_out_tool_is_unknown() {
        let client = Arc::new(FakeClient::default());
        let toolkit = SirenToolkit::with_client(client.clone(), messaging_only());

        let err = toolkit
            .run("delete_user", json!({"uniqueId": "u1"}))
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::UnknownMethod(ref m) if m == "delete_user"));
        assert!(client.calls().is_empty());
    }

    #[tokio::test]
    async fn test_send_message_end_to_end() {
        let toolkit = SirenToolkit::with_client(Arc::new(FakeClient::default()), messaging_only());
        let text = toolkit
            .run(
                "send_message",
                json!({
                    "recipient_type": "direct",
                    "recipient_value": "user@example.com",
                    "channel": "EMAIL",
                    "body": "hi"
                }),
            )
            .await
            .unwrap();
        let value: Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["notificationId"], "msg_123");
    }

    #[tokio::test]
    async fn test_vendor_rejection_resolves_to_failure_value() {
        let toolkit = SirenToolkit::with_client(Arc::new(FakeClient::default()), Configuration::new());
        let output = toolkit
            .execute("delete_user", json!({"uniqueId": "u1"}))
            .await
            .unwrap();
        assert!(!output.is_success());
        assert_eq!(output.to_value()["error"], "Failed to delete user");
    }

    #[test]
    fn test_http_toolkit_rejects_empty_key() {
        let err = SirenToolkit::new("", Configuration::new()).unwrap_err();
        assert!(matches!(err, ClientError::Configuration(_)));
    }
}
