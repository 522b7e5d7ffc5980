//! Workflow tools

use async_trait::async_trait;
use serde_json::{Map, Value};
use siren_domain::notification::{
    ScheduleWorkflowRequest, TriggerWorkflowInput, WorkflowBulkTriggerRequest,
};
use siren_domain::{
    Context, ParamType, Permission, Resource, StringFormat, ToolDescriptor, ToolOutput,
    ToolParameter, ValidationError,
};

use super::{Tool, ToolHandler, parse_args, respond};
use crate::ports::notification_client::NotificationClient;

const TRIGGER_WORKFLOW: &str = "trigger_workflow";
const TRIGGER_WORKFLOW_BULK: &str = "trigger_workflow_bulk";
const SCHEDULE_WORKFLOW: &str = "schedule_workflow";

/// Top-level recipient shorthands copied into `notify`
const CHANNEL_SHORTHANDS: [(&str, &str); 9] = [
    ("sms", "Phone number for SMS notification (will be moved to notify.sms)"),
    (
        "whatsapp",
        "Phone number for WhatsApp notification (will be moved to notify.whatsapp)",
    ),
    (
        "pushToken",
        "Push token for push notifications (will be moved to notify.pushToken)",
    ),
    ("inApp", "In-app notification target (will be moved to notify.inApp)"),
    ("slack", "Slack channel or user ID (will be moved to notify.slack)"),
    ("discord", "Discord channel or user ID (will be moved to notify.discord)"),
    (
        "teams",
        "Microsoft Teams channel or user ID (will be moved to notify.teams)",
    ),
    ("line", "LINE user ID (will be moved to notify.line)"),
    ("userId", "User ID for the notification (will be moved to notify.userId)"),
];

pub fn trigger_workflow(_context: &Context) -> Tool {
    let mut descriptor = ToolDescriptor::new(
        TRIGGER_WORKFLOW,
        "Trigger Workflow",
        "Trigger a workflow with given data and notification payloads",
    )
    .with_parameter(ToolParameter::new(
        "workflowName",
        "The exact name of the workflow to trigger (e.g., \"ses_loadTest\")",
        true,
    ))
    .with_parameter(
        ToolParameter::new(
            "data",
            "Workflow-specific data. Use this for data that should be processed by the workflow, \
             like order details, user data, etc. Example: For prompt \"with data field contains \
             age 30 and membership level gold\", use: {\"data\": {\"age\": 30, \"membershipLevel\": \"gold\"}}",
            false,
        )
        .with_type(ParamType::StringOrRecord),
    )
    .with_parameter(
        ToolParameter::new(
            "notify",
            "Notification configuration. IMPORTANT: Use this for notification-specific data like \
             recipient info and message content. Example: For prompt \"Send alert to \
             user@example.com with name John\", use: {\"email\": \"user@example.com\", \
             \"notify\": {\"variables\": {\"name\": \"John\"}}}",
            false,
        )
        .with_type(ParamType::StringOrRecord),
    )
    .with_parameter(
        ToolParameter::new(
            "email",
            "Email address to send notification to. Example: \"user@example.com\". \
             This will be moved to the top level of the notify object.",
            false,
        )
        .with_format(StringFormat::Email),
    );

    for (name, description) in CHANNEL_SHORTHANDS {
        descriptor = descriptor.with_parameter(ToolParameter::new(name, description, false));
    }

    let descriptor = descriptor
        .with_parameter(
            ToolParameter::new("variables", "Variables to include in notify.variables", false)
                .with_type(ParamType::Record),
        )
        .requires(Resource::Workflows, Permission::Trigger);

    Tool::new(descriptor, TriggerWorkflow)
}

pub fn trigger_workflow_bulk(_context: &Context) -> Tool {
    let descriptor = ToolDescriptor::new(
        TRIGGER_WORKFLOW_BULK,
        "Trigger Workflow Bulk",
        "Trigger a workflow in bulk for multiple recipients",
    )
    .with_parameter(ToolParameter::new(
        "workflowName",
        "Name of the workflow to trigger",
        true,
    ))
    .with_parameter(
        ToolParameter::new("data", "Data to pass to the workflow", true)
            .with_type(ParamType::Record),
    )
    .with_parameter(
        ToolParameter::new(
            "notify",
            "Array of notification configurations for bulk execution",
            true,
        )
        .with_type(ParamType::Array(Box::new(ParamType::Record))),
    )
    .requires(Resource::Workflows, Permission::Trigger);

    Tool::new(descriptor, TriggerWorkflowBulk)
}

pub fn schedule_workflow(_context: &Context) -> Tool {
    let descriptor = ToolDescriptor::new(
        SCHEDULE_WORKFLOW,
        "Schedule Workflow",
        "Schedule a workflow to run at a future time (once or recurring)",
    )
    .with_parameter(ToolParameter::new(
        "name",
        "Name of the scheduled workflow",
        true,
    ))
    .with_parameter(ToolParameter::new(
        "workflowId",
        "ID of the workflow to schedule",
        true,
    ))
    .with_parameter(ToolParameter::new(
        "scheduleTime",
        "Schedule time in cron format or timestamp",
        true,
    ))
    .with_parameter(ToolParameter::new(
        "timezoneId",
        "Timezone ID (e.g., \"America/New_York\")",
        true,
    ))
    .with_parameter(
        ToolParameter::new("startDate", "Start date in ISO 8601 format", true)
            .with_format(StringFormat::DateTime),
    )
    .with_parameter(ToolParameter::new("workflowType", "Type of workflow", true))
    .with_parameter(
        ToolParameter::new("inputData", "Input data for the workflow", true)
            .with_type(ParamType::Record),
    )
    .with_parameter(
        ToolParameter::new("endDate", "End date in ISO 8601 format", false)
            .with_format(StringFormat::DateTime),
    )
    .requires(Resource::Workflows, Permission::Schedule);

    Tool::new(descriptor, ScheduleWorkflow)
}

struct TriggerWorkflow;

#[async_trait]
impl ToolHandler for TriggerWorkflow {
    async fn execute(
        &self,
        client: &dyn NotificationClient,
        _context: &Context,
        args: Map<String, Value>,
    ) -> Result<ToolOutput, ValidationError> {
        let input: TriggerWorkflowInput = parse_args(TRIGGER_WORKFLOW, args)?;
        let request = input.normalize()?;
        let result = client.trigger_workflow(&request).await;
        Ok(respond(TRIGGER_WORKFLOW, "Failed to trigger workflow", result))
    }
}

struct TriggerWorkflowBulk;

#[async_trait]
impl ToolHandler for TriggerWorkflowBulk {
    async fn execute(
        &self,
        client: &dyn NotificationClient,
        _context: &Context,
        args: Map<String, Value>,
    ) -> Result<ToolOutput, ValidationError> {
        let request: WorkflowBulkTriggerRequest = parse_args(TRIGGER_WORKFLOW_BULK, args)?;
        let result = client.trigger_workflow_bulk(&request).await;
        Ok(respond(
            TRIGGER_WORKFLOW_BULK,
            "Failed to trigger workflow bulk",
            result,
        ))
    }
}

struct ScheduleWorkflow;

#[async_trait]
impl ToolHandler for ScheduleWorkflow {
    async fn execute(
        &self,
        client: &dyn NotificationClient,
        _context: &Context,
        args: Map<String, Value>,
    ) -> Result<ToolOutput, ValidationError> {
        let request: ScheduleWorkflowRequest = parse_args(SCHEDULE_WORKFLOW, args)?;
        let result = client.schedule_workflow(&request).await;
        Ok(respond(SCHEDULE_WORKFLOW, "Failed to schedule workflow", result))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::testing::RecordingClient;
    use serde_json::json;
    use siren_domain::{DefaultToolValidator, ToolValidator};

    fn args(value: Value) -> Map<String, Value> {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_trigger_schema_lists_every_channel_field() {
        let tool = trigger_workflow(&Context::default());
        for field in siren_domain::notification::CHANNEL_FIELDS {
            assert!(tool.descriptor.parameter(field).is_some(), "missing {field}");
        }
        assert!(tool.descriptor.parameter("variables").is_some());
    }

    #[tokio::test]
    async fn test_trigger_workflow_sends_normalized_request() {
        let client = RecordingClient::default();
        let output = trigger_workflow(&Context::default())
            .execute(
                &client,
                &Context::default(),
                args(json!({
                    "workflowName": "welcome",
                    "email": "a@b.co",
                    "notify": {"variables": {"name": "John"}}
                })),
            )
            .await
            .unwrap();

        assert!(output.is_success());
        assert_eq!(
            client.calls()[0].1,
            json!({
                "workflowName": "welcome",
                "data": {},
                "notify": {"email": "a@b.co", "variables": {"name": "John"}}
            })
        );
    }

    #[tokio::test]
    async fn test_trigger_workflow_rejects_empty_payload_before_calling() {
        let client = RecordingClient::default();
        let err = trigger_workflow(&Context::default())
            .execute(&client, &Context::default(), args(json!({"workflowName": "w"})))
            .await
            .unwrap_err();

        assert_eq!(err.field, "data, notify");
        assert!(client.calls().is_empty());
    }

    #[tokio::test]
    async fn test_trigger_workflow_bulk_passes_through() {
        let client = RecordingClient::default();
        trigger_workflow_bulk(&Context::default())
            .execute(
                &client,
                &Context::default(),
                args(json!({
                    "workflowName": "digest",
                    "data": {"week": 12},
                    "notify": [{"email": "a@b.co"}, {"email": "c@d.co"}]
                })),
            )
            .await
            .unwrap();
        assert_eq!(client.calls()[0].1["notify"].as_array().unwrap().len(), 2);
    }

    #[test]
    fn test_schedule_rejects_bad_start_date() {
        let tool = schedule_workflow(&Context::default());
        let mut input = args(json!({
            "name": "nightly",
            "workflowId": "wf1",
            "scheduleTime": "0 2 * * *",
            "timezoneId": "UTC",
            "startDate": "2025-03-01",
            "workflowType": "DAILY",
            "inputData": {}
        }));
        assert!(DefaultToolValidator.validate(&tool.descriptor, &input).is_ok());

        input.insert("startDate".into(), json!("someday"));
        let err = DefaultToolValidator.validate(&tool.descriptor, &input).unwrap_err();
        assert_eq!(err.field, "startDate");
    }

    #[tokio::test]
    async fn test_schedule_workflow_failure() {
        let client = RecordingClient::failing();
        let output = schedule_workflow(&Context::default())
            .execute(
                &client,
                &Context::default(),
                args(json!({
                    "name": "nightly",
                    "workflowId": "wf1",
                    "scheduleTime": "0 2 * * *",
                    "timezoneId": "UTC",
                    "startDate": "2025-03-01",
                    "workflowType": "DAILY",
                    "inputData": {},
                    "endDate": "2025-04-01"
                })),
            )
            .await
            .unwrap();
        assert_eq!(output.to_value()["error"], "Failed to schedule workflow");
        assert_eq!(client.calls()[0].1["endDate"], "2025-04-01");
    }
}
