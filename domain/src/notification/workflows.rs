//! Workflow requests and trigger-payload normalization.
//!
//! Hosts often pass `data`/`notify` as JSON text, or put recipient fields at
//! the top level of the arguments. [`TriggerWorkflowInput::normalize`] folds
//! all of that into the single `{workflowName, data, notify}` body the vendor
//! expects:
//!
//! 1. `notify` starts as `{"variables": {}}`.
//! 2. Raw `notify` entries: channel keys are copied, `variables` is merged,
//!    anything else becomes a variable.
//! 3. Top-level channel fields overwrite `notify[channel]`.
//! 4. Top-level `variables` merge last and win on conflict.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::core::error::ValidationError;

/// Recipient keys that live at the top level of `notify`
pub const CHANNEL_FIELDS: [&str; 10] = [
    "email",
    "sms",
    "whatsapp",
    "pushToken",
    "inApp",
    "slack",
    "discord",
    "teams",
    "line",
    "userId",
];

const VARIABLES: &str = "variables";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkflowTriggerRequest {
    pub workflow_name: String,
    pub data: Map<String, Value>,
    pub notify: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkflowBulkTriggerRequest {
    pub workflow_name: String,
    pub data: Map<String, Value>,
    /// One notify object per recipient
    pub notify: Vec<Map<String, Value>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleWorkflowRequest {
    pub name: String,
    pub workflow_id: String,
    /// Cron expression or timestamp
    pub schedule_time: String,
    /// IANA zone, e.g. "America/New_York"
    pub timezone_id: String,
    pub start_date: String,
    pub workflow_type: String,
    pub input_data: Map<String, Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
}

/// `data` or `notify` as supplied by the host: an object or JSON text
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum WorkflowPayload {
    Object(Map<String, Value>),
    Text(String),
}

impl Default for WorkflowPayload {
    fn default() -> Self {
        WorkflowPayload::Object(Map::new())
    }
}

impl WorkflowPayload {
    /// Resolve to an object. Unparseable text and non-object JSON become `{}`.
    pub fn into_object(self) -> Map<String, Value> {
        match self {
            WorkflowPayload::Object(map) => map,
            WorkflowPayload::Text(text) => match serde_json::from_str::<Value>(&text) {
                Ok(Value::Object(map)) => map,
                _ => Map::new(),
            },
        }
    }
}

/// Arguments of the `trigger_workflow` tool before normalization
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TriggerWorkflowInput {
    pub workflow_name: String,
    #[serde(default)]
    pub data: WorkflowPayload,
    #[serde(default)]
    pub notify: WorkflowPayload,
    pub email: Option<String>,
    pub sms: Option<String>,
    pub whatsapp: Option<String>,
    pub push_token: Option<String>,
    pub in_app: Option<String>,
    pub slack: Option<String>,
    pub discord: Option<String>,
    pub teams: Option<String>,
    pub line: Option<String>,
    pub user_id: Option<String>,
    pub variables: Option<Map<String, Value>>,
}

impl TriggerWorkflowInput {
    /// Top-level channel shorthands paired with their `notify` key
    fn channel_overrides(&self) -> [(&'static str, Option<&String>); 10] {
        [
            ("email", self.email.as_ref()),
            ("sms", self.sms.as_ref()),
            ("whatsapp", self.whatsapp.as_ref()),
            ("pushToken", self.push_token.as_ref()),
            ("inApp", self.in_app.as_ref()),
            ("slack", self.slack.as_ref()),
            ("discord", self.discord.as_ref()),
            ("teams", self.teams.as_ref()),
            ("line", self.line.as_ref()),
            ("userId", self.user_id.as_ref()),
        ]
    }

    /// Build the vendor request, or reject a trigger with nothing to send.
    pub fn normalize(mut self) -> Result<WorkflowTriggerRequest, ValidationError> {
        let mut variables = Map::new();
        let mut notify = Map::new();

        for (key, value) in std::mem::take(&mut self.notify).into_object() {
            if CHANNEL_FIELDS.contains(&key.as_str()) {
                notify.insert(key, value);
            } else if key == VARIABLES {
                if let Value::Object(extra) = value {
                    variables.extend(extra);
                } else if !value.is_null() {
                    variables.insert(key, value);
                }
            } else {
                variables.insert(key, value);
            }
        }

        for (key, value) in self.channel_overrides() {
            if let Some(value) = value {
                notify.insert(key.to_string(), Value::String(value.clone()));
            }
        }

        if let Some(extra) = self.variables.take() {
            variables.extend(extra);
        }

        let data = self.data.into_object();
        if data.is_empty() && notify.is_empty() && variables.is_empty() {
            return Err(ValidationError::new(
                "trigger_workflow",
                "data, notify",
                "At least one of data or notify must be provided with non-empty objects",
            ));
        }

        notify.insert(VARIABLES.to_string(), Value::Object(variables));

        Ok(WorkflowTriggerRequest {
            workflow_name: self.workflow_name,
            data,
            notify,
        })
    }
}
