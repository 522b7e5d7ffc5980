//! Resolution of CLI flags and file configuration into server options

use siren_application::descriptors;
use siren_domain::{Actions, Configuration, Context, Environment};
use siren_infrastructure::FileConfig;
use thiserror::Error;

use super::commands::{ACCEPTED_ARGS, Cli};

/// `--tools` selectors and the tool each one enables
const SELECTORS: [(&str, &str); 18] = [
    ("messaging.send", "send_message"),
    ("messaging.getStatus", "get_message_status"),
    ("messaging.getReplies", "get_message_replies"),
    ("templates.list", "list_templates"),
    ("templates.create", "create_template"),
    ("templates.update", "update_template"),
    ("templates.delete", "delete_template"),
    ("templates.publish", "publish_template"),
    ("users.add", "add_user"),
    ("users.update", "update_user"),
    ("users.delete", "delete_user"),
    ("workflows.trigger", "trigger_workflow"),
    ("workflows.triggerBulk", "trigger_workflow_bulk"),
    ("workflows.schedule", "schedule_workflow"),
    ("webhooks.configureNotification", "configure_notification_webhooks"),
    ("webhooks.configureInbound", "configure_inbound_webhooks"),
    ("chat.start", "start_chat"),
    ("chat.end", "end_chat"),
];

pub const ACCEPTED_TOOLS: [&str; 18] = {
    let mut names = [""; 18];
    let mut i = 0;
    while i < SELECTORS.len() {
        names[i] = SELECTORS[i].0;
        i += 1;
    }
    names
};

const ALL: &str = "all";
/// Environment variable consulted when `--api-key` is absent
pub const API_KEY_ENV: &str = "SIREN_API_KEY";
const API_KEY_PREFIXES: [&str; 3] = ["sk_siren_", "sk_test_", "sk_live_"];
const WORKSPACE_PREFIX: &str = "ws_";

/// Startup errors, worded for the person launching the server
#[derive(Error, Debug)]
pub enum CliError {
    #[error(transparent)]
    Parse(#[from] clap::Error),

    #[error("Invalid argument: {0}. Accepted arguments are: {args}", args = ACCEPTED_ARGS.join(", "))]
    InvalidArgument(String),

    #[error("The --tools argument must be provided.")]
    MissingTools,

    #[error("Invalid tool: {0}. Accepted tools are: {tools}", tools = ACCEPTED_TOOLS.join(", "))]
    InvalidTool(String),

    #[error(
        "Siren API key not provided. Please either pass it as an argument --api-key=$KEY or set the SIREN_API_KEY environment variable."
    )]
    MissingApiKey,

    #[error(r#"Siren API key must start with "sk_siren_", "sk_test_", or "sk_live_"."#)]
    InvalidApiKey,

    #[error(r#"Siren workspace must start with "ws_"."#)]
    InvalidWorkspace,
}

/// Everything needed to start the server
#[derive(Debug, Clone, PartialEq)]
pub struct ServerOptions {
    pub api_key: String,
    pub configuration: Configuration,
    /// Tool methods enabled by the selectors, in registry order
    pub tools: Vec<String>,
}

/// Tool method behind a `--tools` selector
pub fn selector_method(selector: &str) -> Option<&'static str> {
    SELECTORS
        .iter()
        .find(|(name, _)| *name == selector)
        .map(|(_, method)| *method)
}

/// Validate flags and build the grant set.
///
/// CLI flags override the file; `env_api_key` is the value of `SIREN_API_KEY`.
pub fn resolve(
    cli: &Cli,
    env_api_key: Option<String>,
    file: &FileConfig,
) -> Result<ServerOptions, CliError> {
    let selectors: Vec<&str> = cli
        .tools
        .iter()
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .collect();
    if selectors.is_empty() {
        return Err(CliError::MissingTools);
    }

    let mut methods = Vec::new();
    for selector in &selectors {
        if *selector == ALL {
            methods.extend(SELECTORS.iter().map(|(_, method)| *method));
            continue;
        }
        let method =
            selector_method(selector).ok_or_else(|| CliError::InvalidTool(selector.to_string()))?;
        methods.push(method);
    }

    let api_key = cli
        .api_key
        .clone()
        .or(env_api_key)
        .filter(|key| !key.is_empty())
        .ok_or(CliError::MissingApiKey)?;
    if !API_KEY_PREFIXES.iter().any(|p| api_key.starts_with(p)) {
        return Err(CliError::InvalidApiKey);
    }

    let workspace = cli.workspace.clone().or_else(|| file.workspace.clone());
    if let Some(workspace) = &workspace
        && !workspace.starts_with(WORKSPACE_PREFIX)
    {
        return Err(CliError::InvalidWorkspace);
    }

    let context = build_context(cli, file, workspace);

    let mut actions = Actions::new();
    let mut tools = Vec::new();
    for descriptor in descriptors(&context) {
        if methods.contains(&descriptor.method.as_str()) {
            actions = actions.grant_required(&descriptor.required_actions);
            tools.push(descriptor.method);
        }
    }

    Ok(ServerOptions {
        api_key,
        configuration: Configuration::new()
            .with_actions(actions)
            .with_context(context),
        tools,
    })
}

fn build_context(cli: &Cli, file: &FileConfig, workspace: Option<String>) -> Context {
    let mut context = file.to_context();
    context.workspace = workspace;

    // A custom endpoint always targets the dev environment
    if let Some(endpoint) = cli.endpoint.clone().or_else(|| file.api.endpoint.clone()) {
        context.endpoint = Some(endpoint);
        context.env = Some(Environment::Dev);
    }

    context
}
