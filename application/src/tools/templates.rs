//! Template tools

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{Map, Value, json};
use siren_domain::notification::{CreateTemplateRequest, TemplateQuery, UpdateTemplateRequest};
use siren_domain::{
    Context, ParamType, Permission, Resource, ToolDescriptor, ToolOutput, ToolParameter,
    ValidationError,
};

use super::{Tool, ToolHandler, failed, parse_args, respond};
use crate::ports::notification_client::NotificationClient;

const LIST_TEMPLATES: &str = "list_templates";
const CREATE_TEMPLATE: &str = "create_template";
const UPDATE_TEMPLATE: &str = "update_template";
const DELETE_TEMPLATE: &str = "delete_template";
const PUBLISH_TEMPLATE: &str = "publish_template";

fn tag_names_type() -> ParamType {
    ParamType::Array(Box::new(ParamType::String))
}

fn variables_type() -> ParamType {
    ParamType::Array(Box::new(ParamType::Object(vec![
        ToolParameter::new("name", "Variable name", true),
        ToolParameter::new("defaultValue", "Value used when none is supplied", false),
    ])))
}

fn configurations_type() -> ParamType {
    let sms = ParamType::Object(vec![
        ToolParameter::new("body", "SMS text", true),
        ToolParameter::new("channel", "Channel", true).with_type(ParamType::Literal("SMS".into())),
        ToolParameter::new("isFlash", "Send as flash SMS", false).with_type(ParamType::Boolean),
        ToolParameter::new("isUnicode", "Encode as unicode", false).with_type(ParamType::Boolean),
    ]);
    let email = ParamType::Object(vec![
        ToolParameter::new("subject", "Email subject", true),
        ToolParameter::new("channel", "Channel", true)
            .with_type(ParamType::Literal("EMAIL".into())),
        ToolParameter::new("body", "Email body", true),
        ToolParameter::new("attachments", "Attachments", false)
            .with_type(ParamType::Array(Box::new(ParamType::Record))),
        ToolParameter::new("isRawHTML", "Body is raw HTML", false).with_type(ParamType::Boolean),
        ToolParameter::new("isPlainText", "Body is plain text", false)
            .with_type(ParamType::Boolean),
    ]);

    ParamType::Object(vec![
        ToolParameter::new("SMS", "SMS configuration", false).with_type(sms),
        ToolParameter::new("EMAIL", "Email configuration", false).with_type(email),
    ])
}

pub fn list_templates(_context: &Context) -> Tool {
    let descriptor = ToolDescriptor::new(
        LIST_TEMPLATES,
        "List Templates",
        "Retrieve a list of notification templates with optional filtering, sorting, and pagination",
    )
    .with_parameter(ToolParameter::new("tagNames", "Filter by tag names", false))
    .with_parameter(ToolParameter::new("search", "Search by field", false))
    .with_parameter(ToolParameter::new("sort", "Sort by field", false))
    .with_parameter(ToolParameter::new("page", "Page number", false).with_type(ParamType::Integer))
    .with_parameter(ToolParameter::new("size", "Page size", false).with_type(ParamType::Integer))
    .requires(Resource::Templates, Permission::Read);

    Tool::new(descriptor, ListTemplates)
}

pub fn create_template(_context: &Context) -> Tool {
    let descriptor = ToolDescriptor::new(
        CREATE_TEMPLATE,
        "Create Template",
        "Create a new notification template",
    )
    .with_parameter(ToolParameter::new("name", "The name of the template", true))
    .with_parameter(ToolParameter::new(
        "description",
        "The description of the template",
        true,
    ))
    .with_parameter(
        ToolParameter::new("tagNames", "Tags associated with the template", true)
            .with_type(tag_names_type()),
    )
    .with_parameter(
        ToolParameter::new(
            "variables",
            "Template variables with optional default values",
            true,
        )
        .with_type(variables_type()),
    )
    .with_parameter(
        ToolParameter::new(
            "configurations",
            "Channel-specific template configurations",
            true,
        )
        .with_type(configurations_type()),
    )
    .requires(Resource::Templates, Permission::Create);

    Tool::new(descriptor, CreateTemplate)
}

pub fn update_template(_context: &Context) -> Tool {
    let descriptor = ToolDescriptor::new(
        UPDATE_TEMPLATE,
        "Update Template",
        "Update an existing notification template",
    )
    .with_parameter(ToolParameter::new(
        "templateId",
        "The ID of the template to update",
        true,
    ))
    .with_parameter(ToolParameter::new("name", "The name of the template", true))
    .with_parameter(ToolParameter::new(
        "description",
        "The description of the template",
        false,
    ))
    .with_parameter(
        ToolParameter::new("tagNames", "Tags associated with the template", false)
            .with_type(tag_names_type()),
    )
    .with_parameter(
        ToolParameter::new(
            "variables",
            "Template variables with optional default values",
            false,
        )
        .with_type(variables_type()),
    )
    .with_parameter(
        ToolParameter::new(
            "configurations",
            "Channel-specific template configurations",
            false,
        )
        .with_type(configurations_type()),
    )
    .requires(Resource::Templates, Permission::Update);

    Tool::new(descriptor, UpdateTemplate)
}

pub fn delete_template(_context: &Context) -> Tool {
    let descriptor = ToolDescriptor::new(
        DELETE_TEMPLATE,
        "Delete Template",
        "Delete an existing notification template",
    )
    .with_parameter(ToolParameter::new(
        "template_id",
        "The ID of the template to delete",
        true,
    ))
    .requires(Resource::Templates, Permission::Delete);

    Tool::new(descriptor, DeleteTemplate)
}

pub fn publish_template(_context: &Context) -> Tool {
    let descriptor = ToolDescriptor::new(
        PUBLISH_TEMPLATE,
        "Publish Template",
        "Publish a template, making its latest draft version live",
    )
    .with_parameter(ToolParameter::new(
        "template_id",
        "The ID of the template to publish",
        true,
    ))
    .requires(Resource::Templates, Permission::Update);

    Tool::new(descriptor, PublishTemplate)
}

#[derive(Debug, Deserialize)]
struct TemplateIdArgs {
    template_id: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UpdateTemplateArgs {
    template_id: String,
    #[serde(flatten)]
    request: UpdateTemplateRequest,
}

struct ListTemplates;

#[async_trait]
impl ToolHandler for ListTemplates {
    async fn execute(
        &self,
        client: &dyn NotificationClient,
        _context: &Context,
        args: Map<String, Value>,
    ) -> Result<ToolOutput, ValidationError> {
        let query: TemplateQuery = parse_args(LIST_TEMPLATES, args)?;
        let result = client.list_templates(&query).await;
        Ok(respond(LIST_TEMPLATES, "Failed to list templates", result))
    }
}

struct CreateTemplate;

#[async_trait]
impl ToolHandler for CreateTemplate {
    async fn execute(
        &self,
        client: &dyn NotificationClient,
        _context: &Context,
        args: Map<String, Value>,
    ) -> Result<ToolOutput, ValidationError> {
        let request: CreateTemplateRequest = parse_args(CREATE_TEMPLATE, args)?;

        Ok(match client.create_template(&request).await {
            Ok(template) => ToolOutput::success(json!({ "template": template })),
            Err(e) => failed(CREATE_TEMPLATE, "Failed to create template", e),
        })
    }
}

struct UpdateTemplate;

#[async_trait]
impl ToolHandler for UpdateTemplate {
    async fn execute(
        &self,
        client: &dyn NotificationClient,
        _context: &Context,
        args: Map<String, Value>,
    ) -> Result<ToolOutput, ValidationError> {
        let args: UpdateTemplateArgs = parse_args(UPDATE_TEMPLATE, args)?;

        Ok(
            match client.update_template(&args.template_id, &args.request).await {
                Ok(template) => ToolOutput::success(json!({ "template": template })),
                Err(e) => failed(UPDATE_TEMPLATE, "Failed to update template", e),
            },
        )
    }
}

struct DeleteTemplate;

#[async_trait]
impl ToolHandler for DeleteTemplate {
    async fn execute(
        &self,
        client: &dyn NotificationClient,
        _context: &Context,
        args: Map<String, Value>,
    ) -> Result<ToolOutput, ValidationError> {
        let args: TemplateIdArgs = parse_args(DELETE_TEMPLATE, args)?;

        Ok(match client.delete_template(&args.template_id).await {
            Ok(success) => ToolOutput::success(json!({ "success": success })),
            Err(e) => failed(DELETE_TEMPLATE, "Failed to delete template", e),
        })
    }
}

struct PublishTemplate;

#[async_trait]
impl ToolHandler for PublishTemplate {
    async fn execute(
        &self,
        client: &dyn NotificationClient,
        _context: &Context,
        args: Map<String, Value>,
    ) -> Result<ToolOutput, ValidationError> {
        let args: TemplateIdArgs = parse_args(PUBLISH_TEMPLATE, args)?;

        Ok(match client.publish_template(&args.template_id).await {
            Ok(template) => ToolOutput::success(json!({ "template": template })),
            Err(e) => failed(PUBLISH_TEMPLATE, "Failed to publish template", e),
        })
    }
}
