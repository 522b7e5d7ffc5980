//! User tools

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{Map, Value, json};
use siren_domain::notification::UserRequest;
use siren_domain::{
    Context, ParamType, Permission, Resource, StringFormat, ToolDescriptor, ToolOutput,
    ToolParameter, ValidationError,
};

use super::{Tool, ToolHandler, failed, parse_args};
use crate::ports::notification_client::NotificationClient;

const ADD_USER: &str = "add_user";
const UPDATE_USER: &str = "update_user";
const DELETE_USER: &str = "delete_user";

/// Same fields for add and update
fn with_user_fields(descriptor: ToolDescriptor) -> ToolDescriptor {
    descriptor
        .with_parameter(ToolParameter::new(
            "uniqueId",
            "Unique identifier for the user",
            true,
        ))
        .with_parameter(
            ToolParameter::new("email", "User email address", false)
                .with_format(StringFormat::Email),
        )
        .with_parameter(ToolParameter::new("phone", "User phone number", false))
        .with_parameter(ToolParameter::new("firstName", "User first name", false))
        .with_parameter(ToolParameter::new("lastName", "User last name", false))
        .with_parameter(
            ToolParameter::new("attributes", "Additional user attributes", false)
                .with_type(ParamType::Record),
        )
}

pub fn add_user(_context: &Context) -> Tool {
    let descriptor = with_user_fields(ToolDescriptor::new(
        ADD_USER,
        "Add User",
        "Create a new user or update existing user with given unique_id",
    ))
    .requires(Resource::Users, Permission::Create);

    Tool::new(descriptor, AddUser)
}

pub fn update_user(_context: &Context) -> Tool {
    let descriptor = with_user_fields(ToolDescriptor::new(
        UPDATE_USER,
        "Update User",
        "Update an existing user's information",
    ))
    .requires(Resource::Users, Permission::Update);

    Tool::new(descriptor, UpdateUser)
}

pub fn delete_user(_context: &Context) -> Tool {
    let descriptor = ToolDescriptor::new(DELETE_USER, "Delete User", "Delete an existing user")
        .with_parameter(ToolParameter::new(
            "uniqueId",
            "Unique identifier for the user to delete",
            true,
        ))
        .requires(Resource::Users, Permission::Delete);

    Tool::new(descriptor, DeleteUser)
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UniqueIdArgs {
    unique_id: String,
}

struct AddUser;

#[async_trait]
impl ToolHandler for AddUser {
    async fn execute(
        &self,
        client: &dyn NotificationClient,
        _context: &Context,
        args: Map<String, Value>,
    ) -> Result<ToolOutput, ValidationError> {
        let request: UserRequest = parse_args(ADD_USER, args)?;

        Ok(match client.add_user(&request).await {
            Ok(user) => ToolOutput::success(json!({ "user": user })),
            Err(e) => failed(ADD_USER, "Failed to add user", e),
        })
    }
}

struct UpdateUser;

#[async_trait]
impl ToolHandler for UpdateUser {
    async fn execute(
        &self,
        client: &dyn NotificationClient,
        _context: &Context,
        args: Map<String, Value>,
    ) -> Result<ToolOutput, ValidationError> {
        let request: UserRequest = parse_args(UPDATE_USER, args)?;

        Ok(match client.update_user(&request.unique_id, &request).await {
            Ok(user) => ToolOutput::success(json!({ "user": user })),
            Err(e) => failed(UPDATE_USER, "Failed to update user", e),
        })
    }
}

struct DeleteUser;

#[async_trait]
impl ToolHandler for DeleteUser {
    async fn execute(
        &self,
        client: &dyn NotificationClient,
        _context: &Context,
        args: Map<String, Value>,
    ) -> Result<ToolOutput, ValidationError> {
        let args: UniqueIdArgs = parse_args(DELETE_USER, args)?;

        Ok(match client.delete_user(&args.unique_id).await {
            Ok(success) => ToolOutput::success(json!({ "success": success })),
            Err(e) => failed(DELETE_USER, "Failed to delete user", e),
        })
    }
}
