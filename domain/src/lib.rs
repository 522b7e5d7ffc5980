//! Domain layer for the Siren agent toolkit
//!
//! This crate contains the tool descriptor model, the permission model and
//! the vendor request types. It has no dependencies on infrastructure or
//! presentation concerns.
//!
//! # Core Concepts
//!
//! ## Tools
//!
//! Every notification API operation is exposed as a tool: a
//! [`ToolDescriptor`] carrying the input schema and the `(resource, permission)`
//! pairs it needs.
//!
//! ## Permissions
//!
//! A [`Configuration`] may carry an [`Actions`] grant set. Without one every
//! tool is exposed; with one, a tool is exposed only when all of its required
//! pairs are granted (see [`is_tool_allowed`]).

pub mod config;
pub mod context;
pub mod core;
pub mod notification;
pub mod permission;
pub mod tool;

// Re-export commonly used types
pub use config::Configuration;
pub use context::{Context, Environment};
pub use core::error::{DomainError, ValidationError};
pub use notification::{
    ChatButton, ChatEndRequest, ChatMessageRequest, CreateTemplateRequest, RecipientType,
    ScheduleWorkflowRequest, SendMessageRequest, TemplateQuery, TriggerWorkflowInput,
    UpdateTemplateRequest, UserRequest, WebhookConfig, WorkflowBulkTriggerRequest,
    WorkflowPayload, WorkflowTriggerRequest,
};
pub use permission::{Actions, Permission, RequiredActions, Resource, is_tool_allowed};
pub use tool::{
    DefaultToolValidator, ParamType, StringFormat, ToolDescriptor, ToolFailure, ToolOutput,
    ToolParameter, ToolValidator, strip_unknown,
};
