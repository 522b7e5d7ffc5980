//! Application layer for the Siren agent toolkit
//!
//! This crate contains the port definitions, the per-tool delegates with
//! their registry, and the API facade. It depends only on the domain layer.

pub mod api;
pub mod ports;
pub mod tools;

// Re-export commonly used types
pub use api::{ApiError, SirenApi};
pub use ports::{
    notification_client::{ClientError, NotificationClient},
    tool_schema::ToolSchemaPort,
};
pub use tools::{Tool, ToolHandler, build_tools, descriptors, filtered_tools};
