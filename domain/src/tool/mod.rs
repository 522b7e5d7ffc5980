//! Tool domain module
//!
//! Every vendor operation is exposed as a tool described by a
//! [`ToolDescriptor`]: a stable `method` name, a human-readable name and
//! description, the input schema as a list of [`ToolParameter`]s, and the
//! `(resource, permission)` pairs the tool requires.
//!
//! ```text
//! ┌────────────────┐    ┌────────────────┐    ┌──────────────┐
//! │ ToolDescriptor │───▶│ ToolValidator  │───▶│ ToolOutput   │
//! │ (schema+perms) │    │ (args check)   │    │ (JSON value) │
//! └────────────────┘    └────────────────┘    └──────────────┘
//! ```
//!
//! # Architecture
//!
//! - **Domain** (this module): Pure definitions and validation, no I/O
//! - **Application** (`tools`): per-tool delegates and the registry
//! - **Infrastructure** (`JsonSchemaToolConverter`): descriptor to JSON Schema

pub mod entities;
pub mod traits;
pub mod value_objects;

pub use entities::{ParamType, StringFormat, ToolDescriptor, ToolParameter};
pub use traits::{DefaultToolValidator, ToolValidator, strip_unknown};
pub use value_objects::{ToolFailure, ToolOutput};
