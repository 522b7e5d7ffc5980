//! Tool schema conversion port.
//!
//! Separates "which tools to expose" (domain + registry) from "how to
//! serialize them for a host" (infrastructure).

use siren_domain::tool::entities::{ToolDescriptor, ToolParameter};

/// Port for converting tool descriptors to JSON Schema.
pub trait ToolSchemaPort: Send + Sync {
    /// Input schema (`type: object`) of a single tool.
    fn input_schema(&self, tool: &ToolDescriptor) -> serde_json::Value;

    /// Schema of one parameter value.
    fn parameter_schema(&self, param: &ToolParameter) -> serde_json::Value;

    /// `{name, description, inputSchema}` for every tool, in input order.
    fn tools_schema(&self, tools: &[ToolDescriptor]) -> Vec<serde_json::Value> {
        tools
            .iter()
            .map(|tool| {
                serde_json::json!({
                    "name": tool.method,
                    "description": tool.description,
                    "inputSchema": self.input_schema(tool),
                })
            })
            .collect()
    }
}
