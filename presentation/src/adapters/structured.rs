//! LangChain-style structured tools.
//!
//! Each tool is an object with a name, description and JSON Schema that can
//! be invoked with an argument object.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use siren_application::ApiError;

use crate::toolkit::SirenToolkit;

/// Invocable tool as agent frameworks see it
#[async_trait]
pub trait AgentTool: Send + Sync {
    fn name(&self) -> &str;

    fn description(&self) -> &str;

    /// JSON Schema of the argument object
    fn schema(&self) -> &Value;

    /// Run with an argument object; returns JSON text
    async fn invoke(&self, args: Value) -> Result<String, ApiError>;
}

/// A Siren operation exposed as an [`AgentTool`]
#[derive(Clone)]
pub struct SirenTool {
    toolkit: Arc<SirenToolkit>,
    method: String,
    description: String,
    schema: Value,
}

impl SirenTool {
    pub fn method(&self) -> &str {
        &self.method
    }
}

#[async_trait]
impl AgentTool for SirenTool {
    fn name(&self) -> &str {
        &self.method
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn schema(&self) -> &Value {
        &self.schema
    }

    async fn invoke(&self, args: Value) -> Result<String, ApiError> {
        self.toolkit.run(&self.method, args).await
    }
}

impl std::fmt::Debug for SirenTool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SirenTool")
            .field("method", &self.method)
            .finish_non_exhaustive()
    }
}

pub struct StructuredToolkit {
    tools: Vec<SirenTool>,
}

impl StructuredToolkit {
    pub fn new(toolkit: SirenToolkit) -> Self {
        let toolkit = Arc::new(toolkit);
        let tools = toolkit
            .descriptors()
            .iter()
            .map(|descriptor| SirenTool {
                toolkit: Arc::clone(&toolkit),
                method: descriptor.method.clone(),
                description: descriptor.description.clone(),
                schema: toolkit.input_schema(descriptor),
            })
            .collect();

        Self { tools }
    }

    pub fn tools(&self) -> &[SirenTool] {
        &self.tools
    }

    /// Tools as trait objects, for hosts that mix in their own tools
    pub fn agent_tools(&self) -> Vec<Arc<dyn AgentTool>> {
        self.tools
            .iter()
            .cloned()
            .map(|tool| Arc::new(tool) as Arc<dyn AgentTool>)
            .collect()
    }
}
