//! Mastra `createTool` map: `method -> {id, description, inputSchema, execute}`.
//!
//! Mastra hands the validated arguments to `execute` under `context`.

use std::collections::BTreeMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{ToolExecutor, ToolFuture, executor};
use crate::toolkit::SirenToolkit;

/// Execution input as Mastra passes it
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MastraToolInput {
    #[serde(default)]
    pub context: Value,
}

#[derive(Clone)]
pub struct MastraTool {
    pub id: String,
    pub description: String,
    pub input_schema: Value,
    execute: ToolExecutor,
}

impl MastraTool {
    pub fn execute(&self, input: MastraToolInput) -> ToolFuture {
        (self.execute)(input.context)
    }
}

impl std::fmt::Debug for MastraTool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MastraTool")
            .field("id", &self.id)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Clone)]
pub struct MastraToolkit {
    tools: BTreeMap<String, MastraTool>,
}

impl MastraToolkit {
    pub fn new(toolkit: SirenToolkit) -> Self {
        let toolkit = Arc::new(toolkit);
        let tools = toolkit
            .descriptors()
            .iter()
            .map(|descriptor| {
                let tool = MastraTool {
                    id: descriptor.method.clone(),
                    description: descriptor.description.clone(),
                    input_schema: toolkit.input_schema(descriptor),
                    execute: executor(Arc::clone(&toolkit), descriptor.method.clone()),
                };
                (descriptor.method.clone(), tool)
            })
            .collect();

        Self { tools }
    }

    pub fn tools(&self) -> &BTreeMap<String, MastraTool> {
        &self.tools
    }

    pub fn tool(&self, id: &str) -> Option<&MastraTool> {
        self.tools.get(id)
    }
}
