//! Vercel AI SDK style tool map: `method -> {description, parameters, execute}`.

use std::collections::BTreeMap;
use std::sync::Arc;

use serde_json::Value;

use super::{ToolExecutor, ToolFuture, executor};
use crate::toolkit::SirenToolkit;

#[derive(Clone)]
pub struct AiSdkTool {
    pub description: String,
    pub parameters: Value,
    execute: ToolExecutor,
}

impl AiSdkTool {
    pub fn execute(&self, args: Value) -> ToolFuture {
        (self.execute)(args)
    }
}

impl std::fmt::Debug for AiSdkTool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AiSdkTool")
            .field("description", &self.description)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Clone)]
pub struct AiSdkToolkit {
    tools: BTreeMap<String, AiSdkTool>,
}

impl AiSdkToolkit {
    pub fn new(toolkit: SirenToolkit) -> Self {
        let toolkit = Arc::new(toolkit);
        let tools = toolkit
            .descriptors()
            .iter()
            .map(|descriptor| {
                let tool = AiSdkTool {
                    description: descriptor.description.clone(),
                    parameters: toolkit.input_schema(descriptor),
                    execute: executor(Arc::clone(&toolkit), descriptor.method.clone()),
                };
                (descriptor.method.clone(), tool)
            })
            .collect();

        Self { tools }
    }

    pub fn tools(&self) -> &BTreeMap<String, AiSdkTool> {
        &self.tools
    }

    pub fn tool(&self, method: &str) -> Option<&AiSdkTool> {
        self.tools.get(method)
    }
}
