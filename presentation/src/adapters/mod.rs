//! Framework adapters
//!
//! Each adapter wraps one [`SirenToolkit`] and reshapes its tools for a
//! host framework. None of them adds vendor behavior.

pub mod ai_sdk;
pub mod mastra;
pub mod openai;
pub mod structured;

use std::sync::Arc;

use futures::future::BoxFuture;
use serde_json::Value;
use siren_application::ApiError;
use thiserror::Error;

use crate::toolkit::SirenToolkit;

pub use ai_sdk::{AiSdkTool, AiSdkToolkit};
pub use mastra::{MastraTool, MastraToolInput, MastraToolkit};
pub use openai::{FunctionCall, OpenAiToolkit, ToolCall, ToolMessage};
pub use structured::{AgentTool, SirenTool, StructuredToolkit};

/// Errors raised while translating a host's tool-call envelope
#[derive(Error, Debug)]
pub enum AdapterError {
    #[error("Invalid tool call arguments: {0}")]
    InvalidArguments(#[source] serde_json::Error),

    #[error(transparent)]
    Api(#[from] ApiError),
}

/// Future returned by closure-style tool executors
pub type ToolFuture = BoxFuture<'static, Result<String, ApiError>>;

/// Boxed `args -> JSON text` executor bound to one method
pub type ToolExecutor = Arc<dyn Fn(Value) -> ToolFuture + Send + Sync>;

/// Executor forwarding to `toolkit.run(method, args)`
pub(crate) fn executor(toolkit: Arc<SirenToolkit>, method: String) -> ToolExecutor {
    Arc::new(move |args: Value| {
        let toolkit = Arc::clone(&toolkit);
        let method = method.clone();
        Box::pin(async move { toolkit.run(&method, args).await }) as ToolFuture
    })
}
