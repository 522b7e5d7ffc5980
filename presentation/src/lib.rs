//! Presentation layer for the Siren agent toolkit
//!
//! This crate exposes the permitted Siren tools to agent hosts: an MCP stdio
//! server, OpenAI function calling, LangChain-style structured tools, and
//! AI SDK / Mastra tool maps. It also defines the `siren-mcp` command line.

pub mod adapters;
pub mod cli;
pub mod mcp;
pub mod toolkit;

// Re-export commonly used types
pub use adapters::{
    AdapterError, AgentTool, AiSdkTool, AiSdkToolkit, MastraTool, MastraToolkit, OpenAiToolkit,
    SirenTool, StructuredToolkit,
};
pub use cli::{Cli, CliError, ServerOptions, parse_args, resolve};
pub use mcp::{McpError, McpServer, run_stdio};
pub use toolkit::SirenToolkit;
