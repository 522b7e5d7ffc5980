//! Model Context Protocol server
//!
//! JSON-RPC 2.0 over newline-delimited stdio. Only the tool surface is
//! implemented: `initialize`, `notifications/initialized`, `ping`,
//! `tools/list` and `tools/call`.

pub mod protocol;
mod server;
mod stdio;

pub use server::{McpServer, SERVER_NAME};
pub use stdio::{McpError, run_stdio, serve};
