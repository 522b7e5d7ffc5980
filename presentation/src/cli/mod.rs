//! `siren-mcp` command line

pub mod commands;
pub mod options;

pub use commands::{ACCEPTED_ARGS, Cli, parse_args};
pub use options::{ACCEPTED_TOOLS, API_KEY_ENV, CliError, ServerOptions, resolve, selector_method};
