//! CLI command definitions

use std::ffi::OsString;
use std::path::PathBuf;

use clap::Parser;
use clap::error::{ContextKind, ContextValue, ErrorKind};

use super::options::CliError;

/// Long options, as listed in "Invalid argument" errors
pub const ACCEPTED_ARGS: [&str; 7] = [
    "api-key",
    "tools",
    "workspace",
    "endpoint",
    "config",
    "verbose",
    "log-file",
];

/// CLI arguments for siren-mcp
#[derive(Parser, Debug, Clone, Default)]
#[command(name = "siren-mcp")]
#[command(author, version, about = "Siren notification tools over the Model Context Protocol")]
#[command(long_about = r#"
Runs an MCP server on stdio exposing the selected Siren tools.

Configuration files are loaded from (in priority order):
1. --config <path>     Explicit config file
2. ./siren.toml        Project-level config
3. ~/.config/siren-agent-toolkit/config.toml   Global config

Example:
  siren-mcp --tools=all --api-key=sk_siren_...
  siren-mcp --tools=messaging.send,templates.list --workspace=ws_123
"#)]
pub struct Cli {
    /// Comma-separated tools to expose (e.g. messaging.send,templates.list), or `all`
    #[arg(long, value_delimiter = ',', value_name = "TOOLS")]
    pub tools: Vec<String>,

    /// Siren API key (falls back to SIREN_API_KEY)
    #[arg(long, value_name = "KEY")]
    pub api_key: Option<String>,

    /// Workspace id (ws_...)
    #[arg(long, value_name = "ID")]
    pub workspace: Option<String>,

    /// Custom API base URL; implies the dev environment
    #[arg(long, value_name = "URL")]
    pub endpoint: Option<String>,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Write logs to this file instead of stderr
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

/// Parse arguments, reporting unknown options by name.
///
/// `args` includes the binary name, as with [`Parser::try_parse_from`].
pub fn parse_args<I, T>(args: I) -> Result<Cli, CliError>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    Cli::try_parse_from(args).map_err(|err| match err.kind() {
        ErrorKind::UnknownArgument => match err.get(ContextKind::InvalidArg) {
            Some(ContextValue::String(arg)) => CliError::InvalidArgument(argument_name(arg)),
            _ => CliError::Parse(err),
        },
        _ => CliError::Parse(err),
    })
}

/// `--invalid=value` -> `invalid`
fn argument_name(raw: &str) -> String {
    let name = raw.split('=').next().unwrap_or(raw);
    name.trim_start_matches('-').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_comma_separated_tools() {
        let cli = parse_args([
            "siren-mcp",
            "--tools=messaging.send,templates.list",
            "--api-key=sk_siren_test123",
        ])
        .unwrap();
        assert_eq!(cli.tools, vec!["messaging.send", "templates.list"]);
        assert_eq!(cli.api_key.as_deref(), Some("sk_siren_test123"));
    }

    #[test]
    fn test_parse_ambient_flags() {
        let cli = parse_args([
            "siren-mcp",
            "--tools=all",
            "-vv",
            "--config",
            "/tmp/siren.toml",
            "--log-file=/tmp/siren.log",
        ])
        .unwrap();
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.config, Some(PathBuf::from("/tmp/siren.toml")));
        assert_eq!(cli.log_file, Some(PathBuf::from("/tmp/siren.log")));
    }

    #[test]
    fn test_unknown_argument_is_named() {
        let err = parse_args(["siren-mcp", "--tools=all", "--invalid=value"]).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid argument: invalid. Accepted arguments are: api-key, tools, workspace, endpoint, config, verbose, log-file"
        );
    }

    #[test]
    fn test_argument_name() {
        assert_eq!(argument_name("--invalid=value"), "invalid");
        assert_eq!(argument_name("--invalid"), "invalid");
    }
}
