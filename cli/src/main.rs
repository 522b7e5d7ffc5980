//! CLI entrypoint for the Siren MCP server
//!
//! Wires configuration, logging, the HTTP client and the MCP stdio server.
//! stdout carries protocol frames only; everything else goes to stderr or
//! the log file.

use std::path::Path;
use std::time::Duration;

use anyhow::{Context as _, Result, anyhow};
use siren_infrastructure::{ConfigLoader, FileConfig};
use siren_presentation::cli::API_KEY_ENV;
use siren_presentation::{Cli, CliError, McpServer, SirenToolkit, parse_args, resolve, run_stdio};
use tokio_util::sync::CancellationToken;
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

const STARTUP_ERROR: &str = "Error initializing Siren MCP server";

#[tokio::main]
async fn main() -> Result<()> {
    let cli = match parse_args(std::env::args_os()) {
        Ok(cli) => cli,
        // --help, --version and malformed values
        Err(CliError::Parse(e)) => e.exit(),
        Err(e) => return Err(e).context(STARTUP_ERROR),
    };

    let file = ConfigLoader::load(cli.config.as_ref())
        .map_err(|e| anyhow!("Failed to load configuration: {}", e))?;
    file.validate().context("Invalid configuration")?;

    // Held until exit so buffered file logs are flushed
    let _guard = init_logging(&cli, &file)?;

    let options = resolve(&cli, std::env::var(API_KEY_ENV).ok(), &file).context(STARTUP_ERROR)?;
    info!(
        tools = ?options.tools,
        workspace = options.configuration.context.workspace.as_deref().unwrap_or("-"),
        "Starting Siren MCP server"
    );

    let toolkit = SirenToolkit::with_timeout(
        options.api_key,
        options.configuration,
        Duration::from_secs(file.api.timeout_seconds),
    )
    .context(STARTUP_ERROR)?;
    let server = McpServer::new(toolkit);

    let cancellation = CancellationToken::new();
    let token = cancellation.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            token.cancel();
        }
    });

    eprintln!("Siren MCP Server running on stdio");
    run_stdio(&server, cancellation).await?;

    info!("Siren MCP server stopped");
    Ok(())
}

/// Verbosity flags win over `RUST_LOG`, which wins over `logging.level`.
fn init_logging(cli: &Cli, file: &FileConfig) -> Result<Option<WorkerGuard>> {
    let filter = match cli.verbose {
        0 => match EnvFilter::try_from_default_env() {
            Ok(filter) => filter,
            Err(_) => EnvFilter::try_new(file.logging.level.as_deref().unwrap_or("warn"))
                .context("Invalid logging.level")?,
        },
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"), // -vvv or more
    };

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false);

    match cli.log_file.as_ref().or(file.logging.file.as_ref()) {
        Some(path) => {
            let name = path
                .file_name()
                .ok_or_else(|| anyhow!("Invalid log file path: {}", path.display()))?;
            let dir = path
                .parent()
                .filter(|dir| !dir.as_os_str().is_empty())
                .unwrap_or(Path::new("."));

            let (writer, guard) =
                tracing_appender::non_blocking(tracing_appender::rolling::never(dir, name));
            builder.with_writer(writer).with_ansi(false).init();
            Ok(Some(guard))
        }
        None => {
            builder.with_writer(std::io::stderr).init();
            Ok(None)
        }
    }
}
