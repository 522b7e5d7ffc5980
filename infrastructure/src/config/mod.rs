//! Configuration file loading for the Siren agent toolkit
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. `SIREN_`-prefixed environment variables
//! 2. `--config <path>` specified file
//! 3. Project root: `./siren.toml` or `./.siren.toml`
//! 4. Global: `$XDG_CONFIG_HOME/siren-agent-toolkit/config.toml`
//! 5. Default values

mod file_config;
mod loader;

pub use file_config::{ConfigValidationError, FileApiConfig, FileConfig, FileLoggingConfig};
pub use loader::ConfigLoader;
