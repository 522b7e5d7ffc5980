//! Infrastructure layer for the Siren agent toolkit
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer, including configuration file loading.

pub mod config;
pub mod schema;
pub mod siren;

// Re-export commonly used types
pub use config::{
    ConfigLoader, ConfigValidationError, FileApiConfig, FileConfig, FileLoggingConfig,
};
pub use schema::JsonSchemaToolConverter;
pub use siren::{DEFAULT_TIMEOUT_SECS, HttpSirenClient, base_url};
