//! HTTP adapter for the Siren notification API
//!
//! [`HttpSirenClient`] implements the application's `NotificationClient`
//! port with a single shared `reqwest::Client`.
//!
//! | Context | Base URL |
//! |---------|----------|
//! | `endpoint` set | that URL |
//! | `env = dev` | `https://api.dev.trysiren.io` |
//! | otherwise | `https://api.trysiren.io` |
//!
//! Every response is wrapped in a `{data, error}` envelope; see [`envelope`].

mod client;
pub mod envelope;
mod wire;

pub use client::{DEFAULT_TIMEOUT_SECS, HttpSirenClient, base_url};
