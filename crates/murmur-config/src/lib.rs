#![allow(clippy::must_use_candidate)]

pub mod auth;
mod env;
mod loader;
pub mod provider;
pub mod server;
pub mod storage;

use serde::Deserialize;

pub use auth::AuthConfig;
pub use provider::ProviderConfig;
pub use server::{HealthConfig, ServerConfig};
pub use storage::StorageConfig;

/// Top-level Murmur configuration
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,
    /// Static bearer-token authentication
    pub auth: AuthConfig,
    /// Transcription provider configuration
    pub provider: ProviderConfig,
    /// Object storage for pre-uploaded audio
    #[serde(default)]
    pub storage: Option<StorageConfig>,
}
