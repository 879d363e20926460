//! Programmatic configuration builder for integration tests

use std::net::SocketAddr;

use murmur_config::{AuthConfig, Config, HealthConfig, ProviderConfig, ServerConfig, StorageConfig};
use secrecy::SecretString;

use super::mock_backend::MockBackend;

/// Bearer token every test server accepts unless overridden
pub const TEST_API_KEY: &str = "test-key";

/// Model identifier used across the test suite
pub const TEST_MODEL: &str = "@cf/openai/whisper-large-v3-turbo";

/// Builder for constructing test configurations
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Create a builder pointed at a mock provider backend
    pub fn new(backend: &MockBackend) -> Self {
        Self {
            config: Config {
                server: ServerConfig {
                    listen_address: Some(SocketAddr::from(([127, 0, 0, 1], 0))),
                    health: HealthConfig::default(),
                },
                auth: AuthConfig {
                    api_key: SecretString::from(TEST_API_KEY),
                },
                provider: ProviderConfig {
                    account_id: "test-account".to_owned(),
                    api_token: SecretString::from("test-token"),
                    model: TEST_MODEL.to_owned(),
                    base_url: Some(backend.provider_base_url()),
                },
                storage: None,
            },
        }
    }

    /// Point object storage at the mock backend
    pub fn with_storage(mut self, backend: &MockBackend) -> Self {
        self.config.storage = Some(StorageConfig {
            base_url: backend.storage_base_url(),
        });
        self
    }

    /// Disable the health endpoint
    pub fn without_health(mut self) -> Self {
        self.config.server.health.enabled = false;
        self
    }

    /// Build the final config
    pub fn build(self) -> Config {
        self.config
    }
}
