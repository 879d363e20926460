use secrecy::SecretString;
use serde::Deserialize;

/// Static bearer-token authentication configuration
///
/// Requests to `/v1/*` must carry `Authorization: Bearer <api_key>` with
/// the exact configured value.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AuthConfig {
    /// The shared secret clients must present
    pub api_key: SecretString,
}
