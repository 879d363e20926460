use secrecy::SecretString;
use serde::Deserialize;

/// Transcription provider configuration (Cloudflare Workers AI REST surface)
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProviderConfig {
    /// Account identifier the model runs under
    pub account_id: String,
    /// API token used as a bearer credential against the provider
    pub api_token: SecretString,
    /// Model identifier (e.g. "@cf/openai/whisper-large-v3-turbo")
    pub model: String,
    /// Base URL override, mainly for tests
    #[serde(default)]
    pub base_url: Option<String>,
}
