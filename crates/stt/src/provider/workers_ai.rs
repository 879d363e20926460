use async_trait::async_trait;
use base64::Engine as _;
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};

use crate::{
    error::SttError,
    http_client::http_client,
    provider::{TranscribeOptions, TranscriptionProvider},
    types::ProviderResult,
};

const DEFAULT_WORKERS_AI_API_URL: &str = "https://api.cloudflare.com/client/v4";

/// Cloudflare Workers AI transcription provider
pub(crate) struct WorkersAiProvider {
    client: Client,
    base_url: String,
    account_id: String,
    api_token: SecretString,
    model: String,
}

impl WorkersAiProvider {
    pub fn new(config: &murmur_config::ProviderConfig) -> Self {
        let client = http_client();
        let base_url = config
            .base_url
            .clone()
            .unwrap_or_else(|| DEFAULT_WORKERS_AI_API_URL.to_string());

        Self {
            client,
            base_url,
            account_id: config.account_id.clone(),
            api_token: config.api_token.clone(),
            model: config.model.clone(),
        }
    }
}

#[derive(serde::Serialize)]
struct WorkersAiRequest<'a> {
    /// Base64-encoded audio bytes
    audio: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    language: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    initial_prompt: Option<&'a str>,
}

/// Workers AI response envelope
#[derive(serde::Deserialize)]
struct WorkersAiEnvelope {
    result: Option<ProviderResult>,
    #[serde(default)]
    success: bool,
    #[serde(default)]
    errors: Vec<WorkersAiError>,
}

#[derive(serde::Deserialize)]
struct WorkersAiError {
    #[serde(default)]
    message: String,
}

#[async_trait]
impl TranscriptionProvider for WorkersAiProvider {
    async fn transcribe(&self, audio: Vec<u8>, options: &TranscribeOptions) -> crate::error::Result<ProviderResult> {
        let url = format!("{}/accounts/{}/ai/run/{}", self.base_url, self.account_id, self.model);

        tracing::debug!(
            "Workers AI transcription request: {} bytes, model={}",
            audio.len(),
            self.model,
        );

        let body = WorkersAiRequest {
            audio: base64::engine::general_purpose::STANDARD.encode(audio),
            language: options.language.as_deref(),
            initial_prompt: options.prompt.as_deref(),
        };

        let response = self
            .client
            .post(&url)
            .header(
                "Authorization",
                format!("Bearer {}", self.api_token.expose_secret()),
            )
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Workers AI request failed: {e}");
                SttError::ConnectionError(format!("Failed to send request to Workers AI: {e}"))
            })?;

        let status = response.status();

        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_else(|_| "Unknown error".to_string());

            tracing::error!("Workers AI error ({status}): {error_text}");

            return Err(SttError::ProviderApiError {
                status: status.as_u16(),
                message: error_text,
            });
        }

        let envelope: WorkersAiEnvelope = response.json().await.map_err(|e| {
            tracing::error!("Failed to parse Workers AI response: {e}");
            SttError::InternalError
        })?;

        if !envelope.success {
            let message = envelope
                .errors
                .iter()
                .map(|e| e.message.as_str())
                .collect::<Vec<_>>()
                .join("; ");

            tracing::error!("Workers AI reported failure: {message}");

            return Err(SttError::ProviderApiError {
                status: status.as_u16(),
                message,
            });
        }

        let result = envelope.result.ok_or_else(|| {
            tracing::error!("Workers AI response missing result");
            SttError::InternalError
        })?;

        tracing::debug!("Workers AI transcription complete");

        Ok(result)
    }
}
