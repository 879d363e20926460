pub(crate) mod workers_ai;

use async_trait::async_trait;

use crate::types::ProviderResult;

/// Hints forwarded to the transcription model
#[derive(Debug, Default)]
pub struct TranscribeOptions {
    /// Language hint (ISO 639-1)
    pub language: Option<String>,
    /// Prompt to guide the model
    pub prompt: Option<String>,
}

/// Black-box transcription model invocation
///
/// One call per request, no retries; upstream failures surface directly
/// as the response for this request.
#[async_trait]
pub trait TranscriptionProvider: Send + Sync {
    /// Transcribe raw audio bytes into a provider result record
    async fn transcribe(&self, audio: Vec<u8>, options: &TranscribeOptions) -> crate::error::Result<ProviderResult>;
}
