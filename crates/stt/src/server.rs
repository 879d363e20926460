use crate::{
    error::SttError,
    normalize::{NormalizeOptions, normalize},
    provider::{TranscribeOptions, TranscriptionProvider, workers_ai::WorkersAiProvider},
    store::{AudioStore, HttpObjectStore},
    subtitle,
    types::{AudioSource, ResponseFormat, SimpleResponse, TranscriptionRequest, VerboseResponse},
};

/// Transcription server: resolves the audio source, invokes the model and
/// encodes the result in the requested format
pub struct Server {
    provider: Box<dyn TranscriptionProvider>,
    store: Option<Box<dyn AudioStore>>,
}

impl Server {
    /// Assemble a server from explicit collaborators
    ///
    /// Used directly in tests with fake provider and store implementations.
    pub fn new(provider: Box<dyn TranscriptionProvider>, store: Option<Box<dyn AudioStore>>) -> Self {
        Self { provider, store }
    }

    /// Run one transcription request through to an encoded reply
    pub async fn transcribe(&self, request: TranscriptionRequest) -> crate::error::Result<TranscriptionReply> {
        let want_words = request.wants_words();
        let want_segments = request.wants_segments();

        let audio = self.resolve_audio(request.source).await?;

        let options = TranscribeOptions {
            language: request.language.clone(),
            prompt: request.prompt,
        };

        let result = self.provider.transcribe(audio, &options).await?;

        match request.response_format {
            ResponseFormat::Text => Ok(TranscriptionReply::Text(result.text)),
            ResponseFormat::Vtt => result
                .vtt
                .map(TranscriptionReply::Vtt)
                .ok_or_else(missing_subtitles),
            ResponseFormat::Srt => result
                .vtt
                .as_deref()
                .map(|vtt| TranscriptionReply::Srt(subtitle::vtt_to_srt(vtt)))
                .ok_or_else(missing_subtitles),
            ResponseFormat::VerboseJson => Ok(TranscriptionReply::Verbose(Box::new(normalize(
                &result,
                &NormalizeOptions {
                    segments: want_segments,
                    words: want_words,
                    fallback_language: request.language.as_deref(),
                },
            )))),
            ResponseFormat::Json => Ok(TranscriptionReply::Json(SimpleResponse { text: result.text })),
        }
    }

    /// Obtain the audio bytes, preferring an inline upload
    async fn resolve_audio(&self, source: AudioSource) -> crate::error::Result<Vec<u8>> {
        match source {
            AudioSource::Upload(data) => Ok(data),
            AudioSource::ObjectKey(key) => {
                let store = self
                    .store
                    .as_ref()
                    .ok_or_else(|| SttError::ConfigError("no object storage configured".to_string()))?;

                store.fetch(&key).await?.ok_or_else(|| {
                    SttError::invalid_param("file", format!("audio not found in storage for key '{key}'"))
                })
            }
        }
    }
}

fn missing_subtitles() -> SttError {
    SttError::invalid_param("response_format", "subtitle output is not available from model output")
}

/// Encoded transcription response body
#[derive(Debug)]
pub enum TranscriptionReply {
    /// Raw transcript, `text/plain`
    Text(String),
    /// Provider subtitle markup, `text/vtt`
    Vtt(String),
    /// Converted subtitles, `application/x-subrip`
    Srt(String),
    /// Minimal transcript body, `application/json`
    Json(SimpleResponse),
    /// Full verbose schema, `application/json`
    Verbose(Box<VerboseResponse>),
}

impl TranscriptionReply {
    /// Convert the reply into an axum HTTP response with the right
    /// content type
    pub fn into_response(self) -> axum::response::Response {
        use axum::response::IntoResponse;

        match self {
            Self::Text(body) => plain_body("text/plain; charset=utf-8", body),
            Self::Vtt(body) => plain_body("text/vtt", body),
            Self::Srt(body) => plain_body("application/x-subrip", body),
            Self::Json(body) => axum::Json(body).into_response(),
            Self::Verbose(body) => axum::Json(body).into_response(),
        }
    }
}

fn plain_body(content_type: &'static str, body: String) -> axum::response::Response {
    axum::response::Response::builder()
        .header(http::header::CONTENT_TYPE, content_type)
        .body(axum::body::Body::from(body))
        .unwrap_or_else(|_| {
            axum::response::Response::builder()
                .status(http::StatusCode::INTERNAL_SERVER_ERROR)
                .body(axum::body::Body::empty())
                .expect("empty response must build")
        })
}

/// Builder for constructing the transcription server from configuration
pub struct SttServerBuilder<'a> {
    config: &'a murmur_config::Config,
}

impl<'a> SttServerBuilder<'a> {
    pub fn new(config: &'a murmur_config::Config) -> Self {
        Self { config }
    }

    pub fn build(self) -> crate::error::Result<Server> {
        let provider = Box::new(WorkersAiProvider::new(&self.config.provider));

        let store = self
            .config
            .storage
            .as_ref()
            .map(|storage| Box::new(HttpObjectStore::new(storage.base_url.clone())) as Box<dyn AudioStore>);

        if store.is_none() {
            tracing::debug!("no object storage configured, r2_key requests will fail");
        }

        Ok(Server { provider, store })
    }
}
