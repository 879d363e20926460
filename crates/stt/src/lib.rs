#![allow(
    clippy::must_use_candidate,
    clippy::missing_errors_doc,
    clippy::missing_const_for_fn,
    clippy::module_name_repetitions
)]

//! OpenAI-compatible transcription endpoint
//!
//! Validates request parameters against the Whisper API contract, obtains
//! audio from an upload or the object store, runs the configured model and
//! reshapes its output into the requested encoding.

mod error;
mod http_client;
mod normalize;
mod provider;
mod request;
mod server;
mod store;
mod subtitle;
mod types;

use std::sync::Arc;

use axum::{Router, extract::State, routing::post};

pub use error::{Result, SttError};
pub use normalize::{NormalizeOptions, normalize};
pub use provider::{TranscribeOptions, TranscriptionProvider};
pub use server::{Server, SttServerBuilder, TranscriptionReply};
pub use store::AudioStore;
pub use subtitle::vtt_to_srt;
pub use types::{
    AudioSource, ProviderResult, ProviderSegment, ProviderWord, ResponseFormat, Segment,
    SimpleResponse, TranscriptionInfo, TranscriptionRequest, Usage, VerboseResponse, Word,
};
use request::ExtractMultipart;

/// Build the transcription server from configuration
///
/// # Errors
///
/// Returns an error if the server fails to initialize
pub fn build_server(config: &murmur_config::Config) -> anyhow::Result<Arc<Server>> {
    let server = Arc::new(
        SttServerBuilder::new(config)
            .build()
            .map_err(|e| anyhow::anyhow!("Failed to initialize transcription server: {e}"))?,
    );
    Ok(server)
}

/// Create the endpoint router for transcription
pub fn endpoint_router() -> Router<Arc<Server>> {
    Router::new().route("/v1/audio/transcriptions", post(transcribe))
}

/// Handle transcription requests
async fn transcribe(
    State(server): State<Arc<Server>>,
    ExtractMultipart(request): ExtractMultipart,
) -> Result<axum::response::Response> {
    tracing::debug!("transcription handler called for model: {}", request.model);

    let reply = server.transcribe(request).await?;

    tracing::debug!("transcription complete");

    Ok(reply.into_response())
}
