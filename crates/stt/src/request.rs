use axum::body::Body;

use crate::{
    error::SttError,
    types::{AudioSource, ResponseFormat, TranscriptionRequest},
};

/// Extractor for multipart form data containing audio and parameters
///
/// Performs the compatibility-contract validation in order: `model` is
/// required, `timestamp_granularities[]` is only legal with
/// `verbose_json`, and exactly one audio source must be supplied (an
/// uploaded `file` wins over an `r2_key`).
#[derive(Debug)]
pub struct ExtractMultipart(pub TranscriptionRequest);

/// Body limit for audio uploads (32 MiB)
const BODY_LIMIT_BYTES: usize = 32 << 20;

impl<S> axum::extract::FromRequest<S> for ExtractMultipart
where
    S: Send + Sync,
{
    type Rejection = SttError;

    async fn from_request(request: http::Request<Body>, _state: &S) -> Result<Self, Self::Rejection> {
        let content_type = request
            .headers()
            .get(http::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("");

        if !content_type.starts_with("multipart/form-data") {
            return Err(SttError::InvalidRequest {
                message: "Content-Type must be multipart/form-data".to_string(),
                param: None,
            });
        }

        let (parts, body) = request.into_parts();

        let bytes = axum::body::to_bytes(body, BODY_LIMIT_BYTES)
            .await
            .map_err(|err| SttError::InvalidRequest {
                message: format!("Failed to read request body: {err}"),
                param: None,
            })?;

        let rebuilt = http::Request::from_parts(parts, Body::from(bytes));

        let mut multipart = axum::extract::Multipart::from_request(rebuilt, &())
            .await
            .map_err(|e| SttError::InvalidRequest {
                message: format!("Failed to parse multipart form: {e}"),
                param: None,
            })?;

        let mut audio: Option<Vec<u8>> = None;
        let mut object_key: Option<String> = None;
        let mut model = String::new();
        let mut language: Option<String> = None;
        let mut prompt: Option<String> = None;
        let mut response_format: Option<String> = None;
        let mut timestamp_granularities: Vec<String> = Vec::new();

        while let Ok(Some(field)) = multipart.next_field().await {
            let field_name = field.name().unwrap_or("").to_string();

            match field_name.as_str() {
                "file" => {
                    audio = Some(
                        field
                            .bytes()
                            .await
                            .map_err(|e| SttError::invalid_param("file", format!("Failed to read audio data: {e}")))?
                            .to_vec(),
                    );
                }
                "r2_key" => {
                    object_key = Some(read_text(field, "r2_key").await?);
                }
                "model" => {
                    model = read_text(field, "model").await?;
                }
                "language" => {
                    language = Some(read_text(field, "language").await?);
                }
                "prompt" => {
                    prompt = Some(read_text(field, "prompt").await?);
                }
                "response_format" => {
                    response_format = Some(read_text(field, "response_format").await?);
                }
                "timestamp_granularities[]" | "timestamp_granularities" => {
                    timestamp_granularities.push(read_text(field, "timestamp_granularities[]").await?);
                }
                _ => {
                    // Unknown fields are ignored for SDK compatibility
                }
            }
        }

        if model.is_empty() {
            return Err(SttError::invalid_param("model", "you must provide a model parameter"));
        }

        let response_format = response_format
            .as_deref()
            .map(ResponseFormat::parse)
            .unwrap_or_default();

        if !timestamp_granularities.is_empty() && response_format != ResponseFormat::VerboseJson {
            return Err(SttError::invalid_param(
                "timestamp_granularities[]",
                "timestamp_granularities is only supported with response_format=verbose_json",
            ));
        }

        // An uploaded file takes precedence over an object-store key
        let source = match (audio, object_key) {
            (Some(data), _) => AudioSource::Upload(data),
            (None, Some(key)) => AudioSource::ObjectKey(key),
            (None, None) => {
                return Err(SttError::invalid_param(
                    "file",
                    "you must provide either a file upload or an r2_key",
                ));
            }
        };

        Ok(Self(TranscriptionRequest {
            model,
            response_format,
            timestamp_granularities,
            language,
            prompt,
            source,
        }))
    }
}

async fn read_text(field: axum::extract::multipart::Field<'_>, name: &str) -> Result<String, SttError> {
    field
        .text()
        .await
        .map_err(|e| SttError::invalid_param(name, format!("Failed to read {name} field: {e}")))
}
