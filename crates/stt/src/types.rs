use serde::{Deserialize, Deserializer, Serialize};

/// Transcription request following the `OpenAI` Whisper API format
#[derive(Debug)]
pub struct TranscriptionRequest {
    /// Model identifier (e.g. "@cf/openai/whisper-large-v3-turbo")
    pub model: String,
    /// Requested output encoding
    pub response_format: ResponseFormat,
    /// Raw `timestamp_granularities[]` values; only legal with `verbose_json`
    pub timestamp_granularities: Vec<String>,
    /// Optional language hint (ISO 639-1)
    pub language: Option<String>,
    /// Optional prompt to guide transcription
    pub prompt: Option<String>,
    /// Where the audio bytes come from
    pub source: AudioSource,
}

impl TranscriptionRequest {
    /// Word-level timestamps were explicitly requested
    pub fn wants_words(&self) -> bool {
        self.timestamp_granularities.iter().any(|g| g == "word")
    }

    /// Segment detail is on by default and only disabled by an explicit
    /// granularity list that leaves "segment" out
    pub fn wants_segments(&self) -> bool {
        self.timestamp_granularities.is_empty()
            || self.timestamp_granularities.iter().any(|g| g == "segment")
    }
}

/// Audio payload for a transcription request
///
/// A direct upload wins over an object-store key when both are supplied.
#[derive(Debug)]
pub enum AudioSource {
    /// Inline bytes from the multipart `file` field
    Upload(Vec<u8>),
    /// Key into the configured object store (`r2_key` field)
    ObjectKey(String),
}

/// Output encoding for the transcription response
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResponseFormat {
    #[default]
    Json,
    Text,
    Vtt,
    Srt,
    VerboseJson,
}

impl ResponseFormat {
    /// Parse a `response_format` field value, case-insensitively
    ///
    /// Unrecognized values fall back to `json` rather than erroring, which
    /// mirrors the upstream API's permissiveness.
    pub fn parse(raw: &str) -> Self {
        match raw.to_ascii_lowercase().as_str() {
            "text" => Self::Text,
            "vtt" => Self::Vtt,
            "srt" => Self::Srt,
            "verbose_json" => Self::VerboseJson,
            _ => Self::Json,
        }
    }
}

/// Result record as produced by the transcription model
///
/// Everything beyond `text` is optional; providers differ in how much
/// detail they emit, and the normalizer must distinguish "absent" from
/// "present but empty".
#[derive(Debug, Default, Deserialize)]
pub struct ProviderResult {
    #[serde(default)]
    pub text: String,
    /// WebVTT subtitle markup, when the model produces it
    #[serde(default)]
    pub vtt: Option<String>,
    #[serde(default)]
    pub transcription_info: Option<TranscriptionInfo>,
    #[serde(default)]
    pub segments: Option<Vec<ProviderSegment>>,
}

#[derive(Debug, Default, Deserialize)]
pub struct TranscriptionInfo {
    /// Audio duration in seconds; tolerates non-numeric provider output
    #[serde(default, deserialize_with = "lenient_f64")]
    pub duration: Option<f64>,
    #[serde(default)]
    pub language: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ProviderSegment {
    #[serde(default)]
    pub start: f64,
    #[serde(default)]
    pub end: f64,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub temperature: Option<f64>,
    #[serde(default)]
    pub avg_logprob: Option<f64>,
    #[serde(default)]
    pub compression_ratio: Option<f64>,
    #[serde(default)]
    pub no_speech_prob: Option<f64>,
    #[serde(default)]
    pub words: Option<Vec<ProviderWord>>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ProviderWord {
    #[serde(default)]
    pub word: String,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub start: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub end: Option<f64>,
}

/// Coerce a JSON value to a number the way a dynamic runtime would,
/// mapping anything non-numeric to `None` instead of failing the whole
/// deserialization
fn lenient_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::Number(n) => n.as_f64(),
        serde_json::Value::String(s) => s.parse().ok(),
        _ => None,
    })
}

/// Minimal response body for the default `json` format
#[derive(Debug, Serialize)]
pub struct SimpleResponse {
    pub text: String,
}

/// Canonical `verbose_json` response schema
#[derive(Debug, Serialize)]
pub struct VerboseResponse {
    /// Always "transcribe"
    pub task: &'static str,
    pub language: String,
    pub duration: f64,
    pub text: String,
    /// Always serialized, possibly empty
    pub segments: Vec<Segment>,
    /// Omitted entirely when no valid words were collected
    #[serde(skip_serializing_if = "Option::is_none")]
    pub words: Option<Vec<Word>>,
    pub usage: Usage,
}

#[derive(Debug, Serialize)]
pub struct Segment {
    /// Zero-based sequential index assigned by the normalizer
    pub id: usize,
    /// Constant 0; kept for schema compatibility
    pub seek: u32,
    pub start: f64,
    pub end: f64,
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avg_logprob: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub compression_ratio: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub no_speech_prob: Option<f64>,
}

#[derive(Debug, Serialize)]
pub struct Word {
    pub word: String,
    pub start: f64,
    pub end: f64,
}

/// Duration-based billing block attached to verbose responses
#[derive(Debug, Serialize)]
pub struct Usage {
    pub r#type: &'static str,
    /// Ceiling of the audio duration, minimum 1
    pub seconds: u64,
}
