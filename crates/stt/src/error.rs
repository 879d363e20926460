use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, SttError>;

/// Transcription service errors with appropriate HTTP status codes
#[derive(Debug, Error)]
pub enum SttError {
    /// Invalid request parameters, optionally naming the offending one
    #[error("{message}")]
    InvalidRequest { message: String, param: Option<String> },

    /// Missing or mismatched API key
    #[error("Invalid API key provided")]
    AuthenticationFailed,

    /// Unsupported HTTP verb on a known path
    #[error("Method not allowed")]
    MethodNotAllowed,

    /// Provider API returned an error
    #[error("Provider API error ({status}): {message}")]
    ProviderApiError { status: u16, message: String },

    /// Network or connection error
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Internal server error, details never leak to the caller
    #[error("Internal server error")]
    InternalError,
}

impl SttError {
    /// Validation failure citing a specific request parameter
    pub fn invalid_param(param: &str, message: impl Into<String>) -> Self {
        Self::InvalidRequest {
            message: message.into(),
            param: Some(param.to_string()),
        }
    }

    /// Get the appropriate HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidRequest { .. } => StatusCode::BAD_REQUEST,
            Self::AuthenticationFailed => StatusCode::UNAUTHORIZED,
            Self::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            Self::ConnectionError(_) => StatusCode::BAD_GATEWAY,
            Self::ProviderApiError { status, .. } => match *status {
                429 => StatusCode::TOO_MANY_REQUESTS,
                _ => StatusCode::BAD_GATEWAY,
            },
            Self::ConfigError(_) | Self::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the error type string for the response
    pub fn error_type(&self) -> &str {
        match self {
            Self::InvalidRequest { .. } | Self::AuthenticationFailed | Self::MethodNotAllowed => {
                "invalid_request_error"
            }
            Self::ConnectionError(_) | Self::ProviderApiError { .. } => "api_error",
            Self::ConfigError(_) | Self::InternalError => "internal_error",
        }
    }

    /// The request parameter this error refers to, when applicable
    pub fn param(&self) -> Option<&str> {
        match self {
            Self::InvalidRequest { param, .. } => param.as_deref(),
            _ => None,
        }
    }

    /// Machine-readable error code tag
    pub fn code(&self) -> Option<&str> {
        match self {
            Self::AuthenticationFailed => Some("invalid_api_key"),
            Self::MethodNotAllowed => Some("method_not_allowed"),
            _ => None,
        }
    }
}

/// Error response format compatible with the `OpenAI` API
///
/// `param` and `code` serialize as explicit nulls when absent; SDKs expect
/// all four keys to be present.
#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: ErrorDetails,
}

#[derive(Debug, Serialize)]
struct ErrorDetails {
    message: String,
    r#type: String,
    param: Option<String>,
    code: Option<String>,
}

impl IntoResponse for SttError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        let error_response = ErrorResponse {
            error: ErrorDetails {
                message: self.to_string(),
                r#type: self.error_type().to_string(),
                param: self.param().map(str::to_string),
                code: self.code().map(str::to_string),
            },
        };

        (status, Json(error_response)).into_response()
    }
}
