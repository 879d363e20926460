use axum::extract::Request;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use secrecy::{ExposeSecret, SecretString};
use stt::SttError;

/// Require an exact bearer-token match on every request
///
/// The health endpoint is mounted outside this layer and stays public.
/// There is no key hierarchy here: one configured secret, compared
/// byte-for-byte.
pub async fn auth_middleware(api_key: SecretString, request: Request, next: Next) -> Response {
    let token = request
        .headers()
        .get(http::header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "));

    match token {
        Some(token) if token == api_key.expose_secret() => next.run(request).await,
        _ => {
            tracing::warn!("request rejected: missing or invalid API key");
            SttError::AuthenticationFailed.into_response()
        }
    }
}
