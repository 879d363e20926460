use async_trait::async_trait;
use reqwest::Client;

use crate::{error::SttError, http_client::http_client};

/// Read-only object store holding pre-uploaded audio
#[async_trait]
pub trait AudioStore: Send + Sync {
    /// Fetch an object's bytes; `Ok(None)` when the key does not exist
    async fn fetch(&self, key: &str) -> crate::error::Result<Option<Vec<u8>>>;
}

/// Object store reached over plain HTTP (e.g. an R2 bucket endpoint)
pub(crate) struct HttpObjectStore {
    client: Client,
    base_url: String,
}

impl HttpObjectStore {
    pub fn new(base_url: String) -> Self {
        Self {
            client: http_client(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }
}

#[async_trait]
impl AudioStore for HttpObjectStore {
    async fn fetch(&self, key: &str) -> crate::error::Result<Option<Vec<u8>>> {
        let url = format!("{}/{key}", self.base_url);

        let response = self.client.get(&url).send().await.map_err(|e| {
            tracing::error!("object store request failed: {e}");
            SttError::ConnectionError(format!("Failed to reach object storage: {e}"))
        })?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_else(|_| "Unknown error".to_string());

            tracing::error!("object store error ({status}): {error_text}");

            return Err(SttError::ProviderApiError {
                status: status.as_u16(),
                message: error_text,
            });
        }

        let bytes = response.bytes().await.map_err(|e| {
            tracing::error!("failed to read object body: {e}");
            SttError::ConnectionError(format!("Failed to read object body: {e}"))
        })?;

        Ok(Some(bytes.to_vec()))
    }
}
