//! Mock Workers AI backend and object store for integration tests
//!
//! Serves a canned transcription result on the provider path and a fixed
//! set of objects on the storage path, both on one random port.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::{Json, Router, routing};
use tokio_util::sync::CancellationToken;

/// Mock upstream that returns predictable responses
pub struct MockBackend {
    addr: SocketAddr,
    shutdown: CancellationToken,
    state: Arc<MockState>,
}

struct MockState {
    /// Canned provider result returned inside the Workers AI envelope
    result: serde_json::Value,
    /// Objects served on the storage path
    objects: HashMap<String, Vec<u8>>,
    transcribe_count: AtomicU32,
}

impl MockBackend {
    /// Start a mock returning a minimal text-only result
    pub async fn start() -> anyhow::Result<Self> {
        Self::start_with_result(serde_json::json!({"text": "hello world"})).await
    }

    /// Start a mock returning the given provider result
    pub async fn start_with_result(result: serde_json::Value) -> anyhow::Result<Self> {
        Self::start_inner(result, HashMap::new()).await
    }

    /// Start a mock that also serves the given objects from storage
    pub async fn start_with_objects(
        result: serde_json::Value,
        objects: HashMap<String, Vec<u8>>,
    ) -> anyhow::Result<Self> {
        Self::start_inner(result, objects).await
    }

    async fn start_inner(result: serde_json::Value, objects: HashMap<String, Vec<u8>>) -> anyhow::Result<Self> {
        let state = Arc::new(MockState {
            result,
            objects,
            transcribe_count: AtomicU32::new(0),
        });

        let app = Router::new()
            .route("/client/v4/accounts/{account}/ai/run/{*model}", routing::post(handle_run))
            .route("/bucket/{*key}", routing::get(handle_object))
            .with_state(Arc::clone(&state));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        let shutdown = CancellationToken::new();
        let shutdown_clone = shutdown.clone();

        tokio::spawn(async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(async move {
                    shutdown_clone.cancelled().await;
                })
                .await
                .ok();
        });

        Ok(Self { addr, shutdown, state })
    }

    /// Base URL for configuring the mock as the transcription provider
    pub fn provider_base_url(&self) -> String {
        format!("http://{}/client/v4", self.addr)
    }

    /// Base URL for configuring the mock as the object store
    pub fn storage_base_url(&self) -> String {
        format!("http://{}/bucket", self.addr)
    }

    /// Number of transcription requests received
    pub fn transcribe_count(&self) -> u32 {
        self.state.transcribe_count.load(Ordering::Relaxed)
    }
}

impl Drop for MockBackend {
    fn drop(&mut self) {
        self.shutdown.cancel();
    }
}

async fn handle_run(
    State(state): State<Arc<MockState>>,
    Json(body): Json<serde_json::Value>,
) -> impl IntoResponse {
    state.transcribe_count.fetch_add(1, Ordering::Relaxed);

    // The provider must always send base64 audio
    assert!(body.get("audio").and_then(serde_json::Value::as_str).is_some());

    Json(serde_json::json!({
        "result": state.result,
        "success": true,
        "errors": [],
    }))
}

async fn handle_object(State(state): State<Arc<MockState>>, Path(key): Path<String>) -> impl IntoResponse {
    match state.objects.get(&key) {
        Some(bytes) => (StatusCode::OK, bytes.clone()).into_response(),
        None => (StatusCode::NOT_FOUND, "no such key").into_response(),
    }
}
