#![allow(clippy::must_use_candidate, clippy::missing_errors_doc)]

mod auth;
mod health;
mod models;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use murmur_config::Config;
use tokio_util::sync::CancellationToken;
use tower_http::trace::TraceLayer;

/// Assembled server with all routes and middleware
pub struct Server {
    router: Router,
    listen_address: SocketAddr,
}

impl Server {
    /// Build the server from configuration
    ///
    /// # Errors
    ///
    /// Returns an error if transcription subsystem initialization fails
    pub fn new(config: Config) -> anyhow::Result<Self> {
        let listen_address = config
            .server
            .listen_address
            .unwrap_or_else(|| SocketAddr::from(([0, 0, 0, 0], 3000)));

        let stt_state: Arc<stt::Server> = stt::build_server(&config)?;

        let advertised_model = config.provider.model.clone();

        // API routes, all guarded by the bearer-token check
        let mut v1 = Router::new();
        v1 = v1.merge(stt::endpoint_router().with_state(stt_state));
        v1 = v1.route(
            "/v1/models",
            axum::routing::get(move || {
                let model = advertised_model.clone();
                async move { axum::Json(models::model_list(&model)) }
            }),
        );

        let api_key = config.auth.api_key.clone();
        v1 = v1.layer(axum::middleware::from_fn(move |req, next| {
            let api_key = api_key.clone();
            async move { auth::auth_middleware(api_key, req, next).await }
        }));

        let mut app = Router::new().merge(v1);

        // Unauthenticated liveness probe
        if config.server.health.enabled {
            app = app.route(&config.server.health.path, axum::routing::get(health::health_handler));
        }

        // Wrong verb on a known path still gets the structured error body
        app = app.method_not_allowed_fallback(|| async { stt::SttError::MethodNotAllowed });

        app = app.layer(TraceLayer::new_for_http());

        Ok(Self {
            router: app,
            listen_address,
        })
    }

    /// Consume the server, returning the assembled router
    ///
    /// Used by tests to drive the router without binding a socket here.
    pub fn into_router(self) -> Router {
        self.router
    }

    /// Bind the listen address and serve until the token is cancelled
    pub async fn serve(self, shutdown: CancellationToken) -> anyhow::Result<()> {
        let listener = tokio::net::TcpListener::bind(self.listen_address).await?;

        tracing::info!("listening on {}", self.listen_address);

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                shutdown.cancelled().await;
            })
            .await?;

        Ok(())
    }
}
