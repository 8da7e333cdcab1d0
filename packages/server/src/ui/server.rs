//! Server execution logic.

use std::{future::Future, sync::Arc};

use axum::{Router, routing::get};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

use crate::usecase::{ConnectionLifecycle, GetRelayStateUseCase};

use super::{
    handler::{debug_relay_state, health_check, websocket_handler},
    signal::shutdown_signal,
    state::AppState,
};

/// WebSocket relay server
///
/// This struct encapsulates the server wiring and provides methods to run the server.
///
/// # Example
///
/// ```ignore
/// let server = Server::new(relay_engine, get_relay_state_usecase);
/// server.run("127.0.0.1".to_string(), 8080).await?;
/// ```
pub struct Server {
    /// Relay のコア（ライフサイクルのコールバック先）
    lifecycle: Arc<dyn ConnectionLifecycle>,
    /// GetRelayStateUseCase（デバッグ用の状態取得のユースケース）
    get_relay_state_usecase: Arc<GetRelayStateUseCase>,
}

impl Server {
    /// Create a new Server instance
    ///
    /// # Arguments
    ///
    /// * `lifecycle` - Relay core receiving connection lifecycle callbacks
    /// * `get_relay_state_usecase` - UseCase for the debug state endpoint
    pub fn new(
        lifecycle: Arc<dyn ConnectionLifecycle>,
        get_relay_state_usecase: Arc<GetRelayStateUseCase>,
    ) -> Self {
        Self {
            lifecycle,
            get_relay_state_usecase,
        }
    }

    /// Build the axum router
    pub fn router(self) -> Router {
        let app_state = Arc::new(AppState {
            lifecycle: self.lifecycle,
            get_relay_state_usecase: self.get_relay_state_usecase,
        });

        Router::new()
            // WebSocket エンドポイント
            .route("/ws", get(websocket_handler))
            // HTTP エンドポイント
            .route("/debug/relay", get(debug_relay_state))
            .route("/api/health", get(health_check))
            .layer(TraceLayer::new_for_http())
            .with_state(app_state)
    }

    /// Run the WebSocket relay server until Ctrl+C / SIGTERM
    ///
    /// # Arguments
    ///
    /// * `host` - The host address to bind to (e.g., "127.0.0.1")
    /// * `port` - The port number to bind to (e.g., 8080)
    ///
    /// # Errors
    ///
    /// Returns an error if the server fails to bind to the specified address or
    /// if there's an error during server execution.
    pub async fn run(self, host: String, port: u16) -> Result<(), Box<dyn std::error::Error>> {
        // Bind the server to the host and port
        let bind_addr = format!("{}:{}", host, port);
        let listener = TcpListener::bind(&bind_addr).await?;

        tracing::info!("Connect to: ws://{}/ws", bind_addr);
        tracing::info!("Press Ctrl+C to shutdown gracefully");

        self.serve(listener, shutdown_signal()).await?;

        tracing::info!("Server shutdown complete");

        Ok(())
    }

    /// Serve on an already bound listener until `shutdown` resolves
    pub async fn serve<F>(self, listener: TcpListener, shutdown: F) -> std::io::Result<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        tracing::info!(
            "WebSocket relay server listening on {}",
            listener.local_addr()?
        );

        axum::serve(listener, self.router())
            .with_graceful_shutdown(shutdown)
            .await
    }
}
