//! Explainer server lifecycle — binds the listener, mounts
//! `explainer_router()` and runs axum in a background task.
//!
//! bind → spawn background task → return handle with shutdown channel.

use std::net::SocketAddr;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use uuid::Uuid;

use crate::api::router::explainer_router;
use crate::api::types::ApiContext;
use crate::config::ConfigError;
use crate::reference::ReferenceError;

// ═══════════════════════════════════════════════════════════
// Public types
// ═══════════════════════════════════════════════════════════

#[derive(Error, Debug)]
pub enum ServerError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Reference tables unavailable: {0}")]
    Reference(#[from] ReferenceError),

    #[error("Failed to bind {0}: {1}")]
    Bind(String, String),

    #[error("Runtime error: {0}")]
    Runtime(String),
}

/// Session metadata for a running server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerSession {
    pub session_id: String,
    pub server_addr: String,
    pub port: u16,
    pub started_at: String,
}

/// Handle to a running explainer server.
pub struct ExplainerServer {
    pub session: ServerSession,
    shutdown_tx: Option<oneshot::Sender<()>>,
    task: JoinHandle<Result<(), ServerError>>,
}

impl ExplainerServer {
    /// Signal graceful shutdown. Safe to call more than once.
    pub fn shutdown(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
            tracing::info!("Explainer server shutdown signal sent");
        }
    }

    /// Wait for the server task to finish. Serve errors are returned here.
    pub async fn stopped(self) -> Result<(), ServerError> {
        self.task
            .await
            .map_err(|e| ServerError::Runtime(format!("server task failed: {e}")))?
    }
}

// ═══════════════════════════════════════════════════════════
// Server lifecycle
// ═══════════════════════════════════════════════════════════

/// Bind `addr` (port 0 = ephemeral) and serve the explainer router.
pub async fn start_server(ctx: ApiContext, addr: SocketAddr) -> Result<ExplainerServer, ServerError> {
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| ServerError::Bind(addr.to_string(), e.to_string()))?;

    let addr = listener
        .local_addr()
        .map_err(|e| ServerError::Bind(addr.to_string(), e.to_string()))?;

    tracing::info!(%addr, "Explainer server binding");

    let app = explainer_router(ctx);

    let session = ServerSession {
        session_id: Uuid::new_v4().to_string(),
        server_addr: addr.to_string(),
        port: addr.port(),
        started_at: chrono::Utc::now().to_rfc3339(),
    };

    let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();

    let session_id = session.session_id.clone();
    let task = tokio::spawn(async move {
        let shutdown_signal = async move {
            let _ = shutdown_rx.await;
            tracing::info!("Explainer server received shutdown signal");
        };

        tracing::info!(%addr, session_id = %session_id, "Explainer server started");

        let result = axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal)
            .await
            .map_err(|e| {
                tracing::error!("Explainer server error: {e}");
                ServerError::Runtime(e.to_string())
            });

        tracing::info!(session_id = %session_id, "Explainer server stopped");
        result
    });

    Ok(ExplainerServer {
        session,
        shutdown_tx: Some(shutdown_tx),
        task,
    })
}

// ═══════════════════════════════════════════════════════════
// Tests
// ═══════════════════════════════════════════════════════════
