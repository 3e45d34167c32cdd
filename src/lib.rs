pub mod api;
pub mod config;
pub mod explain;
pub mod form;
pub mod models;
pub mod reference;

use tracing_subscriber::EnvFilter;

use crate::api::{start_server, ApiContext, ServerError};
use crate::config::ServerConfig;

/// Start the explainer and serve until Ctrl-C.
pub fn run() -> Result<(), ServerError> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter())),
        )
        .init();

    tracing::info!("{} starting v{}", config::APP_NAME, config::APP_VERSION);

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .map_err(|e| ServerError::Runtime(e.to_string()))?;

    runtime.block_on(serve(ServerConfig::from_env()?))
}

/// Load the reference tables, bind, and wait for Ctrl-C.
pub async fn serve(config: ServerConfig) -> Result<(), ServerError> {
    let tables = config.load_tables()?;
    tracing::info!(
        source = config
            .resources_dir
            .as_ref()
            .map(|d| d.display().to_string())
            .unwrap_or_else(|| "bundled".into()),
        "Reference tables ready"
    );

    let mut server = start_server(ApiContext::new(tables), config.addr).await?;
    tracing::info!(
        url = %format!("http://{}/", server.session.server_addr),
        session_id = %server.session.session_id,
        started_at = %server.session.started_at,
        "Open the form in a browser"
    );

    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Cannot listen for Ctrl-C: {e}");
    }

    server.shutdown();
    server.stopped().await
}
