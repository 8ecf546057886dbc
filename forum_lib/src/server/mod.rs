//! HTTP surface: an axum router over [`Forum`].

pub mod error;
pub mod extract;
mod handlers;
pub mod routes;
pub mod state;

use std::sync::Arc;

use tokio::net::TcpListener;
use tracing::info;

pub use self::error::HttpError;
pub use self::routes::create_router;
pub use self::state::AppState;
use crate::config::ServerConfig;
use crate::service::Forum;

/// Serve `forum` on an already bound listener until `shutdown` resolves.
pub async fn serve_on<F>(
    listener: TcpListener,
    forum: Forum,
    config: &ServerConfig,
    shutdown: F,
) -> std::io::Result<()>
where
    F: std::future::Future<Output = ()> + Send + 'static,
{
    let app = create_router(Arc::new(forum), &config.cors_origins);
    info!("Forum API listening on http://{}", listener.local_addr()?);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await
}

/// Bind the configured address and serve until Ctrl-C.
pub async fn serve(forum: Forum, config: &ServerConfig) -> std::io::Result<()> {
    let listener = TcpListener::bind(config.bind).await?;
    serve_on(listener, forum, config, shutdown_signal()).await?;
    info!("Forum API stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
    }
}
