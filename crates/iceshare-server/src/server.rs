//! Serve the endpoints until Ctrl+C.

use std::future::Future;
use std::net::SocketAddr;

use tokio::net::TcpListener;
use tokio::signal;

use crate::api::{router, AppState};
use crate::config::Config;
use crate::error::Result;

/// Bind the configured address and serve.
pub async fn run(config: &Config) -> Result<()> {
    let addr = config.bind_addr()?;
    let state = AppState::new(config.encryption_key()?);
    if !state.has_key() {
        tracing::warn!("no encryption key configured; endpoints will answer 500");
    }

    let listener = TcpListener::bind(addr).await?;
    serve(listener, state).await
}

/// Serve on an already-bound listener. Returns when the shutdown signal fires.
pub async fn serve(listener: TcpListener, state: AppState) -> Result<()> {
    let local: SocketAddr = listener.local_addr()?;
    tracing::info!(addr = %local, "iceshare listening");

    axum::serve(listener, router(state).into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("iceshare stopped");
    Ok(())
}

async fn shutdown_signal() {
    wait_for(signal::ctrl_c()).await
}

/// Resolve when `signal` fires. If the handler cannot be installed the
/// server keeps running instead of shutting down at once.
async fn wait_for<F>(signal: F)
where
    F: Future<Output = std::io::Result<()>>,
{
    match signal.await {
        Ok(()) => tracing::info!("shutdown signal received"),
        Err(e) => {
            tracing::error!(error = %e, "failed to install shutdown signal handler");
            std::future::pending::<()>().await;
        }
    }
}
