use std::future;

use tokio::signal;

/// Resolves once the process receives SIGINT or SIGTERM.
///
/// If we can't listen for one of them, we keep waiting for the other.
pub(crate) async fn shutdown() {
    tokio::select! {
        () = sigint() => tracing::warn!("received SIGINT; shutting down"),
        () = sigterm() => tracing::warn!("received SIGTERM; shutting down"),
    }
}

async fn sigint() {
    if let Err(error) = signal::ctrl_c().await {
        tracing::error!(%error, "failed to listen for SIGINT");
        future::pending::<()>().await;
    }
}

#[cfg(unix)]
async fn sigterm() {
    use tokio::signal::unix::{SignalKind, signal};

    let mut sigterm = match signal(SignalKind::terminate()) {
        Ok(sigterm) => sigterm,
        Err(error) => {
            tracing::error!(%error, "failed to listen for SIGTERM");
            return future::pending().await;
        },
    };

    if sigterm.recv().await.is_none() {
        tracing::error!("SIGTERM stream closed");
        future::pending::<()>().await;
    }
}

#[cfg(not(unix))]
async fn sigterm() {
    future::pending().await
}
