//! HTTP server lifecycle: bind, serve until cancelled, shut down gracefully.

use std::net::SocketAddr;

use anyhow::Context;
use axum::Router;
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;

/// Parse bind address from configuration string.
///
/// # Errors
/// Returns an error if `bind_addr` is not a valid `host:port` socket address.
pub fn parse_bind_address(bind_addr: &str) -> anyhow::Result<SocketAddr> {
    bind_addr
        .parse()
        .map_err(|e| anyhow::anyhow!("Invalid bind address '{bind_addr}': {e}"))
}

/// Bind `addr` and serve `router` until `cancel` fires.
///
/// # Errors
/// Returns an error if the socket cannot be bound or the server fails.
pub async fn serve(addr: SocketAddr, router: Router, cancel: CancellationToken) -> anyhow::Result<()> {
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    tracing::info!(%addr, "HTTP server bound");
    serve_listener(listener, router, cancel).await
}

/// Serve on an already bound listener until `cancel` fires.
///
/// # Errors
/// Returns an error if the server fails while accepting connections.
pub async fn serve_listener(
    listener: TcpListener,
    router: Router,
    cancel: CancellationToken,
) -> anyhow::Result<()> {
    let shutdown = async move {
        cancel.cancelled().await;
        tracing::info!("HTTP server shutting down gracefully (cancellation)");
    };

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown)
        .await
        .map_err(|e| anyhow::anyhow!(e))
}

/// Wait for Ctrl-C, or SIGTERM on unix.
///
/// # Errors
/// Returns an error if the signal handlers cannot be installed.
pub async fn wait_for_shutdown() -> std::io::Result<()> {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{SignalKind, signal};

        let mut term = signal(SignalKind::terminate())?;
        tokio::select! {
            res = tokio::signal::ctrl_c() => res,
            _ = term.recv() => Ok(()),
        }
    }

    #[cfg(not(unix))]
    {
        tokio::signal::ctrl_c().await
    }
}

/// Cancel `cancel` once a shutdown signal arrives.
pub fn cancel_on_signal(cancel: CancellationToken) {
    tokio::spawn(cancel_when(
        wait_for_shutdown(),
        tokio::signal::ctrl_c(),
        cancel,
    ));
}

/// Cancel once `primary` resolves, or `fallback` if `primary` failed.
/// Both failures are logged; the token is cancelled either way.
async fn cancel_when<P, F>(primary: P, fallback: F, cancel: CancellationToken) -> std::io::Result<()>
where
    P: Future<Output = std::io::Result<()>>,
    F: Future<Output = std::io::Result<()>>,
{
    let res = match primary.await {
        Ok(()) => Ok(()),
        Err(e) => {
            tracing::warn!(error = %e, "shutdown: signal handler failed, falling back to ctrl_c()");
            fallback.await.inspect_err(|e| {
                tracing::warn!(error = %e, "shutdown: ctrl_c() fallback failed, no shutdown signal can be received");
            })
        }
    };
    tracing::info!("shutdown: signal received");
    cancel.cancel();
    res
}
