//! Listener lifecycle: bind, serve, drain, stop.
//!
//! The lifecycle is `Stopped → Listening → Draining → Stopped`. Listening
//! begins when the bind succeeds; a SIGINT/SIGTERM starts the drain, which
//! stops the accept loop and lets in-flight requests finish within the
//! configured grace period. Whatever is still open at the deadline is
//! aborted, and the process exits cleanly either way.

use std::{
    future::{Future, IntoFuture},
    sync::Arc,
    time::Duration,
};

use anyhow::Context;
use axum::Router;
use tokio::{net::TcpListener, signal};
use tracing::{info, warn};

use crate::{api, config::Config};

/// Bind the configured address and serve until a shutdown signal arrives.
///
/// Bind failures (port already in use, permission denied) are fatal and
/// propagate to the caller; per-request failures never surface here.
pub async fn run(config: Config) -> anyhow::Result<()> {
    let addr = config.socket_addr();
    let grace = config.shutdown_grace;
    let config = Arc::new(config);

    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;

    info!(%addr, service = %config.service_id, "listening");
    info!("health check available at http://{addr}/health");

    serve(listener, api::app(config), shutdown_signal(), grace).await
}

/// Serve `app` on `listener` until `shutdown` completes, then drain.
///
/// Returns `Ok` both on a clean drain and on a deadline-forced abort: the
/// grace period bounds shutdown latency rather than signalling an error.
pub async fn serve(
    listener: TcpListener,
    app: Router,
    shutdown: impl Future<Output = ()> + Send + 'static,
    grace: Duration,
) -> anyhow::Result<()> {
    let (drain_tx, mut drain_rx) = tokio::sync::watch::channel(false);

    let server = axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            shutdown.await;
            let _ = drain_tx.send(true);
        })
        .into_future();
    tokio::pin!(server);

    let deadline = async {
        // Wait for the drain to start. On a clean exit the sender is dropped
        // without firing, so the deadline never arms.
        while !*drain_rx.borrow_and_update() {
            if drain_rx.changed().await.is_err() {
                std::future::pending::<()>().await;
            }
        }
        info!("draining in-flight requests");
        tokio::time::sleep(grace).await;
    };

    tokio::select! {
        result = &mut server => result.context("server error")?,
        () = deadline => {
            warn!(
                grace_secs = grace.as_secs(),
                "drain deadline exceeded, aborting remaining connections"
            );
        }
    }

    info!("server stopped");
    Ok(())
}

/// Resolve when the process receives SIGINT (Ctrl+C) or SIGTERM.
pub async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c().await.expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
