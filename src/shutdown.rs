use anyhow::{Context, Result};
use axum::Router;
use std::{future::IntoFuture, net::SocketAddr, sync::Arc, time::Duration};
use tokio::{signal, sync::Notify};
use tracing::{error, info, warn};

pub struct GracefulShutdown {
    shutdown_timeout: Duration,
}

impl Default for GracefulShutdown {
    fn default() -> Self {
        Self::new()
    }
}

impl GracefulShutdown {
    pub fn new() -> Self {
        Self {
            shutdown_timeout: Duration::from_secs(30),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.shutdown_timeout = timeout;
        self
    }

    pub fn timeout(&self) -> Duration {
        self.shutdown_timeout
    }

    /// Resolves on Ctrl+C, or SIGTERM on unix.
    pub async fn wait_for_shutdown_signal(&self) {
        let ctrl_c = async {
            match signal::ctrl_c().await {
                Ok(()) => info!("Received Ctrl+C signal"),
                Err(e) => {
                    error!("Failed to install Ctrl+C handler: {}", e);
                    std::future::pending::<()>().await;
                }
            }
        };

        #[cfg(unix)]
        let terminate = async {
            match signal::unix::signal(signal::unix::SignalKind::terminate()) {
                Ok(mut stream) => {
                    stream.recv().await;
                    info!("Received SIGTERM signal");
                }
                Err(e) => {
                    error!("Failed to install SIGTERM handler: {}", e);
                    std::future::pending::<()>().await;
                }
            }
        };

        #[cfg(not(unix))]
        let terminate = std::future::pending::<()>();

        tokio::select! {
            _ = ctrl_c => {},
            _ = terminate => {},
        }

        info!("Shutdown signal received, draining in-flight requests...");
    }
}

/// Binds `bind_addr` and serves `app` until a shutdown signal arrives. In-flight
/// requests get `shutdown.timeout()` to finish before the server stops waiting.
pub async fn run_server_with_graceful_shutdown(
    app: Router,
    bind_addr: SocketAddr,
    shutdown: GracefulShutdown,
) -> Result<()> {
    let listener = tokio::net::TcpListener::bind(bind_addr)
        .await
        .with_context(|| format!("failed to bind listener on {}", bind_addr))?;

    info!("Server is running at http://{}", listener.local_addr().unwrap_or(bind_addr));

    let signalled = Arc::new(Notify::new());
    let notify = signalled.clone();
    let drain_timeout = shutdown.timeout();

    let server = axum::serve(listener, app.into_make_service_with_connect_info::<SocketAddr>())
        .with_graceful_shutdown(async move {
            shutdown.wait_for_shutdown_signal().await;
            notify.notify_one();
        })
        .into_future();

    let drain_deadline = async {
        signalled.notified().await;
        tokio::time::sleep(drain_timeout).await;
    };

    tokio::select! {
        result = server => {
            result.context("server error")?;
            info!("Graceful shutdown completed");
        }
        _ = drain_deadline => {
            warn!("Graceful shutdown timed out after {:?}, abandoning open connections", drain_timeout);
        }
    }

    Ok(())
}
