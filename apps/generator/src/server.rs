//! Ephemeral Web Server — lives for exactly one generation.
//!
//! The socket is bound before `start` returns, so the page is reachable as soon
//! as the handle exists. `stop` is best-effort and never reports failure.

use std::net::SocketAddr;
use std::path::Path;
use std::time::Duration;

use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tower_http::trace::TraceLayer;
use tracing::{debug, info, warn};

use crate::errors::GeneratorError;
use crate::routes::build_router;
use crate::state::AppState;

const PROBE_TIMEOUT: Duration = Duration::from_secs(5);
const STOP_TIMEOUT: Duration = Duration::from_secs(5);

pub struct ServerHandle {
    addr: SocketAddr,
    shutdown: Option<oneshot::Sender<()>>,
    task: Option<JoinHandle<std::io::Result<()>>>,
}

/// Binds `host:port` and serves the tailored document plus `asset_dir`.
pub async fn start(
    host: &str,
    port: u16,
    state: AppState,
    asset_dir: &Path,
) -> Result<ServerHandle, GeneratorError> {
    let listener = TcpListener::bind((host, port))
        .await
        .map_err(|e| GeneratorError::ServerStart(format!("cannot bind {host}:{port}: {e}")))?;
    let addr = listener
        .local_addr()
        .map_err(|e| GeneratorError::ServerStart(e.to_string()))?;

    let app = build_router(state, asset_dir).layer(TraceLayer::new_for_http());
    let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();

    let task = tokio::spawn(async move {
        axum::serve(listener, app)
            .with_graceful_shutdown(async {
                shutdown_rx.await.ok();
            })
            .await
    });

    info!("Serving {} at http://{addr}", asset_dir.display());
    Ok(ServerHandle {
        addr,
        shutdown: Some(shutdown_tx),
        task: Some(task),
    })
}

impl ServerHandle {
    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    /// Page URL handed to the renderer.
    pub fn url(&self) -> String {
        format!("http://{}/", self.addr)
    }

    /// Single readiness check against `/health`. No retries.
    pub async fn probe(&self) -> Result<(), GeneratorError> {
        let client = reqwest::Client::builder()
            .timeout(PROBE_TIMEOUT)
            .build()
            .map_err(|e| GeneratorError::ServerStart(e.to_string()))?;

        client
            .get(format!("http://{}/health", self.addr()))
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| GeneratorError::ServerStart(format!("health probe failed: {e}")))?;

        debug!("Server at {} is ready", self.addr);
        Ok(())
    }

    /// Signals graceful shutdown and waits a bounded time for the task to end.
    /// Failures are logged and swallowed.
    pub async fn stop(mut self) {
        info!("Stopping server at {}", self.addr);
        if let Some(tx) = self.shutdown.take() {
            if tx.send(()).is_err() {
                debug!("Server task already gone");
            }
        }

        let Some(mut task) = self.task.take() else {
            return;
        };
        match tokio::time::timeout(STOP_TIMEOUT, &mut task).await {
            Ok(Ok(Ok(()))) => debug!("Server stopped"),
            Ok(Ok(Err(e))) => warn!("Server exited with an error: {e}"),
            Ok(Err(e)) => warn!("Server task failed: {e}"),
            Err(_) => {
                warn!("Server did not stop within {STOP_TIMEOUT:?}; aborting");
                task.abort();
            }
        }
    }
}

impl Drop for ServerHandle {
    fn drop(&mut self) {
        // Reached only when `stop` was skipped, e.g. on panic.
        if let Some(tx) = self.shutdown.take() {
            tx.send(()).ok();
        }
    }
}
