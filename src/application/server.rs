use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use axum::Router;
use tokio::net::TcpListener;
use tokio::signal;
use tracing::{info, warn};

use crate::application::routes::app_router;
use crate::application::state::AppState;
use crate::infrastructure::sheets::{GoogleSheetsSource, SheetsConfig};

pub struct ServerConfig {
    pub bind_address: SocketAddr,
    pub sheets: SheetsConfig,
}

pub async fn serve(config: ServerConfig) -> anyhow::Result<()> {
    if config.sheets.api_key.is_none() {
        warn!("no Google Sheets API key configured; the dashboard will be empty");
    }

    let spreadsheet_id = config.sheets.spreadsheet_id.clone();
    let source = GoogleSheetsSource::new(config.sheets)?;
    let state = AppState::new(Arc::new(source));

    let listener = TcpListener::bind(config.bind_address)
        .await
        .with_context(|| format!("failed to bind to {}", config.bind_address))?;

    let app = app_router(state);

    info!(
        address = %config.bind_address,
        spreadsheet = %spreadsheet_id,
        "starting HTTP server"
    );

    run(listener, app, shutdown_signal()).await?;
    info!("server shutdown complete");

    Ok(())
}

/// Serve `app` until `shutdown` resolves, then drain in-flight requests.
pub async fn run(
    listener: TcpListener,
    app: Router,
    shutdown: impl Future<Output = ()> + Send + 'static,
) -> anyhow::Result<()> {
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await
        .context("server terminated unexpectedly")
}

/// Resolves on Ctrl+C or SIGTERM. A handler that cannot be installed is
/// logged and never fires, so the other one still can.
async fn shutdown_signal() {
    let interrupt = async {
        if let Err(err) = signal::ctrl_c().await {
            warn!(error = %err, "cannot listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(err) => {
                warn!(error = %err, "cannot listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };
    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    let received = tokio::select! {
        () = interrupt => "interrupt",
        () = terminate => "terminate",
    };
    info!(signal = received, "shutdown requested");
}
