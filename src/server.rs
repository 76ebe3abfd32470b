//! Web tier server bootstrap.

use std::sync::Arc;

use thiserror::Error;
use tokio::net::TcpListener;
use tokio::signal;

use crate::adapters::backend::{HttpBackendClient, HttpBackendConfig};
use crate::adapters::http::{router, AppState, CookieSettings, PageShell};
use crate::config::{AppConfig, ValidationError};
use crate::ports::BackendError;

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("invalid server address: {0}")]
    Address(#[from] ValidationError),

    #[error("backend client: {0}")]
    Backend(#[from] BackendError),

    #[error("failed to read page shell {path}: {source}")]
    Shell {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("server I/O: {0}")]
    Io(#[from] std::io::Error),
}

/// Backend client configured from `config.backend`.
pub fn backend_client(config: &AppConfig) -> Result<HttpBackendClient, BackendError> {
    let mut backend = HttpBackendConfig::new(config.backend.url.clone());
    if let Some(timeout) = config.backend.timeout() {
        backend = backend.with_timeout(timeout);
    }
    HttpBackendClient::new(backend)
}

fn page_shell(config: &AppConfig) -> Result<PageShell, ServerError> {
    match &config.shell.template_path {
        Some(path) => PageShell::from_file(path).map_err(|source| ServerError::Shell {
            path: path.display().to_string(),
            source,
        }),
        None => Ok(PageShell::default()),
    }
}

/// Run the web tier until Ctrl+C or SIGTERM.
pub async fn serve(config: &AppConfig) -> Result<(), ServerError> {
    let addr = config.server.socket_addr()?;

    let state = AppState::new(
        Arc::new(backend_client(config)?),
        CookieSettings::from_config(&config.cookies),
        page_shell(config)?,
        config.shell.max_body_bytes,
    );
    let app = router(state, &config.server.cors_origins_list());

    let listener = TcpListener::bind(addr).await?;
    tracing::info!(%addr, backend = %config.backend.url, "Server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
        tracing::info!("Received Ctrl+C, shutting down");
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
                tracing::info!("Received terminate signal, shutting down");
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install signal handler");
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
}
