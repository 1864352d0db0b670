use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use thiserror::Error;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;
use tradetrack_core::CoreError;
use tradetrack_server::{build_router, persistence, AppState, ConfigError, ServerConfig};

/// Reasons the server fails to start or to shut down cleanly.
#[derive(Error, Debug)]
enum StartupError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Invalid match settings: {0}")]
    Matching(CoreError),

    #[error("Failed to load snapshot from {path:?}: {source}")]
    Load { path: PathBuf, source: CoreError },

    #[error("Failed to bind {addr}: {source}")]
    Bind { addr: SocketAddr, source: std::io::Error },

    #[error("Server error: {0}")]
    Serve(std::io::Error),

    #[error("Failed to save snapshot: {0}")]
    Save(CoreError),
}

#[tokio::main]
async fn main() -> ExitCode {
    // Initialize tracing subscriber for logging
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("tradetrack_server=info,tradetrack_core=info,tower_http=info"));
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    info!("Initializing TradeTrack Server...");
    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "Server stopped with an error");
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<(), StartupError> {
    let config = ServerConfig::from_env()?;
    config.matching.validate().map_err(StartupError::Matching)?;
    let addr = config.socket_addr()?;
    info!(
        path = ?config.data_path,
        embedding_dimension = config.matching.embedding_dimension,
        match_threshold = config.matching.match_threshold,
        "Configuration loaded"
    );

    // Load stores from disk
    let app_state = persistence::load_snapshot(&config.data_path, config.matching)
        .map_err(|source| StartupError::Load {
            path: config.data_path.clone(),
            source,
        })?;

    let app_state_clone_for_shutdown = app_state.clone(); // Clone for shutdown handler
    let persistence_path_clone_for_shutdown = config.data_path.clone();
    let app = build_router(app_state);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|source| StartupError::Bind { addr, source })?;
    info!("Starting server on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(StartupError::Serve)?;

    save_on_shutdown(&app_state_clone_for_shutdown, &persistence_path_clone_for_shutdown)
}

fn save_on_shutdown(app_state: &AppState, persistence_path: &Path) -> Result<(), StartupError> {
    info!("Saving stores before shutdown...");
    persistence::save_snapshot(app_state, persistence_path).map_err(StartupError::Save)?;
    info!("Stores saved. Shutting down.");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>(); // On non-Unix, just wait for Ctrl+C

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, initiating graceful shutdown...");
        },
        _ = terminate => {
            info!("Received terminate signal, initiating graceful shutdown...");
        },
    }
}
