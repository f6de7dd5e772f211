//! FleetPulse Server — Live Bus Fleet Monitoring
//!
//! Main entry point that wires all crates together and starts the server.

use std::sync::Arc;

use tracing_subscriber::{EnvFilter, fmt};

use fleetpulse_core::config::AppConfig;
use fleetpulse_core::error::AppError;
use fleetpulse_realtime::BroadcastHub;
use fleetpulse_store::FleetStore;
use fleetpulse_video::{JobRegistry, ProcessSupervisor};

#[tokio::main]
async fn main() {
    let config = match load_configuration() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    init_logging(&config);

    if let Err(e) = run(config).await {
        tracing::error!("Server error: {e}");
        std::process::exit(1);
    }
}

/// Load configuration from file and environment
fn load_configuration() -> Result<AppConfig, AppError> {
    let env = std::env::var("FLEETPULSE_ENV").unwrap_or_else(|_| "development".to_string());
    AppConfig::load(&env)
}

/// Initialize tracing/logging
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .with_thread_ids(true)
                .init();
        }
        _ => {
            fmt()
                .pretty()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
    }
}

/// Main server run function
async fn run(config: AppConfig) -> Result<(), AppError> {
    tracing::info!("Starting FleetPulse v{}", env!("CARGO_PKG_VERSION"));

    // ── Step 1: Create data directories ──────────────────────────
    create_data_directories(&config).await?;

    // ── Step 2: Fleet store ──────────────────────────────────────
    let fleet = Arc::new(FleetStore::new());
    fleet.seed_demo_fleet();

    // ── Step 3: Realtime hub ─────────────────────────────────────
    let hub = Arc::new(BroadcastHub::new(config.realtime.client_buffer_size));

    // ── Step 4: Video job subsystem ──────────────────────────────
    let registry = Arc::new(JobRegistry::new());
    let supervisor = Arc::new(ProcessSupervisor::new(
        Arc::clone(&registry),
        Arc::clone(&hub),
        config.video.clone(),
    ));

    // ── Step 5: Build and start HTTP server ──────────────────────
    tracing::info!(
        "Starting HTTP server on {}:{}...",
        config.server.host,
        config.server.port
    );

    let app_state = fleetpulse_api::AppState {
        config: Arc::new(config.clone()),
        fleet,
        registry,
        supervisor: Arc::clone(&supervisor),
        hub,
    };

    let app = fleetpulse_api::build_router(app_state);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {addr}: {e}")))?;

    tracing::info!("FleetPulse server listening on {addr}");

    // ── Step 6: Graceful shutdown ────────────────────────────────
    let server = axum::serve(listener, app).with_graceful_shutdown(async move {
        shutdown_signal().await;
        tracing::info!("Shutdown signal received, starting graceful shutdown...");
    });

    server
        .await
        .map_err(|e| AppError::internal(format!("Server error: {e}")))?;

    // ── Step 7: Drain counting workers ───────────────────────────
    // Kill still-running workers and wait for their monitors so every
    // interrupted job is finalized before the runtime tears down.
    let grace = std::time::Duration::from_secs(config.server.shutdown_grace_seconds);
    supervisor.shutdown(grace).await;

    tracing::info!("FleetPulse server shut down gracefully");
    Ok(())
}

/// Create required data directories
async fn create_data_directories(config: &AppConfig) -> Result<(), AppError> {
    let dirs = [config.storage.upload_dir.clone()];

    for dir in &dirs {
        tokio::fs::create_dir_all(dir)
            .await
            .map_err(|e| AppError::internal(format!("Failed to create dir '{dir}': {e}")))?;
    }

    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
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
