use std::sync::Arc;

use anyhow::Context;
use dotenv::dotenv;
use tokio::signal;
use tracing::{info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use health_tracker_app::{AppConfig, Application, LogNotifier};
use health_tracker_data::database::{initialize_database_pool, StorageBackend};
use health_tracker_data::storage::{InMemoryStorage, KeyValueStorage, SqliteStorage};
use health_tracker_domain::scheduler::SystemClock;

/// Entry point for the health tracker host
///
/// Loads the environment, opens storage, then runs the dashboard refresh and
/// reminder loops until interrupted.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    if dotenv().is_err() {
        eprintln!("Warning: .env file not found or couldn't be read. Using environment variables.");
    }

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(false)
                .with_timer(fmt::time::uptime())
                .with_writer(std::io::stdout),
        )
        .with(env_filter)
        .init();

    info!("🚀 Starting health tracker");

    let config = AppConfig::from_env().context("invalid configuration")?;

    let storage: Arc<dyn KeyValueStorage> = match config.storage.backend {
        StorageBackend::Sqlite => {
            let pool = initialize_database_pool(&config.storage).context("failed to open SQLite storage")?;
            info!("Database pool initialized successfully");
            Arc::new(SqliteStorage::new(pool))
        }
        StorageBackend::Memory => {
            warn!("Using in-memory storage; readings will be lost on exit");
            Arc::new(InMemoryStorage::new())
        }
    };

    let mut app = Application::with_storage(config, storage);
    let notifier = Arc::new(LogNotifier::new(app.config().notifications_enabled));

    let mut snapshots = app
        .start(notifier, Arc::new(SystemClock))
        .context("failed to start background tasks")?;

    log_snapshot_summary(&snapshots.borrow_and_update());

    tokio::select! {
        _ = shutdown_signal() => {}
        _ = async {
            while snapshots.changed().await.is_ok() {
                log_snapshot_summary(&snapshots.borrow_and_update());
            }
        } => {}
    }

    app.shutdown().await;
    info!("Shutdown complete");
    Ok(())
}

fn log_snapshot_summary(snapshot: &health_tracker_domain::services::DashboardSnapshot) {
    let sugar: Vec<String> = snapshot.latest_sugar.iter().map(|s| s.to_string()).collect();
    let blood_pressure = snapshot
        .latest_blood_pressure
        .as_ref()
        .map(|bp| bp.to_string())
        .unwrap_or_else(|| "no readings".to_string());

    info!(
        "Dashboard refreshed: sugar [{}], blood pressure {}, {} medicine groups",
        sugar.join(", "),
        blood_pressure,
        snapshot.medicines.len()
    );
}

/// Wait for CTRL+C or, on Unix, SIGTERM
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                warn!("Failed to install signal handler: {}", e);
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

    info!("Shutting down...");
}
