use anyhow::Result;
use chrono::Utc;
use tokio::signal;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use ecowatch::{
    catalog::AlertCatalog,
    config::Config,
    refresh::{RefreshEngine, RefreshState},
    seed::{seed_alerts, seed_devices},
    store::DeviceStore,
    telemetry::TelemetryGenerator,
};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env (ignore error if file absent — env vars may be set externally)
    let _ = dotenvy::dotenv();

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = Config::from_env()?;

    let now = Utc::now();
    let store = DeviceStore::new(seed_devices(now));
    let catalog = AlertCatalog::new(seed_alerts(now));
    let generator = match config.rng_seed {
        Some(seed) => {
            info!(seed, "Using deterministic telemetry seed");
            TelemetryGenerator::seeded(seed)
        }
        None => TelemetryGenerator::from_entropy(),
    };

    let handle = RefreshEngine::spawn(store, catalog, generator);
    handle.select_device(&config.selected_device);
    info!(device_id = %config.selected_device, "Refresh engine started");

    // Log each fleet snapshot as it is published
    {
        let mut devices = handle.devices();
        tokio::spawn(async move {
            while devices.changed().await.is_ok() {
                let snapshot = devices.borrow_and_update().clone();
                if let RefreshState::Ready(fleet) = snapshot {
                    info!(devices = fleet.len(), "Fleet snapshot");
                    for device in &fleet {
                        match serde_json::to_string(device) {
                            Ok(json) => tracing::debug!(device_id = %device.id, "{json}"),
                            Err(e) => tracing::error!(error = %e, "Failed to encode device"),
                        }
                    }
                }
            }
        });
    }

    // Log history and alert snapshots for the selected device
    {
        let mut history = handle.history();
        tokio::spawn(async move {
            while history.changed().await.is_ok() {
                let snapshot = history.borrow_and_update().clone();
                if let RefreshState::Ready(series) = snapshot {
                    info!(points = series.len(), "Historical series regenerated");
                }
            }
        });
    }
    {
        let mut alerts = handle.alerts();
        tokio::spawn(async move {
            while alerts.changed().await.is_ok() {
                let snapshot = alerts.borrow_and_update().clone();
                if let RefreshState::Ready(alerts) = snapshot {
                    info!(count = alerts.len(), "Alerts refreshed");
                }
            }
        });
    }

    shutdown_signal().await;
    handle.shutdown();
    info!("Refresh engine stopped");

    Ok(())
}

async fn shutdown_signal() {
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

    info!("Shutdown signal received");
}
