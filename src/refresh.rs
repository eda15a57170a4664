//! Polling refresh engine.
//!
//! Owns no business logic beyond scheduling: it drives the telemetry
//! generator and alert catalog on fixed periods plus selection events, and
//! publishes fresh snapshots to consumers through watch channels. Every tick
//! produces a brand-new immutable snapshot, so the streams share no mutable
//! state that would need locking.

use std::time::Duration;

use chrono::Utc;
use rand::Rng;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time;
use tracing::{debug, info};

use crate::catalog::AlertCatalog;
use crate::models::{Alert, Device, SensorReading};
use crate::store::DeviceStore;
use crate::telemetry::TelemetryGenerator;

/// Fixed poll periods; not externally configurable.
pub const DEVICE_POLL_PERIOD: Duration = Duration::from_secs(30);
pub const ALERT_POLL_PERIOD: Duration = Duration::from_secs(60);

/// Lifecycle of one refresh stream. `Loading` is only ever published before
/// the first snapshot; later ticks go straight to the next `Ready` so
/// consumers never see a flicker back to a loading state.
#[derive(Debug, Clone, PartialEq)]
pub enum RefreshState<T> {
    Idle,
    Loading,
    Ready(T),
}

impl<T> RefreshState<T> {
    pub fn is_ready(&self) -> bool {
        matches!(self, RefreshState::Ready(_))
    }

    pub fn data(&self) -> Option<&T> {
        match self {
            RefreshState::Ready(data) => Some(data),
            _ => None,
        }
    }
}

pub struct RefreshEngine;

impl RefreshEngine {
    /// Start the engine task and hand back the consumer-facing handle.
    ///
    /// One task multiplexes the device interval, the alert interval, and
    /// selection events; generation is synchronous, so no tick can block
    /// another for longer than an in-memory computation.
    pub fn spawn<R>(
        store: DeviceStore,
        catalog: AlertCatalog,
        mut generator: TelemetryGenerator<R>,
    ) -> RefreshHandle
    where
        R: Rng + Send + 'static,
    {
        let (devices_tx, devices_rx) = watch::channel(RefreshState::Idle);
        let (history_tx, history_rx) = watch::channel(RefreshState::Idle);
        let (alerts_tx, alerts_rx) = watch::channel(RefreshState::Idle);
        let (select_tx, mut select_rx) = mpsc::unbounded_channel::<String>();

        let task = tokio::spawn(async move {
            let mut device_tick = time::interval(DEVICE_POLL_PERIOD);
            let mut alert_tick = time::interval(ALERT_POLL_PERIOD);
            let mut selected: Option<String> = None;

            loop {
                tokio::select! {
                    _ = device_tick.tick() => {
                        if matches!(&*devices_tx.borrow(), RefreshState::Idle) {
                            let _ = devices_tx.send(RefreshState::Loading);
                        }
                        let next = generator
                            .refresh_current_readings(&store.devices(), Utc::now());
                        store.replace_all(next.clone());
                        debug!(devices = next.len(), "fleet snapshot refreshed");
                        let _ = devices_tx.send(RefreshState::Ready(next));
                    }
                    _ = alert_tick.tick() => {
                        if let Some(device_id) = &selected {
                            let alerts = catalog.alerts_for_device(device_id);
                            debug!(device_id = %device_id, count = alerts.len(),
                                   "alerts refreshed");
                            let _ = alerts_tx.send(RefreshState::Ready(alerts));
                        }
                    }
                    Some(device_id) = select_rx.recv() => {
                        info!(device_id = %device_id, "device selected");
                        if matches!(&*history_tx.borrow(), RefreshState::Idle) {
                            let _ = history_tx.send(RefreshState::Loading);
                            let _ = alerts_tx.send(RefreshState::Loading);
                        }
                        let series = generator
                            .historical_series(&store.devices(), &device_id, Utc::now());
                        let _ = history_tx.send(RefreshState::Ready(series));
                        let _ = alerts_tx
                            .send(RefreshState::Ready(catalog.alerts_for_device(&device_id)));
                        // Restart the alert period relative to this selection.
                        alert_tick.reset();
                        selected = Some(device_id);
                    }
                }
            }
        });

        RefreshHandle {
            devices_rx,
            history_rx,
            alerts_rx,
            select_tx,
            task,
        }
    }
}

/// Consumer-facing side of the engine: snapshot streams plus the one inbound
/// event (device selection). Dropping the handle does not stop the engine;
/// call [`RefreshHandle::shutdown`] on teardown to cancel all pending timers.
pub struct RefreshHandle {
    devices_rx: watch::Receiver<RefreshState<Vec<Device>>>,
    history_rx: watch::Receiver<RefreshState<Vec<SensorReading>>>,
    alerts_rx: watch::Receiver<RefreshState<Vec<Alert>>>,
    select_tx: mpsc::UnboundedSender<String>,
    task: JoinHandle<()>,
}

impl RefreshHandle {
    /// Fleet snapshot stream, replaced wholesale every device-poll period.
    pub fn devices(&self) -> watch::Receiver<RefreshState<Vec<Device>>> {
        self.devices_rx.clone()
    }

    /// Historical series for the selected device; regenerated on selection.
    pub fn history(&self) -> watch::Receiver<RefreshState<Vec<SensorReading>>> {
        self.history_rx.clone()
    }

    /// Alerts for the selected device; refreshed on selection and on the
    /// alert-poll period.
    pub fn alerts(&self) -> watch::Receiver<RefreshState<Vec<Alert>>> {
        self.alerts_rx.clone()
    }

    /// Switch the selection, triggering immediate history regeneration and
    /// an alert re-fetch. An unknown id publishes empty snapshots.
    pub fn select_device(&self, device_id: &str) {
        let _ = self.select_tx.send(device_id.to_owned());
    }

    /// Tear the engine down, cancelling all pending timers. No in-flight
    /// generation call needs draining since none can block.
    pub fn shutdown(&self) {
        self.task.abort();
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;
    use crate::seed::{seed_alerts, seed_devices};
    use crate::telemetry::HISTORY_POINTS;

    fn spawn_engine(seed: u64) -> RefreshHandle {
        let now = Utc::now();
        RefreshEngine::spawn(
            DeviceStore::new(seed_devices(now)),
            AlertCatalog::new(seed_alerts(now)),
            TelemetryGenerator::seeded(seed),
        )
    }

    async fn wait_ready<T: Clone>(rx: &mut watch::Receiver<RefreshState<T>>) -> T {
        loop {
            if let Some(data) = rx.borrow_and_update().data() {
                return data.clone();
            }
            rx.changed().await.expect("engine dropped its sender");
        }
    }

    #[tokio::test(start_paused = true)]
    async fn first_device_load_reaches_ready() {
        let handle = spawn_engine(1);
        let mut rx = handle.devices();

        let fleet = wait_ready(&mut rx).await;
        assert_eq!(fleet.len(), 4);
        handle.shutdown();
    }

    #[tokio::test(start_paused = true)]
    async fn device_snapshot_is_replaced_on_each_tick() {
        let handle = spawn_engine(2);
        let mut rx = handle.devices();

        let first = wait_ready(&mut rx).await;
        rx.changed().await.unwrap();
        let second = wait_ready(&mut rx).await;

        assert_eq!(first.len(), second.len());
        assert_ne!(first, second);
        for (a, b) in first.iter().zip(&second) {
            assert_eq!(a.id, b.id);
            assert!(b.current_reading.timestamp >= a.current_reading.timestamp);
        }
        handle.shutdown();
    }

    #[tokio::test(start_paused = true)]
    async fn state_never_returns_to_loading_after_first_ready() {
        let handle = spawn_engine(3);
        let mut rx = handle.devices();

        wait_ready(&mut rx).await;
        for _ in 0..5 {
            rx.changed().await.unwrap();
            assert!(rx.borrow_and_update().is_ready());
        }
        handle.shutdown();
    }

    #[tokio::test(start_paused = true)]
    async fn selection_publishes_history_and_alerts() {
        let handle = spawn_engine(4);
        let mut history = handle.history();
        let mut alerts = handle.alerts();

        handle.select_device("device-002");

        let series = wait_ready(&mut history).await;
        assert_eq!(series.len(), HISTORY_POINTS);

        let alerts = wait_ready(&mut alerts).await;
        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0].id, "alert-001");
        handle.shutdown();
    }

    #[tokio::test(start_paused = true)]
    async fn selecting_unknown_device_yields_empty_snapshots() {
        let handle = spawn_engine(5);
        let mut history = handle.history();
        let mut alerts = handle.alerts();

        handle.select_device("device-999");

        assert!(wait_ready(&mut history).await.is_empty());
        assert!(wait_ready(&mut alerts).await.is_empty());
        handle.shutdown();
    }

    #[tokio::test(start_paused = true)]
    async fn reselection_regenerates_history() {
        let handle = spawn_engine(6);
        let mut history = handle.history();

        handle.select_device("device-001");
        let first = wait_ready(&mut history).await;

        handle.select_device("device-001");
        history.changed().await.unwrap();
        let second = wait_ready(&mut history).await;

        assert_eq!(second.len(), HISTORY_POINTS);
        assert_ne!(first, second);
        handle.shutdown();
    }

    #[tokio::test(start_paused = true)]
    async fn history_stays_idle_until_a_selection_arrives() {
        let handle = spawn_engine(7);
        let mut devices = handle.devices();
        let history = handle.history();

        // Let the device stream complete a few ticks first.
        wait_ready(&mut devices).await;
        devices.changed().await.unwrap();

        assert_eq!(*history.borrow(), RefreshState::Idle);
        handle.shutdown();
    }

    #[tokio::test(start_paused = true)]
    async fn shutdown_cancels_all_pending_timers() {
        let handle = spawn_engine(8);
        let mut rx = handle.devices();

        wait_ready(&mut rx).await;
        handle.shutdown();

        // Once the task is gone the sender side drops and the stream ends.
        while rx.changed().await.is_ok() {}
        assert!(rx.changed().await.is_err());
    }
}
