//! Mock telemetry core for an environmental-IoT dashboard.
//!
//! All data is synthesised in memory from a fixed seed fleet: bounded random
//! walks for current readings, a time-of-day-shaped 24-hour series per
//! device, and a static alert catalog. The [`refresh::RefreshEngine`] drives
//! the generators on fixed poll periods and hands immutable snapshots to
//! presentation consumers; nothing here talks to real devices.

pub mod catalog;
pub mod config;
pub mod models;
pub mod refresh;
pub mod seed;
pub mod store;
pub mod telemetry;

pub use catalog::AlertCatalog;
pub use config::Config;
pub use models::{Alert, AlertKind, AlertSeverity, Device, DeviceStatus, Location, SensorReading};
pub use refresh::{RefreshEngine, RefreshHandle, RefreshState};
pub use store::DeviceStore;
pub use telemetry::TelemetryGenerator;
