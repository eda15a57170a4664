//! Synthetic telemetry generation.
//!
//! Two jobs: perturb the current fleet snapshot (sensor noise on the live
//! devices) and synthesise a 24-hour historical series for one device. Both
//! are pure over their inputs plus the owned random source, so a seeded RNG
//! and a pinned `now` make every output reproducible.

use chrono::{DateTime, Duration, Timelike, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::models::{Device, SensorReading};

/// Points in a generated historical series: one per hour, offsets -24h..0h.
pub const HISTORY_POINTS: usize = 25;

const HUMIDITY_RANGE: (f64, f64) = (30.0, 95.0);
const AQI_RANGE: (f64, f64) = (20.0, 300.0);
const WIND_RANGE: (f64, f64) = (0.5, 8.0);

/// Mock telemetry source. Owns its RNG so callers inject determinism by
/// constructing it over a seeded generator.
pub struct TelemetryGenerator<R> {
    rng: R,
}

impl TelemetryGenerator<StdRng> {
    pub fn from_entropy() -> Self {
        Self::new(StdRng::from_os_rng())
    }

    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> TelemetryGenerator<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    /// Derive the next fleet snapshot from the current one.
    ///
    /// Online devices get a fresh reading with bounded noise on temperature,
    /// humidity and AQI, a small battery drain, and timestamps set to `now`.
    /// Offline devices pass through unchanged: no data arrives from a
    /// disconnected sensor, so their last reading must not drift.
    pub fn refresh_current_readings(
        &mut self,
        devices: &[Device],
        now: DateTime<Utc>,
    ) -> Vec<Device> {
        devices
            .iter()
            .map(|device| {
                if device.is_offline() {
                    return device.clone();
                }

                let reading = &device.current_reading;
                let mut next = device.clone();
                next.battery_level =
                    (device.battery_level - self.rng.random_range(0.0..=0.1)).max(0.0);
                next.last_update = now;
                next.current_reading = SensorReading {
                    timestamp: now,
                    temperature: round1(reading.temperature + self.rng.random_range(-0.3..=0.3)),
                    humidity: self.perturbed(reading.humidity, 2.0, HUMIDITY_RANGE).round(),
                    air_quality_index: self
                        .perturbed(reading.air_quality_index as f64, 3.0, AQI_RANGE)
                        .round() as u16,
                    ..reading.clone()
                };
                next
            })
            .collect()
    }

    /// Synthesise the last 24 hours for `device_id`, oldest first, ending at
    /// `now`. Each point perturbs the device's current reading independently
    /// with a time-of-day shaping term on temperature and UV.
    ///
    /// The series is rebuilt from scratch on every call; there is no history
    /// buffer. An unknown id yields an empty series, which callers treat as
    /// a valid "no data" state.
    pub fn historical_series(
        &mut self,
        devices: &[Device],
        device_id: &str,
        now: DateTime<Utc>,
    ) -> Vec<SensorReading> {
        let Some(device) = devices.iter().find(|d| d.id == device_id) else {
            return Vec::new();
        };
        let base = &device.current_reading;

        (0..HISTORY_POINTS as i64)
            .rev()
            .map(|hours_back| {
                let timestamp = now - Duration::hours(hours_back);
                let hour = timestamp.hour();

                let shaping = if hour > 12 && hour < 18 {
                    2.0
                } else if hour < 6 {
                    -2.0
                } else {
                    0.0
                };

                let precipitation = if self.rng.random_bool(0.2) {
                    round1(self.rng.random_range(0.0..=0.5))
                } else {
                    0.0
                };
                let uv_index = if hour > 10 && hour < 16 {
                    self.rng.random_range(1..=6)
                } else {
                    self.rng.random_range(0..=2)
                };

                SensorReading {
                    timestamp,
                    temperature: round1(
                        base.temperature + self.rng.random_range(-3.0..=3.0) + shaping,
                    ),
                    humidity: self.perturbed(base.humidity, 10.0, HUMIDITY_RANGE).round(),
                    air_quality_index: self
                        .perturbed(base.air_quality_index as f64, 20.0, AQI_RANGE)
                        .round() as u16,
                    wind_speed: round1(self.perturbed(base.wind_speed, 1.0, WIND_RANGE)),
                    precipitation: Some(precipitation),
                    uv_index: Some(uv_index),
                    co2: Some(self.rng.random_range(400..=700)),
                    pm25: Some(self.rng.random_range(10..=60)),
                    alerts: vec![],
                }
            })
            .collect()
    }

    /// Uniform delta in `±spread`, clamped to `range`.
    fn perturbed(&mut self, base: f64, spread: f64, range: (f64, f64)) -> f64 {
        (base + self.rng.random_range(-spread..=spread)).clamp(range.0, range.1)
    }
}

/// Round half away from zero to one decimal place.
fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
