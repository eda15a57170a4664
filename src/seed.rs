//! Fixed seed fleet and alert set used as generation baselines.
//!
//! Seed construction takes the current instant so relative timestamps
//! (thirty minutes ago, one day ago) stay reproducible under test.

use chrono::{DateTime, Duration, Utc};

use crate::models::{
    Alert, AlertKind, AlertSeverity, Device, DeviceKind, DeviceStatus, Location, SensorReading,
};

/// The four seeded weather stations. `device-003` is offline: its battery is
/// nearly drained and its last contact was a day before `now`.
pub fn seed_devices(now: DateTime<Utc>) -> Vec<Device> {
    let day_ago = now - Duration::days(1);

    vec![
        Device {
            id: "device-001".to_owned(),
            name: "Weather Station #1".to_owned(),
            kind: DeviceKind::Weather,
            status: DeviceStatus::Online,
            battery_level: 87.0,
            signal_strength: 92,
            location: Location {
                latitude: 55.7558,
                longitude: 37.6173,
                name: "Central Park".to_owned(),
            },
            last_update: now,
            current_reading: SensorReading {
                timestamp: now,
                temperature: 22.5,
                humidity: 65.0,
                air_quality_index: 42,
                wind_speed: 3.2,
                precipitation: Some(0.0),
                uv_index: Some(3),
                co2: Some(420),
                pm25: Some(12),
                alerts: vec![],
            },
        },
        Device {
            id: "device-002".to_owned(),
            name: "Weather Station #2".to_owned(),
            kind: DeviceKind::Weather,
            status: DeviceStatus::Online,
            battery_level: 54.0,
            signal_strength: 78,
            location: Location {
                latitude: 55.7439,
                longitude: 37.6282,
                name: "City Square".to_owned(),
            },
            last_update: now,
            current_reading: SensorReading {
                timestamp: now,
                temperature: 23.1,
                humidity: 58.0,
                air_quality_index: 87,
                wind_speed: 2.1,
                precipitation: Some(0.0),
                uv_index: Some(4),
                co2: Some(480),
                pm25: Some(28),
                alerts: vec![AlertKind::AirQuality],
            },
        },
        Device {
            id: "device-003".to_owned(),
            name: "Weather Station #3".to_owned(),
            kind: DeviceKind::Weather,
            status: DeviceStatus::Offline,
            battery_level: 12.0,
            signal_strength: 23,
            location: Location {
                latitude: 55.7522,
                longitude: 37.6156,
                name: "Industrial Zone".to_owned(),
            },
            last_update: day_ago,
            current_reading: SensorReading {
                timestamp: day_ago,
                temperature: 24.8,
                humidity: 45.0,
                air_quality_index: 132,
                wind_speed: 1.5,
                precipitation: Some(0.0),
                uv_index: Some(2),
                co2: Some(620),
                pm25: Some(45),
                alerts: vec![AlertKind::AirQuality, AlertKind::Temperature],
            },
        },
        Device {
            id: "device-004".to_owned(),
            name: "Weather Station #4".to_owned(),
            kind: DeviceKind::Weather,
            status: DeviceStatus::Online,
            battery_level: 92.0,
            signal_strength: 95,
            location: Location {
                latitude: 55.7614,
                longitude: 37.6089,
                name: "Residential District".to_owned(),
            },
            last_update: now,
            current_reading: SensorReading {
                timestamp: now,
                temperature: 21.7,
                humidity: 62.0,
                air_quality_index: 56,
                wind_speed: 2.8,
                precipitation: Some(0.2),
                uv_index: Some(2),
                co2: Some(450),
                pm25: Some(18),
                alerts: vec![],
            },
        },
    ]
}

/// The static alert set. Every `device_id` references a seeded device.
pub fn seed_alerts(now: DateTime<Utc>) -> Vec<Alert> {
    let day_ago = now - Duration::days(1);

    vec![
        Alert {
            id: "alert-001".to_owned(),
            device_id: "device-002".to_owned(),
            device_name: "Weather Station #2".to_owned(),
            kind: AlertKind::AirQuality,
            severity: AlertSeverity::Warning,
            title: "Elevated air pollution".to_owned(),
            description: "Air quality index exceeded the threshold of 80. \
                          Limiting time outdoors is recommended."
                .to_owned(),
            timestamp: now - Duration::minutes(30),
            acknowledged: false,
        },
        Alert {
            id: "alert-002".to_owned(),
            device_id: "device-003".to_owned(),
            device_name: "Weather Station #3".to_owned(),
            kind: AlertKind::Temperature,
            severity: AlertSeverity::Critical,
            title: "Critical temperature".to_owned(),
            description: "Abnormally high temperature of 24.8°C recorded. \
                          Possible sensor malfunction."
                .to_owned(),
            timestamp: day_ago,
            acknowledged: true,
        },
        Alert {
            id: "alert-003".to_owned(),
            device_id: "device-003".to_owned(),
            device_name: "Weather Station #3".to_owned(),
            kind: AlertKind::AirQuality,
            severity: AlertSeverity::Critical,
            title: "Dangerous air pollution".to_owned(),
            description: "Air quality index reached the critical value of 132. \
                          Avoid spending time outdoors."
                .to_owned(),
            timestamp: day_ago + Duration::hours(1),
            acknowledged: false,
        },
        Alert {
            id: "alert-004".to_owned(),
            device_id: "device-004".to_owned(),
            device_name: "Weather Station #4".to_owned(),
            kind: AlertKind::Humidity,
            severity: AlertSeverity::Info,
            title: "Elevated humidity".to_owned(),
            description: "Humidity exceeded 60%. Precipitation is possible.".to_owned(),
            timestamp: now - Duration::minutes(120),
            acknowledged: true,
        },
    ]
}
