use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Geographic placement of a device. Immutable once assigned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub latitude: f64,
    pub longitude: f64,
    pub name: String,
}

/// Category tags shared by reading alert flags and catalog alerts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertKind {
    Temperature,
    Humidity,
    AirQuality,
    Wind,
    Other,
}

/// One immutable sensor snapshot. A refresh replaces the whole value,
/// it never mutates a prior reading in place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SensorReading {
    pub timestamp: DateTime<Utc>,
    /// Degrees Celsius
    pub temperature: f64,
    /// Relative humidity percentage
    pub humidity: f64,
    pub air_quality_index: u16,
    /// Metres per second
    pub wind_speed: f64,
    /// Millimetres
    #[serde(skip_serializing_if = "Option::is_none")]
    pub precipitation: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uv_index: Option<u8>,
    /// Parts per million
    #[serde(skip_serializing_if = "Option::is_none")]
    pub co2: Option<u16>,
    /// Micrograms per cubic metre
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pm25: Option<u16>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub alerts: Vec<AlertKind>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeviceStatus {
    Online,
    Offline,
}

/// Device category. The fleet is weather stations only for now.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeviceKind {
    Weather,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Device {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: DeviceKind,
    pub status: DeviceStatus,
    /// Percentage, non-increasing under normal simulation
    pub battery_level: f64,
    /// Percentage
    pub signal_strength: u8,
    pub location: Location,
    pub last_update: DateTime<Utc>,
    pub current_reading: SensorReading,
}

impl Device {
    pub fn is_offline(&self) -> bool {
        self.status == DeviceStatus::Offline
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertSeverity {
    Info,
    Warning,
    Critical,
}

/// Threshold alert record. `device_name` is a denormalised copy taken at
/// seed time, not re-derived from the device list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Alert {
    pub id: String,
    pub device_id: String,
    pub device_name: String,
    #[serde(rename = "type")]
    pub kind: AlertKind,
    pub severity: AlertSeverity,
    pub title: String,
    pub description: String,
    pub timestamp: DateTime<Utc>,
    pub acknowledged: bool,
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn reading_serializes_with_camel_case_keys() {
        let reading = SensorReading {
            timestamp: Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap(),
            temperature: 22.5,
            humidity: 65.0,
            air_quality_index: 42,
            wind_speed: 3.2,
            precipitation: Some(0.0),
            uv_index: Some(3),
            co2: Some(420),
            pm25: Some(12),
            alerts: vec![AlertKind::AirQuality],
        };

        let json = serde_json::to_value(&reading).unwrap();
        assert_eq!(json["airQualityIndex"], 42);
        assert_eq!(json["windSpeed"], 3.2);
        assert_eq!(json["uvIndex"], 3);
        assert_eq!(json["alerts"][0], "air_quality");
    }

    #[test]
    fn empty_alert_tags_are_omitted() {
        let reading = SensorReading {
            timestamp: Utc::now(),
            temperature: 20.0,
            humidity: 50.0,
            air_quality_index: 30,
            wind_speed: 1.0,
            precipitation: None,
            uv_index: None,
            co2: None,
            pm25: None,
            alerts: vec![],
        };

        let json = serde_json::to_value(&reading).unwrap();
        assert!(json.get("alerts").is_none());
        assert!(json.get("co2").is_none());
    }

    #[test]
    fn device_status_uses_lowercase_tags() {
        assert_eq!(
            serde_json::to_string(&DeviceStatus::Offline).unwrap(),
            "\"offline\""
        );
        assert_eq!(
            serde_json::to_string(&AlertSeverity::Critical).unwrap(),
            "\"critical\""
        );
    }
}
