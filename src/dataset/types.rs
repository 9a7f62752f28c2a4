//! Record types for the two fleet tables.

use csv::StringRecord;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A row type that can be read from, and rebuilt into, a CSV record.
pub trait TableRow: DeserializeOwned {
    /// Columns that must be present in the header for a load to succeed.
    const REQUIRED_COLUMNS: &'static [&'static str];

    /// Columns written when a table is built from typed rows alone.
    const COLUMNS: &'static [&'static str];

    fn to_record(&self) -> StringRecord;

    /// Value-level check run on every loaded row; `Some` describes the problem.
    fn invalid_reason(&self) -> Option<String> {
        None
    }
}

fn non_finite_health(battery_health: f64) -> Option<String> {
    if battery_health.is_finite() {
        None
    } else {
        Some(format!("battery_health must be a finite number, got {battery_health}"))
    }
}

/// Health label attached to each vehicle's final-day snapshot.
///
/// Upstream labels carry decoration (`🟢 Healthy`, `🔴 Critical`), so any
/// leading non-alphanumeric prefix is ignored and matching is case-insensitive.
/// Anything else is kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum HealthStatus {
    Healthy,
    Critical,
    Other(String),
}

impl HealthStatus {
    pub fn is_healthy(&self) -> bool {
        matches!(self, HealthStatus::Healthy)
    }

    pub fn is_critical(&self) -> bool {
        matches!(self, HealthStatus::Critical)
    }
}

impl From<String> for HealthStatus {
    fn from(label: String) -> Self {
        let core = label
            .trim_start_matches(|c: char| !c.is_alphanumeric())
            .trim();

        if core.eq_ignore_ascii_case("healthy") {
            HealthStatus::Healthy
        } else if core.eq_ignore_ascii_case("critical") {
            HealthStatus::Critical
        } else {
            HealthStatus::Other(label)
        }
    }
}

impl From<&str> for HealthStatus {
    fn from(label: &str) -> Self {
        HealthStatus::from(label.to_string())
    }
}

impl From<HealthStatus> for String {
    fn from(status: HealthStatus) -> Self {
        match status {
            HealthStatus::Healthy => "Healthy".into(),
            HealthStatus::Critical => "Critical".into(),
            HealthStatus::Other(label) => label,
        }
    }
}

impl fmt::Display for HealthStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HealthStatus::Healthy => f.write_str("Healthy"),
            HealthStatus::Critical => f.write_str("Critical"),
            HealthStatus::Other(label) => f.write_str(label),
        }
    }
}

/// Final-day snapshot of one vehicle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VehicleSummaryRecord {
    #[serde(default)]
    pub vehicle_id: Option<String>,
    pub battery_health: f64,
    pub health_status: HealthStatus,
}

impl VehicleSummaryRecord {
    pub fn new(battery_health: f64, health_status: impl Into<HealthStatus>) -> Self {
        Self {
            vehicle_id: None,
            battery_health,
            health_status: health_status.into(),
        }
    }

    pub fn with_vehicle_id(mut self, vehicle_id: &str) -> Self {
        self.vehicle_id = Some(vehicle_id.to_string());
        self
    }
}

impl TableRow for VehicleSummaryRecord {
    const REQUIRED_COLUMNS: &'static [&'static str] = &["battery_health", "health_status"];
    const COLUMNS: &'static [&'static str] = &["vehicle_id", "battery_health", "health_status"];

    fn to_record(&self) -> StringRecord {
        StringRecord::from(vec![
            self.vehicle_id.clone().unwrap_or_default(),
            self.battery_health.to_string(),
            self.health_status.to_string(),
        ])
    }

    fn invalid_reason(&self) -> Option<String> {
        non_finite_health(self.battery_health)
    }
}

/// One vehicle's observation on one day of the horizon.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyObservation {
    #[serde(default)]
    pub vehicle_id: Option<String>,
    pub day: u32,
    pub battery_health: f64,
    pub climate: String,
    pub charging: String,
}

impl DailyObservation {
    pub fn new(day: u32, battery_health: f64, climate: &str, charging: &str) -> Self {
        Self {
            vehicle_id: None,
            day,
            battery_health,
            climate: climate.to_string(),
            charging: charging.to_string(),
        }
    }

    pub fn with_vehicle_id(mut self, vehicle_id: &str) -> Self {
        self.vehicle_id = Some(vehicle_id.to_string());
        self
    }
}

impl TableRow for DailyObservation {
    const REQUIRED_COLUMNS: &'static [&'static str] =
        &["day", "battery_health", "climate", "charging"];
    const COLUMNS: &'static [&'static str] =
        &["vehicle_id", "day", "battery_health", "climate", "charging"];

    fn to_record(&self) -> StringRecord {
        StringRecord::from(vec![
            self.vehicle_id.clone().unwrap_or_default(),
            self.day.to_string(),
            self.battery_health.to_string(),
            self.climate.clone(),
            self.charging.clone(),
        ])
    }

    fn invalid_reason(&self) -> Option<String> {
        non_finite_health(self.battery_health)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_health_status_strips_decoration() {
        assert_eq!(HealthStatus::from("🟢 Healthy"), HealthStatus::Healthy);
        assert_eq!(HealthStatus::from("🔴 Critical"), HealthStatus::Critical);
        assert_eq!(HealthStatus::from("critical"), HealthStatus::Critical);
    }

    #[test]
    fn test_health_status_keeps_unknown_label() {
        let status = HealthStatus::from("🟡 Moderate");
        assert_eq!(status, HealthStatus::Other("🟡 Moderate".to_string()));
        assert_eq!(status.to_string(), "🟡 Moderate");
    }

    #[test]
    fn test_invalid_reason_flags_non_finite_health() {
        assert_eq!(VehicleSummaryRecord::new(90.0, "Healthy").invalid_reason(), None);
        assert!(VehicleSummaryRecord::new(f64::NAN, "Healthy").invalid_reason().is_some());
        assert!(DailyObservation::new(1, f64::INFINITY, "Hot", "Fast").invalid_reason().is_some());
    }

    #[test]
    fn test_summary_to_record_matches_columns() {
        let record = VehicleSummaryRecord::new(72.5, "Other").with_vehicle_id("EV_007");
        let fields: Vec<_> = record.to_record().iter().map(str::to_string).collect();

        assert_eq!(fields.len(), VehicleSummaryRecord::COLUMNS.len());
        assert_eq!(fields, vec!["EV_007", "72.5", "Other"]);
    }
}
