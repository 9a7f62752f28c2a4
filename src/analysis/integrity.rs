//! Optional load-time consistency checks.
//!
//! Nothing here alters the tables; issues are reported so upstream data
//! problems stay visible instead of being silently corrected.

use serde::Serialize;
use std::collections::{HashMap, HashSet};
use std::fmt;
use tracing::{info, warn};

use crate::analysis::status::{classify, is_consistent};
use crate::dataset::{DailyTable, HealthStatus, SummaryTable};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum IntegrityIssue {
    /// Summary label disagrees with the >85 / <70 threshold rule.
    StatusMismatch {
        row: usize,
        vehicle_id: Option<String>,
        battery_health: f64,
        health_status: HealthStatus,
    },
    HealthOutOfRange {
        table: &'static str,
        row: usize,
        battery_health: f64,
    },
    DuplicateVehicle {
        row: usize,
        vehicle_id: String,
    },
    DuplicateDay {
        row: usize,
        vehicle_id: String,
        day: u32,
    },
}

impl fmt::Display for IntegrityIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IntegrityIssue::StatusMismatch {
                row,
                vehicle_id,
                battery_health,
                health_status,
            } => write!(
                f,
                "summary row {row} ({}): status '{health_status}' does not fit health {battery_health} ({:?} band)",
                vehicle_id.as_deref().unwrap_or("?"),
                classify(*battery_health),
            ),
            IntegrityIssue::HealthOutOfRange {
                table,
                row,
                battery_health,
            } => write!(f, "{table} row {row}: health {battery_health} outside [0, 100]"),
            IntegrityIssue::DuplicateVehicle { row, vehicle_id } => {
                write!(f, "summary row {row}: vehicle '{vehicle_id}' appears more than once")
            }
            IntegrityIssue::DuplicateDay {
                row,
                vehicle_id,
                day,
            } => write!(f, "daily row {row}: vehicle '{vehicle_id}' repeats day {day}"),
        }
    }
}

fn in_range(health: f64) -> bool {
    (0.0..=100.0).contains(&health)
}

/// Runs every check over both tables. Row numbers are 0-based data rows.
pub fn check_integrity(summary: &SummaryTable, daily: &DailyTable) -> Vec<IntegrityIssue> {
    let mut issues = Vec::new();
    let mut seen_vehicles = HashSet::new();

    for (row, rec) in summary.iter().enumerate() {
        if !in_range(rec.battery_health) {
            issues.push(IntegrityIssue::HealthOutOfRange {
                table: "summary",
                row,
                battery_health: rec.battery_health,
            });
        }

        if !is_consistent(&rec.health_status, rec.battery_health) {
            issues.push(IntegrityIssue::StatusMismatch {
                row,
                vehicle_id: rec.vehicle_id.clone(),
                battery_health: rec.battery_health,
                health_status: rec.health_status.clone(),
            });
        }

        if let Some(id) = &rec.vehicle_id {
            if !seen_vehicles.insert(id.as_str()) {
                issues.push(IntegrityIssue::DuplicateVehicle {
                    row,
                    vehicle_id: id.clone(),
                });
            }
        }
    }

    let mut days_by_vehicle: HashMap<&str, HashSet<u32>> = HashMap::new();

    for (row, obs) in daily.iter().enumerate() {
        if !in_range(obs.battery_health) {
            issues.push(IntegrityIssue::HealthOutOfRange {
                table: "daily",
                row,
                battery_health: obs.battery_health,
            });
        }

        if let Some(id) = &obs.vehicle_id {
            if !days_by_vehicle.entry(id.as_str()).or_default().insert(obs.day) {
                issues.push(IntegrityIssue::DuplicateDay {
                    row,
                    vehicle_id: id.clone(),
                    day: obs.day,
                });
            }
        }
    }

    for issue in &issues {
        warn!(%issue, "Integrity issue");
    }
    info!(
        summary_rows = summary.len(),
        daily_rows = daily.len(),
        issues = issues.len(),
        "Integrity check finished"
    );

    issues
}
