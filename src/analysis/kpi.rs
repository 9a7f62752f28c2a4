use serde::Serialize;

use crate::analysis::utility::mean;
use crate::dataset::SummaryTable;

/// Fleet-level scalar metrics derived from the summary table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FleetKpis {
    /// Mean battery health, or `None` when the summary table is empty.
    pub avg_health: Option<f64>,
    pub critical_count: usize,
    pub healthy_count: usize,
    pub vehicle_count: usize,
}

impl FleetKpis {
    /// Average health formatted for display, `"no data"` when undefined.
    pub fn avg_health_label(&self) -> String {
        match self.avg_health {
            Some(avg) => format!("{avg:.2}%"),
            None => "no data".to_string(),
        }
    }
}

/// Average health plus critical and healthy vehicle counts.
pub fn compute_kpis(summary: &SummaryTable) -> FleetKpis {
    let healths: Vec<f64> = summary.iter().map(|r| r.battery_health).collect();

    FleetKpis {
        avg_health: mean(&healths),
        critical_count: summary
            .iter()
            .filter(|r| r.health_status.is_critical())
            .count(),
        healthy_count: summary
            .iter()
            .filter(|r| r.health_status.is_healthy())
            .count(),
        vehicle_count: summary.len(),
    }
}
