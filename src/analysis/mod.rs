//! Derived views over the fleet tables.
//!
//! Filtering, KPIs, the per-day trend and the sorted summary are all pure
//! functions of the loaded tables and recomputed whenever the selection changes.

pub mod filter;
pub mod integrity;
pub mod kpi;
pub mod ranking;
pub mod status;
pub mod trend;
pub mod utility;

pub use filter::{Selection, apply, distinct_charging, distinct_climates, filter};
pub use integrity::{IntegrityIssue, check_integrity};
pub use kpi::{FleetKpis, compute_kpis};
pub use ranking::sorted_summary_table;
pub use trend::{TrendPoint, aggregate_trend};
