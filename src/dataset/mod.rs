//! Fleet datasets: the per-vehicle summary and the per-vehicle-per-day detail.
//!
//! Both tables are read once from CSV and never mutated; everything downstream
//! works on borrowed tables and produces new ones.

pub mod export;
pub mod loader;
pub mod table;
pub mod types;

pub use export::{export_table, export_table_to_path, export_to_string};
pub use loader::{load, load_from_readers, load_table, read_table};
pub use table::{Table, TableView};
pub use types::{DailyObservation, HealthStatus, TableRow, VehicleSummaryRecord};

/// One record per vehicle, final observed day.
pub type SummaryTable = Table<VehicleSummaryRecord>;

/// One record per vehicle per day.
pub type DailyTable = Table<DailyObservation>;
