//! Output formatting and persistence for dashboard views.
//!
//! Supports pretty-printing, JSON serialization, and CSV export of the trend.

use anyhow::Result;
use csv::WriterBuilder;
use serde::Serialize;
use std::path::Path;
use tracing::{debug, info};

use crate::analysis::{FleetKpis, TrendPoint};
use crate::dataset::TableView;
use crate::dataset::export::create_output_file;
use crate::session::DashboardView;

/// One trend row as written to CSV, band edges included.
#[derive(Debug, Serialize)]
struct TrendRow {
    day: u32,
    mean_health: f64,
    std_dev_health: f64,
    lower: f64,
    upper: f64,
    observations: usize,
}

impl From<&TrendPoint> for TrendRow {
    fn from(point: &TrendPoint) -> Self {
        let (lower, upper) = point.band();
        Self {
            day: point.day,
            mean_health: point.mean_health,
            std_dev_health: point.std_dev_health,
            lower,
            upper,
            observations: point.observations,
        }
    }
}

/// Logs a view using Rust's debug pretty-print format.
pub fn print_pretty(view: &DashboardView) {
    debug!("{:#?}", view);
}

/// Logs a view as pretty-printed JSON at debug level.
pub fn print_json(view: &DashboardView) -> Result<()> {
    debug!("{}", serde_json::to_string_pretty(view)?);
    Ok(())
}

/// Writes a view as pretty-printed JSON to `path`.
pub fn write_json(path: &Path, view: &DashboardView) -> Result<()> {
    let file = create_output_file(path)?;
    serde_json::to_writer_pretty(file, view)?;
    info!(path = %path.display(), "Dashboard view written");
    Ok(())
}

/// Writes the trend series to a CSV file, replacing it if present.
///
/// An empty series still produces the header row.
pub fn write_trend_csv(path: &Path, trend: &[TrendPoint]) -> Result<()> {
    let file = create_output_file(path)?;
    let mut writer = WriterBuilder::new().has_headers(false).from_writer(file);

    writer.write_record([
        "day",
        "mean_health",
        "std_dev_health",
        "lower",
        "upper",
        "observations",
    ])?;
    for point in trend {
        writer.serialize(TrendRow::from(point))?;
    }
    writer.flush()?;

    info!(path = %path.display(), days = trend.len(), "Trend CSV written");
    Ok(())
}

/// Logs the three headline KPIs.
pub fn log_kpis(kpis: &FleetKpis) {
    info!(
        average_battery_health = %kpis.avg_health_label(),
        critical_vehicles = kpis.critical_count,
        healthy_vehicles = kpis.healthy_count,
        vehicles = kpis.vehicle_count,
        "Fleet KPIs"
    );
}

/// Logs the first and last point of the trend, or notes that it is empty.
pub fn log_trend(trend: &[TrendPoint]) {
    match (trend.first(), trend.last()) {
        (Some(first), Some(last)) => info!(
            days = trend.len(),
            first_day = first.day,
            first_mean = %format!("{:.2}", first.mean_health),
            last_day = last.day,
            last_mean = %format!("{:.2}", last.mean_health),
            last_std_dev = %format!("{:.2}", last.std_dev_health),
            "Fleet battery health over time"
        ),
        _ => info!("No data for the current selection"),
    }
}

/// Logs the vehicle table, one line per vehicle with every column.
pub fn log_summary(table: &TableView) {
    for row in &table.rows {
        let fields = table
            .columns
            .iter()
            .zip(row)
            .map(|(column, value)| format!("{column}={value}"))
            .collect::<Vec<_>>()
            .join(" ");
        info!(vehicle = %fields, "Vehicle");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::Selection;
    use chrono::Utc;
    use std::fs;
    use std::io::{self, Write};
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

    impl Write for CapturedLogs {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl CapturedLogs {
        fn text(&self) -> String {
            String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
        }
    }

    fn capture_at_info(f: impl FnOnce()) -> String {
        let logs = CapturedLogs::default();
        let writer = logs.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::INFO)
            .with_ansi(false)
            .with_writer(move || writer.clone())
            .finish();

        tracing::subscriber::with_default(subscriber, f);
        logs.text()
    }

    fn view() -> DashboardView {
        DashboardView {
            generated_at: Utc::now(),
            selection: Selection::new(["Hot"], ["Fast"]),
            kpis: FleetKpis {
                avg_health: None,
                critical_count: 0,
                healthy_count: 0,
                vehicle_count: 0,
            },
            filtered_rows: 1,
            trend: vec![TrendPoint {
                day: 1,
                mean_health: 80.0,
                std_dev_health: 0.0,
                observations: 1,
            }],
            summary_by_health: TableView {
                columns: vec!["vehicle_id".into(), "battery_health".into(), "total_km".into()],
                rows: vec![vec!["EV_1".into(), "91".into(), "15000".into()]],
            },
        }
    }

    #[test]
    fn test_print_pretty_does_not_panic() {
        print_pretty(&view());
    }

    #[test]
    fn test_print_json_does_not_panic() {
        print_json(&view()).unwrap();
    }

    #[test]
    fn test_write_json_has_null_average() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("view.json");

        write_json(&path, &view()).unwrap();

        let value: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert!(value["kpis"]["avg_health"].is_null());
        assert_eq!(value["trend"][0]["day"], 1);
        assert_eq!(value["selection"]["climates"][0], "Hot");
    }

    #[test]
    fn test_print_json_stays_out_of_info_logs() {
        let logs = capture_at_info(|| print_json(&view()).unwrap());
        assert!(logs.is_empty(), "unexpected info output: {logs}");
    }

    #[test]
    fn test_log_kpis_visible_at_info() {
        let logs = capture_at_info(|| log_kpis(&view().kpis));
        assert!(logs.contains("Fleet KPIs"));
        assert!(logs.contains("no data"));
    }

    #[test]
    fn test_log_summary_includes_every_column() {
        let logs = capture_at_info(|| log_summary(&view().summary_by_health));
        assert!(logs.contains("vehicle_id=EV_1 battery_health=91 total_km=15000"));
    }

    #[test]
    fn test_write_json_creates_parent_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("reports").join("2026").join("view.json");

        write_json(&path, &view()).unwrap();

        assert!(path.exists());
    }

    #[test]
    fn test_write_trend_csv_creates_parent_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("trend").join("trend.csv");

        write_trend_csv(&path, &view().trend).unwrap();

        assert!(path.exists());
    }

    #[test]
    fn test_write_trend_csv() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("trend.csv");

        write_trend_csv(&path, &view().trend).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        let lines: Vec<_> = content.lines().collect();
        assert_eq!(lines[0], "day,mean_health,std_dev_health,lower,upper,observations");
        assert_eq!(lines[1], "1,80.0,0.0,80.0,80.0,1");
    }

    #[test]
    fn test_write_trend_csv_empty_series_writes_header_once() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("trend.csv");

        write_trend_csv(&path, &[]).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert_eq!(content.lines().count(), 1);
    }

    #[test]
    fn test_log_helpers_do_not_panic() {
        let v = view();
        log_kpis(&v.kpis);
        log_trend(&v.trend);
        log_trend(&[]);
        log_summary(&v.summary_by_health);
    }
}
