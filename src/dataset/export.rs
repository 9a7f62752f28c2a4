//! Verbatim CSV export of loaded tables.

use anyhow::Result;
use csv::WriterBuilder;
use std::fs::File;
use std::io::Write;
use std::path::Path;
use tracing::info;

use crate::dataset::table::Table;

/// Default download name for the daily table.
pub const DAILY_EXPORT_NAME: &str = "fleet_daily_data.csv";

/// Default download name for the summary table.
pub const SUMMARY_EXPORT_NAME: &str = "fleet_summary.csv";

/// Writes the table's original header and raw records, unmodified, as CSV.
pub fn export_table<T, W: Write>(table: &Table<T>, writer: W) -> Result<()> {
    let mut writer = WriterBuilder::new().has_headers(false).from_writer(writer);

    writer.write_record(table.headers())?;
    for record in table.records() {
        writer.write_record(record)?;
    }
    writer.flush()?;

    Ok(())
}

/// Creates `path` for writing, making any missing parent directories first.
pub fn create_output_file(path: &Path) -> Result<File> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    Ok(File::create(path)?)
}

/// Writes the table to `path`, replacing any existing file.
#[tracing::instrument(skip_all, fields(path = %path.display(), rows = table.len()))]
pub fn export_table_to_path<T>(table: &Table<T>, path: &Path) -> Result<()> {
    let file = create_output_file(path)?;
    export_table(table, file)?;

    info!("Table exported");
    Ok(())
}

/// The table as CSV text, ready to hand to a download.
pub fn export_to_string<T>(table: &Table<T>) -> Result<String> {
    let mut buf = Vec::new();
    export_table(table, &mut buf)?;
    Ok(String::from_utf8(buf)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::loader::read_table;
    use crate::dataset::types::{DailyObservation, VehicleSummaryRecord};

    #[test]
    fn test_export_is_verbatim() {
        let csv = "vehicle_id,battery_health,health_status,notes\n\
                   EV_001,90.50,🟢 Healthy,\"fast, frequent\"\n\
                   EV_002,64.2,🔴 Critical,\n";
        let table = read_table::<VehicleSummaryRecord, _>("summary", csv.as_bytes()).unwrap();

        let out = export_to_string(&table).unwrap();
        assert_eq!(out, csv);
    }

    #[test]
    fn test_export_empty_table_keeps_header() {
        let csv = "day,battery_health,climate,charging\n";
        let table = read_table::<DailyObservation, _>("daily", csv.as_bytes()).unwrap();

        assert_eq!(export_to_string(&table).unwrap(), csv);
    }

    #[test]
    fn test_export_to_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out").join(DAILY_EXPORT_NAME);
        let table = crate::dataset::Table::from_rows(vec![DailyObservation::new(1, 99.5, "Hot", "Fast")]);

        export_table_to_path(&table, &path).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content, "vehicle_id,day,battery_health,climate,charging\n,1,99.5,Hot,Fast\n");
    }
}
