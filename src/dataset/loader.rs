//! CSV loading for the summary and daily tables.

use csv::ReaderBuilder;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::{debug, info};

use crate::dataset::table::Table;
use crate::dataset::types::{DailyObservation, TableRow, VehicleSummaryRecord};
use crate::dataset::{DailyTable, SummaryTable};
use crate::error::DataLoadError;

/// Reads a table from any CSV source.
///
/// The header must contain every column in `T::REQUIRED_COLUMNS`; extra
/// columns are kept in the raw records and ignored by the typed rows.
///
/// # Errors
///
/// Returns [`DataLoadError`] if the source is not valid CSV, a required column
/// is missing, a row fails to parse, or a row carries a non-finite health value.
pub fn read_table<T, R>(source_name: &str, reader: R) -> Result<Table<T>, DataLoadError>
where
    T: TableRow,
    R: Read,
{
    let mut rdr = ReaderBuilder::new().has_headers(true).from_reader(reader);

    let headers = rdr
        .headers()
        .map_err(|error| DataLoadError::Csv {
            source_name: source_name.to_string(),
            error,
        })?
        .clone();

    for &column in T::REQUIRED_COLUMNS {
        if !headers.iter().any(|h| h == column) {
            return Err(DataLoadError::MissingColumn {
                source_name: source_name.to_string(),
                column,
            });
        }
    }

    let mut records = Vec::new();
    let mut rows = Vec::new();

    for result in rdr.records() {
        let record = result.map_err(|error| DataLoadError::Csv {
            source_name: source_name.to_string(),
            error,
        })?;

        let line = record.position().map_or(0, |p| p.line());
        let row: T = record
            .deserialize(Some(&headers))
            .map_err(|error| DataLoadError::InvalidRow {
                source_name: source_name.to_string(),
                line,
                error,
            })?;

        if let Some(message) = row.invalid_reason() {
            return Err(DataLoadError::InvalidValue {
                source_name: source_name.to_string(),
                line,
                message,
            });
        }

        records.push(record);
        rows.push(row);
    }

    debug!(source = source_name, rows = rows.len(), "Table read");
    Ok(Table::from_parts(headers, records, rows))
}

/// Opens and reads a table from a CSV file on disk.
#[tracing::instrument(skip_all, fields(path = %path.display()))]
pub fn load_table<T: TableRow>(path: &Path) -> Result<Table<T>, DataLoadError> {
    let source_name = path.display().to_string();
    let file = File::open(path).map_err(|error| DataLoadError::Io {
        source_name: source_name.clone(),
        error,
    })?;

    read_table(&source_name, file)
}

/// Loads the summary and daily tables. Either failure aborts the whole load.
pub fn load(summary_path: &Path, daily_path: &Path) -> Result<(SummaryTable, DailyTable), DataLoadError> {
    let summary = load_table::<VehicleSummaryRecord>(summary_path)?;
    let daily = load_table::<DailyObservation>(daily_path)?;

    info!(
        summary_rows = summary.len(),
        daily_rows = daily.len(),
        "Fleet datasets loaded"
    );

    Ok((summary, daily))
}

/// Same as [`load`], for in-memory sources.
pub fn load_from_readers<S: Read, D: Read>(
    summary: S,
    daily: D,
) -> Result<(SummaryTable, DailyTable), DataLoadError> {
    let summary = read_table::<VehicleSummaryRecord, _>("summary", summary)?;
    let daily = read_table::<DailyObservation, _>("daily", daily)?;
    Ok((summary, daily))
}
