use csv::StringRecord;
use serde::Serialize;
use std::cmp::Ordering;

use crate::dataset::types::TableRow;

/// A loaded table: the original header, the original raw records, and the
/// typed rows parsed from them, kept in lock-step.
///
/// The raw side is what gets exported, so columns the pipeline never reads
/// survive a round trip untouched.
#[derive(Debug, Clone)]
pub struct Table<T> {
    headers: StringRecord,
    records: Vec<StringRecord>,
    rows: Vec<T>,
}

impl<T> Table<T> {
    pub(crate) fn from_parts(headers: StringRecord, records: Vec<StringRecord>, rows: Vec<T>) -> Self {
        debug_assert_eq!(records.len(), rows.len());
        Self {
            headers,
            records,
            rows,
        }
    }

    pub fn headers(&self) -> &StringRecord {
        &self.headers
    }

    pub fn records(&self) -> &[StringRecord] {
        &self.records
    }

    pub fn rows(&self) -> &[T] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.rows.iter()
    }

    /// Rows and their raw records, in table order.
    pub fn entries(&self) -> impl Iterator<Item = (&T, &StringRecord)> {
        self.rows.iter().zip(self.records.iter())
    }

    /// New table holding the rows accepted by `keep`, same header, same order.
    pub fn select<F>(&self, mut keep: F) -> Self
    where
        T: Clone,
        F: FnMut(&T) -> bool,
    {
        let mut records = Vec::new();
        let mut rows = Vec::new();

        for (row, record) in self.entries() {
            if keep(row) {
                records.push(record.clone());
                rows.push(row.clone());
            }
        }

        Self::from_parts(self.headers.clone(), records, rows)
    }

    /// New table stably sorted by `compare`.
    pub fn sorted_by<F>(&self, mut compare: F) -> Self
    where
        T: Clone,
        F: FnMut(&T, &T) -> Ordering,
    {
        let mut order: Vec<usize> = (0..self.rows.len()).collect();
        order.sort_by(|&a, &b| compare(&self.rows[a], &self.rows[b]));

        let records = order.iter().map(|&i| self.records[i].clone()).collect();
        let rows = order.iter().map(|&i| self.rows[i].clone()).collect();

        Self::from_parts(self.headers.clone(), records, rows)
    }
}

/// Column names plus the raw text of every row, ready for a tabular display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableView {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl TableView {
    /// Index of `column` in the header, if present.
    pub fn column_index(&self, column: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == column)
    }
}

impl<T> From<&Table<T>> for TableView {
    fn from(table: &Table<T>) -> Self {
        let to_strings =
            |record: &StringRecord| -> Vec<String> { record.iter().map(str::to_string).collect() };
        Self {
            columns: to_strings(table.headers()),
            rows: table.records().iter().map(to_strings).collect(),
        }
    }
}

impl<T: TableRow> Table<T> {
    /// Builds a table from typed rows, using the row type's canonical columns.
    pub fn from_rows(rows: Vec<T>) -> Self {
        let headers = StringRecord::from(T::COLUMNS.to_vec());
        let records = rows.iter().map(TableRow::to_record).collect();
        Self::from_parts(headers, records, rows)
    }
}

impl<'a, T> IntoIterator for &'a Table<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}
