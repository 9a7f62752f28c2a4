//! Per-operator dashboard session.
//!
//! A [`FleetSession`] owns its copy of both tables and its own selection.
//! Sessions share nothing, and every derived value is recomputed from the
//! immutable tables on request.

use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::io::Write;
use std::path::Path;
use tracing::{debug, info};

use crate::analysis::{
    FleetKpis, IntegrityIssue, Selection, TrendPoint, aggregate_trend, apply, check_integrity,
    compute_kpis, distinct_charging, distinct_climates, sorted_summary_table,
};
use crate::dataset::{
    DailyTable, SummaryTable, TableView, export_table, export_table_to_path, load,
};
use crate::error::DataLoadError;

/// Everything the presenter needs for one render of the dashboard.
#[derive(Debug, Clone, Serialize)]
pub struct DashboardView {
    pub generated_at: DateTime<Utc>,
    pub selection: Selection,
    pub kpis: FleetKpis,
    pub filtered_rows: usize,
    pub trend: Vec<TrendPoint>,
    /// Every summary column, rows ascending by battery health, text as loaded.
    pub summary_by_health: TableView,
}

pub struct FleetSession {
    summary: SummaryTable,
    daily: DailyTable,
    selection: Selection,
}

impl FleetSession {
    /// Starts a session over already-loaded tables, selecting every climate
    /// and charging type present.
    pub fn new(summary: SummaryTable, daily: DailyTable) -> Self {
        let selection = Selection::all(&daily);
        Self {
            summary,
            daily,
            selection,
        }
    }

    /// Loads both tables from disk and starts a session over them.
    pub fn load(summary_path: &Path, daily_path: &Path) -> Result<Self, DataLoadError> {
        let (summary, daily) = load(summary_path, daily_path)?;
        Ok(Self::new(summary, daily))
    }

    pub fn summary(&self) -> &SummaryTable {
        &self.summary
    }

    pub fn daily(&self) -> &DailyTable {
        &self.daily
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn set_selection(&mut self, selection: Selection) {
        debug!(
            climates = ?selection.climates,
            charging = ?selection.charging,
            "Selection changed"
        );
        self.selection = selection;
    }

    pub fn climate_options(&self) -> Vec<String> {
        distinct_climates(&self.daily)
    }

    pub fn charging_options(&self) -> Vec<String> {
        distinct_charging(&self.daily)
    }

    pub fn filtered(&self) -> DailyTable {
        apply(&self.daily, &self.selection)
    }

    pub fn kpis(&self) -> FleetKpis {
        compute_kpis(&self.summary)
    }

    pub fn trend(&self) -> Vec<TrendPoint> {
        aggregate_trend(&self.filtered())
    }

    /// Summary table with every original column, ascending by battery health.
    pub fn sorted_summary(&self) -> SummaryTable {
        sorted_summary_table(&self.summary)
    }

    pub fn check_integrity(&self) -> Vec<IntegrityIssue> {
        check_integrity(&self.summary, &self.daily)
    }

    /// Recomputes the full view for the current selection.
    pub fn view(&self) -> DashboardView {
        let filtered = self.filtered();
        let trend = aggregate_trend(&filtered);
        let kpis = self.kpis();

        info!(
            filtered_rows = filtered.len(),
            trend_days = trend.len(),
            avg_health = %kpis.avg_health_label(),
            "Dashboard view computed"
        );

        DashboardView {
            generated_at: Utc::now(),
            selection: self.selection.clone(),
            kpis,
            filtered_rows: filtered.len(),
            trend,
            summary_by_health: TableView::from(&self.sorted_summary()),
        }
    }

    /// Writes the unfiltered daily table verbatim.
    pub fn export_daily<W: Write>(&self, writer: W) -> Result<()> {
        export_table(&self.daily, writer)
    }

    /// Writes the summary table verbatim.
    pub fn export_summary<W: Write>(&self, writer: W) -> Result<()> {
        export_table(&self.summary, writer)
    }

    pub fn export_daily_to_path(&self, path: &Path) -> Result<()> {
        export_table_to_path(&self.daily, path)
    }

    pub fn export_summary_to_path(&self, path: &Path) -> Result<()> {
        export_table_to_path(&self.summary, path)
    }
}
