//! Per-day health trend over the filtered daily table.

use serde::Serialize;
use std::collections::BTreeMap;

use crate::analysis::utility::{mean, sample_stddev};
use crate::dataset::DailyTable;

/// Mean and sample standard deviation of battery health for one day.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrendPoint {
    pub day: u32,
    pub mean_health: f64,
    /// Sample (n − 1) standard deviation; 0 when the day has one observation.
    pub std_dev_health: f64,
    pub observations: usize,
}

impl TrendPoint {
    /// Lower and upper edge of the ± one standard deviation band.
    pub fn band(&self) -> (f64, f64) {
        (
            self.mean_health - self.std_dev_health,
            self.mean_health + self.std_dev_health,
        )
    }
}

/// Groups observations by day and summarizes each group, ascending by day.
///
/// An empty table yields an empty series.
pub fn aggregate_trend(filtered: &DailyTable) -> Vec<TrendPoint> {
    let mut by_day: BTreeMap<u32, Vec<f64>> = BTreeMap::new();

    for obs in filtered {
        by_day.entry(obs.day).or_default().push(obs.battery_health);
    }

    let mut series = Vec::with_capacity(by_day.len());

    for (day, healths) in by_day {
        let Some(avg) = mean(&healths) else {
            continue;
        };

        series.push(TrendPoint {
            day,
            mean_health: avg,
            std_dev_health: sample_stddev(&healths, avg),
            observations: healths.len(),
        });
    }

    series
}
