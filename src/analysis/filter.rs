//! Climate / charging-type filtering of the daily table.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashSet};

use crate::dataset::{DailyObservation, DailyTable};

/// The operator's current choice of climate zones and charging types.
///
/// An empty set selects nothing in that dimension; it does not mean "all".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    pub climates: BTreeSet<String>,
    pub charging: BTreeSet<String>,
}

impl Selection {
    pub fn new<C, G>(climates: C, charging: G) -> Self
    where
        C: IntoIterator,
        C::Item: Into<String>,
        G: IntoIterator,
        G::Item: Into<String>,
    {
        Self {
            climates: climates.into_iter().map(Into::into).collect(),
            charging: charging.into_iter().map(Into::into).collect(),
        }
    }

    /// Every climate and charging type observed in `daily`.
    pub fn all(daily: &DailyTable) -> Self {
        Self::new(distinct_climates(daily), distinct_charging(daily))
    }

    pub fn none() -> Self {
        Self::default()
    }

    pub fn matches(&self, obs: &DailyObservation) -> bool {
        self.climates.contains(&obs.climate) && self.charging.contains(&obs.charging)
    }
}

/// Distinct climate labels in order of first appearance.
pub fn distinct_climates(daily: &DailyTable) -> Vec<String> {
    distinct(daily.iter().map(|o| o.climate.as_str()))
}

/// Distinct charging-type labels in order of first appearance.
pub fn distinct_charging(daily: &DailyTable) -> Vec<String> {
    distinct(daily.iter().map(|o| o.charging.as_str()))
}

fn distinct<'a>(labels: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut seen = HashSet::new();
    labels
        .filter(|label| seen.insert(*label))
        .map(str::to_string)
        .collect()
}

/// Keeps rows whose climate is in `climates` AND whose charging type is in
/// `charging_types`. Order is preserved; labels absent from the data match nothing.
pub fn filter(
    daily: &DailyTable,
    climates: &BTreeSet<String>,
    charging_types: &BTreeSet<String>,
) -> DailyTable {
    daily.select(|obs| climates.contains(&obs.climate) && charging_types.contains(&obs.charging))
}

/// Keeps the rows [`Selection::matches`] accepts; same result as [`filter`].
pub fn apply(daily: &DailyTable, selection: &Selection) -> DailyTable {
    daily.select(|obs| selection.matches(obs))
}
