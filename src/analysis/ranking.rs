use crate::dataset::SummaryTable;

/// The summary table ascending by battery health, raw records included.
/// Ties keep table order.
pub fn sorted_summary_table(summary: &SummaryTable) -> SummaryTable {
    summary.sorted_by(|a, b| a.battery_health.total_cmp(&b.battery_health))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::{Table, VehicleSummaryRecord};

    fn summary() -> SummaryTable {
        Table::from_rows(vec![
            VehicleSummaryRecord::new(90.0, "Healthy").with_vehicle_id("a"),
            VehicleSummaryRecord::new(60.0, "Critical").with_vehicle_id("b"),
            VehicleSummaryRecord::new(75.0, "Moderate").with_vehicle_id("c"),
            VehicleSummaryRecord::new(60.0, "Critical").with_vehicle_id("d"),
        ])
    }

    #[test]
    fn test_sorted_summary_ascending_and_stable() {
        let sorted = sorted_summary_table(&summary());
        let ids: Vec<_> = sorted
            .iter()
            .map(|r| r.vehicle_id.as_deref().unwrap_or_default())
            .collect();

        assert_eq!(ids, vec!["b", "d", "c", "a"]);
    }

    #[test]
    fn test_sorted_summary_table_moves_raw_records() {
        let sorted = sorted_summary_table(&summary());
        assert_eq!(&sorted.records()[0][0], "b");
        assert_eq!(&sorted.records()[3][0], "a");
    }
}
