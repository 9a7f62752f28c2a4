use ev_fleet_health::FleetSession;
use ev_fleet_health::analysis::Selection;
use ev_fleet_health::dataset::{export_to_string, load_from_readers};
use std::path::PathBuf;

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

fn session() -> FleetSession {
    FleetSession::load(
        &fixture("fleet_summary.csv"),
        &fixture("fleet_daily_data.csv"),
    )
    .expect("Failed to load fixtures")
}

#[test]
fn test_full_pipeline() {
    let mut session = session();

    assert_eq!(session.summary().len(), 5);
    assert_eq!(session.daily().len(), 20);
    assert!(session.check_integrity().is_empty());

    let kpis = session.kpis();
    assert!((kpis.avg_health.unwrap() - 78.78).abs() < 1e-9);
    assert_eq!(kpis.healthy_count, 2);
    assert_eq!(kpis.critical_count, 2);

    session.set_selection(Selection::new(["Hot"], ["Fast"]));
    let view = session.view();

    assert_eq!(view.filtered_rows, 8);
    let days: Vec<u32> = view.trend.iter().map(|p| p.day).collect();
    assert_eq!(days, vec![1, 2, 3, 4]);
    assert_eq!(view.trend[0].mean_health, 100.0);
    assert_eq!(view.trend[0].std_dev_health, 0.0);
    assert_eq!(view.trend[3].mean_health, 94.75);
    assert!((view.trend[1].std_dev_health - 0.5 / 2f64.sqrt()).abs() < 1e-12);
    assert_eq!(view.trend[1].observations, 2);
}

#[test]
fn test_default_selection_covers_every_row() {
    let session = session();

    assert_eq!(session.climate_options(), vec!["Temperate", "Hot", "Cold"]);
    assert_eq!(session.charging_options(), vec!["Slow", "Fast"]);
    assert_eq!(session.filtered().rows(), session.daily().rows());
    assert!(session.trend().iter().all(|p| p.observations == 5));
}

#[test]
fn test_disjoint_selection_is_empty_not_an_error() {
    let mut session = session();
    session.set_selection(Selection::new(["Temperate"], ["Fast"]));

    let view = session.view();
    assert_eq!(view.filtered_rows, 0);
    assert!(view.trend.is_empty());
    assert_eq!(view.kpis.vehicle_count, 5);
}

#[test]
fn test_exports_round_trip_verbatim() {
    let session = session();
    let summary_text = std::fs::read_to_string(fixture("fleet_summary.csv")).unwrap();
    let daily_text = std::fs::read_to_string(fixture("fleet_daily_data.csv")).unwrap();

    assert_eq!(export_to_string(session.summary()).unwrap(), summary_text);
    assert_eq!(export_to_string(session.daily()).unwrap(), daily_text);

    let (summary, daily) =
        load_from_readers(summary_text.as_bytes(), daily_text.as_bytes()).unwrap();
    assert_eq!(summary.rows(), session.summary().rows());
    assert_eq!(daily.rows(), session.daily().rows());
}

#[test]
fn test_missing_file_fails_session_start() {
    let result = FleetSession::load(&fixture("does_not_exist.csv"), &fixture("fleet_daily_data.csv"));
    assert!(result.is_err());
}
