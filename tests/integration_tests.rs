use air_exposure::dashboard::{DashboardConfig, FetchOptions, PythonRunner, fast_dashboard};
use air_exposure::exposure::{ExposureRecord, TrendDirection, calculate_exposure_summary};
use air_exposure::fetch::BasicClient;
use air_exposure::outcome::{FallbackReason, Outcome};
use air_exposure::output::{SummaryRow, append_summary};
use air_exposure::parser::{Cell, ColumnType, CsvSchema, load_records, load_rows, parse_rows};
use air_exposure::profile::{
    Frequency, JsonFileStore, LocationCoordinates, NewRoute, ProfileSession, TransportMode,
};
use air_exposure::routes::{optimize_routes, sample_base_routes};
use std::time::Duration;

const FIXTURE: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/daily_exposure.csv");

#[tokio::test]
async fn test_full_summary_pipeline() {
    let client = BasicClient::new();
    let outcome = load_records::<_, ExposureRecord>(&client, FIXTURE).await;
    let records = match outcome {
        Outcome::Ok(records) => records,
        other => panic!("expected records, got {other:?}"),
    };
    assert_eq!(records.len(), 6);

    let summary = calculate_exposure_summary(&records).expect("non-empty records");
    assert_eq!(summary.daily_average, 45.0);
    assert_eq!(summary.weekly_trend, "100.0%");
    assert_eq!(summary.weekly_trend_direction, TrendDirection::Up);
    assert_eq!(summary.highest_value, 70.0);
    assert_eq!(summary.highest_location, "Kalanki");
    assert_eq!(summary.exposure_above_who, "180%");
    assert_eq!(summary.current_aqi, 147);

    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("summaries.csv");
    append_summary(&out, &SummaryRow::new(FIXTURE, records.len(), &summary)).unwrap();
    let written = std::fs::read_to_string(&out).unwrap();
    assert_eq!(written.lines().count(), 2);
    assert!(written.contains("Kalanki"));
}

#[tokio::test]
async fn test_missing_source_is_an_error() {
    let client = BasicClient::new();
    let outcome =
        load_records::<_, ExposureRecord>(&client, "tests/fixtures/does_not_exist.csv").await;
    assert!(outcome.is_error());
}

#[test]
fn test_fixture_rows_infer_types() {
    let text = std::fs::read_to_string(FIXTURE).unwrap();
    let rows = parse_rows(&text, &CsvSchema::infer()).unwrap();
    assert_eq!(rows.len(), 6);
    assert_eq!(rows[0].get("pm25"), Some(&Cell::Number(20.0)));
    assert_eq!(
        rows[2].get("aqiCategory").and_then(Cell::as_str),
        Some("Unhealthy for Sensitive Groups")
    );
}

#[tokio::test]
async fn test_fixture_loads_as_typed_rows() {
    let schema = CsvSchema::infer()
        .column("date", ColumnType::Date)
        .column("pm25", ColumnType::Number)
        .column("aqiCategory", ColumnType::Text);
    let rows = match load_rows(&BasicClient::new(), FIXTURE, &schema).await {
        Outcome::Ok(rows) => rows,
        other => panic!("expected rows, got {other:?}"),
    };
    assert_eq!(rows.len(), 6);
    assert_eq!(rows[5].get("pm25"), Some(&Cell::Number(70.0)));
    assert!(matches!(rows[0].get("date"), Some(Cell::Date(_))));

    let missing = load_rows(&BasicClient::new(), "tests/fixtures/nope.csv", &schema).await;
    assert!(missing.is_error());
}

#[test]
fn test_route_pipeline_ranks_by_reduction() {
    let optimized = optimize_routes(&sample_base_routes());
    assert_eq!(optimized.len(), 3);
    for route in &optimized {
        let reductions: Vec<u8> = route
            .alternatives
            .iter()
            .map(|a| a.reduction_percent)
            .collect();
        assert_eq!(reductions, vec![50, 35, 25]);
    }
}

#[test]
fn test_profile_persists_across_sessions() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("profile.json");

    let mut session = ProfileSession::open(JsonFileStore::new(&path));
    assert_eq!(session.fallback_reason(), Some(&FallbackReason::Missing));
    let id = session
        .add_route(NewRoute {
            name: "Office".into(),
            start: LocationCoordinates::new("Thamel", 27.7172, 85.3082),
            end: LocationCoordinates::new("Kalanki", 27.6939, 85.2809),
            via: Vec::new(),
            frequency: Frequency::Weekdays,
            departure_time: Some("08:30".into()),
            return_time: None,
            transport_mode: TransportMode::Cycling,
        })
        .unwrap()
        .id
        .clone();

    let reopened = ProfileSession::open(JsonFileStore::new(&path));
    assert!(reopened.fallback_reason().is_none());
    assert_eq!(reopened.profile().routes.len(), 1);
    assert_eq!(reopened.profile().routes[0].id, id);

    let visits = reopened.most_visited_locations();
    assert_eq!(visits[0].location, "Thamel");
    assert_eq!(visits[0].frequency, 12);
}

#[tokio::test]
async fn test_dashboard_without_scripts_serves_mock() {
    let dir = tempfile::tempdir().unwrap();
    let config = DashboardConfig::new(dir.path());
    let runner = PythonRunner::new(dir.path(), Duration::from_secs(1));

    let outcome = fast_dashboard(&config, &runner, FetchOptions::default()).await;
    assert_eq!(
        outcome.fallback_reason(),
        Some(&FallbackReason::ScriptMissing)
    );
    assert_eq!(outcome.data().unwrap().data.current_aqi.aqi, 156.0);
}
