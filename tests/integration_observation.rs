//! Integration tests for retrieval, decoding and archiving
//!
//! These tests drive the public API end to end: bulletins are written to a
//! temporary observations directory, fetched through the directory source,
//! decoded by the observation service and stored in the JSON archive.

use chrono::{NaiveDate, TimeZone, Utc};
use synop_processor::app::services::observation_archive::{ObservationArchive, UpsertOutcome};
use synop_processor::app::services::report_source::{DirectorySource, ReportSource};
use synop_processor::{Config, ObservationService, Status, SynopHour, WindUnit};
use std::sync::Arc;
use tempfile::TempDir;

/// Main-hour bulletin carrying three stations, one of them wrapped over two lines
const BULLETIN_00: &str = "AAXX 15004
78350 32970 70503 10268 20221 39992 40085 58012 70250 8453/
      333 10312 20215 70000=
78351 NIL=
78355 46912 70802 10251 20198 39850 40050 60002 70300 86500
      333 10280 20190 70012=
NNNN
";

/// Intermediate-hour bulletin without a header
const BULLETIN_03: &str = "78350 11570 81005 10240 20222 40102=\n";

fn write_reports(dir: &TempDir) {
    for station in ["350", "351", "355"] {
        std::fs::write(dir.path().join(format!("SM{}.00", station)), BULLETIN_00).unwrap();
    }
    std::fs::write(dir.path().join("SI350.03"), BULLETIN_03).unwrap();
}

fn approx(actual: Option<f64>, expected: f64) {
    let actual = actual.expect("value should be present");
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {}, got {}",
        expected,
        actual
    );
}

#[tokio::test]
async fn test_directory_source_feeds_batch_decode() {
    let obs_dir = TempDir::new().unwrap();
    write_reports(&obs_dir);

    let source: Arc<dyn ReportSource> = Arc::new(DirectorySource::new(obs_dir.path()));
    let service = ObservationService::new(source, vec![78350, 78351, 78352, 78355]);
    let now = Utc.with_ymd_and_hms(2024, 5, 15, 6, 30, 0).unwrap();

    let results = service
        .get_stations_at(SynopHour::H00, service.stations(), now)
        .await;
    assert_eq!(results.len(), 4);

    let wrapped = &results[&78350];
    assert_eq!(wrapped.status, Status::Success);
    let obs = wrapped.observation.as_ref().unwrap();
    approx(obs.temperature, 26.8);
    approx(obs.dew_point, 22.1);
    approx(obs.station_pressure, 999.2);
    approx(obs.sea_level_pressure, 1008.5);
    approx(obs.max_temperature, 31.2);
    approx(obs.precipitation_24h, 0.0);
    assert_eq!(obs.wind_speed_unit, Some(WindUnit::Knots));
    assert_eq!(obs.sky_condition.as_deref(), Some("Partly cloudy"));
    assert_eq!(
        wrapped.sections.as_ref().unwrap().section3.as_deref(),
        Some("333 10312 20215 70000")
    );

    let nil = &results[&78351];
    assert_eq!(nil.status, Status::Success);
    assert_eq!(nil.observation.as_ref().unwrap().temperature, None);

    let missing = &results[&78352];
    assert_eq!(missing.status, Status::Error);
    assert!(missing.observation.is_none());

    let obs = results[&78355].observation.as_ref().unwrap();
    approx(obs.temperature, 25.1);
    approx(obs.precipitation_3h, 0.0);
    assert_eq!(obs.sky_condition.as_deref(), Some("Cloudy"));
}

#[tokio::test]
async fn test_headerless_intermediate_bulletin_uses_default_wind_unit() {
    let obs_dir = TempDir::new().unwrap();
    write_reports(&obs_dir);

    let config = Config::default()
        .with_stations(vec![78350])
        .with_directory(obs_dir.path());
    let service = ObservationService::from_config(&config)
        .unwrap()
        .with_default_wind_unit(WindUnit::MetresPerSecond);
    let now = Utc.with_ymd_and_hms(2024, 5, 15, 4, 0, 0).unwrap();

    let result = service.get_observation_at(SynopHour::H03, 78350, now).await;
    assert!(result.is_success(), "{}", result.message);

    let obs = result.observation.unwrap();
    assert_eq!(obs.time, "03:00");
    assert_eq!(obs.date, "15/05/2024");
    approx(obs.wind_speed, 5.0);
    approx(obs.wind_speed_kmh, 18.0);
    approx(obs.temperature, 24.0);
}

#[tokio::test]
async fn test_stale_bulletin_is_not_archived() {
    let obs_dir = TempDir::new().unwrap();
    let archive_dir = TempDir::new().unwrap();
    write_reports(&obs_dir);

    let source: Arc<dyn ReportSource> = Arc::new(DirectorySource::new(obs_dir.path()));
    let service = ObservationService::new(source, vec![78355]);
    let archive = ObservationArchive::new(archive_dir.path());
    let now = Utc.with_ymd_and_hms(2024, 5, 18, 0, 0, 0).unwrap();

    let result = service.get_observation_at(SynopHour::H00, 78355, now).await;
    assert_eq!(result.status, Status::Error);
    assert!(result.message.starts_with("date mismatch"));
    assert!(archive.upsert(&result, SynopHour::H00).await.is_err());
}

#[tokio::test]
async fn test_decoded_observation_round_trips_through_archive() {
    let obs_dir = TempDir::new().unwrap();
    let archive_dir = TempDir::new().unwrap();
    write_reports(&obs_dir);

    let source: Arc<dyn ReportSource> = Arc::new(DirectorySource::new(obs_dir.path()));
    let service = ObservationService::new(source, vec![78355]);
    let archive = ObservationArchive::new(archive_dir.path());
    let now = Utc.with_ymd_and_hms(2024, 5, 15, 6, 30, 0).unwrap();

    let result = service.get_observation_at(SynopHour::H00, 78355, now).await;
    assert_eq!(
        archive.upsert(&result, SynopHour::H00).await.unwrap(),
        UpsertOutcome::Created
    );

    let date = NaiveDate::from_ymd_opt(2024, 5, 15).unwrap();
    let stored = archive.load(78355, date, SynopHour::H00).await.unwrap();
    assert_eq!(stored, Some(result));
    assert!(
        archive_dir
            .path()
            .join("78355")
            .join("2024-05-15_00.json")
            .is_file()
    );
}
