//! Observation orchestration
//!
//! Fetches a bulletin through a [`ReportSource`], checks it is fresh and
//! runs split, decode and extract to produce an [`ObservationResult`]. Every
//! request yields an envelope; failures become `error` envelopes rather than
//! propagated errors, and batch requests never abort on one station.

use crate::Error;
use crate::app::models::{ObservationResult, SynopHour, WindUnit};
use crate::app::services::report_source::{self, ReportSource};
use crate::app::services::synop_decoder::{
    decode, extract, observation, parse_bulletin, split_lines,
};
use crate::config::Config;
use crate::constants::MAX_DAY_SKEW;
use chrono::{DateTime, Datelike, Utc};
use futures::future::join_all;
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Message of the envelope returned when section 1 is empty
pub const NO_SECTION_1_MESSAGE: &str = "no section 1 data";

/// Decode one station's observation out of a raw bulletin
///
/// Pure and synchronous: `now` anchors both the observation date and the
/// staleness check. The wind unit comes from the header `iw` indicator,
/// falling back to `default_wind_unit`.
pub fn evaluate(
    raw_text: &str,
    hour: SynopHour,
    station: u32,
    now: DateTime<Utc>,
    default_wind_unit: Option<WindUnit>,
) -> ObservationResult {
    let report = parse_bulletin(raw_text, hour, now);

    let Some(sections) = split_lines(&report.lines, station) else {
        debug!("Station {} absent from {} bulletin", station, hour);
        return ObservationResult::error(station, Error::station_not_found(station).to_string());
    };

    if sections.section1.trim().is_empty() {
        return ObservationResult::error(station, NO_SECTION_1_MESSAGE);
    }

    let groups = decode(&sections);
    let observed_at = extract::observation_time(&report.day, &report.hour, now);

    let skew = (observed_at.date_naive() - now.date_naive()).num_days().abs();
    if skew > MAX_DAY_SKEW {
        warn!(
            "Station {}: bulletin day {} is {} days from {}",
            station,
            report.day,
            skew,
            now.format("%Y-%m-%d")
        );
        return ObservationResult::error(
            station,
            format!(
                "date mismatch: bulletin day {} does not match current day {:02}",
                report.day,
                now.day()
            ),
        );
    }

    let wind_unit = report
        .wind_indicator
        .and_then(WindUnit::from_indicator)
        .or(default_wind_unit);
    if groups.wind_speed.is_some() && wind_unit.is_none() {
        debug!("Station {}: wind unit unknown, km/h left unavailable", station);
    }

    let observation = observation(&groups, observed_at, wind_unit);
    ObservationResult::success(station, observation, sections)
}

/// Entry point for single-station and batch observation requests
pub struct ObservationService {
    source: Arc<dyn ReportSource>,
    stations: Vec<u32>,
    default_wind_unit: Option<WindUnit>,
}

impl ObservationService {
    /// Create a service over `source` with the batch station list
    pub fn new(source: Arc<dyn ReportSource>, stations: Vec<u32>) -> Self {
        Self {
            source,
            stations,
            default_wind_unit: None,
        }
    }

    /// Build the configured source and station list
    pub fn from_config(config: &Config) -> crate::Result<Self> {
        let source = report_source::from_config(&config.retrieval)?;
        let mut service = Self::new(source, config.stations.clone());
        service.default_wind_unit = config.decoding.default_wind_unit;
        Ok(service)
    }

    /// Assume `unit` for bulletins without a usable `iw` indicator
    pub fn with_default_wind_unit(mut self, unit: WindUnit) -> Self {
        self.default_wind_unit = Some(unit);
        self
    }

    /// Stations covered by [`Self::get_all_stations`]
    pub fn stations(&self) -> &[u32] {
        &self.stations
    }

    /// Observation for one station at `hour`, checked against the current time
    pub async fn get_observation(&self, hour: SynopHour, station: u32) -> ObservationResult {
        self.get_observation_at(hour, station, Utc::now()).await
    }

    /// Observation for one station at `hour`, checked against `now`
    pub async fn get_observation_at(
        &self,
        hour: SynopHour,
        station: u32,
        now: DateTime<Utc>,
    ) -> ObservationResult {
        if !(10_000..=99_999).contains(&station) {
            return ObservationResult::error(
                station,
                Error::invalid_station(station.to_string()).to_string(),
            );
        }

        let raw_text = match self.source.fetch(hour, station).await {
            Ok(text) => text,
            Err(e) => {
                warn!("Station {}: retrieval failed: {}", station, e);
                return ObservationResult::error(station, e.to_string());
            }
        };

        let result = evaluate(&raw_text, hour, station, now, self.default_wind_unit);
        if result.is_success() {
            info!("Station {}: observation decoded for {} UTC", station, hour);
        } else {
            info!("Station {}: {}", station, result.message);
        }
        result
    }

    /// One envelope per configured station
    pub async fn get_all_stations(&self, hour: SynopHour) -> BTreeMap<u32, ObservationResult> {
        self.get_stations_at(hour, &self.stations, Utc::now()).await
    }

    /// One envelope per station in `stations`, checked against `now`
    pub async fn get_stations_at(
        &self,
        hour: SynopHour,
        stations: &[u32],
        now: DateTime<Utc>,
    ) -> BTreeMap<u32, ObservationResult> {
        let requests = stations.iter().map(|&station| async move {
            let result = self.get_observation_at(hour, station, now).await;
            (station, result)
        });

        let results: BTreeMap<u32, ObservationResult> =
            join_all(requests).await.into_iter().collect();

        let succeeded = results.values().filter(|r| r.is_success()).count();
        info!(
            "Batch {} UTC: {}/{} stations decoded",
            hour,
            succeeded,
            results.len()
        );
        results
    }
}
