//! Data models for SYNOP processing
//!
//! This module contains the core data structures flowing through the decoder:
//! the raw bulletin, one station's report sections, and the decoded
//! observation wrapped in its status envelope.

use crate::constants::{
    INTERMEDIATE_FILE_PREFIX, KNOTS_TO_KMH, MAIN_FILE_PREFIX, MPS_TO_KMH,
};
use crate::{Error, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// =============================================================================
// Synoptic Hour
// =============================================================================

/// Observation hour of a SYNOP bulletin
///
/// Only the eight synoptic hours are published. Main hours (00, 06, 12, 18)
/// and intermediate hours (03, 09, 15, 21) live in differently named files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum SynopHour {
    #[serde(rename = "00")]
    H00,
    #[serde(rename = "03")]
    H03,
    #[serde(rename = "06")]
    H06,
    #[serde(rename = "09")]
    H09,
    #[serde(rename = "12")]
    H12,
    #[serde(rename = "15")]
    H15,
    #[serde(rename = "18")]
    H18,
    #[serde(rename = "21")]
    H21,
}

impl SynopHour {
    /// All synoptic hours in chronological order
    pub const ALL: [SynopHour; 8] = [
        SynopHour::H00,
        SynopHour::H03,
        SynopHour::H06,
        SynopHour::H09,
        SynopHour::H12,
        SynopHour::H15,
        SynopHour::H18,
        SynopHour::H21,
    ];

    /// Two-digit hour code
    pub fn as_str(&self) -> &'static str {
        match self {
            SynopHour::H00 => "00",
            SynopHour::H03 => "03",
            SynopHour::H06 => "06",
            SynopHour::H09 => "09",
            SynopHour::H12 => "12",
            SynopHour::H15 => "15",
            SynopHour::H18 => "18",
            SynopHour::H21 => "21",
        }
    }

    /// Hour of day, UTC
    pub fn hour(&self) -> u32 {
        match self {
            SynopHour::H00 => 0,
            SynopHour::H03 => 3,
            SynopHour::H06 => 6,
            SynopHour::H09 => 9,
            SynopHour::H12 => 12,
            SynopHour::H15 => 15,
            SynopHour::H18 => 18,
            SynopHour::H21 => 21,
        }
    }

    /// Whether this is a main synoptic hour
    pub fn is_main(&self) -> bool {
        self.hour() % 6 == 0
    }

    /// Name of the report file published for a station at this hour
    ///
    /// The suffix is the station number without its two-digit region
    /// (`78355` at 00 UTC is `SM355.00`).
    pub fn report_file_name(&self, station: u32) -> String {
        let prefix = if self.is_main() {
            MAIN_FILE_PREFIX
        } else {
            INTERMEDIATE_FILE_PREFIX
        };
        let number = station.to_string();
        let suffix = number.get(2..).unwrap_or_default();
        format!("{}{}.{}", prefix, suffix, self.as_str())
    }
}

impl FromStr for SynopHour {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        SynopHour::ALL
            .into_iter()
            .find(|hour| hour.as_str() == s.trim())
            .ok_or_else(|| Error::invalid_hour(s))
    }
}

impl fmt::Display for SynopHour {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// Wind Speed Unit
// =============================================================================

/// Unit of the `ff` wind speed, selected by the header indicator `iw`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WindUnit {
    #[serde(rename = "mps")]
    MetresPerSecond,
    #[serde(rename = "knots")]
    Knots,
}

impl WindUnit {
    /// Decode the `iw` indicator (0/1 metres per second, 3/4 knots)
    pub fn from_indicator(indicator: char) -> Option<Self> {
        match indicator {
            '0' | '1' => Some(WindUnit::MetresPerSecond),
            '3' | '4' => Some(WindUnit::Knots),
            _ => None,
        }
    }

    /// Convert a speed in this unit to kilometres per hour
    pub fn to_kmh(&self, speed: f64) -> f64 {
        match self {
            WindUnit::MetresPerSecond => speed * MPS_TO_KMH,
            WindUnit::Knots => speed * KNOTS_TO_KMH,
        }
    }

    /// Short label for display
    pub fn label(&self) -> &'static str {
        match self {
            WindUnit::MetresPerSecond => "m/s",
            WindUnit::Knots => "kt",
        }
    }
}

impl FromStr for WindUnit {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "mps" | "m/s" | "ms" => Ok(WindUnit::MetresPerSecond),
            "knots" | "kt" | "kn" => Ok(WindUnit::Knots),
            other => Err(Error::configuration(format!(
                "Unknown wind unit '{}': expected 'mps' or 'knots'",
                other
            ))),
        }
    }
}

// =============================================================================
// Bulletin and Station Sections
// =============================================================================

/// One synoptic hour's bulletin, normalised into lines
///
/// Day and hour come from the `AAXX YYGGi` header. When the header is
/// malformed they default to the current UTC day and the requested hour.
#[derive(Debug, Clone, PartialEq)]
pub struct RawReport {
    /// Day of month as written in the header (may be non-numeric garbage)
    pub day: String,

    /// Hour code as written in the header
    pub hour: String,

    /// Wind speed indicator `iw`, when present
    pub wind_indicator: Option<char>,

    /// Whether the `AAXX` header was recognised
    pub header_found: bool,

    /// Non-empty trimmed lines, with `NNNN` end markers removed
    pub lines: Vec<String>,
}

/// A single station's report, split at the `333` marker
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StationSections {
    /// Section 1, starting with the `IIiii` station identifier
    pub section1: String,

    /// Section 3 including its leading `333`, when present
    #[serde(skip_serializing_if = "Option::is_none")]
    pub section3: Option<String>,
}

// =============================================================================
// Decoded Observation
// =============================================================================

/// Barometric tendency over the past three hours (`5appp`)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PressureTendency {
    /// Characteristic `a` (0-3 rising, 4 steady, 5-8 falling)
    pub characteristic: u8,

    /// Signed change in hPa
    pub change_hpa: f64,
}

/// Physical quantities decoded from one station report
///
/// Every field is optional: a malformed or absent group leaves only its
/// own field unavailable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    /// Observation time, UTC
    pub observed_at: DateTime<Utc>,

    /// Observation date as `dd/mm/YYYY`
    pub date: String,

    /// Observation time as `HH:MM`
    pub time: String,

    /// Qualitative sky condition from `Nh`
    pub sky_condition: Option<String>,

    /// Cloud amount in oktas
    pub cloud_cover: Option<u8>,

    /// Height band of the lowest cloud base, metres
    pub lowest_cloud_base: Option<String>,

    /// Air temperature, degC
    pub temperature: Option<f64>,

    /// Maximum temperature from section 3, degC
    pub max_temperature: Option<f64>,

    /// Minimum temperature from section 3, degC
    pub min_temperature: Option<f64>,

    /// Dew point, degC
    pub dew_point: Option<f64>,

    /// Relative humidity, percent
    pub relative_humidity: Option<u32>,

    /// Wind speed as reported, in `wind_speed_unit`
    pub wind_speed: Option<f64>,

    /// Unit of `wind_speed`
    pub wind_speed_unit: Option<WindUnit>,

    /// Wind speed converted with `wind_speed_unit`, km/h
    pub wind_speed_kmh: Option<f64>,

    /// Compass wind direction
    pub wind_direction: Option<String>,

    /// Wind direction in degrees
    pub wind_direction_degrees: Option<u16>,

    /// Precipitation over the reporting period, mm
    pub precipitation_3h: Option<f64>,

    /// Length of the precipitation reporting period, hours
    pub precipitation_period_hours: Option<u8>,

    /// Precipitation over 24 hours, mm
    pub precipitation_24h: Option<f64>,

    /// Station level pressure, hPa
    pub station_pressure: Option<f64>,

    /// Mean sea level pressure, hPa
    pub sea_level_pressure: Option<f64>,

    /// Three-hour pressure tendency
    pub pressure_tendency: Option<PressureTendency>,

    /// Raw `VV` visibility code
    pub visibility_code: Option<String>,

    /// Visibility, km
    pub visibility_km: Option<f64>,

    /// Qualitative visibility band
    pub visibility_description: String,

    /// Present weather `ww`
    pub present_weather_code: Option<String>,
    pub present_weather_description: Option<String>,

    /// Past weather `W1`
    pub past_weather1_code: Option<String>,
    pub past_weather1_description: Option<String>,

    /// Past weather `W2`
    pub past_weather2_code: Option<String>,
    pub past_weather2_description: Option<String>,
}

// =============================================================================
// Result Envelope
// =============================================================================

/// Outcome tag of an observation request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Success,
    Error,
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Status::Success => f.write_str("success"),
            Status::Error => f.write_str("error"),
        }
    }
}

/// Status envelope returned for every station request
///
/// An `error` envelope never carries an observation; a `success` envelope
/// always does, together with the raw sections for audit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObservationResult {
    /// Requested station number
    pub station: u32,

    /// Outcome tag
    pub status: Status,

    /// Human-readable outcome message
    pub message: String,

    /// Decoded quantities, present only on success
    #[serde(flatten)]
    pub observation: Option<Observation>,

    /// Station sections the observation was decoded from
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sections: Option<StationSections>,
}

impl ObservationResult {
    /// Successful envelope
    pub fn success(station: u32, observation: Observation, sections: StationSections) -> Self {
        Self {
            station,
            status: Status::Success,
            message: "Observation decoded successfully".to_string(),
            observation: Some(observation),
            sections: Some(sections),
        }
    }

    /// Error envelope carrying no physical fields
    pub fn error(station: u32, message: impl Into<String>) -> Self {
        Self {
            station,
            status: Status::Error,
            message: message.into(),
            observation: None,
            sections: None,
        }
    }

    /// Whether the request succeeded
    pub fn is_success(&self) -> bool {
        self.status == Status::Success
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_synop_hour_parsing() {
        assert_eq!("00".parse::<SynopHour>().unwrap(), SynopHour::H00);
        assert_eq!("21".parse::<SynopHour>().unwrap(), SynopHour::H21);
        assert!("01".parse::<SynopHour>().is_err());
        assert!("24".parse::<SynopHour>().is_err());
        assert!("".parse::<SynopHour>().is_err());
    }

    #[test]
    fn test_report_file_names() {
        assert_eq!(SynopHour::H00.report_file_name(78355), "SM355.00");
        assert_eq!(SynopHour::H18.report_file_name(78355), "SM355.18");
        assert_eq!(SynopHour::H03.report_file_name(78350), "SI350.03");
        assert_eq!(SynopHour::H21.report_file_name(78350), "SI350.21");
    }

    #[test]
    fn test_wind_unit_conversion() {
        assert_eq!(WindUnit::from_indicator('1'), Some(WindUnit::MetresPerSecond));
        assert_eq!(WindUnit::from_indicator('4'), Some(WindUnit::Knots));
        assert_eq!(WindUnit::from_indicator('2'), None);
        assert!((WindUnit::MetresPerSecond.to_kmh(10.0) - 36.0).abs() < 1e-9);
        assert!((WindUnit::Knots.to_kmh(10.0) - 18.52).abs() < 1e-9);
        assert_eq!("knots".parse::<WindUnit>().unwrap(), WindUnit::Knots);
        assert!("furlongs".parse::<WindUnit>().is_err());
    }

    #[test]
    fn test_error_envelope_has_no_fields() {
        let result = ObservationResult::error(78355, "no section 1 data");
        assert!(!result.is_success());
        assert!(result.observation.is_none());
        assert!(result.sections.is_none());

        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["status"], "error");
        assert_eq!(json["message"], "no section 1 data");
        assert!(json.get("temperature").is_none());
    }
}
