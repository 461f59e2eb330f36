//! Bulletin normalisation and per-station report splitting
//!
//! A bulletin holds one `AAXX YYGGi` header followed by one report per
//! station. A station's report may wrap over several physical lines and
//! ends at a line terminated by `=`.

use crate::app::models::{RawReport, StationSections, SynopHour};
use crate::constants::{
    BULLETIN_END_MARKER, REPORT_TERMINATOR, SECTION_3_MARKER, SYNOP_HEADER_MARKER,
};
use chrono::{DateTime, Utc};
use tracing::debug;

/// Non-empty trimmed lines of a bulletin, without `NNNN` end markers
pub fn normalize_lines(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && *line != BULLETIN_END_MARKER)
        .map(str::to_string)
        .collect()
}

/// Normalise a bulletin and read day, hour and wind indicator from its header
///
/// Falls back to the current UTC day and the requested hour when the first
/// line is not a usable `AAXX ddhhw` header.
pub fn parse_bulletin(text: &str, requested_hour: SynopHour, now: DateTime<Utc>) -> RawReport {
    let lines = normalize_lines(text);

    let header = lines.first().and_then(|line| {
        let mut parts = line.split_whitespace();
        match (parts.next(), parts.next()) {
            (Some(SYNOP_HEADER_MARKER), Some(date_code)) => parse_date_code(date_code),
            _ => None,
        }
    });

    match header {
        Some((day, hour, wind_indicator)) => {
            debug!("Bulletin header: day={}, hour={}, iw={:?}", day, hour, wind_indicator);
            RawReport {
                day,
                hour,
                wind_indicator,
                header_found: true,
                lines,
            }
        }
        None => {
            let day = now.format("%d").to_string();
            debug!(
                "Bulletin header missing or malformed, using day={} hour={}",
                day, requested_hour
            );
            RawReport {
                day,
                hour: requested_hour.as_str().to_string(),
                wind_indicator: None,
                header_found: false,
                lines,
            }
        }
    }
}

/// `YYGGi`: two-digit day, two-digit hour, optional wind indicator
fn parse_date_code(date_code: &str) -> Option<(String, String, Option<char>)> {
    if !date_code.is_ascii() || date_code.len() < 4 {
        return None;
    }
    let day = date_code[0..2].to_string();
    let hour = date_code[2..4].to_string();
    let wind_indicator = date_code[4..].chars().next();
    Some((day, hour, wind_indicator))
}

/// Locate one station's report in a bulletin and split it into sections
///
/// Returns `None` when no line belongs to the station.
pub fn split(bulletin: &str, station: u32) -> Option<StationSections> {
    split_lines(&normalize_lines(bulletin), station)
}

/// Same as [`split`] over already-normalised lines
pub fn split_lines(lines: &[String], station: u32) -> Option<StationSections> {
    let station_str = station.to_string();

    let start = lines
        .iter()
        .position(|line| belongs_to_station(line, &station_str))?;
    debug!("Station {} found on line {}: {}", station, start, lines[start]);

    let mut report = lines[start].clone();
    for line in &lines[start + 1..] {
        if report.ends_with(REPORT_TERMINATOR) {
            break;
        }
        report.push(' ');
        report.push_str(line);
    }

    let report = report
        .strip_suffix(REPORT_TERMINATOR)
        .unwrap_or(&report)
        .trim();

    Some(split_sections(report))
}

/// A station line starts with the station number or carries it as a token
fn belongs_to_station(line: &str, station: &str) -> bool {
    line.starts_with(station) || line.split_whitespace().any(|token| token == station)
}

/// Split at the first `333` token; section 3 keeps the marker
fn split_sections(report: &str) -> StationSections {
    let tokens: Vec<&str> = report.split_whitespace().collect();

    match tokens.iter().position(|token| *token == SECTION_3_MARKER) {
        Some(marker) => {
            let rest = tokens[marker + 1..].join(" ");
            StationSections {
                section1: tokens[..marker].join(" "),
                section3: (!rest.is_empty()).then(|| format!("{} {}", SECTION_3_MARKER, rest)),
            }
        }
        None => StationSections {
            section1: tokens.join(" "),
            section3: None,
        },
    }
}
