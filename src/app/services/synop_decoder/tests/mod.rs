//! Tests for the SYNOP decoding pipeline
//!
//! Fixtures are small synthetic bulletins in the shape published for the
//! 78350-78355 station block.

pub mod extract_tests;
pub mod splitter_tests;

use crate::app::models::StationSections;
use chrono::{DateTime, TimeZone, Utc};

/// Single-station bulletin with section 3
pub const SINGLE_STATION_BULLETIN: &str =
    "AAXX 15004\n78355 46912 70802 10251 20198 39850 40050 333 10280 20190 70012=";

/// Multi-station bulletin with a wrapped report, a nil report and the end marker
pub const MULTI_STATION_BULLETIN: &str = "\
AAXX 15001

78350 32970 30305 10262 20231 39991 40105 52012 60001 71022 83530
      333 10295 20218 70000=
78351 NIL=
78355 11458 62108 10310 20240 30012 40098 58005 69932 76162 8453/=
NNNN
";

/// Midday on the 15th, matching the day of both fixtures
pub fn reference_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 5, 15, 12, 0, 0).unwrap()
}

/// Sections for a bare section 1 string
pub fn section1_only(section1: &str) -> StationSections {
    StationSections {
        section1: section1.to_string(),
        section3: None,
    }
}
