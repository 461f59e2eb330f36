//! Tests for bulletin parsing and station splitting

use super::*;
use crate::app::models::SynopHour;
use crate::app::services::synop_decoder::splitter::{normalize_lines, parse_bulletin, split};

#[test]
fn test_normalize_drops_blank_lines_and_end_marker() {
    let lines = normalize_lines(MULTI_STATION_BULLETIN);

    assert_eq!(lines.len(), 5);
    assert_eq!(lines[0], "AAXX 15001");
    assert!(lines.iter().all(|line| line != "NNNN" && !line.is_empty()));
    assert_eq!(lines[2], "333 10295 20218 70000=");
}

#[test]
fn test_parse_bulletin_header() {
    let report = parse_bulletin(SINGLE_STATION_BULLETIN, SynopHour::H12, reference_now());

    assert!(report.header_found);
    assert_eq!(report.day, "15");
    assert_eq!(report.hour, "00");
    assert_eq!(report.wind_indicator, Some('4'));
    assert_eq!(report.lines.len(), 2);
}

#[test]
fn test_parse_bulletin_without_header_uses_defaults() {
    let report = parse_bulletin("78355 46912 70802=", SynopHour::H09, reference_now());

    assert!(!report.header_found);
    assert_eq!(report.day, "15");
    assert_eq!(report.hour, "09");
    assert_eq!(report.wind_indicator, None);
}

#[test]
fn test_parse_bulletin_short_date_code() {
    let report = parse_bulletin("AAXX 15\n78355 46912=", SynopHour::H06, reference_now());

    assert!(!report.header_found);
    assert_eq!(report.hour, "06");
}

#[test]
fn test_split_single_station() {
    let sections = split(SINGLE_STATION_BULLETIN, 78355).unwrap();

    assert_eq!(
        sections.section1,
        "78355 46912 70802 10251 20198 39850 40050"
    );
    assert_eq!(sections.section3.as_deref(), Some("333 10280 20190 70012"));
}

#[test]
fn test_split_joins_continuation_lines() {
    let sections = split(MULTI_STATION_BULLETIN, 78350).unwrap();

    assert!(sections.section1.starts_with("78350 32970"));
    assert!(sections.section1.ends_with("83530"));
    assert_eq!(sections.section3.as_deref(), Some("333 10295 20218 70000"));
}

#[test]
fn test_split_stops_at_terminator() {
    let sections = split(MULTI_STATION_BULLETIN, 78355).unwrap();

    assert!(sections.section1.starts_with("78355 11458"));
    assert!(sections.section1.ends_with("8453/"));
    assert!(!sections.section1.contains('='));
    assert_eq!(sections.section3, None);
}

#[test]
fn test_split_nil_report_keeps_section1() {
    let sections = split(MULTI_STATION_BULLETIN, 78351).unwrap();

    assert_eq!(sections.section1, "78351 NIL");
    assert_eq!(sections.section3, None);
}

#[test]
fn test_split_missing_station() {
    assert_eq!(split(MULTI_STATION_BULLETIN, 78399), None);
    assert_eq!(split("", 78355), None);
}

#[test]
fn test_split_station_as_inner_token() {
    let bulletin = "AAXX 15004\nSMCU01 78355 46912 70802=";
    let sections = split(bulletin, 78355).unwrap();

    assert_eq!(sections.section1, "SMCU01 78355 46912 70802");
}

#[test]
fn test_split_unterminated_report_runs_to_end() {
    let bulletin = "AAXX 15004\n78355 46912\n70802 10251";
    let sections = split(bulletin, 78355).unwrap();

    assert_eq!(sections.section1, "78355 46912 70802 10251");
}

#[test]
fn test_split_marker_without_section3_groups() {
    let sections = split("78355 46912 70802 333=", 78355).unwrap();

    assert_eq!(sections.section1, "78355 46912 70802");
    assert_eq!(sections.section3, None);
}

#[test]
fn test_split_ignores_333_inside_groups() {
    let sections = split("78355 46912 73330 10251=", 78355).unwrap();

    assert_eq!(sections.section1, "78355 46912 73330 10251");
    assert_eq!(sections.section3, None);
}

#[test]
fn test_split_is_idempotent() {
    let first = split(MULTI_STATION_BULLETIN, 78350);
    let second = split(MULTI_STATION_BULLETIN, 78350);

    assert_eq!(first, second);
}
