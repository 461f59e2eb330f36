//! Tests for physical value extraction

use super::*;
use crate::app::models::WindUnit;
use crate::app::services::synop_decoder::extract::*;
use crate::app::services::synop_decoder::groups::decode;
use crate::app::services::synop_decoder::splitter::split;

fn approx(actual: Option<f64>, expected: f64) {
    let actual = actual.expect("value should be available");
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {expected}, got {actual}"
    );
}

#[test]
fn test_temperature_sign_and_tenths() {
    approx(temperature(Some("0"), Some("123")), 12.3);
    approx(temperature(Some("1"), Some("045")), -4.5);
    approx(temperature(Some("0"), Some("000")), 0.0);
    assert_eq!(temperature(Some("9"), Some("123")), None);
    assert_eq!(temperature(None, Some("123")), None);
    assert_eq!(temperature(Some("0"), None), None);
    assert_eq!(temperature(Some("0"), Some("1/3")), None);
}

#[test]
fn test_extreme_temperature() {
    approx(extreme_temperature(Some("0"), Some("280")), 28.0);
    approx(extreme_temperature(Some("1"), Some("012")), -1.2);
    assert_eq!(extreme_temperature(Some("0"), Some("--")), None);
    assert_eq!(extreme_temperature(Some("0"), None), None);
}

#[test]
fn test_sign_magnitude_round_trip() {
    for tenths in [0_i32, 7, 45, 123, 251, 399] {
        for negative in [false, true] {
            let sign = if negative { "1" } else { "0" };
            let magnitude = format!("{:03}", tenths);
            let value = temperature(Some(sign), Some(&magnitude)).unwrap();
            let recovered = (value.abs() * 10.0).round() as i32;
            assert_eq!(recovered, tenths);
            assert_eq!(value < 0.0, negative && tenths != 0);
        }
    }
}

#[test]
fn test_relative_humidity() {
    assert_eq!(relative_humidity(Some(20.0), Some(20.0)), Some(100));
    assert_eq!(relative_humidity(Some(25.1), Some(19.8)), Some(72));
    assert_eq!(relative_humidity(Some(30.0), Some(10.0)), Some(29));
    assert_eq!(relative_humidity(None, Some(10.0)), None);
    assert_eq!(relative_humidity(Some(10.0), None), None);
}

#[test]
fn test_pressure_thousands_reconstruction() {
    approx(pressure(Some("0234")), 1023.4);
    approx(pressure(Some("9850")), 985.0);
    approx(pressure(Some("5000")), 500.0);
    approx(pressure(Some("4999")), 1499.9);
    assert_eq!(pressure(Some("98/0")), None);
    assert_eq!(pressure(None), None);
}

#[test]
fn test_pressure_tendency() {
    let rising = pressure_tendency(Some("2"), Some("012")).unwrap();
    assert_eq!(rising.characteristic, 2);
    approx(Some(rising.change_hpa), 1.2);

    let falling = pressure_tendency(Some("7"), Some("005")).unwrap();
    approx(Some(falling.change_hpa), -0.5);

    let steady = pressure_tendency(Some("4"), Some("000")).unwrap();
    approx(Some(steady.change_hpa), 0.0);

    assert_eq!(pressure_tendency(Some("9"), Some("010")), None);
    assert_eq!(pressure_tendency(Some("/"), Some("010")), None);
    assert_eq!(pressure_tendency(Some("2"), None), None);
}

#[test]
fn test_precipitation_3h() {
    approx(precipitation_3h(Some("990")), 0.1);
    approx(precipitation_3h(None), 0.0);
    approx(precipitation_3h(Some("050")), 5.0);
    approx(precipitation_3h(Some("993")), 0.3);
    approx(precipitation_3h(Some("123")), 12.3);
    assert_eq!(precipitation_3h(Some("///")), None);
    assert_eq!(precipitation_3h(Some("99")), None);
}

#[test]
fn test_precipitation_24h() {
    approx(precipitation_24h(Some("9999")), 0.1);
    approx(precipitation_24h(None), 0.0);
    approx(precipitation_24h(Some("0123")), 12.3);
    assert_eq!(precipitation_24h(Some("01/3")), None);
}

#[test]
fn test_visibility() {
    approx(visibility_km(Some("12")), 1.2);
    approx(visibility_km(Some("60")), 10.0);
    approx(visibility_km(Some("89")), 70.1);
    assert_eq!(visibility_km(Some("53")), None);
    assert_eq!(visibility_km(Some("//")), None);
    assert_eq!(visibility_km(None), None);
}

#[test]
fn test_visibility_description_bands() {
    assert_eq!(visibility_description(None), "Not available");
    assert_eq!(visibility_description(Some(0.0)), "Very poor (< 0.1 km)");
    assert_eq!(visibility_description(Some(0.5)), "Poor (0.5 km)");
    assert_eq!(visibility_description(Some(1.2)), "Moderate (1.2 km)");
    assert_eq!(visibility_description(Some(5.0)), "Good (5.0 km)");
    assert_eq!(visibility_description(Some(15.0)), "Very good (15.0 km)");
    assert_eq!(visibility_description(Some(70.1)), "Excellent (70.1 km)");
}

#[test]
fn test_sky_condition_and_cloud_cover() {
    assert_eq!(sky_condition(Some("0")), Some("Clear"));
    assert_eq!(sky_condition(Some("2")), Some("Mostly clear"));
    assert_eq!(sky_condition(Some("5")), Some("Partly cloudy"));
    assert_eq!(sky_condition(Some("8")), Some("Cloudy"));
    assert_eq!(sky_condition(Some("/")), Some("Not observed"));
    assert_eq!(sky_condition(Some("9")), None);
    assert_eq!(sky_condition(None), None);

    assert_eq!(cloud_cover(Some("6")), Some(6));
    assert_eq!(cloud_cover(Some("/")), None);
    assert_eq!(cloud_cover(None), None);
}

#[test]
fn test_wind_speed_conversion_is_explicit() {
    approx(wind_speed(Some("08")), 8.0);
    approx(wind_speed_kmh(Some(10.0), Some(WindUnit::MetresPerSecond)), 36.0);
    approx(wind_speed_kmh(Some(10.0), Some(WindUnit::Knots)), 18.52);
    assert_eq!(wind_speed_kmh(Some(10.0), None), None);
    assert_eq!(wind_speed(Some("//")), None);
}

#[test]
fn test_weather_descriptions() {
    assert!(present_weather(Some("61")).is_some());
    assert_eq!(present_weather(Some("xx")).as_deref(), Some("Unknown code"));
    assert_eq!(present_weather(None), None);
    assert!(past_weather_1(Some("6")).is_some());
    assert_eq!(past_weather_2(Some("/")).as_deref(), Some("Unknown code"));
}

#[test]
fn test_observation_time_same_month() {
    let now = reference_now();
    let observed = observation_time("15", "00", now);

    assert_eq!(observed, Utc.with_ymd_and_hms(2024, 5, 15, 0, 0, 0).unwrap());
}

#[test]
fn test_observation_time_across_month_boundary() {
    let now = Utc.with_ymd_and_hms(2024, 6, 1, 1, 0, 0).unwrap();
    let observed = observation_time("31", "21", now);
    assert_eq!(observed, Utc.with_ymd_and_hms(2024, 5, 31, 21, 0, 0).unwrap());

    let now = Utc.with_ymd_and_hms(2024, 12, 31, 23, 0, 0).unwrap();
    let observed = observation_time("01", "00", now);
    assert_eq!(observed, Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap());
}

#[test]
fn test_observation_time_falls_back_to_now() {
    let now = reference_now();

    assert_eq!(observation_time("ab", "00", now), now);
    assert_eq!(observation_time("15", "", now), now);
    assert_eq!(observation_time("15", "25", now), now);
    assert_eq!(observation_time("32", "00", now), now);
}

#[test]
fn test_observation_end_to_end() {
    let groups = decode(&split(SINGLE_STATION_BULLETIN, 78355).unwrap());
    let observed_at = observation_time("15", "00", reference_now());
    let obs = observation(&groups, observed_at, Some(WindUnit::Knots));

    assert_eq!(obs.date, "15/05/2024");
    assert_eq!(obs.time, "00:00");
    approx(obs.temperature, 25.1);
    approx(obs.dew_point, 19.8);
    assert_eq!(obs.relative_humidity, Some(72));
    approx(obs.station_pressure, 985.0);
    approx(obs.sea_level_pressure, 1005.0);
    approx(obs.max_temperature, 28.0);
    approx(obs.min_temperature, 19.0);
    approx(obs.precipitation_24h, 1.2);
    approx(obs.precipitation_3h, 0.0);
    approx(obs.visibility_km, 1.2);
    assert_eq!(obs.visibility_code.as_deref(), Some("12"));
    approx(obs.wind_speed, 2.0);
    approx(obs.wind_speed_kmh, 3.704);
    assert_eq!(obs.wind_speed_unit, Some(WindUnit::Knots));
    assert_eq!(obs.wind_direction_degrees, Some(80));
    assert_eq!(obs.sky_condition, None);
    assert_eq!(obs.present_weather_code, None);
}

#[test]
fn test_observation_from_nil_report_is_all_unavailable() {
    let groups = decode(&section1_only("78351 NIL"));
    let obs = observation(&groups, reference_now(), None);

    assert_eq!(obs.temperature, None);
    assert_eq!(obs.station_pressure, None);
    assert_eq!(obs.wind_speed_kmh, None);
    assert_eq!(obs.visibility_description, "Not available");
    approx(obs.precipitation_3h, 0.0);
    approx(obs.precipitation_24h, 0.0);
}
