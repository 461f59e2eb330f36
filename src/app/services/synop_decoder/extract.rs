//! Physical value extraction
//!
//! One total function per quantity: every function returns `None` (or the
//! documented default) on absent or malformed input instead of failing, so a
//! corrupt group never hides the rest of the report.

use super::groups::DecodedGroups;
use crate::app::models::{Observation, PressureTendency, WindUnit};
use crate::app::services::code_tables::{self, Visibility};
use crate::constants::precipitation::{
    ABSENT_AMOUNT_MM, TENTHS_PREFIX, TRACE_24H, TRACE_3H, TRACE_AMOUNT_MM,
};
use crate::constants::{
    MAGNUS_B, MAGNUS_C, MAGNUS_E0, MISSING_EXTREME, OBSERVATION_DATE_FORMAT,
    OBSERVATION_TIME_FORMAT, PRESSURE_THOUSANDS_THRESHOLD_HPA, SKY_NOT_OBSERVED,
};
use chrono::{DateTime, Datelike, Months, NaiveDate, Utc};

/// Added to open-ended visibility values so they compare above the bound
const GREATER_THAN_EPSILON_KM: f64 = 0.1;

/// Text used when a weather code is outside its table
const UNKNOWN_CODE: &str = "Unknown code";

fn digits(value: &str) -> Option<f64> {
    if value.is_empty() || !value.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    value.parse().ok()
}

// =============================================================================
// Temperature and humidity
// =============================================================================

/// Signed temperature from `Sn` and a tenths-of-degree magnitude
///
/// `0` is positive, `1` negative; any other sign is unavailable.
pub fn temperature(sign: Option<&str>, magnitude: Option<&str>) -> Option<f64> {
    let value = digits(magnitude?)? / 10.0;
    match sign? {
        "0" => Some(value),
        "1" => Some(-value),
        _ => None,
    }
}

/// Section 3 extreme temperature; `--` marks a missing value
pub fn extreme_temperature(sign: Option<&str>, magnitude: Option<&str>) -> Option<f64> {
    match magnitude {
        Some(MISSING_EXTREME) | None => None,
        Some(_) => temperature(sign, magnitude),
    }
}

fn saturation_vapour_pressure(temperature: f64) -> f64 {
    MAGNUS_E0 * (MAGNUS_B * temperature / (temperature + MAGNUS_C)).exp()
}

/// Relative humidity in percent from temperature and dew point (Magnus)
pub fn relative_humidity(temperature: Option<f64>, dew_point: Option<f64>) -> Option<u32> {
    let es = saturation_vapour_pressure(temperature?);
    let e = saturation_vapour_pressure(dew_point?);
    let rh = (100.0 * e / es).round();
    (rh.is_finite() && rh >= 0.0).then_some(rh as u32)
}

// =============================================================================
// Pressure
// =============================================================================

/// Pressure in hPa from a `PPPP` magnitude with the thousands digit omitted
pub fn pressure(magnitude: Option<&str>) -> Option<f64> {
    let value = digits(magnitude?)? / 10.0;
    if value < PRESSURE_THOUSANDS_THRESHOLD_HPA {
        Some(value + 1000.0)
    } else {
        Some(value)
    }
}

/// Signed three-hour tendency from `a` and `ppp`
pub fn pressure_tendency(
    characteristic: Option<&str>,
    change: Option<&str>,
) -> Option<PressureTendency> {
    let characteristic: u8 = characteristic?.parse().ok()?;
    let change = digits(change?)? / 10.0;
    let change_hpa = match characteristic {
        0..=4 => change,
        5..=8 => -change,
        _ => return None,
    };
    Some(PressureTendency {
        characteristic,
        change_hpa,
    })
}

// =============================================================================
// Precipitation
// =============================================================================

/// Precipitation over the `tR` period from an `RRR` code, mm
///
/// Absent means no precipitation (0.0); a malformed code is unavailable.
pub fn precipitation_3h(code: Option<&str>) -> Option<f64> {
    let Some(code) = code else {
        return Some(ABSENT_AMOUNT_MM);
    };
    if code == TRACE_3H {
        return Some(TRACE_AMOUNT_MM);
    }
    if let Some(tenths) = code.strip_prefix(TENTHS_PREFIX) {
        return digits(tenths.get(..1)?).map(|d| d / 10.0);
    }
    digits(code).map(|v| v / 10.0)
}

/// Precipitation over 24 hours from an `R24R24R24R24` code, mm
pub fn precipitation_24h(code: Option<&str>) -> Option<f64> {
    match code {
        None => Some(ABSENT_AMOUNT_MM),
        Some(TRACE_24H) => Some(TRACE_AMOUNT_MM),
        Some(code) => digits(code).map(|v| v / 10.0),
    }
}

// =============================================================================
// Visibility
// =============================================================================

/// Visibility in km; open-ended codes map just above their bound
pub fn visibility_km(code: Option<&str>) -> Option<f64> {
    match code_tables::visibility(code?)? {
        Visibility::Km(km) => Some(km),
        Visibility::GreaterThan(km) => Some(km + GREATER_THAN_EPSILON_KM),
    }
}

/// Qualitative band for a visibility, for display only
pub fn visibility_description(km: Option<f64>) -> String {
    match km {
        None => "Not available".to_string(),
        Some(km) if km < 0.1 => "Very poor (< 0.1 km)".to_string(),
        Some(km) if km < 1.0 => format!("Poor ({:.1} km)", km),
        Some(km) if km < 4.0 => format!("Moderate ({:.1} km)", km),
        Some(km) if km < 10.0 => format!("Good ({:.1} km)", km),
        Some(km) if km < 20.0 => format!("Very good ({:.1} km)", km),
        Some(km) => format!("Excellent ({:.1} km)", km),
    }
}

// =============================================================================
// Clouds
// =============================================================================

/// Sky condition from the `Nh` cloud amount
pub fn sky_condition(amount: Option<&str>) -> Option<&'static str> {
    match amount? {
        "0" => Some("Clear"),
        "1" | "2" | "3" => Some("Mostly clear"),
        "4" | "5" => Some("Partly cloudy"),
        "6" | "7" | "8" => Some("Cloudy"),
        SKY_NOT_OBSERVED => Some("Not observed"),
        _ => None,
    }
}

/// Cloud amount in oktas, unavailable when not observed
pub fn cloud_cover(amount: Option<&str>) -> Option<u8> {
    amount?.parse().ok().filter(|oktas| *oktas <= 9)
}

// =============================================================================
// Wind
// =============================================================================

/// Wind speed as reported, without unit conversion
pub fn wind_speed(code: Option<&str>) -> Option<f64> {
    digits(code?)
}

/// Wind speed in km/h; unavailable unless the unit is known
pub fn wind_speed_kmh(speed: Option<f64>, unit: Option<WindUnit>) -> Option<f64> {
    Some(unit?.to_kmh(speed?))
}

// =============================================================================
// Weather
// =============================================================================

fn describe(code: Option<&str>, table: fn(&str) -> Option<&'static str>) -> Option<String> {
    code.map(|code| table(code).unwrap_or(UNKNOWN_CODE).to_string())
}

/// Present weather `ww` description
pub fn present_weather(code: Option<&str>) -> Option<String> {
    describe(code, code_tables::present_weather)
}

/// Past weather `W1` description
pub fn past_weather_1(code: Option<&str>) -> Option<String> {
    describe(code, code_tables::past_weather_1)
}

/// Past weather `W2` description
pub fn past_weather_2(code: Option<&str>) -> Option<String> {
    describe(code, code_tables::past_weather_2)
}

// =============================================================================
// Observation time
// =============================================================================

/// Observation time from the bulletin day and hour codes
///
/// The bulletin only carries a day of month, so the date is placed in the
/// previous, current or next month, whichever lands closest to `now`.
/// Non-numeric or out-of-range codes fall back to `now`.
pub fn observation_time(day: &str, hour: &str, now: DateTime<Utc>) -> DateTime<Utc> {
    let (Some(day), Some(hour)) = (parse_code(day), parse_code(hour)) else {
        return now;
    };
    if hour > 23 {
        return now;
    }

    let Some(month_start) = NaiveDate::from_ymd_opt(now.year(), now.month(), 1) else {
        return now;
    };

    [
        month_start.checked_sub_months(Months::new(1)),
        Some(month_start),
        month_start.checked_add_months(Months::new(1)),
    ]
    .into_iter()
    .flatten()
    .filter_map(|month| month.with_day(day))
    .filter_map(|date| date.and_hms_opt(hour, 0, 0))
    .map(|naive| naive.and_utc())
    .min_by_key(|candidate| (*candidate - now).num_seconds().abs())
    .unwrap_or(now)
}

fn parse_code(code: &str) -> Option<u32> {
    if code.is_empty() || !code.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    code.parse().ok()
}

/// Build the full observation from decoded groups
pub fn observation(
    groups: &DecodedGroups,
    observed_at: DateTime<Utc>,
    wind_unit: Option<WindUnit>,
) -> Observation {
    let temperature = temperature(
        groups.temperature_sign.as_deref(),
        groups.temperature.as_deref(),
    );
    let dew_point = self::temperature(
        groups.dew_point_sign.as_deref(),
        groups.dew_point.as_deref(),
    );

    let speed = wind_speed(groups.wind_speed.as_deref());
    let wind_code = groups.wind_direction.as_deref();

    let visibility = visibility_km(groups.visibility.as_deref());
    let cloud_amount = groups.low_cloud_amount.as_deref();

    Observation {
        observed_at,
        date: observed_at.format(OBSERVATION_DATE_FORMAT).to_string(),
        time: observed_at.format(OBSERVATION_TIME_FORMAT).to_string(),

        sky_condition: sky_condition(cloud_amount).map(str::to_string),
        cloud_cover: cloud_cover(cloud_amount),
        lowest_cloud_base: groups
            .cloud_base
            .as_deref()
            .and_then(code_tables::cloud_base_height)
            .map(str::to_string),

        temperature,
        max_temperature: extreme_temperature(
            groups.max_temperature_sign.as_deref(),
            groups.max_temperature.as_deref(),
        ),
        min_temperature: extreme_temperature(
            groups.min_temperature_sign.as_deref(),
            groups.min_temperature.as_deref(),
        ),
        dew_point,
        relative_humidity: relative_humidity(temperature, dew_point),

        wind_speed: speed,
        wind_speed_unit: wind_unit,
        wind_speed_kmh: wind_speed_kmh(speed, wind_unit),
        wind_direction: wind_code
            .and_then(code_tables::wind_direction)
            .map(str::to_string),
        wind_direction_degrees: wind_code.and_then(code_tables::wind_direction_degrees),

        precipitation_3h: precipitation_3h(groups.precipitation.as_deref()),
        precipitation_period_hours: groups
            .precipitation_period
            .as_deref()
            .and_then(code_tables::precipitation_period_hours),
        precipitation_24h: precipitation_24h(groups.precipitation_24h.as_deref()),

        station_pressure: pressure(groups.station_pressure.as_deref()),
        sea_level_pressure: pressure(groups.sea_level_pressure.as_deref()),
        pressure_tendency: pressure_tendency(
            groups.tendency_characteristic.as_deref(),
            groups.tendency_change.as_deref(),
        ),

        visibility_code: groups.visibility.clone(),
        visibility_km: visibility,
        visibility_description: visibility_description(visibility),

        present_weather_code: groups.present_weather.clone(),
        present_weather_description: present_weather(groups.present_weather.as_deref()),
        past_weather1_code: groups.past_weather_1.clone(),
        past_weather1_description: past_weather_1(groups.past_weather_1.as_deref()),
        past_weather2_code: groups.past_weather_2.clone(),
        past_weather2_description: past_weather_2(groups.past_weather_2.as_deref()),
    }
}
