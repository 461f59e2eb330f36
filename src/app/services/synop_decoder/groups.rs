//! Positional group decoding for section 1 and section 3
//!
//! Section 1 is walked slot by slot with an index cursor. Each slot either
//! matches its group and populates fields, or is skipped; the cursor
//! advances either way and never resynchronises. Present/past weather and
//! cloud groups are the exceptions: their placement varies between
//! stations, so they are searched for rather than read positionally.

use crate::app::models::StationSections;
use regex::Regex;
use serde::Serialize;
use std::sync::LazyLock;

/// `7R24R24R24R24` group of section 3
static PRECIPITATION_24H_GROUP: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^7([0-9]{4})$").expect("24h precipitation pattern is valid")
});

/// Flat record of coded fields, one per FM-12 symbol
///
/// A field is `None` when its group was absent or malformed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DecodedGroups {
    /// `II` block number
    pub region: Option<String>,
    /// `iii` station number within the block
    pub station_index: Option<String>,

    /// `iR` precipitation indicator
    pub precipitation_indicator: Option<String>,
    /// `iX` station operation indicator
    pub station_operation: Option<String>,
    /// `h` lowest cloud base
    pub cloud_base: Option<String>,
    /// `VV` visibility
    pub visibility: Option<String>,

    /// `N` total cloud cover
    pub total_cloud: Option<String>,
    /// `dd` wind direction
    pub wind_direction: Option<String>,
    /// `ff` wind speed
    pub wind_speed: Option<String>,

    /// `1SnTTT`
    pub temperature_sign: Option<String>,
    pub temperature: Option<String>,

    /// `2SnTdTdTd`
    pub dew_point_sign: Option<String>,
    pub dew_point: Option<String>,

    /// `3PoPoPoPo`
    pub station_pressure: Option<String>,

    /// `4PPPP`
    pub sea_level_pressure: Option<String>,

    /// `5appp`
    pub tendency_characteristic: Option<String>,
    pub tendency_change: Option<String>,

    /// `6RRRtR`
    pub precipitation: Option<String>,
    pub precipitation_period: Option<String>,

    /// `7wwW1W2`
    pub present_weather: Option<String>,
    pub past_weather_1: Option<String>,
    pub past_weather_2: Option<String>,

    /// `8NhCLCMCH`
    pub low_cloud_amount: Option<String>,
    pub low_cloud_type: Option<String>,
    pub middle_cloud_type: Option<String>,
    pub high_cloud_type: Option<String>,

    /// Section 3 `1SnTxTxTx`
    pub max_temperature_sign: Option<String>,
    pub max_temperature: Option<String>,

    /// Section 3 `2SnTnTnTn`
    pub min_temperature_sign: Option<String>,
    pub min_temperature: Option<String>,

    /// Section 3 `7R24R24R24R24`
    pub precipitation_24h: Option<String>,
}

impl DecodedGroups {
    /// Whether no group at all was decoded
    pub fn is_empty(&self) -> bool {
        *self == DecodedGroups::default()
    }

    /// Station number rebuilt from `II` and `iii`
    pub fn station_number(&self) -> Option<u32> {
        let region = self.region.as_deref()?;
        let index = self.station_index.as_deref()?;
        format!("{}{}", region, index).parse().ok()
    }
}

/// Outcome of trying one positional slot
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GroupMatch<T> {
    Matched(T),
    Skipped,
}

/// Index cursor over the tokens of section 1
struct GroupCursor<'a> {
    tokens: &'a [&'a str],
    index: usize,
}

impl<'a> GroupCursor<'a> {
    fn new(tokens: &'a [&'a str], start: usize) -> Self {
        Self {
            tokens,
            index: start,
        }
    }

    /// Try the next slot with `parse`, advancing whether or not it matched
    fn next_group<T>(
        &mut self,
        parse: impl FnOnce(&'a str) -> GroupMatch<T>,
    ) -> GroupMatch<T> {
        let Some(token) = self.tokens.get(self.index) else {
            return GroupMatch::Skipped;
        };
        self.index += 1;
        parse(*token)
    }
}

/// Accept `token` as a group when it is ASCII, long enough and carries the indicator
fn group<'a>(token: &'a str, indicator: &str, min_len: usize) -> Option<&'a str> {
    (token.is_ascii() && token.len() >= min_len && token.starts_with(indicator)).then_some(token)
}

fn field(token: &str, range: std::ops::Range<usize>) -> Option<String> {
    let end = range.end.min(token.len());
    token
        .get(range.start..end)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

fn matched<T>(value: Option<T>) -> GroupMatch<T> {
    match value {
        Some(value) => GroupMatch::Matched(value),
        None => GroupMatch::Skipped,
    }
}

// =============================================================================
// Section 1 group parsers
// =============================================================================

/// `iRiXhVV` has no indicator digit
fn parse_indicators(token: &str) -> GroupMatch<[Option<String>; 4]> {
    matched(group(token, "", 5).map(|g| {
        [
            field(g, 0..1),
            field(g, 1..2),
            field(g, 2..3),
            field(g, 3..5),
        ]
    }))
}

/// `Nddff` has no indicator digit
fn parse_wind(token: &str) -> GroupMatch<[Option<String>; 3]> {
    matched(group(token, "", 5).map(|g| [field(g, 0..1), field(g, 1..3), field(g, 3..5)]))
}

/// Sign and magnitude groups `1SnTTT` and `2SnTdTdTd`
fn parse_signed(indicator: &'static str) -> impl Fn(&str) -> GroupMatch<[Option<String>; 2]> {
    move |token: &str| {
        matched(group(token, indicator, 5).map(|g| [field(g, 1..2), field(g, 2..5)]))
    }
}

/// Pressure groups `3PoPoPoPo` and `4PPPP`
fn parse_pressure(indicator: &'static str) -> impl Fn(&str) -> GroupMatch<Option<String>> {
    move |token: &str| matched(group(token, indicator, 5).map(|g| field(g, 1..5)))
}

/// `5appp`, accepted from four characters
fn parse_tendency(token: &str) -> GroupMatch<[Option<String>; 2]> {
    matched(group(token, "5", 4).map(|g| [field(g, 1..2), field(g, 2..5)]))
}

/// `6RRRtR`
fn parse_precipitation(token: &str) -> GroupMatch<[Option<String>; 2]> {
    matched(group(token, "6", 5).map(|g| [field(g, 1..4), field(g, 4..5)]))
}

/// Decode one station's sections into a flat field record
///
/// Never fails: empty or garbage input yields a record with every field unset.
pub fn decode(sections: &StationSections) -> DecodedGroups {
    let mut groups = DecodedGroups::default();

    let tokens: Vec<&str> = sections.section1.split_whitespace().collect();
    if let Some(station) = tokens.first() {
        decode_station_identifier(station, &mut groups);
        decode_section1(&tokens, &mut groups);
    }

    if let Some(section3) = &sections.section3 {
        decode_section3(section3, &mut groups);
    }

    groups
}

/// `IIiii`, degrading gracefully on short identifiers
fn decode_station_identifier(station: &str, groups: &mut DecodedGroups) {
    if !station.is_ascii() || station.len() < 2 {
        return;
    }
    groups.region = field(station, 0..2);
    groups.station_index = if station.len() >= 5 {
        field(station, 2..5)
    } else if station.len() > 2 {
        field(station, 2..station.len())
    } else {
        Some("000".to_string())
    };
}

fn decode_section1(tokens: &[&str], groups: &mut DecodedGroups) {
    let mut cursor = GroupCursor::new(tokens, 1);

    if let GroupMatch::Matched([ir, ix, h, vv]) = cursor.next_group(parse_indicators) {
        groups.precipitation_indicator = ir;
        groups.station_operation = ix;
        groups.cloud_base = h;
        groups.visibility = vv;
    }

    if let GroupMatch::Matched([n, dd, ff]) = cursor.next_group(parse_wind) {
        groups.total_cloud = n;
        groups.wind_direction = dd;
        groups.wind_speed = ff;
    }

    if let GroupMatch::Matched([sign, ttt]) = cursor.next_group(parse_signed("1")) {
        groups.temperature_sign = sign;
        groups.temperature = ttt;
    }

    if let GroupMatch::Matched([sign, tdtdtd]) = cursor.next_group(parse_signed("2")) {
        groups.dew_point_sign = sign;
        groups.dew_point = tdtdtd;
    }

    if let GroupMatch::Matched(pppp) = cursor.next_group(parse_pressure("3")) {
        groups.station_pressure = pppp;
    }

    if let GroupMatch::Matched(pppp) = cursor.next_group(parse_pressure("4")) {
        groups.sea_level_pressure = pppp;
    }

    if let GroupMatch::Matched([a, ppp]) = cursor.next_group(parse_tendency) {
        groups.tendency_characteristic = a;
        groups.tendency_change = ppp;
    }

    if let GroupMatch::Matched([rrr, tr]) = cursor.next_group(parse_precipitation) {
        groups.precipitation = rrr;
        groups.precipitation_period = tr;
    }

    // 7wwW1W2 floats: first candidate from the fourth token on
    if let Some(weather) = tokens.iter().skip(3).find_map(|t| group(*t, "7", 5)) {
        groups.present_weather = field(weather, 1..3);
        groups.past_weather_1 = field(weather, 3..4);
        groups.past_weather_2 = field(weather, 4..5);
    }

    // 8NhCLCMCH closes the section
    if tokens.len() > 1 {
        if let Some(clouds) = tokens.last().and_then(|t| group(*t, "8", 5)) {
            groups.low_cloud_amount = field(clouds, 1..2);
            groups.low_cloud_type = field(clouds, 2..3);
            groups.middle_cloud_type = field(clouds, 3..4);
            groups.high_cloud_type = field(clouds, 4..5);
        }
    }
}

/// Scan section 3 for extremes and 24h precipitation, in any order
fn decode_section3(section3: &str, groups: &mut DecodedGroups) {
    for token in section3.split_whitespace() {
        if let Some(g) = group(token, "1", 5).filter(|g| is_sign(g)) {
            groups.max_temperature_sign = field(g, 1..2);
            groups.max_temperature = field(g, 2..5);
        } else if let Some(g) = group(token, "2", 5).filter(|g| is_sign(g)) {
            groups.min_temperature_sign = field(g, 1..2);
            groups.min_temperature = field(g, 2..5);
        } else if let Some(captures) = PRECIPITATION_24H_GROUP.captures(token) {
            groups.precipitation_24h = Some(captures[1].to_string());
        }
    }
}

/// Second character of an extreme temperature group is a 0/1 sign
///
/// Accepts the negative `11xxx`/`21xxx` forms as well as `10xxx`/`20xxx`.
fn is_sign(group: &str) -> bool {
    matches!(group.as_bytes().get(1), Some(b'0') | Some(b'1'))
}
