//! FM-12 code tables
//!
//! Static lookups from coded enumerations to physical values or descriptive
//! text. Everything here is immutable data resolved with `match`, so lookups
//! are shared freely across concurrent decodes.

/// Visibility reported by a `VV` code
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Visibility {
    /// Visibility in kilometres
    Km(f64),
    /// Open-ended "greater than" value, kilometres
    GreaterThan(f64),
}

/// Look up a two-digit `VV` visibility code
///
/// Codes 00-50 are tenths of a kilometre, 56-80 whole kilometres above 50,
/// 81-88 steps of 5 km and 89 is "more than 70 km". 51-55 are unused.
pub fn visibility(code: &str) -> Option<Visibility> {
    if code.len() != 2 || !code.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let value: u32 = code.parse().ok()?;
    match value {
        0..=50 => Some(Visibility::Km(value as f64 / 10.0)),
        56..=80 => Some(Visibility::Km((value - 50) as f64)),
        81..=88 => Some(Visibility::Km(30.0 + (value - 80) as f64 * 5.0)),
        89 => Some(Visibility::GreaterThan(70.0)),
        _ => None,
    }
}

/// Compass direction for a `dd` code
pub fn wind_direction(code: &str) -> Option<&'static str> {
    let text = match code {
        "00" => "calm",
        "01" => "N",
        "02" => "NNE",
        "03" => "NE",
        "04" => "ENE",
        "05" => "E",
        "06" => "NE ¼ E",
        "07" => "ENE",
        "08" => "E ¼ NE",
        "09" => "E",
        "10" => "E ¼ SE",
        "11" => "ESE",
        "12" => "SE ¼ E",
        "13" => "SE",
        "14" => "SE",
        "15" => "SE ¼ S",
        "16" => "SSE",
        "17" => "S ¼ SE",
        "18" => "S",
        "19" => "S ¼ SW",
        "20" => "SSW",
        "21" => "SW ¼ S",
        "22" => "SW",
        "23" => "SW",
        "24" => "SW ¼ S",
        "25" => "WSW",
        "26" => "W ¼ SW",
        "27" => "W",
        "28" => "W ¼ NW",
        "29" => "WNW",
        "30" => "NW ¼ W",
        "31" => "NW",
        "32" => "NW",
        "33" => "NW ¼ N",
        "34" => "NNW",
        "35" => "N ¼ NW",
        "36" => "N",
        "99" => "variable",
        _ => return None,
    };
    Some(text)
}

/// Direction in degrees for a `dd` code
///
/// Calm (`00`) and variable (`99`) winds have no direction.
pub fn wind_direction_degrees(code: &str) -> Option<u16> {
    let degrees = match code {
        "01" => 0,
        "02" => 25,
        "03" => 45,
        "04" => 65,
        "05" => 90,
        "06" => 60,
        "07" => 70,
        "08" => 80,
        "09" => 90,
        "10" => 100,
        "11" => 110,
        "12" => 120,
        "13" => 130,
        "14" => 140,
        "15" => 150,
        "16" => 160,
        "17" => 170,
        "18" => 180,
        "19" => 190,
        "20" => 200,
        "21" => 210,
        "22" => 220,
        "23" => 230,
        "24" => 240,
        "25" => 250,
        "26" => 260,
        "27" => 270,
        "28" => 280,
        "29" => 290,
        "30" => 300,
        "31" => 310,
        "32" => 320,
        "33" => 330,
        "34" => 340,
        "35" => 350,
        "36" => 360,
        _ => return None,
    };
    Some(degrees)
}

/// Height band of the lowest cloud base (`h`), metres
pub fn cloud_base_height(code: &str) -> Option<&'static str> {
    let text = match code {
        "0" => "0 - 49",
        "1" => "50 - 99",
        "2" => "100 - 199",
        "3" => "200 - 299",
        "4" => "300 - 599",
        "5" => "600 - 999",
        "6" => "1000 - 1499",
        "7" => "1500 - 1999",
        "8" => "2000 - 2499",
        "9" => "2500 or more, or no clouds",
        _ => return None,
    };
    Some(text)
}

/// Precipitation reporting period for `tR`, hours
pub fn precipitation_period_hours(code: &str) -> Option<u8> {
    let hours = match code {
        "1" => 6,
        "2" => 12,
        "3" => 18,
        "4" => 24,
        "5" => 1,
        "6" => 2,
        "7" => 3,
        "8" => 9,
        "9" => 15,
        _ => return None,
    };
    Some(hours)
}

/// Description of a present weather code `ww`
pub fn present_weather(code: &str) -> Option<&'static str> {
    let text = match code {
        "00" => "Clear sky",
        "01" => "Partly cloudy sky",
        "02" => "Overcast sky",
        "03" => "Suspended dust, reduced visibility",
        "04" => "Smoke, reduced visibility",
        "05" => "Haze",
        "06" => "Suspended dust, not raised by wind",
        "07" => "Dust or sand raised by wind",
        "08" => "Dust or sand whirls",
        "09" => "Dust storm or sandstorm",
        "10" => "Mist",
        "11" => "Patches of fog",
        "12" => "Continuous shallow fog",
        "13" => "Lightning visible",
        "14" => "Precipitation not reaching the ground",
        "15" => "Distant precipitation",
        "16" => "Precipitation nearby, not at the station",
        "17" => "Thunder without precipitation at the station",
        "18" => "Squalls",
        "19" => "Funnel cloud",
        "20" => "Drizzle (not freezing)",
        "21" => "Rain (not freezing)",
        "22" => "Snow",
        "23" => "Rain and snow",
        "24" => "Freezing drizzle",
        "25" => "Rain showers",
        "26" => "Snow showers",
        "27" => "Hail showers",
        "28" => "Fog",
        "29" => "Thunderstorm",
        "30" => "Slight dust storm or sandstorm",
        "31" => "Moderate dust storm or sandstorm",
        "32" => "Strong dust storm or sandstorm",
        "33" => "Severe dust storm or sandstorm",
        "34" => "Very strong dust storm or sandstorm",
        "35" => "Slight freezing rain",
        "36" => "Moderate or heavy freezing rain",
        "37" => "Large snowflakes",
        "38" => "Small snowflakes",
        "39" => "Fog with ice crystals",
        "40" => "Fog at a distance",
        "41" => "Fog in patches",
        "42" | "44" | "46" => "Fog, sky visible",
        "43" | "45" | "47" => "Fog, sky invisible",
        "48" => "Fog depositing rime, sky visible",
        "49" => "Fog depositing rime, sky invisible",
        "50" => "Slight intermittent drizzle",
        "51" => "Slight continuous drizzle",
        "52" => "Moderate intermittent drizzle",
        "53" => "Moderate continuous drizzle",
        "54" => "Heavy intermittent drizzle",
        "55" => "Heavy continuous drizzle",
        "56" => "Slight freezing drizzle",
        "57" => "Moderate or heavy freezing drizzle",
        "58" => "Slight drizzle and rain",
        "59" => "Moderate or heavy drizzle and rain",
        "60" => "Slight intermittent rain",
        "61" => "Slight continuous rain",
        "62" => "Moderate intermittent rain",
        "63" => "Moderate continuous rain",
        "64" => "Heavy intermittent rain",
        "65" => "Heavy continuous rain",
        "66" => "Slight freezing rain",
        "67" => "Moderate or heavy freezing rain",
        "68" => "Slight rain or drizzle and snow",
        "69" => "Moderate or heavy rain or drizzle and snow",
        "70" => "Slight intermittent snow",
        "71" => "Slight continuous snow",
        "72" => "Moderate intermittent snow",
        "73" => "Moderate continuous snow",
        "74" => "Heavy intermittent snow",
        "75" => "Heavy continuous snow",
        "76" => "Diamond dust",
        "77" => "Snow grains",
        "78" => "Isolated star-like snow crystals",
        "79" => "Ice pellets",
        "80" => "Slight rain showers",
        "81" => "Moderate or heavy rain showers",
        "82" => "Violent rain showers",
        "83" => "Slight showers of rain and snow",
        "84" => "Moderate or heavy showers of rain and snow",
        "85" => "Slight snow showers",
        "86" => "Moderate or heavy snow showers",
        "87" => "Slight hail showers",
        "88" => "Moderate or heavy hail showers",
        "89" => "Violent hail showers",
        "90" => "Slight thunderstorm",
        "91" => "Moderate or heavy thunderstorm",
        "92" => "Violent thunderstorm",
        "93" => "Slight thunderstorm with hail",
        "94" => "Moderate or heavy thunderstorm with hail",
        "95" => "Violent thunderstorm with hail",
        "96" => "Slight thunderstorm with hail and snow",
        "97" => "Moderate or heavy thunderstorm with hail and snow",
        "98" => "Thunderstorm with dust or sandstorm",
        "99" => "Violent thunderstorm with hail",
        _ => return None,
    };
    Some(text)
}

/// Description of the first past weather code `W1`
pub fn past_weather_1(code: &str) -> Option<&'static str> {
    let text = match code {
        "0" => "Cloud covering half of the sky or less throughout the period",
        "1" => {
            "Cloud covering more than half of the sky during part of the period \
             and half or less during part of the period"
        }
        "2" => "Cloud covering more than half of the sky throughout the period",
        "3" => "Sandstorm, duststorm or blowing snow",
        "4" => "Fog or thick haze",
        "5" => "Drizzle",
        "6" => "Rain",
        "7" => "Snow, or rain and snow mixed",
        "8" => "Showers",
        "9" => "Thunderstorms",
        _ => return None,
    };
    Some(text)
}

/// Description of the second past weather code `W2`
pub fn past_weather_2(code: &str) -> Option<&'static str> {
    let text = match code {
        "0" => "No cloud throughout the period",
        "1" => "Cloud covering half of the sky or less throughout the period",
        "2" => {
            "Cloud covering more than half of the sky during part of the period \
             and half or less during part of the period"
        }
        "3" => "Cloud covering more than half of the sky throughout the period",
        "4" => "Fog or thick haze",
        "5" => "Drizzle",
        "6" => "Rain",
        "7" => "Snow, or rain and snow mixed",
        "8" => "Showers",
        "9" => "Thunderstorms",
        _ => return None,
    };
    Some(text)
}

/// Description of the precipitation indicator `iR`
pub fn precipitation_indicator(code: &str) -> Option<&'static str> {
    let text = match code {
        "0" => "Included in sections 1 and 3",
        "1" => "Included in section 1",
        "2" => "Included in section 3",
        "3" => "Omitted (precipitation amount = 0)",
        "4" => "Omitted (precipitation data not available)",
        _ => return None,
    };
    Some(text)
}

/// Description of the station type and weather indicator `iX`
pub fn station_operation(code: &str) -> Option<&'static str> {
    let text = match code {
        "1" => "Manned, included",
        "2" => "Manned, omitted (no significant phenomenon)",
        "3" => "Manned, omitted (no observation, data not available)",
        "4" => "Automatic, included",
        "5" => "Automatic, omitted (no significant phenomenon)",
        "6" => "Automatic, omitted (no observation, data not available)",
        _ => return None,
    };
    Some(text)
}
