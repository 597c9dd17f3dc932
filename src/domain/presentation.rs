//! Display derivations over a [`WeatherSnapshot`] and an instant.
//!
//! Every selector is an ordered rule table evaluated top to bottom; the first
//! matching predicate wins. Nothing here performs I/O.

use chrono::{DateTime, Timelike, Utc};

use super::{
    clock::local_time,
    weather::{Units, WeatherSnapshot, format_temp_delta},
};

type CodeRule = (fn(u8) -> bool, &'static str);

const CONDITION_LADDER: &[CodeRule] = &[
    (|code| code == 0, "Clear Sky"),
    (|code| code <= 3, "Partly Cloudy"),
    (|code| code <= 48, "Fog / Mist"),
    (|code| code <= 57, "Drizzle"),
    (|code| code <= 67, "Rain"),
    (|code| code <= 77, "Snow"),
    (|code| code <= 82, "Showers"),
    (|code| code <= 86, "Snow Showers"),
    (|code| code >= 95, "Thunderstorm"),
];

#[must_use]
pub fn condition_text(code: u8) -> &'static str {
    first_match(CONDITION_LADDER, code).unwrap_or("Unknown")
}

fn first_match(rules: &[CodeRule], code: u8) -> Option<&'static str> {
    rules
        .iter()
        .find_map(|(matches, value)| matches(code).then_some(*value))
}

pub const DEFAULT_ICON: &str = "sun.svg";

/// (predicate, day icon, night icon)
const ICON_LADDER: &[(fn(u8) -> bool, &str, &str)] = &[
    (|code| code >= 95, "thunder.svg", "thunder.svg"),
    (|code| code >= 71, "snowy-6.svg", "snowy-6.svg"),
    // also catches the 80+ shower codes that the snow rule left behind
    (|code| code >= 51, "rainy-6.svg", "rainy-6.svg"),
    (|code| code >= 45, "fog-day.svg", "fog-night.svg"),
    (
        |code| (1..=3).contains(&code),
        "cloudy-day-3.svg",
        "cloudy-night-3.svg",
    ),
];

#[must_use]
pub fn icon_key(code: u8, is_daytime: bool) -> &'static str {
    let Some((_, day, night)) = ICON_LADDER.iter().find(|(matches, _, _)| matches(code)) else {
        return if is_daytime { DEFAULT_ICON } else { "moon.svg" };
    };
    if is_daytime { *day } else { *night }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayPart {
    Morning,
    Noon,
    Evening,
}

impl DayPart {
    #[must_use]
    pub fn from_hour(hour: u32) -> Self {
        match hour {
            5..=11 => DayPart::Morning,
            12..=16 => DayPart::Noon,
            _ => DayPart::Evening,
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            DayPart::Morning => "morning",
            DayPart::Noon => "noon",
            DayPart::Evening => "evening",
        }
    }
}

#[must_use]
pub fn is_night_hour(hour: u32) -> bool {
    hour >= 19 || hour < 5
}

#[must_use]
pub fn local_hour(utc_offset_seconds: i32, now: DateTime<Utc>) -> u32 {
    local_time(now, utc_offset_seconds).hour()
}

#[must_use]
pub fn is_daytime(utc_offset_seconds: i32, now: DateTime<Utc>) -> bool {
    !is_night_hour(local_hour(utc_offset_seconds, now))
}

#[derive(Debug, Clone, Copy)]
struct SkyContext {
    code: u8,
    hour: u32,
    night: bool,
    part: DayPart,
}

type SkyRule = (fn(&SkyContext) -> bool, fn(&SkyContext) -> String);

const BACKGROUND_LADDER: &[SkyRule] = &[
    (
        |sky| sky.code >= 95,
        |sky| {
            let variant = if sky.night {
                "night"
            } else if sky.hour < 12 {
                "morning"
            } else {
                "evening"
            };
            format!("thunder-{variant}.png")
        },
    ),
    (|sky| sky.code >= 71, |_| "snow-heavy.png".to_string()),
    (
        |sky| (45..=48).contains(&sky.code),
        |sky| format!("fog-{}.png", sky.part.as_str()),
    ),
    (
        |sky| (51..=67).contains(&sky.code) || sky.code >= 80,
        |sky| format!("rain-{}.png", sky.part.as_str()),
    ),
    (
        |sky| (1..=3).contains(&sky.code),
        |sky| {
            if sky.night {
                "cloud-night.png".to_string()
            } else {
                format!("cloud-{}.png", sky.part.as_str())
            }
        },
    ),
];

/// Background for a weather code at the given local hour (0..=23).
#[must_use]
pub fn background_key_at_hour(code: u8, hour: u32) -> String {
    let sky = SkyContext {
        code,
        hour,
        night: is_night_hour(hour),
        part: DayPart::from_hour(hour),
    };
    BACKGROUND_LADDER
        .iter()
        .find(|(matches, _)| matches(&sky))
        .map_or_else(|| clear_sky_background(&sky), |(_, key)| key(&sky))
}

fn clear_sky_background(sky: &SkyContext) -> String {
    if sky.night {
        let variant = if sky.hour < 22 { "evening" } else { "night" };
        format!("moon-{variant}.png")
    } else {
        format!("sun-{}.png", sky.part.as_str())
    }
}

#[must_use]
pub fn background_key(code: u8, utc_offset_seconds: i32, now: DateTime<Utc>) -> String {
    background_key_at_hour(code, local_hour(utc_offset_seconds, now))
}

#[derive(Debug, Clone, Copy)]
struct AdviceContext {
    code: u8,
    precip_prob: u8,
    uv_index: f64,
    humidity: f64,
    /// Only known when the location reports a non-zero offset.
    local_hour: Option<u32>,
}

const ADVICE_LADDER: &[(fn(&AdviceContext) -> bool, &str)] = &[
    (|ctx| ctx.code >= 95, "Storm Warning: Stay Indoors"),
    (
        |ctx| (51..=67).contains(&ctx.code) || ctx.precip_prob > 40,
        "Rain Likely: Grab an Umbrella",
    ),
    (|ctx| ctx.code >= 71, "Snowfall: Drive Carefully"),
    (
        |ctx| (45..=48).contains(&ctx.code),
        "Low Visibility: Caution",
    ),
    (
        |ctx| matches!(ctx.local_hour, Some(6..=7)),
        "Golden Hour: Watch the Sunrise",
    ),
    (
        |ctx| matches!(ctx.local_hour, Some(17..=18)),
        "Golden Hour: Catch the Sunset",
    ),
    (|ctx| ctx.uv_index > 7.0, "Extreme UV: Wear Sunscreen"),
    (|ctx| ctx.humidity > 90.0, "Very Humid Today"),
];

#[must_use]
pub fn smart_advice(snapshot: &WeatherSnapshot, now: DateTime<Utc>) -> &'static str {
    let ctx = AdviceContext {
        code: snapshot.weather_code,
        precip_prob: snapshot.precip_prob,
        uv_index: snapshot.uv_index,
        humidity: snapshot.humidity,
        local_hour: (snapshot.utc_offset_seconds != 0)
            .then(|| local_hour(snapshot.utc_offset_seconds, now)),
    };
    ADVICE_LADDER
        .iter()
        .find_map(|(matches, advice)| matches(&ctx).then_some(*advice))
        .unwrap_or("Enjoy your day")
}

#[must_use]
pub fn yesterday_comparison(snapshot: &WeatherSnapshot, units: Units) -> String {
    let delta = snapshot.current_temp_c - snapshot.yesterday_temp_c;
    if delta.abs() < 1.0 {
        return "Similar temperature to yesterday.".to_string();
    }
    let direction = if delta > 0.0 { "Warmer" } else { "Cooler" };
    format!(
        "{} {direction} than yesterday.",
        format_temp_delta(delta.abs(), units)
    )
}

/// `"02:05 PM | Thu, Feb 12 (GMT+05:30)"`
#[must_use]
pub fn local_time_header(utc_offset_seconds: i32, now: DateTime<Utc>) -> String {
    let local = local_time(now, utc_offset_seconds);
    let zone = if local.offset().local_minus_utc() == 0 {
        "GMT+0".to_string()
    } else {
        format!("GMT{}", local.format("%:z"))
    };
    format!("{} ({zone})", local.format("%I:%M %p | %a, %b %-d"))
}

/// Rotating tip lines: the day-over-day comparison, then the advice.
#[must_use]
pub fn tips(snapshot: &WeatherSnapshot, now: DateTime<Utc>, units: Units) -> Vec<String> {
    vec![
        yesterday_comparison(snapshot, units),
        smart_advice(snapshot, now).to_string(),
    ]
}
