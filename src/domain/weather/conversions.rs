use chrono::{NaiveDate, NaiveDateTime};

use super::Units;

const KMH_PER_MPH: f64 = 1.609;

#[must_use]
pub fn convert_temp(celsius: f64, units: Units) -> f64 {
    match units {
        Units::Celsius => celsius,
        Units::Fahrenheit => celsius * 1.8 + 32.0,
    }
}

/// Rounds half away from zero.
#[must_use]
pub fn round_temp(value: f64) -> i32 {
    value.round() as i32
}

#[must_use]
pub fn format_temp(celsius: f64, units: Units) -> String {
    format!("{}°", round_temp(convert_temp(celsius, units)))
}

/// A temperature difference: scaled but never shifted by the +32 offset.
#[must_use]
pub fn format_temp_delta(delta_c: f64, units: Units) -> String {
    let scaled = match units {
        Units::Celsius => delta_c,
        Units::Fahrenheit => delta_c * 1.8,
    };
    format!("{}°", round_temp(scaled))
}

#[must_use]
pub fn convert_wind_mph(kmh: f64) -> f64 {
    kmh / KMH_PER_MPH
}

#[must_use]
pub fn format_wind(kmh: f64, units: Units) -> String {
    match units {
        Units::Celsius => format!("{} km/h", kmh.round() as i64),
        Units::Fahrenheit => format!("{:.1} mph", convert_wind_mph(kmh)),
    }
}

#[must_use]
pub fn format_percent(value: f64) -> String {
    format!("{}%", value as i64)
}

/// `"2 PM"`, `"12 AM"`; midnight and noon map to 12.
#[must_use]
pub fn hour_label(hour: u32) -> String {
    let suffix = if hour >= 12 { "PM" } else { "AM" };
    let h12 = match hour {
        0 => 12,
        h if h > 12 => h - 12,
        h => h,
    };
    format!("{h12} {suffix}")
}

/// `"06:42 AM"`
#[must_use]
pub fn clock_time_label(time: NaiveDateTime) -> String {
    time.format("%I:%M %p").to_string()
}

#[must_use]
pub fn parse_datetime(value: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M")
        .or_else(|_| NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S"))
        .ok()
}

#[must_use]
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").ok()
}
