#![allow(clippy::cast_precision_loss)]
#![allow(dead_code)]

use std::sync::Arc;

use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, TimeZone, Utc};
use serde_json::{Value, json};
use skyglass::{
    app::{history::SearchHistoryStore, settings::Services},
    data::{forecast::ForecastClient, geocode::GeocodeClient, geoip::GeoIpClient},
    domain::clock::{Clock, FixedClock},
};

pub const GEOCODE_PATH: &str = "/v1/search";
pub const FORECAST_PATH: &str = "/v1/forecast";
pub const IP_PATH: &str = "/json";

/// 05:20 local in Stockholm (UTC+1), hourly index 5 of [`forecast_body`].
pub fn fixed_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 2, 12, 4, 20, 0)
        .single()
        .expect("valid fixture time")
}

pub fn services(base: &str) -> Services {
    let clock: Arc<dyn Clock> = Arc::new(FixedClock(fixed_now()));
    Services {
        geocoder: GeocodeClient::with_base_url(format!("{base}{GEOCODE_PATH}")),
        forecaster: ForecastClient::with_base_url(format!("{base}{FORECAST_PATH}"))
            .with_clock(Arc::clone(&clock)),
        geoip: GeoIpClient::with_base_url(format!("{base}{IP_PATH}")),
        history: Arc::new(SearchHistoryStore::in_memory()),
        clock,
    }
}

pub fn place(name: &str, admin1: Option<&str>, country: &str, lat: f64, lon: f64) -> Value {
    json!({
        "name": name,
        "latitude": lat,
        "longitude": lon,
        "country": country,
        "admin1": admin1,
        "timezone": "auto",
    })
}

pub fn geocode_body(results: Vec<Value>) -> Value {
    json!({ "results": results, "generationtime_ms": 0.4 })
}

pub fn forecast_body() -> Value {
    let hours = 48_i64;
    let days = 18_i64;
    let start = NaiveDateTime::parse_from_str("2026-02-12T00:00", "%Y-%m-%dT%H:%M")
        .expect("valid fixture start");
    let first_day = NaiveDate::from_ymd_opt(2026, 2, 11).expect("valid fixture day");

    let hourly_time: Vec<String> = (0..hours)
        .map(|h| (start + Duration::hours(h)).format("%Y-%m-%dT%H:%M").to_string())
        .collect();
    let daily_time: Vec<String> = (0..days)
        .map(|d| (first_day + Duration::days(d)).format("%Y-%m-%d").to_string())
        .collect();
    let series = |count: i64, base: f64| (0..count).map(|i| base + i as f64).collect::<Vec<_>>();

    json!({
        "latitude": 59.33,
        "longitude": 18.07,
        "utc_offset_seconds": 3600,
        "timezone": "Europe/Stockholm",
        "current": {
            "time": "2026-02-12T05:15",
            "temperature_2m": -1.4,
            "relative_humidity_2m": 88,
            "weather_code": 71,
            "wind_speed_10m": 18.5
        },
        "hourly": {
            "time": hourly_time,
            "temperature_2m": series(hours, -6.0),
            "weather_code": vec![71; hours as usize],
            "precipitation_probability": vec![55; hours as usize],
            "wind_speed_10m": series(hours, 10.0)
        },
        "daily": {
            "time": daily_time,
            "temperature_2m_max": series(days, 0.0),
            "temperature_2m_min": series(days, -8.0),
            "weather_code": vec![73; days as usize],
            "uv_index_max": vec![0.8; days as usize],
            "precipitation_probability_max": vec![60; days as usize],
            "wind_speed_10m_max": vec![24.0; days as usize],
            "sunrise": vec!["2026-02-12T07:42"; days as usize],
            "sunset": vec!["2026-02-12T16:31"; days as usize]
        }
    })
}
