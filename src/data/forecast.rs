use std::sync::Arc;

use chrono::Timelike;
use reqwest::Client;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::{
    domain::{
        clock::{Clock, SystemClock, local_time},
        weather::{
            DailyForecastEntry, HourlyForecastEntry, WeatherSnapshot, clock_time_label,
            hour_label, parse_date, parse_datetime,
        },
    },
    error::FetchError,
};

const FORECAST_URL: &str = "https://api.open-meteo.com/v1/forecast";

/// Daily index 0 is yesterday and 1 is today; the forecast list starts after them.
const YESTERDAY: usize = 0;
const TODAY: usize = 1;
const FIRST_FORECAST_DAY: usize = 2;
const HOURS_AHEAD: usize = 24;
const MISSING_TIME: &str = "--:--";

#[derive(Debug, Clone)]
pub struct ForecastClient {
    client: Client,
    base_url: String,
    clock: Arc<dyn Clock>,
}

impl Default for ForecastClient {
    fn default() -> Self {
        Self::new()
    }
}

impl ForecastClient {
    pub fn new() -> Self {
        Self::with_base_url(FORECAST_URL)
    }

    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            client: super::http_client(),
            base_url: base_url.into(),
            clock: Arc::new(SystemClock),
        }
    }

    #[must_use]
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// One combined request for current, hourly and daily data (yesterday
    /// through sixteen days ahead), normalized into a fresh snapshot.
    pub async fn fetch(
        &self,
        latitude: f64,
        longitude: f64,
        city: &str,
        country: &str,
    ) -> Result<WeatherSnapshot, FetchError> {
        tracing::debug!(latitude, longitude, city, "forecast request");
        let body = self
            .client
            .get(&self.base_url)
            .query(&[
                ("latitude", latitude.to_string()),
                ("longitude", longitude.to_string()),
                (
                    "current",
                    "temperature_2m,relative_humidity_2m,weather_code,wind_speed_10m".to_string(),
                ),
                (
                    "hourly",
                    "temperature_2m,weather_code,precipitation_probability,wind_speed_10m"
                        .to_string(),
                ),
                (
                    "daily",
                    "temperature_2m_max,temperature_2m_min,weather_code,uv_index_max,precipitation_probability_max,wind_speed_10m_max,sunrise,sunset"
                        .to_string(),
                ),
                ("timezone", "auto".to_string()),
                ("past_days", "1".to_string()),
                ("forecast_days", "16".to_string()),
            ])
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;

        let payload: ForecastResponse = serde_json::from_str(&body)?;
        Ok(build_snapshot(&payload, city, country, self.clock.now_utc()))
    }
}

pub(crate) fn build_snapshot(
    payload: &ForecastResponse,
    city: &str,
    country: &str,
    now: chrono::DateTime<chrono::Utc>,
) -> WeatherSnapshot {
    let utc_offset_seconds = payload.utc_offset_seconds.unwrap_or_default() as i32;
    let daily = &payload.daily;
    let current = &payload.current;

    WeatherSnapshot {
        city_name: city.to_string(),
        country: country.to_string(),
        utc_offset_seconds,
        current_temp_c: current.temperature_2m.unwrap_or_default(),
        humidity: current.relative_humidity_2m.unwrap_or_default(),
        wind_speed_kmh: current.wind_speed_10m.unwrap_or_default(),
        weather_code: to_code(current.weather_code.unwrap_or_default()),
        uv_index: number_at(&daily.uv_index_max, TODAY),
        precip_prob: percent_at(&daily.precipitation_probability_max, TODAY),
        sunrise: clock_at(&daily.sunrise, TODAY),
        sunset: clock_at(&daily.sunset, TODAY),
        yesterday_temp_c: number_at(&daily.temperature_2m_max, YESTERDAY),
        daily: parse_daily(daily),
        hourly: parse_hourly(&payload.hourly, &hour_anchor(now, utc_offset_seconds)),
    }
}

fn parse_daily(daily: &DailyBlock) -> Vec<DailyForecastEntry> {
    let limit = daily.time.len().min(daily.temperature_2m_max.len());
    (FIRST_FORECAST_DAY..limit)
        .filter_map(|idx| {
            let date = daily.time[idx].as_deref().and_then(parse_date)?;
            Some(DailyForecastEntry {
                day_name: date.format("%a").to_string(),
                date_text: date.format("%b %-d").to_string(),
                max_temp_c: number_at(&daily.temperature_2m_max, idx),
                min_temp_c: number_at(&daily.temperature_2m_min, idx),
                max_wind_kmh: number_at(&daily.wind_speed_10m_max, idx),
                weather_code: to_code(number_at(&daily.weather_code, idx)),
                precip_prob: percent_at(&daily.precipitation_probability_max, idx),
            })
        })
        .collect()
}

/// `YYYY-MM-DDTHH` of the location's current local hour.
pub(crate) fn hour_anchor(now: chrono::DateTime<chrono::Utc>, utc_offset_seconds: i32) -> String {
    local_time(now, utc_offset_seconds)
        .format("%Y-%m-%dT%H")
        .to_string()
}

fn parse_hourly(hourly: &HourlyBlock, anchor: &str) -> Vec<HourlyForecastEntry> {
    let Some(start) = hourly
        .time
        .iter()
        .position(|time| time.as_deref().is_some_and(|t| t.starts_with(anchor)))
    else {
        tracing::debug!(anchor, "current hour not in hourly series");
        return Vec::new();
    };

    hourly
        .time
        .iter()
        .enumerate()
        .skip(start)
        .take(HOURS_AHEAD)
        .map(|(idx, raw)| HourlyForecastEntry {
            label: if idx == start {
                "Now".to_string()
            } else {
                hourly_label(raw.as_deref())
            },
            temp_c: number_at(&hourly.temperature_2m, idx),
            weather_code: to_code(number_at(&hourly.weather_code, idx)),
            rain_chance: percent_at(&hourly.precipitation_probability, idx),
            wind_kmh: number_at(&hourly.wind_speed_10m, idx),
        })
        .collect()
}

fn hourly_label(raw: Option<&str>) -> String {
    match raw.and_then(parse_datetime) {
        Some(time) => hour_label(time.hour()),
        None => raw.unwrap_or_default().to_string(),
    }
}

fn number_at(series: &[Option<f64>], idx: usize) -> f64 {
    series.get(idx).copied().flatten().unwrap_or_default()
}

fn percent_at(series: &[Option<f64>], idx: usize) -> u8 {
    number_at(series, idx).clamp(0.0, 100.0) as u8
}

fn to_code(value: f64) -> u8 {
    value.clamp(0.0, f64::from(u8::MAX)) as u8
}

fn clock_at(series: &[Option<String>], idx: usize) -> String {
    series
        .get(idx)
        .and_then(Option::as_deref)
        .and_then(parse_datetime)
        .map_or_else(|| MISSING_TIME.to_string(), clock_time_label)
}

#[derive(Debug, Deserialize)]
pub(crate) struct ForecastResponse {
    #[serde(default, deserialize_with = "lenient_number")]
    utc_offset_seconds: Option<f64>,
    current: CurrentBlock,
    hourly: HourlyBlock,
    daily: DailyBlock,
}

#[derive(Debug, Deserialize)]
struct CurrentBlock {
    #[serde(default, deserialize_with = "lenient_number")]
    temperature_2m: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    relative_humidity_2m: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    weather_code: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    wind_speed_10m: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct HourlyBlock {
    #[serde(default, deserialize_with = "lenient_text_series")]
    time: Vec<Option<String>>,
    #[serde(default, deserialize_with = "lenient_series")]
    temperature_2m: Vec<Option<f64>>,
    #[serde(default, deserialize_with = "lenient_series")]
    weather_code: Vec<Option<f64>>,
    #[serde(default, deserialize_with = "lenient_series")]
    precipitation_probability: Vec<Option<f64>>,
    #[serde(default, deserialize_with = "lenient_series")]
    wind_speed_10m: Vec<Option<f64>>,
}

#[derive(Debug, Deserialize)]
struct DailyBlock {
    #[serde(default, deserialize_with = "lenient_text_series")]
    time: Vec<Option<String>>,
    #[serde(default, deserialize_with = "lenient_series")]
    temperature_2m_max: Vec<Option<f64>>,
    #[serde(default, deserialize_with = "lenient_series")]
    temperature_2m_min: Vec<Option<f64>>,
    #[serde(default, deserialize_with = "lenient_series")]
    weather_code: Vec<Option<f64>>,
    #[serde(default, deserialize_with = "lenient_series")]
    uv_index_max: Vec<Option<f64>>,
    #[serde(default, deserialize_with = "lenient_series")]
    precipitation_probability_max: Vec<Option<f64>>,
    #[serde(default, deserialize_with = "lenient_series")]
    wind_speed_10m_max: Vec<Option<f64>>,
    #[serde(default, deserialize_with = "lenient_text_series")]
    sunrise: Vec<Option<String>>,
    #[serde(default, deserialize_with = "lenient_text_series")]
    sunset: Vec<Option<String>>,
}

// A null, string or otherwise odd value inside a block reads as missing
// instead of failing the whole payload.
fn lenient_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Value::deserialize(deserializer)?.as_f64())
}

fn lenient_series<'de, D>(deserializer: D) -> Result<Vec<Option<f64>>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Array(items) => items.iter().map(Value::as_f64).collect(),
        _ => Vec::new(),
    })
}

fn lenient_text_series<'de, D>(deserializer: D) -> Result<Vec<Option<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Array(items) => items
            .iter()
            .map(|item| item.as_str().map(str::to_string))
            .collect(),
        _ => Vec::new(),
    })
}
