use serde::{Deserialize, Serialize};

mod conversions;

pub use conversions::{
    clock_time_label, convert_temp, convert_wind_mph, format_percent, format_temp,
    format_temp_delta, format_wind, hour_label, parse_date, parse_datetime, round_temp,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Units {
    #[default]
    Celsius,
    Fahrenheit,
}

impl Units {
    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            Units::Celsius => Units::Fahrenheit,
            Units::Fahrenheit => Units::Celsius,
        }
    }
}

/// One geocoding candidate.
#[derive(Debug, Clone, PartialEq)]
pub struct CitySearchResult {
    pub name: String,
    pub region: Option<String>,
    pub country: String,
    pub latitude: f64,
    pub longitude: f64,
}

impl CitySearchResult {
    /// `"name, region, country"`, skipping empty parts. History dedup keys on this.
    #[must_use]
    pub fn display_name(&self) -> String {
        let mut parts = vec![self.name.as_str()];
        if let Some(region) = self.region.as_deref().filter(|r| !r.is_empty()) {
            parts.push(region);
        }
        if !self.country.is_empty() {
            parts.push(&self.country);
        }
        parts.join(", ")
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum GeocodeResolution {
    Selected(CitySearchResult),
    NeedsDisambiguation(Vec<CitySearchResult>),
    NotFound(String),
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct DailyForecastEntry {
    pub day_name: String,
    pub date_text: String,
    pub max_temp_c: f64,
    pub min_temp_c: f64,
    pub max_wind_kmh: f64,
    pub weather_code: u8,
    pub precip_prob: u8,
}

#[derive(Debug, Clone, PartialEq)]
pub struct HourlyForecastEntry {
    pub label: String,
    pub temp_c: f64,
    pub weather_code: u8,
    pub rain_chance: u8,
    pub wind_kmh: f64,
}

/// Normalized result of one forecast fetch. Temperatures are always Celsius.
#[derive(Debug, Clone, PartialEq)]
pub struct WeatherSnapshot {
    pub city_name: String,
    pub country: String,
    pub utc_offset_seconds: i32,
    pub current_temp_c: f64,
    pub humidity: f64,
    pub wind_speed_kmh: f64,
    pub weather_code: u8,
    pub uv_index: f64,
    pub precip_prob: u8,
    pub sunrise: String,
    pub sunset: String,
    pub yesterday_temp_c: f64,
    pub daily: Vec<DailyForecastEntry>,
    pub hourly: Vec<HourlyForecastEntry>,
}

impl WeatherSnapshot {
    #[must_use]
    pub fn location_label(&self) -> String {
        if self.country.is_empty() {
            self.city_name.clone()
        } else {
            format!("{}, {}", self.city_name, self.country)
        }
    }

    #[must_use]
    pub fn current_temp(&self, units: Units) -> i32 {
        round_temp(convert_temp(self.current_temp_c, units))
    }
}
