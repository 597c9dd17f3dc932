use chrono::{DateTime, TimeZone, Utc};

use crate::domain::weather::{
    CitySearchResult, DailyForecastEntry, HourlyForecastEntry, WeatherSnapshot, hour_label,
};

pub(crate) fn utc_at(hour: u32, minute: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 2, 12, hour, minute, 0)
        .single()
        .expect("valid fixture time")
}

pub(crate) fn sample_city() -> CitySearchResult {
    CitySearchResult {
        name: "Stockholm".to_string(),
        region: Some("Stockholm County".to_string()),
        country: "Sweden".to_string(),
        latitude: 59.3293,
        longitude: 18.0686,
    }
}

/// Calm clear morning in Stockholm: no advice rule fires outside golden hours.
pub(crate) fn sample_snapshot() -> WeatherSnapshot {
    let daily = ["Fri", "Sat", "Sun", "Mon", "Tue"]
        .iter()
        .enumerate()
        .map(|(idx, day)| DailyForecastEntry {
            day_name: (*day).to_string(),
            date_text: format!("Feb {}", 13 + idx),
            max_temp_c: 6.0 + idx as f64,
            min_temp_c: -2.0 + idx as f64,
            max_wind_kmh: 14.0,
            weather_code: if idx % 2 == 0 { 2 } else { 61 },
            precip_prob: (idx * 15) as u8,
        })
        .collect();

    let hourly = (0..24)
        .map(|idx| HourlyForecastEntry {
            label: if idx == 0 {
                "Now".to_string()
            } else {
                hour_label((5 + idx) % 24)
            },
            temp_c: 4.0 + f64::from(idx % 6),
            weather_code: 3,
            rain_chance: 10,
            wind_kmh: 11.0,
        })
        .collect();

    WeatherSnapshot {
        city_name: "Stockholm".to_string(),
        country: "Sweden".to_string(),
        utc_offset_seconds: 3_600,
        current_temp_c: 7.2,
        humidity: 73.0,
        wind_speed_kmh: 12.0,
        weather_code: 0,
        uv_index: 2.0,
        precip_prob: 20,
        sunrise: "07:42 AM".to_string(),
        sunset: "04:31 PM".to_string(),
        yesterday_temp_c: 6.9,
        daily,
        hourly,
    }
}
