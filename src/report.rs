use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::{
    app::history::HistoryEntry,
    assets::{Asset, AssetCache},
    domain::{
        pagination::HourlyPager,
        presentation::{background_key, condition_text, icon_key, is_daytime, local_time_header, tips},
        weather::{
            CitySearchResult, Units, WeatherSnapshot, convert_temp, format_percent, format_temp,
            format_wind, round_temp,
        },
    },
};

const HERO_ICON_SIZE: u32 = 110;

/// Plain-text dashboard for one snapshot, showing the pager's current hourly page.
#[must_use]
pub fn render_dashboard(
    snapshot: &WeatherSnapshot,
    units: Units,
    pager: &HourlyPager,
    now: DateTime<Utc>,
    assets: &AssetCache,
) -> String {
    let mut lines = Vec::new();
    push_hero_lines(&mut lines, snapshot, units, now, assets);
    push_hourly_lines(&mut lines, snapshot, units, pager);
    push_daily_lines(&mut lines, snapshot, units);
    lines.join("\n")
}

fn push_hero_lines(
    lines: &mut Vec<String>,
    snapshot: &WeatherSnapshot,
    units: Units,
    now: DateTime<Utc>,
    assets: &AssetCache,
) {
    let daytime = is_daytime(snapshot.utc_offset_seconds, now);
    let icon = icon_key(snapshot.weather_code, daytime);
    let scene = background_key(snapshot.weather_code, snapshot.utc_offset_seconds, now);

    lines.push(snapshot.location_label());
    lines.push(local_time_header(snapshot.utc_offset_seconds, now));
    lines.push(format!(
        "{}  {}  [{}]",
        format_temp(snapshot.current_temp_c, units),
        condition_text(snapshot.weather_code),
        asset_label(assets.icon(icon, HERO_ICON_SIZE, HERO_ICON_SIZE), icon)
    ));
    lines.push(format!(
        "Humidity {}   Wind {}   UV {:.1}   Rain {}",
        format_percent(snapshot.humidity),
        format_wind(snapshot.wind_speed_kmh, units),
        snapshot.uv_index,
        format_percent(f64::from(snapshot.precip_prob))
    ));
    lines.push(format!(
        "Sunrise {}   Sunset {}",
        snapshot.sunrise, snapshot.sunset
    ));
    lines.push(format!(
        "Scene {}",
        asset_label(assets.background(&scene), &scene)
    ));
    for tip in tips(snapshot, now, units) {
        lines.push(format!("  * {tip}"));
    }
}

fn push_hourly_lines(
    lines: &mut Vec<String>,
    snapshot: &WeatherSnapshot,
    units: Units,
    pager: &HourlyPager,
) {
    lines.push(String::new());
    lines.push(format!(
        "Hourly ({}/{})",
        pager.page() + 1,
        pager.page_count().max(1)
    ));
    let page = pager.slice(&snapshot.hourly);
    if page.is_empty() {
        lines.push("  No hourly data".to_string());
        return;
    }
    for hour in page {
        lines.push(format!(
            "  {:<6} {:>5}  {:<18} rain {:>4}  wind {}",
            hour.label,
            format_temp(hour.temp_c, units),
            condition_text(hour.weather_code),
            format_percent(f64::from(hour.rain_chance)),
            format_wind(hour.wind_kmh, units)
        ));
    }
}

fn push_daily_lines(lines: &mut Vec<String>, snapshot: &WeatherSnapshot, units: Units) {
    lines.push(String::new());
    lines.push("Daily".to_string());
    for day in &snapshot.daily {
        lines.push(format!(
            "  {} {:<7} {:>4} / {:<4} {:<18} rain {:>4}",
            day.day_name,
            day.date_text,
            round_temp(convert_temp(day.max_temp_c, units)),
            round_temp(convert_temp(day.min_temp_c, units)),
            condition_text(day.weather_code),
            format_percent(f64::from(day.precip_prob))
        ));
    }
}

fn asset_label(asset: Option<Arc<Asset>>, key: &str) -> String {
    asset.map_or_else(
        || key.to_string(),
        |asset| asset.path.display().to_string(),
    )
}

/// Numbered choices after an ambiguous search.
#[must_use]
pub fn render_candidates(candidates: &[CitySearchResult]) -> String {
    let mut lines = vec!["Several places match; rerun with --pick N:".to_string()];
    lines.extend(
        candidates
            .iter()
            .enumerate()
            .map(|(idx, city)| format!("  {}. {}", idx + 1, city.display_name())),
    );
    lines.join("\n")
}

#[must_use]
pub fn render_history(entries: &[HistoryEntry]) -> String {
    if entries.is_empty() {
        return "No recent searches".to_string();
    }
    entries
        .iter()
        .enumerate()
        .map(|(idx, entry)| format!("  {}. {}", idx + 1, entry.recent_label()))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{sample_city, sample_snapshot, utc_at};

    fn empty_assets() -> (tempfile::TempDir, AssetCache) {
        let dir = tempfile::tempdir().expect("temp dir");
        let cache = AssetCache::new(dir.path());
        (dir, cache)
    }

    #[test]
    fn dashboard_lists_header_and_first_hourly_page() {
        let (_dir, assets) = empty_assets();
        let snapshot = sample_snapshot();
        let pager = HourlyPager::new(snapshot.hourly.len());
        let text = render_dashboard(&snapshot, Units::Celsius, &pager, utc_at(9, 0), &assets);

        assert!(text.starts_with("Stockholm, Sweden\n10:00 AM | Thu, Feb 12 (GMT+01:00)"));
        assert!(text.contains("7°  Clear Sky  [sun.svg]"), "{text}");
        assert!(text.contains("Scene sun-morning.png"), "{text}");
        assert!(text.contains("Hourly (1/5)"));
        assert!(text.contains("  Now "));
        assert!(text.contains("  Fri Feb 13"));
    }

    #[test]
    fn dashboard_respects_units() {
        let (_dir, assets) = empty_assets();
        let snapshot = sample_snapshot();
        let pager = HourlyPager::new(snapshot.hourly.len());
        let text = render_dashboard(&snapshot, Units::Fahrenheit, &pager, utc_at(9, 0), &assets);
        assert!(text.contains("45°  Clear Sky"), "{text}");
        assert!(text.contains("mph"));
    }

    #[test]
    fn candidates_are_numbered_from_one() {
        let text = render_candidates(&[sample_city()]);
        assert!(text.ends_with("  1. Stockholm, Stockholm County, Sweden"));
    }

    #[test]
    fn empty_history_has_placeholder() {
        assert_eq!(render_history(&[]), "No recent searches");
    }
}
