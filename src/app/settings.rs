use std::{ffi::OsString, path::PathBuf, sync::Arc};

use crate::{
    app::history::{FileBackend, HistoryBackend, MemoryBackend, SearchHistoryStore},
    cli::{Cli, UnitsArg},
    data::{forecast::ForecastClient, geocode::GeocodeClient, geoip::GeoIpClient},
    domain::{
        clock::{Clock, SystemClock},
        weather::Units,
    },
};

const CONFIG_DIR_ENV: &str = "SKYGLASS_CONFIG_DIR";
const HISTORY_FILE: &str = "history.json";

/// Everything the session needs, resolved from the command line and environment.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub units: Units,
    pub forecast_url: Option<String>,
    pub geocode_url: Option<String>,
    pub ip_url: Option<String>,
    pub assets_dir: PathBuf,
    pub history_path: Option<PathBuf>,
}

impl AppConfig {
    #[must_use]
    pub fn from_cli(cli: &Cli) -> Self {
        Self {
            units: units_from_cli(cli.units),
            forecast_url: cli.forecast_url.clone(),
            geocode_url: cli.geocode_url.clone(),
            ip_url: cli.ip_url.clone(),
            assets_dir: cli
                .assets_dir
                .clone()
                .unwrap_or_else(|| PathBuf::from("resources")),
            history_path: history_path(),
        }
    }
}

#[must_use]
pub fn units_from_cli(units: UnitsArg) -> Units {
    match units {
        UnitsArg::Celsius => Units::Celsius,
        UnitsArg::Fahrenheit => Units::Fahrenheit,
    }
}

/// Network clients, history store and clock shared by one session.
#[derive(Debug, Clone)]
pub struct Services {
    pub geocoder: GeocodeClient,
    pub forecaster: ForecastClient,
    pub geoip: GeoIpClient,
    pub history: Arc<SearchHistoryStore>,
    pub clock: Arc<dyn Clock>,
}

impl Services {
    #[must_use]
    pub fn from_config(config: &AppConfig) -> Self {
        let clock: Arc<dyn Clock> = Arc::new(SystemClock);
        let backend: Arc<dyn HistoryBackend> = match &config.history_path {
            Some(path) => Arc::new(FileBackend::new(path)),
            None => {
                tracing::warn!("no config directory; search history will not persist");
                Arc::new(MemoryBackend::default())
            }
        };

        Self {
            geocoder: config
                .geocode_url
                .as_deref()
                .map_or_else(GeocodeClient::new, GeocodeClient::with_base_url),
            forecaster: config
                .forecast_url
                .as_deref()
                .map_or_else(ForecastClient::new, ForecastClient::with_base_url)
                .with_clock(Arc::clone(&clock)),
            geoip: config
                .ip_url
                .as_deref()
                .map_or_else(GeoIpClient::new, GeoIpClient::with_base_url),
            history: Arc::new(SearchHistoryStore::new(backend)),
            clock,
        }
    }
}

#[must_use]
pub fn history_path() -> Option<PathBuf> {
    config_dir().map(|dir| dir.join(HISTORY_FILE))
}

#[must_use]
pub fn config_dir() -> Option<PathBuf> {
    config_dir_from(std::env::var_os(CONFIG_DIR_ENV), std::env::var_os("HOME"))
}

fn config_dir_from(override_dir: Option<OsString>, home: Option<OsString>) -> Option<PathBuf> {
    if let Some(base) = override_dir.filter(|dir| !dir.is_empty()) {
        return Some(PathBuf::from(base));
    }
    let home = home.filter(|dir| !dir.is_empty())?;
    Some(PathBuf::from(home).join(".config").join("skyglass"))
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::*;

    #[test]
    fn override_dir_wins_over_home() {
        let dir = config_dir_from(Some("/tmp/sky".into()), Some("/home/me".into()));
        assert_eq!(dir, Some(PathBuf::from("/tmp/sky")));
    }

    #[test]
    fn home_dir_fallback() {
        let dir = config_dir_from(None, Some("/home/me".into()));
        assert_eq!(dir, Some(PathBuf::from("/home/me/.config/skyglass")));
        assert_eq!(config_dir_from(Some("".into()), None), None);
    }

    #[test]
    fn config_carries_cli_overrides() {
        let cli = Cli::parse_from([
            "skyglass",
            "--units",
            "fahrenheit",
            "--forecast-url",
            "http://127.0.0.1:9/forecast",
            "--assets-dir",
            "/opt/skyglass",
        ]);
        let config = AppConfig::from_cli(&cli);
        assert_eq!(config.units, Units::Fahrenheit);
        assert_eq!(
            config.forecast_url.as_deref(),
            Some("http://127.0.0.1:9/forecast")
        );
        assert_eq!(config.geocode_url, None);
        assert_eq!(config.assets_dir, PathBuf::from("/opt/skyglass"));
    }
}
