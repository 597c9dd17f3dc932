#![allow(clippy::missing_errors_doc)]

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
pub enum UnitsArg {
    Celsius,
    Fahrenheit,
}

#[derive(Debug, Parser, Clone)]
#[command(
    name = "skyglass",
    version,
    about = "Current conditions, hourly and daily forecast for any city"
)]
pub struct Cli {
    /// City name (default: detect by IP)
    pub city: Option<String>,

    /// Display units
    #[arg(long, value_enum, default_value_t = UnitsArg::Celsius)]
    pub units: UnitsArg,

    /// Direct latitude (requires --lon)
    #[arg(long, allow_hyphen_values = true)]
    pub lat: Option<f64>,

    /// Direct longitude (requires --lat)
    #[arg(long, allow_hyphen_values = true)]
    pub lon: Option<f64>,

    /// Locate by IP address (also the default without a city)
    #[arg(long, conflicts_with_all = ["city", "lat", "lon"])]
    pub auto: bool,

    /// Choose candidate N (1-based) when the city name is ambiguous
    #[arg(long)]
    pub pick: Option<usize>,

    /// Re-fetch recent search N (1-based)
    #[arg(long, conflicts_with_all = ["city", "lat", "lon", "auto"])]
    pub recent: Option<usize>,

    /// List recent searches and exit
    #[arg(long)]
    pub history: bool,

    /// Hourly page to show (1-based)
    #[arg(long, default_value_t = 1)]
    pub hourly_page: usize,

    /// Forecast API endpoint override
    #[arg(long)]
    pub forecast_url: Option<String>,

    /// Geocoding API endpoint override
    #[arg(long)]
    pub geocode_url: Option<String>,

    /// IP location endpoint override
    #[arg(long)]
    pub ip_url: Option<String>,

    /// Directory holding icons/ and bg/ artwork
    #[arg(long)]
    pub assets_dir: Option<PathBuf>,
}

impl Cli {
    pub fn validate(&self) -> anyhow::Result<()> {
        match (self.lat, self.lon) {
            (Some(_), None) | (None, Some(_)) => {
                anyhow::bail!("--lat and --lon must be provided together")
            }
            _ => {}
        }
        if self.pick == Some(0) || self.recent == Some(0) || self.hourly_page == 0 {
            anyhow::bail!("--pick, --recent and --hourly-page count from 1");
        }
        Ok(())
    }
}
