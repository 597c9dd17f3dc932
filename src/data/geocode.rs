use reqwest::Client;
use serde::Deserialize;

use crate::{
    domain::{
        query::is_valid_input,
        weather::{CitySearchResult, GeocodeResolution},
    },
    error::FetchError,
};

const GEOCODE_URL: &str = "https://geocoding-api.open-meteo.com/v1/search";
pub const MAX_RESULTS: usize = 5;

#[derive(Debug, Clone)]
pub struct GeocodeClient {
    client: Client,
    base_url: String,
}

impl Default for GeocodeClient {
    fn default() -> Self {
        Self::new()
    }
}

impl GeocodeClient {
    pub fn new() -> Self {
        Self::with_base_url(GEOCODE_URL)
    }

    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            client: super::http_client(),
            base_url: base_url.into(),
        }
    }

    /// Up to five candidates in API order. An empty list means "not found".
    pub async fn search_cities(&self, query: &str) -> Result<Vec<CitySearchResult>, FetchError> {
        let url = format!(
            "{}?name={}&count={MAX_RESULTS}&language=en&format=json",
            self.base_url,
            encode_query(query)
        );
        tracing::debug!(%url, "geocoding request");

        let body = self
            .client
            .get(&url)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;
        let payload: GeocodeResponse = serde_json::from_str(&body)?;

        Ok(payload
            .results
            .unwrap_or_default()
            .into_iter()
            .take(MAX_RESULTS)
            .map(CitySearchResult::from)
            .collect())
    }

    /// Validates, searches and classifies the outcome.
    pub async fn resolve(&self, query: &str) -> Result<GeocodeResolution, FetchError> {
        if !is_valid_input(query) {
            return Ok(GeocodeResolution::Invalid(query.to_string()));
        }

        let mut results = self.search_cities(query).await?;
        let resolution = match results.len() {
            0 => GeocodeResolution::NotFound(query.trim().to_string()),
            1 => GeocodeResolution::Selected(results.remove(0)),
            _ => GeocodeResolution::NeedsDisambiguation(results),
        };
        Ok(resolution)
    }
}

#[derive(Debug, Deserialize)]
struct GeocodeResponse {
    results: Option<Vec<GeocodeResult>>,
}

#[derive(Debug, Deserialize)]
struct GeocodeResult {
    name: String,
    latitude: f64,
    longitude: f64,
    country: Option<String>,
    admin1: Option<String>,
}

impl From<GeocodeResult> for CitySearchResult {
    fn from(entry: GeocodeResult) -> Self {
        Self {
            name: entry.name,
            region: entry.admin1.filter(|r| !r.is_empty()),
            country: entry.country.unwrap_or_default(),
            latitude: entry.latitude,
            longitude: entry.longitude,
        }
    }
}

/// Space becomes `%20` and comma `%2C`; only unreserved characters pass through.
fn encode_query(query: &str) -> String {
    urlencoding::encode(query.trim()).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encodes_spaces_and_commas() {
        assert_eq!(encode_query(" New York, US "), "New%20York%2C%20US");
        assert_eq!(encode_query("St. Louis"), "St.%20Louis");
        assert_eq!(encode_query("a&b"), "a%26b");
    }

    #[test]
    fn result_without_region_or_country() {
        let entry = GeocodeResult {
            name: "Atlantis".to_string(),
            latitude: 1.0,
            longitude: 2.0,
            country: None,
            admin1: Some(String::new()),
        };
        let city = CitySearchResult::from(entry);
        assert_eq!(city.region, None);
        assert_eq!(city.country, "");
        assert_eq!(city.display_name(), "Atlantis");
    }
}
