use reqwest::Client;
use serde::Deserialize;

use crate::error::FetchError;

const IP_LOOKUP_URL: &str = "http://ip-api.com/json";

/// City used whenever the IP lookup cannot produce one.
pub const FALLBACK_CITY: &str = "London";

#[derive(Debug, Deserialize)]
struct IpApiResponse {
    status: Option<String>,
    city: Option<String>,
}

#[derive(Debug, Clone)]
pub struct GeoIpClient {
    client: Client,
    base_url: String,
}

impl Default for GeoIpClient {
    fn default() -> Self {
        Self::new()
    }
}

impl GeoIpClient {
    pub fn new() -> Self {
        Self::with_base_url(IP_LOOKUP_URL)
    }

    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            client: super::http_client(),
            base_url: base_url.into(),
        }
    }

    /// Approximate city of the caller. Never fails: any problem yields [`FALLBACK_CITY`].
    pub async fn detect_city(&self) -> String {
        match self.lookup().await {
            Ok(city) => city,
            Err(err) => {
                tracing::warn!(error = %err, fallback = FALLBACK_CITY, "IP location lookup failed");
                FALLBACK_CITY.to_string()
            }
        }
    }

    async fn lookup(&self) -> Result<String, FetchError> {
        let body = self
            .client
            .get(&self.base_url)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;
        let payload: IpApiResponse = serde_json::from_str(&body)?;

        if payload.status.as_deref() != Some("success") {
            return Err(FetchError::Parse(format!(
                "lookup status {:?}",
                payload.status.unwrap_or_default()
            )));
        }
        payload
            .city
            .filter(|city| !city.trim().is_empty())
            .ok_or_else(|| FetchError::Parse("lookup returned no city".to_string()))
    }
}
