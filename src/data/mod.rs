use std::time::Duration;

use reqwest::Client;

pub mod forecast;
pub mod geocode;
pub mod geoip;

/// Every upstream call is bounded by this.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(5);

fn http_client() -> Client {
    Client::builder()
        .timeout(REQUEST_TIMEOUT)
        .build()
        .unwrap_or_else(|err| {
            tracing::warn!(error = %err, "http client builder failed; using defaults");
            Client::new()
        })
}
