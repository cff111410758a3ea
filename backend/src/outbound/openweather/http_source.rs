//! Reqwest-backed OpenWeatherMap adapter.
//!
//! Owns transport details only: query construction, timeout and HTTP error
//! mapping, and JSON decoding into a [`WeatherReading`].

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use mockable::Clock;
use reqwest::{Client, StatusCode, Url};
use tracing::debug;
use zeroize::Zeroizing;

use super::dto::{CurrentWeatherDto, ErrorBodyDto};
use crate::domain::ports::{WeatherSource, WeatherSourceError};
use crate::domain::{WeatherQuery, WeatherReading};

/// Public current-weather endpoint.
pub const DEFAULT_ENDPOINT: &str = "https://api.openweathermap.org/data/2.5/weather";

/// Default request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Weather source performing one GET per lookup against a single endpoint.
pub struct OpenWeatherHttpSource {
    client: Client,
    endpoint: Url,
    api_key: Option<Zeroizing<String>>,
    clock: Arc<dyn Clock>,
}

impl OpenWeatherHttpSource {
    /// Build the adapter. A missing or blank `api_key` is accepted here and
    /// reported on every fetch instead.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(
        endpoint: Url,
        api_key: Option<String>,
        timeout: Duration,
        clock: Arc<dyn Clock>,
    ) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout).build()?;
        let api_key = api_key
            .filter(|key| !key.trim().is_empty())
            .map(Zeroizing::new);
        Ok(Self {
            client,
            endpoint,
            api_key,
            clock,
        })
    }
}

#[async_trait]
impl WeatherSource for OpenWeatherHttpSource {
    async fn fetch(&self, query: &WeatherQuery) -> Result<WeatherReading, WeatherSourceError> {
        let Some(api_key) = self.api_key.as_ref() else {
            return Err(WeatherSourceError::missing_api_key());
        };

        let location = query.location_query();
        debug!(location = %location, units = %query.units, "requesting current weather");
        let response = self
            .client
            .get(self.endpoint.clone())
            .query(&[
                ("q", location.as_str()),
                ("appid", api_key.as_str()),
                ("units", query.units.as_str()),
            ])
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        let body = response.bytes().await.map_err(map_transport_error)?;
        if !status.is_success() {
            return Err(map_status_error(status, body.as_ref()));
        }

        let decoded: CurrentWeatherDto = serde_json::from_slice(body.as_ref())
            .map_err(|err| WeatherSourceError::decode(format!("invalid response body: {err}")))?;
        Ok(decoded.into_reading(query.units, self.clock.utc()))
    }
}

fn map_transport_error(error: reqwest::Error) -> WeatherSourceError {
    // reqwest includes the request URL, which carries the API key.
    let error = error.without_url();
    if error.is_timeout() {
        WeatherSourceError::timeout(error.to_string())
    } else {
        WeatherSourceError::transport(error.to_string())
    }
}

fn map_status_error(status: StatusCode, body: &[u8]) -> WeatherSourceError {
    let message = serde_json::from_slice::<ErrorBodyDto>(body)
        .ok()
        .and_then(|dto| dto.message)
        .unwrap_or_else(|| body_preview(body));
    WeatherSourceError::status(status.as_u16(), message)
}

fn body_preview(body: &[u8]) -> String {
    const PREVIEW_CHAR_LIMIT: usize = 160;

    let compact = String::from_utf8_lossy(body)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    let preview = compact.chars().take(PREVIEW_CHAR_LIMIT).collect::<String>();
    if compact.chars().count() > PREVIEW_CHAR_LIMIT {
        format!("{preview}...")
    } else {
        preview
    }
}
