//! Port for the current-weather provider.

use async_trait::async_trait;

use crate::domain::{WeatherQuery, WeatherReading};

use super::define_port_error;

define_port_error! {
    /// Errors raised by weather source adapters.
    ///
    /// Every failure other than a missing key renders as
    /// `Error calling weather API: <detail>` so callers can surface the
    /// message directly.
    pub enum WeatherSourceError {
        /// No API key is configured; no request was attempted.
        MissingApiKey => "OPENWEATHER_API_KEY environment variable is not set.",
        /// The request exceeded the configured timeout.
        Timeout { message: String } => "Error calling weather API: {message}",
        /// The request failed before a response arrived.
        Transport { message: String } => "Error calling weather API: {message}",
        /// The provider answered with a non-success status.
        Status { status: u16, message: String } =>
            "Error calling weather API: status {status}: {message}",
        /// The response body could not be decoded.
        Decode { message: String } => "Error calling weather API: {message}",
    }
}

/// Fetches current conditions for a single location.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait WeatherSource: Send + Sync {
    /// Perform one lookup. Implementations make a single attempt.
    async fn fetch(&self, query: &WeatherQuery) -> Result<WeatherReading, WeatherSourceError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn missing_key_message_names_the_variable() {
        assert_eq!(
            WeatherSourceError::missing_api_key().to_string(),
            "OPENWEATHER_API_KEY environment variable is not set."
        );
    }

    #[rstest]
    #[case(WeatherSourceError::timeout("timed out after 10s"), "timed out after 10s")]
    #[case(WeatherSourceError::transport("connection refused"), "connection refused")]
    #[case(WeatherSourceError::status(404_u16, "city not found"), "status 404: city not found")]
    #[case(WeatherSourceError::decode("expected value"), "expected value")]
    fn call_failures_share_a_prefix(#[case] err: WeatherSourceError, #[case] detail: &str) {
        assert_eq!(err.to_string(), format!("Error calling weather API: {detail}"));
    }
}
