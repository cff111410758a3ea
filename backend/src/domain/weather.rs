//! Weather lookup request and normalised reading.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{Location, UnitSystem};

/// A single current-weather lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeatherQuery {
    pub city: String,
    pub country_code: String,
    pub units: UnitSystem,
}

impl WeatherQuery {
    /// Build a lookup for a stored location in the given units.
    pub fn for_location(location: &Location, units: UnitSystem) -> Self {
        Self {
            city: location.city.clone(),
            country_code: location.country_code.clone(),
            units,
        }
    }

    /// Provider search string, `City,CC`.
    ///
    /// # Examples
    /// ```
    /// use weatherdesk::domain::{UnitSystem, WeatherQuery};
    ///
    /// let query = WeatherQuery {
    ///     city: "Paris".into(),
    ///     country_code: "FR".into(),
    ///     units: UnitSystem::Metric,
    /// };
    /// assert_eq!(query.location_query(), "Paris,FR");
    /// ```
    pub fn location_query(&self) -> String {
        format!("{},{}", self.city, self.country_code)
    }
}

/// Current conditions mapped from the provider response.
///
/// Every provider field is optional; absent values stay `None` rather than
/// failing the lookup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherReading {
    pub city: Option<String>,
    pub country: Option<String>,
    pub temperature: Option<f64>,
    pub feels_like: Option<f64>,
    pub description: Option<String>,
    pub units: UnitSystem,
    pub fetched_at: DateTime<Utc>,
}
