//! Wire types for the OpenWeatherMap current-weather response.
//!
//! Every field is optional so partial payloads still decode; gaps surface as
//! `None` on the reading.

use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::domain::{UnitSystem, WeatherReading};

#[derive(Debug, Deserialize)]
pub(super) struct CurrentWeatherDto {
    name: Option<String>,
    sys: Option<SysDto>,
    main: Option<MainDto>,
    #[serde(default)]
    weather: Vec<ConditionDto>,
}

#[derive(Debug, Deserialize)]
struct SysDto {
    country: Option<String>,
}

#[derive(Debug, Deserialize)]
struct MainDto {
    temp: Option<f64>,
    feels_like: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct ConditionDto {
    description: Option<String>,
}

/// Error body returned alongside non-2xx statuses.
#[derive(Debug, Deserialize)]
pub(super) struct ErrorBodyDto {
    pub message: Option<String>,
}

impl CurrentWeatherDto {
    pub(super) fn into_reading(self, units: UnitSystem, fetched_at: DateTime<Utc>) -> WeatherReading {
        let (temperature, feels_like) = self
            .main
            .map_or((None, None), |main| (main.temp, main.feels_like));
        WeatherReading {
            city: self.name,
            country: self.sys.and_then(|sys| sys.country),
            temperature,
            feels_like,
            description: self
                .weather
                .into_iter()
                .next()
                .and_then(|condition| condition.description),
            units,
            fetched_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::test_support::fixture_timestamp;
    use rstest::rstest;

    #[rstest]
    fn full_payload_maps_every_field() {
        let dto: CurrentWeatherDto = serde_json::from_str(
            r#"{
                "name": "Paris",
                "sys": { "country": "FR", "sunrise": 1 },
                "main": { "temp": 18.4, "feels_like": 17.9, "humidity": 40 },
                "weather": [
                    { "id": 500, "description": "light rain" },
                    { "id": 701, "description": "mist" }
                ]
            }"#,
        )
        .expect("payload decodes");

        let reading = dto.into_reading(UnitSystem::Metric, fixture_timestamp());

        assert_eq!(reading.city.as_deref(), Some("Paris"));
        assert_eq!(reading.country.as_deref(), Some("FR"));
        assert_eq!(reading.temperature, Some(18.4));
        assert_eq!(reading.feels_like, Some(17.9));
        assert_eq!(reading.description.as_deref(), Some("light rain"));
        assert_eq!(reading.fetched_at, fixture_timestamp());
    }

    #[rstest]
    #[case(r#"{}"#)]
    #[case(r#"{ "main": {}, "sys": {}, "weather": [] }"#)]
    fn missing_fields_become_none(#[case] body: &str) {
        let dto: CurrentWeatherDto = serde_json::from_str(body).expect("payload decodes");
        let reading = dto.into_reading(UnitSystem::Imperial, fixture_timestamp());

        assert!(reading.city.is_none());
        assert!(reading.country.is_none());
        assert!(reading.temperature.is_none());
        assert!(reading.feels_like.is_none());
        assert!(reading.description.is_none());
        assert_eq!(reading.units, UnitSystem::Imperial);
    }
}
