//! Dashboard query service combining stored locations with live weather.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::domain::location_service::map_location_error;
use crate::domain::ports::{
    Dashboard, DashboardQuery, LocationRepository, WeatherOutcome, WeatherSource,
};
use crate::domain::{Error, LocationId, User, WeatherQuery};

/// Service implementing [`DashboardQuery`].
#[derive(Clone)]
pub struct DashboardService<L, W> {
    locations: Arc<L>,
    weather: Arc<W>,
}

impl<L, W> DashboardService<L, W> {
    pub fn new(locations: Arc<L>, weather: Arc<W>) -> Self {
        Self { locations, weather }
    }
}

#[async_trait]
impl<L, W> DashboardQuery for DashboardService<L, W>
where
    L: LocationRepository,
    W: WeatherSource,
{
    async fn load(&self, user: &User, selected: Option<LocationId>) -> Result<Dashboard, Error> {
        let locations = self
            .locations
            .list_for_user(&user.id)
            .await
            .map_err(map_location_error)?;

        let selected = match selected {
            Some(id) => self
                .locations
                .find(&user.id, &id)
                .await
                .map_err(map_location_error)?,
            None => None,
        };

        let weather = match &selected {
            Some(location) => {
                let query = WeatherQuery::for_location(location, user.default_units);
                match self.weather.fetch(&query).await {
                    Ok(reading) => Some(WeatherOutcome::Reading(reading)),
                    Err(err) => {
                        warn!(error = %err, location = %query.location_query(), "weather lookup failed");
                        Some(WeatherOutcome::Unavailable {
                            message: err.to_string(),
                        })
                    }
                }
            }
            None => {
                debug!(user_id = %user.id, "no weather requested or location not found");
                None
            }
        };

        Ok(Dashboard {
            locations,
            selected,
            weather,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::{
        LocationPersistenceError, MockLocationRepository, MockWeatherSource, WeatherSourceError,
    };
    use crate::domain::test_support::{fixture_location, fixture_timestamp, fixture_user};
    use crate::domain::{ErrorCode, UnitSystem, WeatherReading};
    use rstest::rstest;

    fn reading(units: UnitSystem) -> WeatherReading {
        WeatherReading {
            city: Some("Paris".to_owned()),
            country: Some("FR".to_owned()),
            temperature: Some(61.2),
            feels_like: Some(60.0),
            description: Some("light rain".to_owned()),
            units,
            fetched_at: fixture_timestamp(),
        }
    }

    #[tokio::test]
    async fn without_selection_no_weather_is_fetched() {
        let user = fixture_user("ada", UnitSystem::Metric);
        let listed = vec![fixture_location(&user, "Home")];
        let mut locations = MockLocationRepository::new();
        locations
            .expect_list_for_user()
            .times(1)
            .return_once(move |_| Ok(listed));
        locations.expect_find().never();
        let mut weather = MockWeatherSource::new();
        weather.expect_fetch().never();
        let service = DashboardService::new(Arc::new(locations), Arc::new(weather));

        let dashboard = service.load(&user, None).await.expect("dashboard loads");

        assert_eq!(dashboard.locations.len(), 1);
        assert!(dashboard.selected.is_none());
        assert!(dashboard.weather.is_none());
    }

    #[tokio::test]
    async fn selection_fetches_weather_in_user_units() {
        let user = fixture_user("ada", UnitSystem::Imperial);
        let home = fixture_location(&user, "Home");
        let home_id = home.id.clone();
        let listed = vec![home.clone()];
        let mut locations = MockLocationRepository::new();
        locations
            .expect_list_for_user()
            .return_once(move |_| Ok(listed));
        locations
            .expect_find()
            .times(1)
            .return_once(move |_, _| Ok(Some(home)));
        let mut weather = MockWeatherSource::new();
        weather
            .expect_fetch()
            .times(1)
            .withf(|query| query.units == UnitSystem::Imperial && query.location_query() == "Paris,FR")
            .returning(|query| Ok(reading(query.units)));
        let service = DashboardService::new(Arc::new(locations), Arc::new(weather));

        let dashboard = service
            .load(&user, Some(home_id.clone()))
            .await
            .expect("dashboard loads");

        assert_eq!(dashboard.selected.map(|loc| loc.id), Some(home_id));
        assert_eq!(
            dashboard.weather,
            Some(WeatherOutcome::Reading(reading(UnitSystem::Imperial)))
        );
    }

    #[tokio::test]
    async fn unknown_or_foreign_selection_yields_no_weather() {
        let user = fixture_user("ada", UnitSystem::Metric);
        let mut locations = MockLocationRepository::new();
        locations
            .expect_list_for_user()
            .return_once(|_| Ok(Vec::new()));
        locations.expect_find().return_once(|_, _| Ok(None));
        let mut weather = MockWeatherSource::new();
        weather.expect_fetch().never();
        let service = DashboardService::new(Arc::new(locations), Arc::new(weather));

        let dashboard = service
            .load(&user, Some(LocationId::new("someone-elses")))
            .await
            .expect("dashboard loads");

        assert!(dashboard.weather.is_none());
    }

    #[rstest]
    #[case(WeatherSourceError::missing_api_key())]
    #[case(WeatherSourceError::status(401_u16, "Invalid API key"))]
    #[tokio::test]
    async fn weather_failure_is_reported_not_raised(#[case] failure: WeatherSourceError) {
        let user = fixture_user("ada", UnitSystem::Metric);
        let home = fixture_location(&user, "Home");
        let home_id = home.id.clone();
        let expected = failure.to_string();
        let mut locations = MockLocationRepository::new();
        locations
            .expect_list_for_user()
            .return_once(|_| Ok(Vec::new()));
        locations
            .expect_find()
            .return_once(move |_, _| Ok(Some(home)));
        let mut weather = MockWeatherSource::new();
        weather.expect_fetch().return_once(move |_| Err(failure));
        let service = DashboardService::new(Arc::new(locations), Arc::new(weather));

        let dashboard = service
            .load(&user, Some(home_id))
            .await
            .expect("dashboard still loads");

        assert_eq!(
            dashboard.weather,
            Some(WeatherOutcome::Unavailable { message: expected })
        );
    }

    #[tokio::test]
    async fn listing_failure_is_internal() {
        let user = fixture_user("ada", UnitSystem::Metric);
        let mut locations = MockLocationRepository::new();
        locations
            .expect_list_for_user()
            .return_once(|_| Err(LocationPersistenceError::query("boom")));
        let service = DashboardService::new(Arc::new(locations), Arc::new(MockWeatherSource::new()));

        let err = service.load(&user, None).await.expect_err("store failed");

        assert_eq!(err.code(), ErrorCode::InternalError);
    }
}
