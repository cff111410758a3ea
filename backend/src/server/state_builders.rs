//! Builders wiring domain services to the configured persistence adapters.

use std::sync::Arc;

use actix_web::web;
use mockable::{Clock, DefaultClock};

use weatherdesk::domain::ports::{LocationRepository, UserRepository, WeatherSource};
use weatherdesk::domain::{AccountService, DashboardService, LocationService};
use weatherdesk::inbound::http::state::{HttpState, HttpStatePorts};
use weatherdesk::outbound::memory::InMemoryRecordStore;
use weatherdesk::outbound::persistence::{DieselLocationRepository, DieselUserRepository};

use super::ServerConfig;

/// Assemble the service ports over one pair of repositories.
fn build_ports<U, L, W>(
    users: Arc<U>,
    locations: Arc<L>,
    weather: Arc<W>,
    clock: Arc<dyn Clock>,
) -> HttpStatePorts
where
    U: UserRepository + 'static,
    L: LocationRepository + 'static,
    W: WeatherSource + 'static,
{
    HttpStatePorts {
        accounts: Arc::new(AccountService::new(users, clock.clone())),
        locations: Arc::new(LocationService::new(locations.clone(), clock)),
        dashboard: Arc::new(DashboardService::new(locations, weather)),
    }
}

/// Build HTTP state using PostgreSQL when a pool is configured, otherwise a
/// process-local store shared by both repository ports.
pub(super) fn build_http_state(config: &ServerConfig) -> web::Data<HttpState> {
    let clock: Arc<dyn Clock> = Arc::new(DefaultClock);
    let weather = config.weather.clone();
    let ports = match &config.db_pool {
        Some(pool) => build_ports(
            Arc::new(DieselUserRepository::new(pool.clone())),
            Arc::new(DieselLocationRepository::new(pool.clone())),
            weather,
            clock,
        ),
        None => {
            let store = Arc::new(InMemoryRecordStore::new());
            build_ports(store.clone(), store, weather, clock)
        }
    };
    web::Data::new(HttpState::from(ports))
}
