//! Domain ports and supporting types for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod account_command;
mod dashboard_query;
mod location_repository;
mod locations_command;
mod user_repository;
mod weather_source;

#[cfg(test)]
pub use account_command::MockAccountCommand;
pub use account_command::{AccountCommand, LoginOutcome, LoginRequest};
#[cfg(test)]
pub use dashboard_query::MockDashboardQuery;
pub use dashboard_query::{Dashboard, DashboardQuery, WeatherOutcome};
#[cfg(test)]
pub use location_repository::MockLocationRepository;
pub use location_repository::{LocationPersistenceError, LocationRepository};
#[cfg(test)]
pub use locations_command::MockLocationsCommand;
pub use locations_command::LocationsCommand;
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{UserPersistenceError, UserRepository};
#[cfg(test)]
pub use weather_source::MockWeatherSource;
pub use weather_source::{WeatherSource, WeatherSourceError};
