//! Domain primitives, services, and ports.
//!
//! Purpose: keep the account, location, and weather rules free of transport
//! and storage concerns. Inbound adapters talk to the driving ports in
//! [`ports`]; outbound adapters implement the driven ones.

pub mod account_service;
pub mod dashboard_service;
pub mod error;
pub mod location;
pub mod location_service;
pub mod ports;
pub mod units;
pub mod user;
pub mod weather;

#[cfg(test)]
pub(crate) mod test_support;

pub use self::account_service::AccountService;
pub use self::dashboard_service::DashboardService;
pub use self::error::{Error, ErrorCode};
pub use self::location::{
    Location, LocationDraft, LocationId, LocationValidationError, NewLocation,
};
pub use self::location_service::LocationService;
pub use self::units::{ParseUnitSystemError, UnitSystem};
pub use self::user::{DisplayName, USER_ID_MAX, User, UserId, UserUpsert, UserValidationError};
pub use self::weather::{WeatherQuery, WeatherReading};
