//! Driving port assembling the dashboard view model.

use async_trait::async_trait;

use crate::domain::{Error, Location, LocationId, User, WeatherReading};

/// Result of the optional weather lookup on the dashboard.
#[derive(Debug, Clone, PartialEq)]
pub enum WeatherOutcome {
    Reading(WeatherReading),
    /// The lookup failed; `message` is safe to show to the user.
    Unavailable { message: String },
}

/// Everything the dashboard page needs besides the user and flashes.
#[derive(Debug, Clone, PartialEq)]
pub struct Dashboard {
    pub locations: Vec<Location>,
    /// The location selected through `?loc=`, when it exists and is owned.
    pub selected: Option<Location>,
    /// `None` when no location was selected or the selection was not found.
    pub weather: Option<WeatherOutcome>,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DashboardQuery: Send + Sync {
    /// List the user's locations and, when `selected` names one of them,
    /// fetch its current weather in the user's default units.
    ///
    /// Weather failures are reported inside [`Dashboard::weather`]; only
    /// store failures produce an `Err`.
    async fn load(&self, user: &User, selected: Option<LocationId>) -> Result<Dashboard, Error>;
}
