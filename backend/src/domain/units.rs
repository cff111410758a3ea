//! Display unit system shared by user records and weather lookups.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// The unit system used when presenting temperatures.
///
/// The string forms double as the provider's `units` query parameter.
///
/// # Examples
///
/// ```
/// # use weatherdesk::domain::UnitSystem;
/// assert_eq!(UnitSystem::default(), UnitSystem::Metric);
/// assert_eq!("imperial".parse::<UnitSystem>(), Ok(UnitSystem::Imperial));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum UnitSystem {
    /// Degrees Celsius.
    #[default]
    Metric,
    /// Degrees Fahrenheit.
    Imperial,
}

impl UnitSystem {
    /// Returns the storage and wire representation.
    ///
    /// # Examples
    ///
    /// ```
    /// # use weatherdesk::domain::UnitSystem;
    /// assert_eq!(UnitSystem::Metric.as_str(), "metric");
    /// assert_eq!(UnitSystem::Imperial.as_str(), "imperial");
    /// ```
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Metric => "metric",
            Self::Imperial => "imperial",
        }
    }

    /// Suffix used when rendering a temperature in this system.
    pub fn temperature_suffix(&self) -> &'static str {
        match self {
            Self::Metric => "°C",
            Self::Imperial => "°F",
        }
    }
}

impl fmt::Display for UnitSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown unit system string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown unit system: {input}")]
pub struct ParseUnitSystemError {
    /// The unrecognised input value.
    pub input: String,
}

impl FromStr for UnitSystem {
    type Err = ParseUnitSystemError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "metric" => Ok(Self::Metric),
            "imperial" => Ok(Self::Imperial),
            _ => Err(ParseUnitSystemError {
                input: s.to_owned(),
            }),
        }
    }
}
