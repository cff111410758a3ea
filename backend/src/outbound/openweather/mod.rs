//! OpenWeatherMap outbound adapter implementing the `WeatherSource` port.

mod dto;
mod http_source;

pub use http_source::{DEFAULT_ENDPOINT, DEFAULT_TIMEOUT, OpenWeatherHttpSource};
