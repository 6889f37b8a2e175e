//! Weather source for wxcheck
//!
//! Fetches current conditions and hourly forecasts from the Open-Meteo API
//! and lines the forecast up with the current hour.

pub mod align;
pub mod provider;
pub mod types;

pub use align::{align, nearest_index, Alignment};
pub use provider::{WeatherProvider, WeatherSource};
pub use types::*;
