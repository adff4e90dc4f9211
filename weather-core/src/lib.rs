//! Core library for the `localweather` panel.
//!
//! This crate defines:
//! - Weather code classification (condition text and icon)
//! - The display model built from a raw Open-Meteo payload
//! - Best-effort data sources (IP geolocation, forecast, icon) that fall back
//!   to documented defaults instead of failing
//! - Configuration of endpoints and timeouts
//!
//! It is used by `localweather-cli`, but has no terminal or GUI dependencies.

pub mod classify;
pub mod config;
pub mod display;
pub mod error;
pub mod model;
pub mod provider;

pub use classify::{describe, icon_key, icon_url};
pub use config::Config;
pub use display::{DisplayField, FORECAST_INDEX, Panel, build};
pub use error::{FetchError, Fetched};
pub use model::{ForecastPayload, Location};
pub use provider::{ForecastSource, Icon, IconSource, LocationResolver, Sources};
