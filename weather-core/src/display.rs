//! Flattening a forecast payload into the label/value lines shown on the panel.

use serde_json::Value;

use crate::{
    classify::{describe, icon_url_with},
    model::{CurrentWeather, ForecastPayload, HourlySeries, Location},
};

/// Hourly entry used for the forecast lines: the first (nearest) hour.
///
/// This is not adjusted to the local time at the resolved location.
pub const FORECAST_INDEX: usize = 0;

/// Placeholder shown for any reading that is missing or unusable.
pub const PLACEHOLDER: &str = "N/A";

/// One line on the panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayField {
    pub label: &'static str,
    pub value: String,
}

impl DisplayField {
    fn new(label: &'static str, value: String) -> Self {
        Self { label, value }
    }
}

/// Everything the presentation layer needs for a single render.
#[derive(Debug, Clone, PartialEq)]
pub struct Panel {
    pub city: String,
    pub icon_url: String,
    pub fields: Vec<DisplayField>,
}

impl Panel {
    /// Build the panel for `location` from `payload`, using icons from `icon_template`.
    pub fn compose(location: &Location, payload: &ForecastPayload, icon_template: &str) -> Self {
        Self {
            city: location.city.clone(),
            icon_url: icon_url_with(icon_template, current_code(payload)),
            fields: build(payload, FORECAST_INDEX),
        }
    }

    pub fn title(&self) -> String {
        format!("Weather in {}", self.city)
    }
}

/// Weather code of the current snapshot; absent or non-numeric counts as clear sky.
pub fn current_code(payload: &ForecastPayload) -> i64 {
    payload
        .current_weather
        .as_ref()
        .and_then(|c| c.weathercode.as_ref())
        .and_then(as_code)
        .unwrap_or(0)
}

/// Produce the eight panel lines, in display order, for hourly entry `index`.
///
/// Never fails: every missing section, key, short series or non-numeric value
/// shows up as [`PLACEHOLDER`].
pub fn build(payload: &ForecastPayload, index: usize) -> Vec<DisplayField> {
    let current = payload.current_weather.as_ref();
    let hourly = payload.hourly.as_ref();

    let now = |pick: fn(&CurrentWeather) -> Option<&Value>| {
        current.and_then(pick).and_then(reading)
    };
    let at = |pick: fn(&HourlySeries) -> &Vec<Value>| {
        hourly.and_then(|h| pick(h).get(index)).and_then(reading)
    };

    let forecast_condition = hourly
        .and_then(|h| h.weathercode.get(index))
        .and_then(forecast_description)
        .unwrap_or_else(|| PLACEHOLDER.to_string());

    vec![
        DisplayField::new("Temperature", with_unit(now(|c| c.temperature.as_ref()), "°C")),
        DisplayField::new("Condition", describe(current_code(payload))),
        DisplayField::new(
            "Wind",
            wind(now(|c| c.windspeed.as_ref()), now(|c| c.winddirection.as_ref())),
        ),
        DisplayField::new("Humidity", with_unit(at(|h| &h.relativehumidity_2m), "%")),
        DisplayField::new("Precipitation", with_unit(at(|h| &h.precipitation), "mm")),
        DisplayField::new("Forecast Temp", with_unit(at(|h| &h.temperature_2m), "°C")),
        DisplayField::new(
            "Forecast Wind",
            wind(at(|h| &h.windspeed_10m), at(|h| &h.winddirection_10m)),
        ),
        DisplayField::new("Forecast Condition", forecast_condition),
    ]
}

/// Numeric reading formatted as the provider sent it.
fn reading(value: &Value) -> Option<String> {
    match value {
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Current code: fractional values are truncated.
fn as_code(value: &Value) -> Option<i64> {
    value.as_i64().or_else(|| value.as_f64().map(|f| f.trunc() as i64))
}

/// Hourly code: only whole numbers match the table, anything else echoes the raw value.
fn forecast_description(value: &Value) -> Option<String> {
    let Value::Number(n) = value else {
        return None;
    };
    let whole = n.as_i64().or_else(|| n.as_f64().filter(|f| f.fract() == 0.0).map(|f| f as i64));
    Some(whole.map_or_else(|| format!("Code {n}"), describe))
}

fn with_unit(reading: Option<String>, unit: &str) -> String {
    match reading {
        Some(r) => format!("{r} {unit}"),
        None => PLACEHOLDER.to_string(),
    }
}

fn wind(speed: Option<String>, direction: Option<String>) -> String {
    match (speed, direction) {
        (None, None) => PLACEHOLDER.to_string(),
        (speed, direction) => format!(
            "{}, {}",
            speed.map_or_else(|| PLACEHOLDER.to_string(), |s| format!("{s} km/h")),
            direction.map_or_else(|| PLACEHOLDER.to_string(), |d| format!("{d}°")),
        ),
    }
}
