use serde::{Deserialize, Deserializer, de::DeserializeOwned};
use serde_json::Value;

/// Where the panel is being shown for, as resolved from the caller's IP.
#[derive(Debug, Clone, PartialEq)]
pub struct Location {
    pub latitude: f64,
    pub longitude: f64,
    pub city: String,
}

impl Location {
    pub fn new(latitude: f64, longitude: f64, city: impl Into<String>) -> Self {
        Self { latitude, longitude, city: city.into() }
    }

    /// Used whenever the geolocation lookup cannot produce an answer.
    pub fn fallback() -> Self {
        Self::new(0.0, 0.0, "Unknown")
    }
}

/// Forecast as returned by Open-Meteo with `current_weather=true` and the hourly
/// variables we request.
///
/// Readings are kept as raw JSON values so that they print exactly as the
/// provider sent them (`10` stays `10`, `0.0` stays `0.0`). A section or series
/// of the wrong JSON type is treated as absent rather than failing the payload.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ForecastPayload {
    #[serde(default, deserialize_with = "lenient")]
    pub current_weather: Option<CurrentWeather>,

    #[serde(default, deserialize_with = "lenient")]
    pub hourly: Option<HourlySeries>,
}

impl ForecastPayload {
    /// Payload with every section absent.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.current_weather.is_none() && self.hourly.is_none()
    }
}

/// The provider's single "now" snapshot.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct CurrentWeather {
    #[serde(default)]
    pub temperature: Option<Value>,
    #[serde(default)]
    pub windspeed: Option<Value>,
    #[serde(default)]
    pub winddirection: Option<Value>,
    #[serde(default)]
    pub weathercode: Option<Value>,
}

/// Parallel per-hour series. Lengths are expected to match but are not trusted.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct HourlySeries {
    #[serde(default, deserialize_with = "lenient_seq")]
    pub relativehumidity_2m: Vec<Value>,
    #[serde(default, deserialize_with = "lenient_seq")]
    pub precipitation: Vec<Value>,
    #[serde(default, deserialize_with = "lenient_seq")]
    pub temperature_2m: Vec<Value>,
    #[serde(default, deserialize_with = "lenient_seq")]
    pub weathercode: Vec<Value>,
    #[serde(default, deserialize_with = "lenient_seq")]
    pub windspeed_10m: Vec<Value>,
    #[serde(default, deserialize_with = "lenient_seq")]
    pub winddirection_10m: Vec<Value>,
}

fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let raw = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(raw).ok())
}

fn lenient_seq<'de, D>(deserializer: D) -> Result<Vec<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Array(items) => Ok(items),
        _ => Ok(Vec::new()),
    }
}
