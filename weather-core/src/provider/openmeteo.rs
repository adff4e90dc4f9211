use async_trait::async_trait;
use reqwest::Client;

use crate::{
    error::{FetchError, Fetched},
    model::ForecastPayload,
    provider::{read_text, send_checked},
};

use super::ForecastSource;

/// Hourly variables requested alongside the current snapshot.
pub const HOURLY_VARIABLES: &str =
    "relativehumidity_2m,precipitation,temperature_2m,weathercode,windspeed_10m,winddirection_10m";

/// Forecast from the Open-Meteo API; no key required.
#[derive(Debug, Clone)]
pub struct OpenMeteoSource {
    http: Client,
    url: String,
}

impl OpenMeteoSource {
    pub fn new(http: Client, url: String) -> Self {
        Self { http, url }
    }

    async fn fetch_payload(&self, latitude: f64, longitude: f64) -> Result<ForecastPayload, FetchError> {
        let request = self.http.get(&self.url).query(&[
            ("latitude", latitude.to_string()),
            ("longitude", longitude.to_string()),
            ("current_weather", "true".to_string()),
            ("hourly", HOURLY_VARIABLES.to_string()),
        ]);

        let res = send_checked(request, &self.url).await?;
        let body = read_text(res, &self.url).await?;

        serde_json::from_str(&body)
            .map_err(|e| FetchError::Parse { url: self.url.clone(), reason: e.to_string() })
    }
}

#[async_trait]
impl ForecastSource for OpenMeteoSource {
    async fn fetch(&self, latitude: f64, longitude: f64) -> Fetched<ForecastPayload> {
        Fetched::from_result(self.fetch_payload(latitude, longitude).await, ForecastPayload::empty)
    }
}
