use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use std::fmt::Debug;

use crate::{
    Config, ForecastPayload, Location,
    error::{FetchError, Fetched, truncate_body},
    provider::{icon::HttpIconSource, ipinfo::IpInfoResolver, openmeteo::OpenMeteoSource},
};

pub mod icon;
pub mod ipinfo;
pub mod openmeteo;

pub use icon::Icon;

/// Best-effort lookup of where the caller is.
#[async_trait]
pub trait LocationResolver: Send + Sync + Debug {
    async fn resolve(&self) -> Fetched<Location>;
}

/// Best-effort retrieval of the raw forecast for a coordinate.
#[async_trait]
pub trait ForecastSource: Send + Sync + Debug {
    async fn fetch(&self, latitude: f64, longitude: f64) -> Fetched<ForecastPayload>;
}

/// Best-effort retrieval of a condition icon.
#[async_trait]
pub trait IconSource: Send + Sync + Debug {
    async fn load(&self, url: &str) -> Fetched<Icon>;
}

/// The three data sources the panel is built from.
#[derive(Debug)]
pub struct Sources {
    pub location: Box<dyn LocationResolver>,
    pub forecast: Box<dyn ForecastSource>,
    pub icon: Box<dyn IconSource>,
}

/// Construct the HTTP-backed sources described by `config`, sharing one client.
pub fn sources_from_config(config: &Config) -> anyhow::Result<Sources> {
    let http = http_client(config)?;

    Ok(Sources {
        location: Box::new(IpInfoResolver::new(http.clone(), config.geolocation_url.clone())),
        forecast: Box::new(OpenMeteoSource::new(http.clone(), config.forecast_url.clone())),
        icon: Box::new(HttpIconSource::new(http, config.icon_size)),
    })
}

/// HTTP client with the configured per-request timeout.
pub fn http_client(config: &Config) -> Result<Client, FetchError> {
    Client::builder()
        .timeout(config.timeout())
        .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
        .build()
        .map_err(|e| FetchError::Client(e.to_string()))
}

/// Send `request` and reject anything but a 2xx answer.
pub(crate) async fn send_checked(request: RequestBuilder, url: &str) -> Result<Response, FetchError> {
    tracing::debug!(%url, "sending request");

    let res = request
        .send()
        .await
        .map_err(|source| FetchError::Request { url: url.to_string(), source })?;

    let status = res.status();
    if !status.is_success() {
        let body = res.text().await.unwrap_or_default();
        return Err(FetchError::Status {
            url: url.to_string(),
            status,
            body: truncate_body(&body),
        });
    }

    Ok(res)
}

/// Read a 2xx response body as text.
pub(crate) async fn read_text(res: Response, url: &str) -> Result<String, FetchError> {
    res.text()
        .await
        .map_err(|source| FetchError::Request { url: url.to_string(), source })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sources_from_default_config() {
        let sources = sources_from_config(&Config::default());
        assert!(sources.is_ok());
    }

    #[test]
    fn http_client_builds_with_short_timeout() {
        let cfg = Config { timeout_secs: 1, ..Config::default() };
        assert!(http_client(&cfg).is_ok());
    }
}
