use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use crate::{
    error::{FetchError, Fetched},
    model::Location,
    provider::{read_text, send_checked},
};

use super::LocationResolver;

/// Resolves the caller's location from their public IP via ipinfo.io.
#[derive(Debug, Clone)]
pub struct IpInfoResolver {
    http: Client,
    url: String,
}

impl IpInfoResolver {
    pub fn new(http: Client, url: String) -> Self {
        Self { http, url }
    }

    async fn lookup(&self) -> Result<Location, FetchError> {
        let res = send_checked(self.http.get(&self.url), &self.url).await?;
        let body = read_text(res, &self.url).await?;

        let parsed: IpInfoResponse = serde_json::from_str(&body)
            .map_err(|e| FetchError::Parse { url: self.url.clone(), reason: e.to_string() })?;

        let loc = parsed.loc.as_deref().unwrap_or("0,0");
        let (latitude, longitude) = parse_loc(loc).ok_or_else(|| FetchError::Parse {
            url: self.url.clone(),
            reason: format!("'loc' is not a \"lat,lon\" pair: '{loc}'"),
        })?;

        let city = parsed.city.unwrap_or_else(|| "Unknown".to_string());

        tracing::debug!(latitude, longitude, %city, "resolved location");
        Ok(Location { latitude, longitude, city })
    }
}

#[derive(Debug, Deserialize)]
struct IpInfoResponse {
    loc: Option<String>,
    city: Option<String>,
}

/// Parse ipinfo's `"lat,lon"` string. Anything after the second comma is ignored.
fn parse_loc(loc: &str) -> Option<(f64, f64)> {
    let mut parts = loc.split(',');
    let lat = parts.next()?.trim().parse().ok()?;
    let lon = parts.next()?.trim().parse().ok()?;
    Some((lat, lon))
}

#[async_trait]
impl LocationResolver for IpInfoResolver {
    async fn resolve(&self) -> Fetched<Location> {
        Fetched::from_result(self.lookup().await, Location::fallback)
    }
}
