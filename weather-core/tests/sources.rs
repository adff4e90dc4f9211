//! Data sources against a mock HTTP server: real answers come through as
//! `Fetched::Live`, every failure mode degrades to the documented default.

use std::{io::Cursor, time::Duration};

use image::{ImageFormat, Rgba, RgbaImage};
use weather_core::{Config, FetchError, ForecastPayload, Location, provider::sources_from_config};
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{method, path, query_param},
};

fn config_for(server: &MockServer) -> Config {
    Config {
        geolocation_url: format!("{}/json", server.uri()),
        forecast_url: format!("{}/v1/forecast", server.uri()),
        icon_url_template: format!("{}/img/{{icon}}.png", server.uri()),
        timeout_secs: 1,
        icon_size: 100,
    }
}

fn sample_forecast() -> serde_json::Value {
    serde_json::json!({
        "latitude": 52.52,
        "longitude": 13.42,
        "current_weather": {
            "time": "2024-01-15T12:00",
            "temperature": 21.5,
            "windspeed": 10,
            "winddirection": 180,
            "weathercode": 3
        },
        "hourly": {
            "time": ["2024-01-15T12:00"],
            "relativehumidity_2m": [55],
            "precipitation": [0.0],
            "temperature_2m": [20.1],
            "weathercode": [3],
            "windspeed_10m": [9],
            "winddirection_10m": [175]
        }
    })
}

fn png_bytes() -> Vec<u8> {
    let img = RgbaImage::from_pixel(100, 100, Rgba([255, 255, 255, 255]));
    let mut buf = Cursor::new(Vec::new());
    img.write_to(&mut buf, ImageFormat::Png).expect("encode png");
    buf.into_inner()
}

// ============================================================================
// Location
// ============================================================================

#[tokio::test]
async fn location_from_ipinfo() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "ip": "203.0.113.7",
            "city": "Berlin",
            "loc": "52.5244,13.4105"
        })))
        .mount(&server)
        .await;

    let sources = sources_from_config(&config_for(&server)).expect("sources");
    let fetched = sources.location.resolve().await;

    assert!(fetched.is_live());
    assert_eq!(fetched.into_value(), Location::new(52.5244, 13.4105, "Berlin"));
}

#[tokio::test]
async fn location_without_city_is_unknown() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"loc": "1.5,2.5"})))
        .mount(&server)
        .await;

    let sources = sources_from_config(&config_for(&server)).expect("sources");
    let location = sources.location.resolve().await.into_value();

    assert_eq!(location, Location::new(1.5, 2.5, "Unknown"));
}

#[tokio::test]
async fn location_falls_back_on_server_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/json"))
        .respond_with(ResponseTemplate::new(503).set_body_string("maintenance"))
        .mount(&server)
        .await;

    let sources = sources_from_config(&config_for(&server)).expect("sources");
    let fetched = sources.location.resolve().await;

    assert!(!fetched.is_live());
    assert!(matches!(fetched.reason(), Some(FetchError::Status { .. })));
    assert_eq!(fetched.into_value(), Location::fallback());
}

#[tokio::test]
async fn location_falls_back_on_bad_loc() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/json"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({"city": "Nowhere", "loc": "abc"})),
        )
        .mount(&server)
        .await;

    let sources = sources_from_config(&config_for(&server)).expect("sources");
    let fetched = sources.location.resolve().await;

    assert!(matches!(fetched.reason(), Some(FetchError::Parse { .. })));
    assert_eq!(fetched.into_value(), Location::fallback());
}

// ============================================================================
// Forecast
// ============================================================================

#[tokio::test]
async fn forecast_sends_expected_query() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/forecast"))
        .and(query_param("latitude", "52.52"))
        .and(query_param("longitude", "13.41"))
        .and(query_param("current_weather", "true"))
        .and(query_param(
            "hourly",
            "relativehumidity_2m,precipitation,temperature_2m,weathercode,windspeed_10m,winddirection_10m",
        ))
        .respond_with(ResponseTemplate::new(200).set_body_json(sample_forecast()))
        .mount(&server)
        .await;

    let sources = sources_from_config(&config_for(&server)).expect("sources");
    let fetched = sources.forecast.fetch(52.52, 13.41).await;

    assert!(fetched.is_live(), "unexpected fallback: {:?}", fetched.reason());
    let payload = fetched.into_value();
    assert!(payload.current_weather.is_some());
    assert_eq!(payload.hourly.expect("hourly").temperature_2m.len(), 1);
}

#[tokio::test]
async fn forecast_falls_back_to_empty_on_invalid_json() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/forecast"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let sources = sources_from_config(&config_for(&server)).expect("sources");
    let fetched = sources.forecast.fetch(0.0, 0.0).await;

    assert!(!fetched.is_live());
    assert_eq!(fetched.into_value(), ForecastPayload::empty());
}

#[tokio::test]
async fn forecast_falls_back_on_timeout() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/forecast"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(sample_forecast())
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&server)
        .await;

    let sources = sources_from_config(&config_for(&server)).expect("sources");
    let fetched = sources.forecast.fetch(0.0, 0.0).await;

    assert!(matches!(fetched.reason(), Some(FetchError::Request { .. })));
    assert!(fetched.value().is_empty());
}

// ============================================================================
// Icon
// ============================================================================

#[tokio::test]
async fn icon_is_downloaded_and_decoded() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/img/04d.png"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(png_bytes()))
        .mount(&server)
        .await;

    let config = config_for(&server);
    let sources = sources_from_config(&config).expect("sources");
    let url = weather_core::classify::icon_url_with(&config.icon_url_template, 3);
    let fetched = sources.icon.load(&url).await;

    assert!(fetched.is_live());
    let icon = fetched.into_value();
    assert_eq!((icon.width(), icon.height()), (100, 100));
    assert!(!icon.is_blank());
}

#[tokio::test]
async fn icon_falls_back_to_blank_on_404() {
    let server = MockServer::start().await;

    let config = config_for(&server);
    let sources = sources_from_config(&config).expect("sources");
    let fetched = sources.icon.load(&format!("{}/img/missing.png", server.uri())).await;

    assert!(!fetched.is_live());
    let icon = fetched.into_value();
    assert_eq!((icon.width(), icon.height()), (100, 100));
    assert!(icon.is_blank());
}

#[tokio::test]
async fn icon_falls_back_on_undecodable_body() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/img/01d.png"))
        .respond_with(ResponseTemplate::new(200).set_body_string("definitely not a png"))
        .mount(&server)
        .await;

    let config = config_for(&server);
    let sources = sources_from_config(&config).expect("sources");
    let fetched = sources.icon.load(&format!("{}/img/01d.png", server.uri())).await;

    assert!(matches!(fetched.reason(), Some(FetchError::Decode { .. })));
    assert!(fetched.value().is_blank());
}
