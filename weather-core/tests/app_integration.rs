//! End-to-end lookups through WeatherApp against a mock geocoder and NWS.

use chrono::NaiveDate;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};
use zipweather_core::{
    Config, ErrorKind, LineKind, Outcome, WeatherApp, error::MSG_OUT_OF_COVERAGE,
};

fn daily_periods() -> serde_json::Value {
    serde_json::json!({ "properties": { "periods": [
        {
            "name": "Today", "startTime": "2024-05-06T06:00:00-05:00",
            "temperature": 91, "temperatureUnit": "F",
            "probabilityOfPrecipitation": { "value": 20 },
            "windSpeed": "10 mph", "shortForecast": "Sunny"
        },
        {
            "name": "Tonight", "startTime": "2024-05-06T18:00:00-05:00",
            "temperature": 72, "temperatureUnit": "F",
            "probabilityOfPrecipitation": { "value": null },
            "windSpeed": "5 mph", "shortForecast": "Clear"
        }
    ]}})
}

fn hourly_periods() -> serde_json::Value {
    serde_json::json!({ "properties": { "periods": [
        {
            "name": "", "startTime": "2024-05-06T14:00:00-05:00",
            "temperature": 90, "temperatureUnit": "F",
            "probabilityOfPrecipitation": { "value": 0 },
            "windSpeed": "10 mph", "shortForecast": "Sunny"
        }
    ]}})
}

async fn mount_forecast(server: &MockServer, points_path: &str) {
    Mock::given(method("GET"))
        .and(path(points_path))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "properties": {
                "forecast": format!("{}/gridpoints/EWX/1,1/forecast", server.uri()),
                "forecastHourly": format!("{}/gridpoints/EWX/1,1/forecast/hourly", server.uri())
            }
        })))
        .mount(server)
        .await;
    Mock::given(method("GET"))
        .and(path("/gridpoints/EWX/1,1/forecast"))
        .respond_with(ResponseTemplate::new(200).set_body_json(daily_periods()))
        .mount(server)
        .await;
    Mock::given(method("GET"))
        .and(path("/gridpoints/EWX/1,1/forecast/hourly"))
        .respond_with(ResponseTemplate::new(200).set_body_json(hourly_periods()))
        .mount(server)
        .await;
}

fn config(geocoder_url: &str, forecast_url: &str) -> Config {
    Config {
        user_agent: Some("test-agent".to_string()),
        geocoder_url: Some(geocoder_url.to_string()),
        forecast_url: Some(forecast_url.to_string()),
        ..Config::default()
    }
}

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 5, 6).unwrap()
}

#[tokio::test]
async fn test_default_load_survives_reverse_geocode_network_error() {
    let server = MockServer::start().await;
    mount_forecast(&server, "/points/29.5,-98.13").await;

    // nothing listens on port 9, so reverse geocoding fails at the transport level
    let app = WeatherApp::from_config(&config("http://127.0.0.1:9", &server.uri())).unwrap();
    let outcome = app.load_default().await.unwrap();
    assert_eq!(outcome, Outcome::Applied);

    let state = app.state();
    assert_eq!(state.location.as_deref(), Some("Seguin, Texas"));
    assert!(state.error.is_none());
    assert_eq!(state.daily.len(), 1);
    assert_eq!(state.daily[0].high, "91°");
    assert_eq!(state.hourly.len(), 1);
}

#[tokio::test]
async fn test_zip_search_renders_location_and_tables() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            {
                "lat": "29.5688",
                "lon": "-97.9647",
                "display_name": "Seguin, Guadalupe County, Texas, 78155, United States"
            }
        ])))
        .mount(&server)
        .await;
    mount_forecast(&server, "/points/29.57,-97.96").await;

    let app = WeatherApp::from_config(&config(&server.uri(), &server.uri())).unwrap();
    app.handle_search("78155").await.unwrap();

    let lines = app.render(today());
    let banner: Vec<&str> = lines
        .iter()
        .filter(|l| l.kind == LineKind::Banner)
        .map(|l| l.text.as_str())
        .collect();
    assert_eq!(banner, vec!["Showing weather for Seguin, Texas"]);

    let rows: Vec<&str> = lines
        .iter()
        .filter(|l| l.kind == LineKind::Row)
        .map(|l| l.text.as_str())
        .collect();
    // both day and night periods land on the same UTC date
    assert_eq!(rows.len(), 2);
    assert!(rows[0].starts_with("Today"));
    assert!(rows[0].contains("91°/72°"));
    assert!(rows[0].contains("20%"));
    assert!(rows[1].starts_with("Monday, 14:00"));
}

#[tokio::test]
async fn test_zip_outside_coverage_shows_message_verbatim() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            { "lat": "18.4661", "lon": "-66.1057", "display_name": "San Juan, Puerto Rico" }
        ])))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/points/18.47,-66.11"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let app = WeatherApp::from_config(&config(&server.uri(), &server.uri())).unwrap();
    let err = app.handle_search("00901").await.unwrap_err();

    assert_eq!(err.kind(), ErrorKind::OutOfCoverage);
    let state = app.state();
    assert_eq!(state.error.as_deref(), Some(MSG_OUT_OF_COVERAGE));
    assert!(!state.daily_visible);
    assert!(!state.hourly_visible);
    assert!(!state.loading);
}
