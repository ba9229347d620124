// Response data structures for the local weather backend
mod response;

pub use response::WeatherReading;

use reqwest::header::CACHE_CONTROL;
use serde::de::DeserializeOwned;
use tracing::{debug, error, info};

use crate::error::AppError;

/// Default address of the local weather backend
pub const DEFAULT_BASE_URL: &str = "http://localhost:5000";

/// Client for the local weather backend.
#[derive(Debug, Clone)]
pub struct BackendClient {
    client: reqwest::Client,
    base_url: String,
}

impl BackendClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            client: reqwest::Client::new(),
            base_url,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetches current weather for a city from the backend.
    ///
    /// # Arguments
    /// * `city` - City display name (e.g., "Tirane")
    ///
    /// # Returns
    /// * `WeatherReading` exactly as the backend sent it
    /// * `HttpError` for a non-success status, `NetworkError` when the request
    ///   could not be completed, `ParseError` when the body is malformed
    ///
    /// One attempt only; no retry and no timeout beyond the transport default.
    pub async fn fetch(&self, city: &str) -> Result<WeatherReading, AppError> {
        info!("Fetching weather for {}", city);

        let url = format!("{}/weather", self.base_url);
        let request = self
            .client
            .get(&url)
            .query(&[("city", city)])
            .header(CACHE_CONTROL, "no-cache");

        let reading: WeatherReading = self.send_json(request).await?;
        debug!("Weather data: {:?}", reading);
        Ok(reading)
    }

    /// Probe the backend `/health` route and return its reported status.
    pub async fn health(&self) -> Result<String, AppError> {
        let url = format!("{}/health", self.base_url);
        let request = self.client.get(&url).header(CACHE_CONTROL, "no-cache");
        let health: response::HealthResponse = self.send_json(request).await?;
        Ok(health.status)
    }

    async fn send_json<T: DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<T, AppError> {
        let response = request.send().await.inspect_err(|e| {
            error!("Fetch error: {}", e);
        })?;

        let status = response.status();
        if !status.is_success() {
            error!("Backend responded with {}", status);
            return Err(AppError::from_status(status));
        }

        // Read the body first so malformed JSON surfaces as ParseError
        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| {
            error!("Failed to parse backend response: {}", e);
            AppError::ParseError(e)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn fetch_sends_city_and_no_cache() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/weather"))
            .and(query_param("city", "Tirane"))
            .and(header("cache-control", "no-cache"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "city": "Tirane",
                "temperature": 21,
                "description": "Clear sky",
                "humidity": 40,
                "icon": "//cdn.weatherapi.com/weather/64x64/day/113.png"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = BackendClient::new(server.uri());
        let reading = client.fetch("Tirane").await.unwrap();
        assert_eq!(reading.city, "Tirane");
        assert_eq!(reading.temperature, 21.0);
        assert_eq!(reading.humidity, 40.0);
        assert_eq!(
            reading.icon.as_deref(),
            Some("//cdn.weatherapi.com/weather/64x64/day/113.png")
        );
    }

    #[tokio::test]
    async fn non_success_status_is_http_error() {
        let server = MockServer::start().await;
        Mock::given(path("/weather"))
            .respond_with(ResponseTemplate::new(502).set_body_json(json!({"error": "upstream"})))
            .mount(&server)
            .await;

        let err = BackendClient::new(server.uri()).fetch("Fier").await.unwrap_err();
        match err {
            AppError::HttpError { status, reason } => {
                assert_eq!(status, 502);
                assert_eq!(reason, "Bad Gateway");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn missing_field_is_parse_error() {
        let server = MockServer::start().await;
        Mock::given(path("/weather"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "city": "Berat",
                "temperature": 18.5,
                "description": "Mist"
            })))
            .mount(&server)
            .await;

        let err = BackendClient::new(server.uri()).fetch("Berat").await.unwrap_err();
        assert!(matches!(err, AppError::ParseError(_)));
    }

    #[tokio::test]
    async fn invalid_json_is_parse_error() {
        let server = MockServer::start().await;
        Mock::given(path("/weather"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
            .mount(&server)
            .await;

        let err = BackendClient::new(server.uri()).fetch("Lezhe").await.unwrap_err();
        assert!(matches!(err, AppError::ParseError(_)));
    }

    #[tokio::test]
    async fn unreachable_backend_is_network_error() {
        // Port 9 (discard) is not expected to accept HTTP connections
        let err = BackendClient::new("http://127.0.0.1:9")
            .fetch("Kukes")
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NetworkError(_)));
    }

    #[tokio::test]
    async fn health_reports_status() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/health"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": "ok"})))
            .mount(&server)
            .await;

        let client = BackendClient::new(format!("{}/", server.uri()));
        assert_eq!(client.health().await.unwrap(), "ok");
    }
}
