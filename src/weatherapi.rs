use std::env;

use tracing::{debug, error, info};

use crate::error::AppError;
use crate::weather::WeatherReading;

mod response;

pub const WEATHER_ENDPOINT: &str = "https://api.weatherapi.com/v1/current.json";

/// Environment variables that may hold the WeatherAPI key, checked in order
pub const API_KEY_VARS: [&str; 2] = ["WEATHER_API_KEY", "WEATHERAPI_API_KEY"];

/// Direct client for api.weatherapi.com, used when no local backend runs.
#[derive(Debug, Clone)]
pub struct WeatherApiClient {
    client: reqwest::Client,
    endpoint: String,
    api_key: String,
}

impl WeatherApiClient {
    pub fn new(endpoint: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: endpoint.into(),
            api_key: api_key.into(),
        }
    }

    /// Build a client with the key taken from `WEATHER_API_KEY` or `WEATHERAPI_API_KEY`.
    pub fn from_env(endpoint: impl Into<String>) -> Result<Self, AppError> {
        let api_key = api_key_from(|name| env::var(name).ok())?;
        Ok(Self::new(endpoint, api_key))
    }

    pub async fn fetch(&self, location: &str) -> Result<WeatherReading, AppError> {
        info!("Fetching weather data for location: {}", location);
        let response = self
            .client
            .get(&self.endpoint)
            .query(&[("key", self.api_key.as_str()), ("q", location), ("aqi", "no")])
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            error!("Failed to fetch weather data: {}", status);
            // prefer the upstream's own message over the reason phrase
            let upstream: response::ErrorResponse = serde_json::from_str(&body).unwrap_or_default();
            return Err(match upstream.error {
                Some(detail) if !detail.message.is_empty() => AppError::HttpError {
                    status: status.as_u16(),
                    reason: detail.message,
                },
                _ => AppError::from_status(status),
            });
        }

        let current: response::CurrentResponse = serde_json::from_str(&body)?;
        debug!("Weather data fetched successfully: {:?}", current);
        Ok(current.into())
    }
}

/// First non-blank key among `API_KEY_VARS`.
fn api_key_from(lookup: impl Fn(&str) -> Option<String>) -> Result<String, AppError> {
    API_KEY_VARS
        .iter()
        .filter_map(|name| lookup(name))
        .find(|key| !key.trim().is_empty())
        .ok_or_else(|| AppError::EnvVarNotSet(API_KEY_VARS.join(" or ")))
}
