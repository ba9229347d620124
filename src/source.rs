use std::fmt;

use crate::error::AppError;
use crate::weather::{BackendClient, WeatherReading};
use crate::weatherapi::WeatherApiClient;

/// Where weather readings come from. Cheap to clone; each fetch task holds its own copy.
#[derive(Debug, Clone)]
pub enum WeatherSource {
    /// The local backend's `/weather` route
    Backend(BackendClient),
    /// api.weatherapi.com called directly
    WeatherApi(WeatherApiClient),
}

impl WeatherSource {
    pub async fn fetch(&self, city: &str) -> Result<WeatherReading, AppError> {
        match self {
            WeatherSource::Backend(client) => client.fetch(city).await,
            WeatherSource::WeatherApi(client) => client.fetch(city).await,
        }
    }
}

impl fmt::Display for WeatherSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WeatherSource::Backend(client) => write!(f, "backend at {}", client.base_url()),
            WeatherSource::WeatherApi(_) => f.write_str("weatherapi.com"),
        }
    }
}
