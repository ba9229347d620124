use serde::Deserialize;

use crate::weather::WeatherReading;

/// Response structure for the WeatherAPI current weather endpoint
/// Represents the JSON structure returned by api.weatherapi.com/v1/current.json
#[derive(Deserialize, Debug)]
pub struct CurrentResponse {
    pub location: Location,
    /// Current weather conditions
    pub current: CurrentWeather,
}

#[derive(Deserialize, Debug)]
pub struct Location {
    pub name: String,
}

/// Contains the current weather data including temperature and conditions
#[derive(Deserialize, Debug)]
pub struct CurrentWeather {
    /// Temperature in Celsius
    pub temp_c: f64,
    pub condition: WeatherCondition,
    /// Humidity percentage (0-100)
    pub humidity: f64,
}

/// Weather condition description
#[derive(Deserialize, Debug)]
pub struct WeatherCondition {
    /// Human-readable description of the weather condition (e.g., "Partly cloudy")
    pub text: String,
    /// Scheme-relative icon URL, e.g. "//cdn.weatherapi.com/weather/64x64/day/113.png"
    #[serde(default)]
    pub icon: Option<String>,
}

/// Error envelope returned alongside non-success statuses
#[derive(Deserialize, Debug, Default)]
pub struct ErrorResponse {
    #[serde(default)]
    pub error: Option<ErrorDetail>,
}

#[derive(Deserialize, Debug)]
pub struct ErrorDetail {
    pub message: String,
}

impl From<CurrentResponse> for WeatherReading {
    fn from(response: CurrentResponse) -> Self {
        WeatherReading {
            city: response.location.name,
            temperature: response.current.temp_c,
            description: response.current.condition.text,
            humidity: response.current.humidity,
            icon: response.current.condition.icon,
        }
    }
}
