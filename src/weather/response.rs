use serde::Deserialize;

/// Current weather for one city, as returned by the backend `/weather` route
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct WeatherReading {
    /// City name as reported by the API
    pub city: String,
    /// Temperature in Celsius
    pub temperature: f64,
    /// Human-readable description of the weather condition (e.g., "Partly cloudy")
    pub description: String,
    /// Humidity percentage (0-100)
    pub humidity: f64,
    /// Condition icon, absolute or scheme-relative URL
    #[serde(default)]
    pub icon: Option<String>,
}

/// Body of the backend `/health` route
#[derive(Deserialize, Debug)]
pub struct HealthResponse {
    pub status: String,
}
