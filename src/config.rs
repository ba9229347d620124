use clap::{Parser, Subcommand, ValueEnum};

use crate::error::AppError;
use crate::source::WeatherSource;
use crate::weather::{BackendClient, DEFAULT_BASE_URL};
use crate::weatherapi::{WEATHER_ENDPOINT, WeatherApiClient};

#[derive(Parser, Debug)]
#[command(name = "albania-weather", author, version)]
#[command(about = "Current weather for the regions of Albania")]
pub struct Cli {
    /// Base URL of the local weather backend
    #[arg(long, env = "WEATHER_BASE_URL", default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    /// Which service answers weather queries
    #[arg(long, env = "WEATHER_SOURCE", value_enum, default_value_t = SourceKind::Backend)]
    pub source: SourceKind,

    /// WeatherAPI current-conditions endpoint (with `--source weatherapi`)
    #[arg(long, env = "WEATHERAPI_ENDPOINT", default_value = WEATHER_ENDPOINT)]
    pub weatherapi_endpoint: String,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Interactive view: one click chain or city name per line, `exit` to stop
    Watch,
    /// Show the weather for one city
    Show { city: String },
    /// Resolve a map click (element ids, innermost first) and show its weather
    Click {
        #[arg(required = true)]
        ids: Vec<String>,
    },
    /// Fetch every region and print a summary table
    Survey,
    /// List the regions and their map identifiers
    Cities,
    /// Check that the backend is up
    Health,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    /// Local backend `/weather` route
    Backend,
    /// api.weatherapi.com directly, key from WEATHER_API_KEY
    Weatherapi,
}

impl Cli {
    pub fn command(&self) -> Command {
        self.command.clone().unwrap_or(Command::Watch)
    }

    pub fn backend(&self) -> BackendClient {
        BackendClient::new(self.base_url.as_str())
    }

    pub fn weather_source(&self) -> Result<WeatherSource, AppError> {
        Ok(match self.source {
            SourceKind::Backend => WeatherSource::Backend(self.backend()),
            SourceKind::Weatherapi => {
                WeatherSource::WeatherApi(WeatherApiClient::from_env(self.weatherapi_endpoint.as_str())?)
            }
        })
    }
}
