use tracing::{debug, error, info};

use crate::city::{self, City};
use crate::error::AppError;
use crate::source::WeatherSource;
use crate::weather::WeatherReading;

/// Message shown for every fetch failure, whatever its cause.
pub const GENERIC_FAILURE_MESSAGE: &str =
    "Ndodhi një gabim gjatë marrjes së të dhënave të motit.";

/// What the view is currently showing.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum RequestState {
    #[default]
    Idle,
    Loading {
        city: City,
    },
    Succeeded(WeatherReading),
    Failed(String),
}

/// Handle for one issued selection, passed back with its fetch outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket {
    pub seq: u64,
    pub city: City,
}

/// Single owner of the view state. Renderers only get `&RequestState`.
#[derive(Debug, Default)]
pub struct ViewController {
    state: RequestState,
    issued: u64,
}

impl ViewController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &RequestState {
        &self.state
    }

    /// The reading on display, if the last completed request succeeded.
    pub fn reading(&self) -> Option<&WeatherReading> {
        match &self.state {
            RequestState::Succeeded(reading) => Some(reading),
            _ => None,
        }
    }

    /// Start loading `city`. Valid from every state.
    pub fn select(&mut self, city: City) -> Ticket {
        self.issued += 1;
        let ticket = Ticket {
            seq: self.issued,
            city,
        };
        debug!(seq = ticket.seq, city = city.id(), "selection started");
        self.state = RequestState::Loading { city };
        ticket
    }

    /// Resolve a click chain (innermost id first) and start loading the city.
    /// A miss is a no-op.
    pub fn click<I, S>(&mut self, candidates: I) -> Option<Ticket>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        city::resolve_region(candidates).map(|city| self.select(city))
    }

    /// Apply a fetch outcome.
    ///
    /// Outcomes are applied in arrival order with no cancellation, so a slow
    /// response for an older selection overwrites the view of a newer one.
    pub fn finish(&mut self, ticket: Ticket, outcome: Result<WeatherReading, AppError>) {
        if ticket.seq < self.issued {
            debug!(
                seq = ticket.seq,
                latest = self.issued,
                city = ticket.city.id(),
                "stale response overwrites newer selection"
            );
        }

        self.state = match outcome {
            Ok(reading) => {
                info!("Weather for {} loaded", ticket.city);
                RequestState::Succeeded(reading)
            }
            Err(e) => {
                error!("Failed to load weather for {}: {}", ticket.city, e);
                RequestState::Failed(GENERIC_FAILURE_MESSAGE.to_string())
            }
        };
    }

    /// Select, fetch and apply in one go.
    pub async fn refresh(&mut self, source: &WeatherSource, city: City) -> &RequestState {
        let ticket = self.select(city);
        let outcome = source.fetch(city.display_name()).await;
        self.finish(ticket, outcome);
        &self.state
    }
}
