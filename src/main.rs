mod app;
mod city;
mod config;
mod controller;
mod error;
mod presentation;
mod source;
mod weather;
mod weatherapi;

use clap::Parser;
use tracing::{Instrument, error, info, span};
use tracing_subscriber::EnvFilter;

use crate::city::City;
use crate::config::{Cli, Command};
use crate::controller::ViewController;

/// Parses the command line, sets up logging on stderr and runs the chosen command.
/// Without a subcommand the interactive view starts and runs until `exit` or end of input.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command() {
        Command::Watch => {
            let source = cli.weather_source()?;
            app::watch(source)
                .instrument(span!(tracing::Level::INFO, "watch"))
                .await?;
        }
        Command::Show { city } => {
            let city: City = city.parse()?;
            show(&cli, city).await?;
        }
        Command::Click { ids } => {
            // an unresolved click is not an error, just nothing to show
            match city::resolve_region(&ids) {
                Some(city) => show(&cli, city).await?,
                None => info!("Nothing selected"),
            }
        }
        Command::Survey => {
            let source = cli.weather_source()?;
            for (city, outcome) in app::survey(&source).await {
                println!("{}", presentation::summary_line(city, &outcome));
            }
        }
        Command::Cities => {
            for city in City::ALL {
                println!("{}  {:<12} {}", city.region_id(), city.id(), city.display_name());
            }
        }
        Command::Health => {
            let backend = cli.backend();
            match backend.health().await {
                Ok(status) => println!("{}: {}", backend.base_url(), status),
                Err(e) => {
                    error!("Health check failed: {}", e);
                    return Err(e.into());
                }
            }
        }
    }

    Ok(())
}

async fn show(cli: &Cli, city: City) -> anyhow::Result<()> {
    let source = cli.weather_source()?;
    let mut controller = ViewController::new();
    let state = controller.refresh(&source, city).await;
    println!("{}", presentation::render(state));
    Ok(())
}
