use anyhow::{Context, anyhow};
use chrono::Utc;
use clap::{Parser, Subcommand};
use inquire::{Password, PasswordDisplayMode, Text};
use saferoute_core::{Config, RouteRequest, TravelService, WeatherError};
use tracing::debug;

use crate::output;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "saferoute", version, about = "Route safety and rain alerts from live weather")]
pub struct Cli {
    /// Log filter used when RUST_LOG is not set, e.g. "info" or "saferoute_core=debug".
    #[arg(long, global = true, default_value = "warn")]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store the WeatherAPI.com key and default city.
    Configure,

    /// Show current weather, forecast, rain alert and travel advice for a city.
    Show {
        /// City name; defaults to the configured default city.
        city: Option<String>,
    },

    /// Check the weather along a route.
    Route {
        /// Starting location.
        origin: String,

        /// Destination.
        destination: String,
    },

    /// Print the travel advice for a condition and temperature, offline.
    Advise {
        /// Condition text, e.g. "Patchy rain possible".
        #[arg(long)]
        condition: Option<String>,

        /// Temperature in °C.
        #[arg(long, allow_negative_numbers = true)]
        temp: f64,
    },
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command {
            Command::Configure => configure()?,
            Command::Show { city } => {
                let config = Config::load()?;
                let service = TravelService::from_config(&config)?;
                let city = city.unwrap_or_else(|| config.default_city.clone());
                debug!(%city, "fetching city report");

                let report =
                    service.city_report(&city, Utc::now()).await.map_err(user_facing)?;
                println!("{}", output::render_city_report(&report));
            }
            Command::Route { origin, destination } => {
                let request = RouteRequest::new(&origin, &destination).map_err(user_facing)?;

                let config = Config::load()?;
                let service = TravelService::from_config(&config)?;

                debug!(?request, "evaluating route");
                let verdict = service.evaluate_route(&request).await;
                println!("{}", output::render_route(&verdict));
            }
            Command::Advise { condition, temp } => {
                let advisory = TravelService::get_advisory(condition.as_deref(), temp);
                println!("{advisory}");
            }
        }

        Ok(())
    }
}

fn configure() -> anyhow::Result<()> {
    let mut config = Config::load()?;

    let mut prompt = Password::new("WeatherAPI.com API key:")
        .with_display_mode(PasswordDisplayMode::Masked)
        .without_confirmation();
    if config.is_configured() {
        prompt = prompt.with_help_message("Leave blank to keep the current key");
    }
    let api_key = prompt.prompt().context("Failed to read API key")?;

    let default_city = Text::new("Default city:")
        .with_default(&config.default_city)
        .prompt()
        .context("Failed to read default city")?;

    apply_answers(&mut config, &api_key, &default_city)?;
    config.save()?;

    println!("Saved configuration to {}", Config::config_file_path()?.display());
    Ok(())
}

/// A blank key is accepted only when one is already stored.
fn apply_answers(config: &mut Config, api_key: &str, default_city: &str) -> anyhow::Result<()> {
    let api_key = api_key.trim();
    if !api_key.is_empty() {
        config.set_api_key(api_key.to_owned());
    } else if !config.is_configured() {
        return Err(anyhow!("API key must not be empty"));
    }

    if !default_city.trim().is_empty() {
        config.default_city = default_city.trim().to_owned();
    }
    Ok(())
}

fn user_facing(err: WeatherError) -> anyhow::Error {
    match err {
        WeatherError::InvalidInput { message } => anyhow!(message),
        err => anyhow!("{}\n{err}", err.user_message()),
    }
}
