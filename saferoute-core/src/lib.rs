//! Core library for the `saferoute` CLI.
//!
//! This crate defines:
//! - Configuration & credentials handling
//! - The weather provider abstraction and its WeatherAPI.com implementation
//! - Route expansion, per-waypoint safety classification and trip verdicts
//! - Rain alerts and travel advisories for a single city
//!
//! It is used by `saferoute-cli`, but can also be reused by other binaries or services.

pub mod advisory;
pub mod config;
pub mod error;
pub mod model;
pub mod provider;
pub mod rain;
pub mod route;
pub mod safety;
pub mod service;

pub use advisory::{Advisory, advise};
pub use config::{Config, CorridorConfig, ProviderConfig};
pub use error::WeatherError;
pub use model::{DailyForecast, Forecast, HourlyForecastEntry, Location, WeatherObservation};
pub use provider::WeatherProvider;
pub use rain::{RainAlert, RainIntensity, nearest_rain};
pub use route::{
    CorridorTable, RouteEvaluator, RouteRequest, RouteVerdict, SkippedWaypoint, WaypointResult,
};
pub use safety::{RainLevel, SafetyAssessment, classify};
pub use service::{CityReport, TravelService};
