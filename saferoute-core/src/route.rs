//! Waypoint expansion and per-waypoint weather evaluation of a trip.

use std::{collections::HashMap, time::Duration};

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::{
    WeatherError,
    provider::{WeatherProvider, with_timeout},
    safety::{RainLevel, classify},
};

/// Known intermediate stops between named endpoints.
///
/// Keys are exact, case-sensitive `(origin, destination)` pairs. Pairs not
/// in the table expand to the direct two-point route.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CorridorTable {
    corridors: HashMap<(String, String), Vec<String>>,
}

impl CorridorTable {
    pub fn empty() -> Self {
        Self { corridors: HashMap::new() }
    }

    /// Add or replace the stops between `origin` and `destination`.
    pub fn insert(
        &mut self,
        origin: impl Into<String>,
        destination: impl Into<String>,
        via: Vec<String>,
    ) {
        self.corridors.insert((origin.into(), destination.into()), via);
    }

    pub fn via(&self, origin: &str, destination: &str) -> &[String] {
        self.corridors
            .get(&(origin.to_owned(), destination.to_owned()))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn expand(&self, origin: &str, destination: &str) -> Vec<String> {
        let via = self.via(origin, destination);

        let mut waypoints = Vec::with_capacity(via.len() + 2);
        waypoints.push(origin.to_owned());
        waypoints.extend(via.iter().cloned());
        waypoints.push(destination.to_owned());
        waypoints
    }
}

impl Default for CorridorTable {
    fn default() -> Self {
        let mut table = Self::empty();
        table.insert("Manila", "Batangas", vec!["Tagaytay".into(), "Dasmariñas".into()]);
        table
    }
}

/// A trip to evaluate. Both ends must be non-blank.
///
/// Surrounding whitespace is stripped from both ends, and the trimmed names
/// are what the corridor lookup and the weather service see. Matching is
/// otherwise exact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteRequest {
    origin: String,
    destination: String,
}

impl RouteRequest {
    pub fn new(origin: &str, destination: &str) -> Result<Self, WeatherError> {
        let origin = origin.trim();
        let destination = destination.trim();

        if origin.is_empty() || destination.is_empty() {
            return Err(WeatherError::invalid_input(
                "Please enter both your location and destination.",
            ));
        }

        Ok(Self { origin: origin.to_owned(), destination: destination.to_owned() })
    }

    pub fn origin(&self) -> &str {
        &self.origin
    }

    pub fn destination(&self) -> &str {
        &self.destination
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WaypointResult {
    pub place: String,
    pub condition: String,
    pub rain_level: RainLevel,
    pub is_safe: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SkippedWaypoint {
    pub place: String,
    pub error: WeatherError,
}

#[derive(Debug, Clone, PartialEq)]
pub enum WaypointOutcome {
    Fetched(WaypointResult),
    Failed(SkippedWaypoint),
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct RouteVerdict {
    /// Successfully evaluated waypoints, in route order.
    pub waypoints: Vec<WaypointResult>,
    /// Waypoints whose weather could not be fetched.
    pub skipped: Vec<SkippedWaypoint>,
    pub any_unsafe: bool,
}

impl RouteVerdict {
    pub fn from_outcomes(outcomes: impl IntoIterator<Item = WaypointOutcome>) -> Self {
        let mut verdict = RouteVerdict::default();

        for outcome in outcomes {
            match outcome {
                WaypointOutcome::Fetched(result) => {
                    verdict.any_unsafe |= !result.is_safe;
                    verdict.waypoints.push(result);
                }
                WaypointOutcome::Failed(skipped) => verdict.skipped.push(skipped),
            }
        }

        verdict
    }

    pub fn is_degraded(&self) -> bool {
        !self.skipped.is_empty()
    }

    pub fn trip_message(&self) -> &'static str {
        if self.any_unsafe {
            "One or more locations along your route may have unsafe travel conditions. \
             Proceed with caution or consider delaying your trip."
        } else {
            "Your route appears to be safe for travel. Have a good trip!"
        }
    }

    /// `Manila (Sunny - Safe) → Tagaytay (Heavy rain - Unsafe)`
    pub fn display_route(&self) -> String {
        self.waypoints
            .iter()
            .map(|w| {
                let status = if w.is_safe { "Safe" } else { "Unsafe" };
                format!("{} ({} - {status})", w.place, w.condition)
            })
            .collect::<Vec<_>>()
            .join(" → ")
    }
}

/// Fetches and classifies every waypoint of a route, one at a time.
#[derive(Debug)]
pub struct RouteEvaluator<'a> {
    provider: &'a dyn WeatherProvider,
    corridors: &'a CorridorTable,
    timeout: Duration,
}

impl<'a> RouteEvaluator<'a> {
    pub fn new(
        provider: &'a dyn WeatherProvider,
        corridors: &'a CorridorTable,
        timeout: Duration,
    ) -> Self {
        Self { provider, corridors, timeout }
    }

    /// A failed waypoint is recorded in `skipped` and never aborts the route.
    pub async fn evaluate(&self, request: &RouteRequest) -> RouteVerdict {
        let waypoints = self.corridors.expand(request.origin(), request.destination());
        debug!(?waypoints, "evaluating route");

        let mut outcomes = Vec::with_capacity(waypoints.len());
        for place in waypoints {
            let fetched =
                with_timeout(self.timeout, &place, self.provider.fetch_current(&place)).await;

            let outcome = match fetched {
                Ok(obs) => {
                    let assessment = classify(&obs);
                    debug!(
                        place = %place,
                        condition = %obs.condition,
                        precipitation_mm = obs.precipitation_mm,
                        is_safe = assessment.is_safe,
                        "classified waypoint"
                    );
                    WaypointOutcome::Fetched(WaypointResult {
                        place,
                        condition: obs.condition,
                        rain_level: assessment.rain_level,
                        is_safe: assessment.is_safe,
                    })
                }
                Err(error) => {
                    warn!(place = %place, %error, "skipping waypoint");
                    WaypointOutcome::Failed(SkippedWaypoint { place, error })
                }
            };
            outcomes.push(outcome);
        }

        let verdict = RouteVerdict::from_outcomes(outcomes);
        info!(
            origin = request.origin(),
            destination = request.destination(),
            evaluated = verdict.waypoints.len(),
            skipped = verdict.skipped.len(),
            any_unsafe = verdict.any_unsafe,
            "route evaluated"
        );
        verdict
    }
}
