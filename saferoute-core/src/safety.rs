//! Per-waypoint safety classification.

use serde::{Deserialize, Serialize};

use crate::model::WeatherObservation;

/// Precipitation above this amount makes a waypoint unsafe.
pub const MAX_SAFE_PRECIPITATION_MM: f64 = 10.0;

const SEVERE_CONDITIONS: &[&str] = &["thunderstorm", "tornado"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RainLevel {
    High,
    Low,
}

impl std::fmt::Display for RainLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            RainLevel::High => "High",
            RainLevel::Low => "Low",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SafetyAssessment {
    pub is_safe: bool,
    pub rain_level: RainLevel,
}

/// Judge a single observation. Condition matching ignores case.
pub fn classify(obs: &WeatherObservation) -> SafetyAssessment {
    let condition = obs.condition.to_lowercase();
    let severe = SEVERE_CONDITIONS.iter().any(|word| condition.contains(word));

    let is_safe = !severe && obs.precipitation_mm <= MAX_SAFE_PRECIPITATION_MM;
    let rain_level = if obs.precipitation_mm > 0.0 { RainLevel::High } else { RainLevel::Low };

    SafetyAssessment { is_safe, rain_level }
}
