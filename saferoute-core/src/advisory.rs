//! Travel advice derived from the current condition text and temperature.
//!
//! Rules are checked in order and the first match wins, so the position of a
//! rule in [`RULES`] is part of its meaning. Condition matching is
//! case-sensitive against the text as delivered by the weather service.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Advisory {
    DataUnavailable,
    FreezingRain,
    HeavyRainDelay,
    ColdOrSnow,
    ExtremeHeat,
    SevereWeather,
    PackUmbrella,
    HeatHydration,
    LightJacket,
    ClearToTravel,
    EnjoyTrip,
}

impl Advisory {
    pub fn message(&self) -> &'static str {
        match self {
            Advisory::DataUnavailable => "Weather data unavailable. Please check again later.",
            Advisory::FreezingRain => {
                "Freezing rain or snow expected. Roads may be icy; consider postponing your trip."
            }
            Advisory::HeavyRainDelay => {
                "Heavy rain expected. Expect delays and allow extra time for your journey."
            }
            Advisory::ColdOrSnow => {
                "Cold weather or snow. Roads may be slippery; dress warmly and drive with care."
            }
            Advisory::ExtremeHeat => {
                "Extreme heat warning. Avoid travelling during the hottest hours and stay hydrated."
            }
            Advisory::SevereWeather => {
                "Severe weather warning. It's not safe to travel in these conditions."
            }
            Advisory::PackUmbrella => {
                "Pack an umbrella or raincoat. Drive carefully and stay updated on weather alerts."
            }
            Advisory::HeatHydration => "It's hot and sunny. Stay hydrated and wear sunscreen.",
            Advisory::LightJacket => "Sunny but cool. Bring a light jacket.",
            Advisory::ClearToTravel => "Cloudy skies, but it's clear to travel.",
            Advisory::EnjoyTrip => "Weather looks good! Enjoy your trip.",
        }
    }
}

impl std::fmt::Display for Advisory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.message())
    }
}

pub struct AdvisoryRule {
    pub advisory: Advisory,
    pub applies: fn(&str, f64) -> bool,
}

pub const RULES: &[AdvisoryRule] = &[
    AdvisoryRule { advisory: Advisory::DataUnavailable, applies: |c, _| c.is_empty() },
    AdvisoryRule {
        advisory: Advisory::FreezingRain,
        applies: |c, t| c.contains("rain") && t < 0.0,
    },
    AdvisoryRule {
        advisory: Advisory::HeavyRainDelay,
        applies: |c, t| c.contains("rain") && t > 30.0,
    },
    AdvisoryRule { advisory: Advisory::ColdOrSnow, applies: |c, t| c.contains("snow") || t < 0.0 },
    AdvisoryRule { advisory: Advisory::ExtremeHeat, applies: |_, t| t > 35.0 },
    AdvisoryRule {
        advisory: Advisory::SevereWeather,
        applies: |c, _| c.contains("thunderstorm") || c.contains("tornado"),
    },
    AdvisoryRule { advisory: Advisory::PackUmbrella, applies: |c, _| c.contains("rain") },
    AdvisoryRule {
        advisory: Advisory::HeatHydration,
        applies: |c, t| c.contains("sunny") && t > 30.0,
    },
    AdvisoryRule {
        advisory: Advisory::LightJacket,
        applies: |c, t| c.contains("sunny") && t < 15.0,
    },
    AdvisoryRule { advisory: Advisory::ClearToTravel, applies: |c, _| c.contains("cloudy") },
];

/// Pick the advisory for `condition` at `temperature_c`.
///
/// A missing condition is treated the same as an empty one.
pub fn advise(condition: Option<&str>, temperature_c: f64) -> Advisory {
    let condition = condition.unwrap_or_default();

    RULES
        .iter()
        .find(|rule| (rule.applies)(condition, temperature_c))
        .map(|rule| rule.advisory)
        .unwrap_or(Advisory::EnjoyTrip)
}
