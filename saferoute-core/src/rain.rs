//! Detection of the nearest rain event in an hourly forecast.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::model::HourlyForecastEntry;

/// Forward window scanned for rain.
pub const RAIN_ALERT_HORIZON_HOURS: i64 = 12;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RainIntensity {
    Light,
    Moderate,
    Heavy,
}

impl RainIntensity {
    pub fn from_chance(chance_of_rain_pct: u8) -> Self {
        match chance_of_rain_pct {
            81.. => RainIntensity::Heavy,
            51..=80 => RainIntensity::Moderate,
            _ => RainIntensity::Light,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RainIntensity::Light => "light",
            RainIntensity::Moderate => "moderate",
            RainIntensity::Heavy => "heavy",
        }
    }
}

impl std::fmt::Display for RainIntensity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RainAlert {
    pub intensity: RainIntensity,
    pub triggering_hour: HourlyForecastEntry,
}

impl RainAlert {
    pub fn message(&self) -> String {
        format!(
            "There is a {} rain expected within the next {RAIN_ALERT_HORIZON_HOURS} hours.",
            self.intensity
        )
    }
}

/// Earliest hour in `(now, now + 12h]` with any chance of rain.
///
/// Entries at or before `now` are ignored. Among the remaining ones the
/// earliest wins even if a later hour has a higher chance.
pub fn nearest_rain(hourly: &[HourlyForecastEntry], now: DateTime<Utc>) -> Option<RainAlert> {
    let horizon = Duration::hours(RAIN_ALERT_HORIZON_HOURS);

    let hour = hourly
        .iter()
        .filter(|h| h.chance_of_rain_pct > 0)
        .filter(|h| {
            let delta = h.timestamp - now;
            delta > Duration::zero() && delta <= horizon
        })
        .min_by_key(|h| h.timestamp)?;

    Some(RainAlert {
        intensity: RainIntensity::from_chance(hour.chance_of_rain_pct),
        triggering_hour: hour.clone(),
    })
}
