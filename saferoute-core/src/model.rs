use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

/// Location as resolved by the weather service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub name: String,
    pub country: String,
}

impl std::fmt::Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}, {}", self.name, self.country)
    }
}

/// Current conditions at one place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherObservation {
    /// Place name as it was requested.
    pub place: String,
    pub location: Location,
    pub condition: String,
    pub precipitation_mm: f64,
    pub temperature_c: f64,
    pub humidity_pct: u8,
    pub wind_kph: f64,
    pub wind_dir: String,
    pub pressure_mb: f64,
    pub observation_time: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HourlyForecastEntry {
    pub timestamp: DateTime<Utc>,
    /// Wall-clock time at the forecast location, when the service supplied one.
    pub local_time: Option<NaiveDateTime>,
    pub condition: String,
    pub temperature_c: f64,
    pub chance_of_rain_pct: u8,
    pub precipitation_mm: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyForecast {
    pub date: NaiveDate,
    pub avg_temperature_c: f64,
    pub condition: String,
    /// Hourly entries of this day only.
    pub hours: Vec<HourlyForecastEntry>,
}

/// Current conditions plus the multi-day forecast for one place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Forecast {
    pub current: WeatherObservation,
    pub days: Vec<DailyForecast>,
}

impl Forecast {
    /// Hourly entries of every forecast day, in time order.
    pub fn hourly(&self) -> Vec<HourlyForecastEntry> {
        let mut hours: Vec<HourlyForecastEntry> =
            self.days.iter().flat_map(|day| day.hours.iter().cloned()).collect();
        hours.sort_by_key(|h| h.timestamp);
        hours
    }

    /// The first day's hours, as shown in the 24-hour view.
    pub fn today_hours(&self) -> &[HourlyForecastEntry] {
        self.days.first().map(|day| day.hours.as_slice()).unwrap_or(&[])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn hour(ts: i64) -> HourlyForecastEntry {
        HourlyForecastEntry {
            timestamp: Utc.timestamp_opt(ts, 0).unwrap(),
            local_time: None,
            condition: "Sunny".into(),
            temperature_c: 30.0,
            chance_of_rain_pct: 0,
            precipitation_mm: 0.0,
        }
    }

    fn forecast(days: Vec<DailyForecast>) -> Forecast {
        Forecast {
            current: WeatherObservation {
                place: "Manila".into(),
                location: Location { name: "Manila".into(), country: "Philippines".into() },
                condition: "Sunny".into(),
                precipitation_mm: 0.0,
                temperature_c: 31.0,
                humidity_pct: 70,
                wind_kph: 10.0,
                wind_dir: "NE".into(),
                pressure_mb: 1010.0,
                observation_time: Utc.timestamp_opt(0, 0).unwrap(),
            },
            days,
        }
    }

    #[test]
    fn hourly_flattens_days_in_time_order() {
        let day = |date: &str, hours| DailyForecast {
            date: date.parse().unwrap(),
            avg_temperature_c: 28.0,
            condition: "Sunny".into(),
            hours,
        };
        let fc = forecast(vec![
            day("2024-05-02", vec![hour(7200), hour(10800)]),
            day("2024-05-01", vec![hour(0), hour(3600)]),
        ]);

        let stamps: Vec<i64> = fc.hourly().iter().map(|h| h.timestamp.timestamp()).collect();
        assert_eq!(stamps, vec![0, 3600, 7200, 10800]);
        assert_eq!(fc.today_hours().len(), 2);
    }

    #[test]
    fn today_hours_empty_without_days() {
        assert!(forecast(Vec::new()).today_hours().is_empty());
    }

    #[test]
    fn location_display() {
        let loc = Location { name: "Tagaytay".into(), country: "Philippines".into() };
        assert_eq!(loc.to_string(), "Tagaytay, Philippines");
    }
}
