use saferoute_core::{CityReport, HourlyForecastEntry, RouteVerdict};

pub fn render_city_report(report: &CityReport) -> String {
    let current = &report.forecast.current;
    let mut lines = vec![
        current.location.to_string(),
        format!("{:.1}°C  {}", current.temperature_c, current.condition),
        format!("Humidity: {}%", current.humidity_pct),
        format!("Wind: {} kph {}", current.wind_kph, current.wind_dir),
        format!("Pressure: {} mb", current.pressure_mb),
    ];

    let days = &report.forecast.days;
    if !days.is_empty() {
        lines.push(format!("\n{}-Day Forecast", days.len()));
        lines.extend(days.iter().map(|day| {
            format!(
                "{}  {:.1}°C  {}",
                day.date.format("%a %b %d %Y"),
                day.avg_temperature_c,
                day.condition
            )
        }));
    }

    let hours = report.forecast.today_hours();
    if !hours.is_empty() {
        lines.push("\n24-Hour Forecast".to_owned());
        lines.extend(hours.iter().map(|hour| {
            format!(
                "{}  {:.1}°C  {:>3}% rain  {}",
                hour_label(hour),
                hour.temperature_c,
                hour.chance_of_rain_pct,
                hour.condition
            )
        }));
    }

    if let Some(alert) = &report.rain_alert {
        lines.push(format!("\nRain Alert: {}", alert.message()));
    }

    lines.push(format!("\nTravel advice: {}", report.advisory));
    lines.join("\n")
}

pub fn render_route(verdict: &RouteVerdict) -> String {
    let mut lines = Vec::new();

    if verdict.waypoints.is_empty() {
        lines.push("Route: no weather could be retrieved for any location.".to_owned());
    } else {
        lines.push(format!("Route: {}", verdict.display_route()));
    }

    if verdict.is_degraded() {
        lines.extend(verdict.skipped.iter().map(|skipped| format!("Warning: {}", skipped.error)));
    }

    if verdict.waypoints.is_empty() {
        lines.push("Travel Alert: Unable to check your route. Please try again later.".to_owned());
    } else {
        lines.push(format!("Travel Alert: {}", verdict.trip_message()));
    }
    lines.join("\n")
}

fn hour_label(hour: &HourlyForecastEntry) -> String {
    match hour.local_time {
        Some(local) => local.format("%I:%M %p").to_string(),
        None => hour.timestamp.format("%H:%M UTC").to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, TimeZone, Utc};
    use saferoute_core::{
        Advisory, DailyForecast, Forecast, Location, RainAlert, RainIntensity, RainLevel,
        SkippedWaypoint, WaypointResult, WeatherError, WeatherObservation,
    };

    fn report() -> CityReport {
        let hour = HourlyForecastEntry {
            timestamp: Utc.with_ymd_and_hms(2024, 5, 1, 5, 0, 0).unwrap(),
            local_time: NaiveDate::from_ymd_opt(2024, 5, 1).and_then(|d| d.and_hms_opt(13, 0, 0)),
            condition: "Patchy rain possible".into(),
            temperature_c: 29.0,
            chance_of_rain_pct: 85,
            precipitation_mm: 0.4,
        };

        CityReport {
            forecast: Forecast {
                current: WeatherObservation {
                    place: "Manila".into(),
                    location: Location { name: "Manila".into(), country: "Philippines".into() },
                    condition: "Partly cloudy".into(),
                    precipitation_mm: 0.0,
                    temperature_c: 31.2,
                    humidity_pct: 63,
                    wind_kph: 14.4,
                    wind_dir: "ESE".into(),
                    pressure_mb: 1009.0,
                    observation_time: Utc.with_ymd_and_hms(2024, 5, 1, 4, 0, 0).unwrap(),
                },
                days: vec![DailyForecast {
                    date: NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
                    avg_temperature_c: 28.4,
                    condition: "Patchy rain possible".into(),
                    hours: vec![hour.clone()],
                }],
            },
            rain_alert: Some(RainAlert { intensity: RainIntensity::Heavy, triggering_hour: hour }),
            advisory: Advisory::ClearToTravel,
        }
    }

    fn waypoint(place: &str, condition: &str, is_safe: bool) -> WaypointResult {
        WaypointResult {
            place: place.into(),
            condition: condition.into(),
            rain_level: RainLevel::Low,
            is_safe,
        }
    }

    #[test]
    fn city_report_lists_sections() {
        let text = render_city_report(&report());

        assert!(text.starts_with("Manila, Philippines\n31.2°C  Partly cloudy\n"));
        assert!(text.contains("Humidity: 63%"));
        assert!(text.contains("Wind: 14.4 kph ESE"));
        assert!(text.contains("Pressure: 1009 mb"));
        assert!(text.contains("1-Day Forecast\nWed May 01 2024  28.4°C  Patchy rain possible"));
        assert!(text.contains("01:00 PM  29.0°C   85% rain  Patchy rain possible"));
        assert!(
            text.contains("Rain Alert: There is a heavy rain expected within the next 12 hours.")
        );
        assert!(text.ends_with("Travel advice: Cloudy skies, but it's clear to travel."));
    }

    #[test]
    fn city_report_without_alert_omits_section() {
        let mut report = report();
        report.rain_alert = None;
        assert!(!render_city_report(&report).contains("Rain Alert"));
    }

    #[test]
    fn route_lists_waypoints_and_warnings() {
        let verdict = RouteVerdict {
            waypoints: vec![
                waypoint("Manila", "Sunny", true),
                waypoint("Batangas", "Thunderstorm", false),
            ],
            skipped: vec![SkippedWaypoint {
                place: "Tagaytay".into(),
                error: WeatherError::transport("Tagaytay", "connection reset"),
            }],
            any_unsafe: true,
        };

        let text = render_route(&verdict);
        assert!(
            text.starts_with("Route: Manila (Sunny - Safe) → Batangas (Thunderstorm - Unsafe)\n")
        );
        assert!(text.contains("Warning: Failed to fetch weather for 'Tagaytay': connection reset"));
        assert!(text.ends_with("Proceed with caution or consider delaying your trip."));
    }

    #[test]
    fn route_with_no_fetched_waypoints() {
        let verdict = RouteVerdict {
            waypoints: Vec::new(),
            skipped: vec![SkippedWaypoint {
                place: "Atlantis".into(),
                error: WeatherError::place_not_found("Atlantis", "No matching location found."),
            }],
            any_unsafe: false,
        };

        let text = render_route(&verdict);
        assert!(text.contains("no weather could be retrieved"));
        assert!(text.ends_with("Unable to check your route. Please try again later."));
    }

    #[test]
    fn route_without_skips_has_no_warnings() {
        let verdict = RouteVerdict {
            waypoints: vec![waypoint("Cebu", "Sunny", true)],
            skipped: Vec::new(),
            any_unsafe: false,
        };

        assert_eq!(
            render_route(&verdict),
            "Route: Cebu (Sunny - Safe)\n\
             Travel Alert: Your route appears to be safe for travel. Have a good trip!"
        );
    }
}
