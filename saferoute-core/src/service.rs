//! Entry points used by the presentation layer.
//!
//! [`TravelService`] holds no state between calls: every method works only on
//! its arguments and what the weather provider returns for them.

use std::time::Duration;

use chrono::{DateTime, Utc};
use tracing::info;

use crate::{
    Config, WeatherError,
    advisory::{Advisory, advise},
    config::{DEFAULT_FORECAST_DAYS, DEFAULT_TIMEOUT_SECS},
    model::Forecast,
    provider::{WeatherProvider, provider_from_config, with_timeout},
    rain::{RainAlert, nearest_rain},
    route::{CorridorTable, RouteEvaluator, RouteRequest, RouteVerdict},
};

/// Everything shown for the city the user is looking at.
#[derive(Debug, Clone, PartialEq)]
pub struct CityReport {
    pub forecast: Forecast,
    pub rain_alert: Option<RainAlert>,
    pub advisory: Advisory,
}

#[derive(Debug)]
pub struct TravelService {
    provider: Box<dyn WeatherProvider>,
    corridors: CorridorTable,
    timeout: Duration,
    forecast_days: u8,
}

impl TravelService {
    pub fn new(provider: Box<dyn WeatherProvider>) -> Self {
        Self {
            provider,
            corridors: CorridorTable::default(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            forecast_days: DEFAULT_FORECAST_DAYS,
        }
    }

    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        let provider = provider_from_config(config)?;

        Ok(Self::new(provider)
            .with_corridors(config.corridor_table())
            .with_timeout(config.request_timeout())
            .with_forecast_days(config.forecast_days()))
    }

    pub fn with_corridors(mut self, corridors: CorridorTable) -> Self {
        self.corridors = corridors;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_forecast_days(mut self, days: u8) -> Self {
        self.forecast_days = days;
        self
    }

    pub async fn evaluate_route(&self, request: &RouteRequest) -> RouteVerdict {
        RouteEvaluator::new(self.provider.as_ref(), &self.corridors, self.timeout)
            .evaluate(request)
            .await
    }

    /// Forecast, rain alert and advisory for the primary city.
    ///
    /// Any fetch failure is returned as is; there is no partial report.
    pub async fn city_report(
        &self,
        place: &str,
        now: DateTime<Utc>,
    ) -> Result<CityReport, WeatherError> {
        let place = place.trim();
        if place.is_empty() {
            return Err(WeatherError::invalid_input("Please enter a city name."));
        }

        let forecast = with_timeout(
            self.timeout,
            place,
            self.provider.fetch_forecast(place, self.forecast_days),
        )
        .await?;

        let rain_alert = Self::check_rain_alert(&forecast, now);
        if let Some(alert) = &rain_alert {
            info!(
                place,
                intensity = %alert.intensity,
                at = %alert.triggering_hour.timestamp,
                "rain expected"
            );
        }

        let current = &forecast.current;
        let advisory = Self::get_advisory(Some(current.condition.as_str()), current.temperature_c);

        Ok(CityReport { forecast, rain_alert, advisory })
    }

    pub fn check_rain_alert(forecast: &Forecast, now: DateTime<Utc>) -> Option<RainAlert> {
        nearest_rain(&forecast.hourly(), now)
    }

    pub fn get_advisory(condition: Option<&str>, temperature_c: f64) -> Advisory {
        advise(condition, temperature_c)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        model::{DailyForecast, HourlyForecastEntry},
        provider::MockWeatherProvider,
        rain::RainIntensity,
        safety::tests::observation,
    };
    use chrono::{Duration as ChronoDuration, TimeZone};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, 6, 0, 0).unwrap()
    }

    fn forecast_for(place: &str) -> Forecast {
        let hour = |h: i64, chance: u8| HourlyForecastEntry {
            timestamp: now() + ChronoDuration::hours(h),
            local_time: None,
            condition: "Patchy rain possible".into(),
            temperature_c: 27.0,
            chance_of_rain_pct: chance,
            precipitation_mm: 0.1,
        };

        let mut current = observation(place, "Patchy rain possible", 0.2);
        current.temperature_c = 24.0;

        Forecast {
            current,
            days: vec![DailyForecast {
                date: now().date_naive(),
                avg_temperature_c: 26.0,
                condition: "Patchy rain possible".into(),
                hours: vec![hour(-1, 100), hour(3, 65), hour(4, 95)],
            }],
        }
    }

    #[tokio::test]
    async fn city_report_combines_alert_and_advisory() {
        let mut provider = MockWeatherProvider::new();
        provider
            .expect_fetch_forecast()
            .withf(|place: &str, days: &u8| place == "Manila" && *days == 3)
            .times(1)
            .returning(|place: &str, _| Ok(forecast_for(place)));

        let service = TravelService::new(Box::new(provider)).with_forecast_days(3);
        let report = service.city_report(" Manila ", now()).await.expect("report");

        let alert = report.rain_alert.expect("rain alert");
        assert_eq!(alert.intensity, RainIntensity::Moderate);
        assert_eq!(alert.triggering_hour.timestamp, now() + ChronoDuration::hours(3));
        assert_eq!(report.advisory, Advisory::PackUmbrella);
    }

    #[tokio::test]
    async fn city_report_surfaces_fetch_failure() {
        let mut provider = MockWeatherProvider::new();
        provider.expect_fetch_forecast().returning(|place: &str, _| {
            Err(WeatherError::place_not_found(place, "No matching location found."))
        });

        let service = TravelService::new(Box::new(provider));
        let err = service.city_report("Atlantis", now()).await.unwrap_err();

        assert!(matches!(err, WeatherError::PlaceNotFound { .. }));
    }

    #[tokio::test]
    async fn city_report_rejects_blank_city_without_fetching() {
        let mut provider = MockWeatherProvider::new();
        provider.expect_fetch_forecast().never();

        let service = TravelService::new(Box::new(provider));
        let err = service.city_report("   ", now()).await.unwrap_err();

        assert!(matches!(err, WeatherError::InvalidInput { .. }));
    }

    #[tokio::test]
    async fn evaluate_route_uses_configured_corridors() {
        let mut provider = MockWeatherProvider::new();
        provider
            .expect_fetch_current()
            .times(3)
            .returning(|place: &str| Ok(observation(place, "Sunny", 0.0)));

        let mut corridors = CorridorTable::empty();
        corridors.insert("Cebu", "Moalboal", vec!["Carcar".into()]);

        let service = TravelService::new(Box::new(provider)).with_corridors(corridors);
        let request = RouteRequest::new("Cebu", "Moalboal").unwrap();
        let verdict = service.evaluate_route(&request).await;

        assert_eq!(
            verdict.display_route(),
            "Cebu (Sunny - Safe) → Carcar (Sunny - Safe) → Moalboal (Sunny - Safe)"
        );
        assert!(!verdict.any_unsafe);
    }

    #[test]
    fn check_rain_alert_scans_forecast_hours() {
        let alert = TravelService::check_rain_alert(&forecast_for("Manila"), now()).unwrap();
        assert_eq!(alert.message(), "There is a moderate rain expected within the next 12 hours.");
    }

    #[test]
    fn get_advisory_is_repeatable() {
        let a = TravelService::get_advisory(Some("thunderstorm"), 25.0);
        let b = TravelService::get_advisory(Some("thunderstorm"), 25.0);
        assert_eq!(a, b);
        assert_eq!(a, Advisory::SevereWeather);
        assert_eq!(TravelService::get_advisory(None, 20.0), Advisory::DataUnavailable);
    }

    #[test]
    fn from_config_requires_api_key() {
        let err = TravelService::from_config(&Config::default()).unwrap_err();
        assert!(err.to_string().contains("No API key configured"));

        let mut cfg = Config::default();
        cfg.set_api_key("KEY".into());
        assert!(TravelService::from_config(&cfg).is_ok());
    }
}
