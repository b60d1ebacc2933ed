use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use reqwest::{Client, StatusCode};
use serde::{Deserialize, de::DeserializeOwned};
use tracing::debug;

use crate::{
    WeatherError,
    model::{DailyForecast, Forecast, HourlyForecastEntry, Location, WeatherObservation},
};

use super::WeatherProvider;

const BASE_URL: &str = "https://api.weatherapi.com/v1";

#[derive(Debug, Clone)]
pub struct WeatherApiProvider {
    api_key: String,
    http: Client,
}

impl WeatherApiProvider {
    pub fn new(api_key: String) -> Self {
        Self { api_key, http: Client::new() }
    }

    async fn get(
        &self,
        endpoint: &str,
        place: &str,
        extra: &[(&str, String)],
    ) -> Result<(StatusCode, String), WeatherError> {
        let url = format!("{BASE_URL}/{endpoint}");
        debug!(%url, place, "requesting WeatherAPI.com");

        let mut query = vec![("key", self.api_key.clone()), ("q", place.to_owned())];
        query.extend(extra.iter().map(|(k, v)| (*k, v.clone())));

        let res = self
            .http
            .get(&url)
            .query(&query)
            .send()
            .await
            .map_err(|e| {
                WeatherError::transport(place, format!("request to {endpoint} failed: {e}"))
            })?;

        let status = res.status();
        let body = res
            .text()
            .await
            .map_err(|e| {
                WeatherError::transport(place, format!("failed to read {endpoint} body: {e}"))
            })?;

        debug!(place, %status, bytes = body.len(), "WeatherAPI.com responded");
        Ok((status, body))
    }
}

#[async_trait]
impl WeatherProvider for WeatherApiProvider {
    async fn fetch_current(&self, place: &str) -> Result<WeatherObservation, WeatherError> {
        let (status, body) = self.get("current.json", place, &[]).await?;
        parse_current(place, status, &body)
    }

    async fn fetch_forecast(&self, place: &str, days: u8) -> Result<Forecast, WeatherError> {
        let (status, body) =
            self.get("forecast.json", place, &[("days", days.to_string())]).await?;
        parse_forecast(place, status, &body)
    }
}

pub(crate) fn parse_current(
    place: &str,
    status: StatusCode,
    body: &str,
) -> Result<WeatherObservation, WeatherError> {
    let parsed: WaResponse = decode(place, status, body)?;
    Ok(observation(place, parsed.location, parsed.current))
}

pub(crate) fn parse_forecast(
    place: &str,
    status: StatusCode,
    body: &str,
) -> Result<Forecast, WeatherError> {
    let parsed: WaForecastResponse = decode(place, status, body)?;

    let days = parsed
        .forecast
        .forecastday
        .into_iter()
        .map(|day| -> Result<DailyForecast, WeatherError> {
            let hours = day
                .hour
                .into_iter()
                .map(|h| hourly_entry(place, h))
                .collect::<Result<Vec<_>, _>>()?;

            Ok(DailyForecast {
                date: day.date,
                avg_temperature_c: day.day.avgtemp_c,
                condition: day.day.condition.text,
                hours,
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Forecast { current: observation(place, parsed.location, parsed.current), days })
}

/// A top-level `error` object means the service rejected the place, whatever
/// the HTTP status. Anything else that is not a success is a transport failure.
fn decode<T: DeserializeOwned>(
    place: &str,
    status: StatusCode,
    body: &str,
) -> Result<T, WeatherError> {
    if let Ok(WaErrorEnvelope { error: Some(err) }) = serde_json::from_str::<WaErrorEnvelope>(body)
    {
        return Err(WeatherError::place_not_found(place, err.message));
    }

    if !status.is_success() {
        return Err(WeatherError::transport(
            place,
            format!("WeatherAPI request failed with status {}: {}", status, truncate_body(body)),
        ));
    }

    serde_json::from_str(body).map_err(|e| {
        WeatherError::transport(place, format!("Failed to parse WeatherAPI JSON: {e}"))
    })
}

fn observation(place: &str, location: WaLocation, current: WaCurrent) -> WeatherObservation {
    let ts = current.last_updated_epoch.or(location.localtime_epoch);
    let observation_time = ts.and_then(unix_to_utc).unwrap_or_else(Utc::now);

    WeatherObservation {
        place: place.to_owned(),
        location: Location { name: location.name, country: location.country },
        condition: current.condition.text,
        precipitation_mm: current.precip_mm,
        temperature_c: current.temp_c,
        humidity_pct: current.humidity,
        wind_kph: current.wind_kph,
        wind_dir: current.wind_dir,
        pressure_mb: current.pressure_mb,
        observation_time,
    }
}

fn hourly_entry(place: &str, hour: WaForecastHour) -> Result<HourlyForecastEntry, WeatherError> {
    let timestamp = unix_to_utc(hour.time_epoch).ok_or_else(|| {
        WeatherError::transport(place, format!("invalid hourly timestamp {}", hour.time_epoch))
    })?;

    Ok(HourlyForecastEntry {
        timestamp,
        local_time: NaiveDateTime::parse_from_str(&hour.time, "%Y-%m-%d %H:%M").ok(),
        condition: hour.condition.text,
        temperature_c: hour.temp_c,
        chance_of_rain_pct: hour.chance_of_rain.min(100),
        precipitation_mm: hour.precip_mm,
    })
}

#[derive(Debug, Deserialize)]
struct WaApiError {
    message: String,
}

#[derive(Debug, Deserialize)]
struct WaErrorEnvelope {
    #[serde(default)]
    error: Option<WaApiError>,
}

#[derive(Debug, Deserialize)]
struct WaLocation {
    name: String,
    country: String,
    localtime_epoch: Option<i64>,
}

#[derive(Debug, Deserialize)]
struct WaCondition {
    text: String,
}

#[derive(Debug, Deserialize)]
struct WaCurrent {
    temp_c: f64,
    humidity: u8,
    wind_kph: f64,
    wind_dir: String,
    pressure_mb: f64,
    precip_mm: f64,
    condition: WaCondition,
    last_updated_epoch: Option<i64>,
}

#[derive(Debug, Deserialize)]
struct WaResponse {
    location: WaLocation,
    current: WaCurrent,
}

#[derive(Debug, Deserialize)]
struct WaForecastHour {
    time_epoch: i64,
    time: String,
    temp_c: f64,
    chance_of_rain: u8,
    precip_mm: f64,
    condition: WaCondition,
}

#[derive(Debug, Deserialize)]
struct WaDay {
    avgtemp_c: f64,
    condition: WaCondition,
}

#[derive(Debug, Deserialize)]
struct WaForecastDay {
    date: NaiveDate,
    day: WaDay,
    hour: Vec<WaForecastHour>,
}

#[derive(Debug, Deserialize)]
struct WaForecast {
    forecastday: Vec<WaForecastDay>,
}

#[derive(Debug, Deserialize)]
struct WaForecastResponse {
    location: WaLocation,
    current: WaCurrent,
    forecast: WaForecast,
}

fn unix_to_utc(ts: i64) -> Option<DateTime<Utc>> {
    DateTime::from_timestamp(ts, 0)
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}
