use crate::{
    Config, Forecast, WeatherError, WeatherObservation, provider::weatherapi::WeatherApiProvider,
};
use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;
use std::{fmt::Debug, time::Duration};

pub mod weatherapi;

/// Source of current conditions and forecasts, keyed by place name.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    async fn fetch_current(&self, place: &str) -> Result<WeatherObservation, WeatherError>;

    async fn fetch_forecast(&self, place: &str, days: u8) -> Result<Forecast, WeatherError>;
}

/// Construct the WeatherAPI.com provider from config.
pub fn provider_from_config(config: &Config) -> anyhow::Result<Box<dyn WeatherProvider>> {
    let api_key = config.api_key().ok_or_else(|| {
        anyhow::anyhow!(
            "No API key configured for WeatherAPI.com.\n\
                 Hint: run `saferoute configure` and enter your API key."
        )
    })?;

    Ok(Box::new(WeatherApiProvider::new(api_key.to_owned())))
}

/// Run a provider call, turning an elapsed `limit` into a transport error.
pub async fn with_timeout<T>(
    limit: Duration,
    place: &str,
    call: impl Future<Output = Result<T, WeatherError>>,
) -> Result<T, WeatherError> {
    match tokio::time::timeout(limit, call).await {
        Ok(result) => result,
        Err(_) => Err(WeatherError::transport(
            place,
            format!("request timed out after {}s", limit.as_secs_f64()),
        )),
    }
}
