//! # Weather Module
//!
//! Current-conditions lookup consumed by the `/weather` command. The router only
//! sees the [`WeatherProvider`] trait; [`OpenWeatherClient`] is the production
//! implementation backed by the OpenWeatherMap HTTP API.

use serde::Deserialize;
use std::future::Future;
use std::time::Duration;
use tracing::debug;

/// Current weather endpoint of OpenWeatherMap
pub const DEFAULT_WEATHER_API_URL: &str = "https://api.openweathermap.org/data/2.5/weather";

/// Upper bound for a single weather request
pub const REQUEST_TIMEOUT_SECS: u64 = 10;

/// Below this temperature the user is told to cover plants
pub const COLD_THRESHOLD_C: f64 = 5.0;

/// Above this temperature the user is told to water more
pub const HOT_THRESHOLD_C: f64 = 30.0;

/// Current conditions for a city
#[derive(Debug, Clone, PartialEq)]
pub struct WeatherReport {
    pub description: String,
    pub temp_c: f64,
    pub humidity_pct: f64,
    pub wind_ms: f64,
}

/// Gardening advice derived from the temperature
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WeatherAdvice {
    Cold,
    Hot,
}

impl WeatherReport {
    pub fn advice(&self) -> Option<WeatherAdvice> {
        if self.temp_c < COLD_THRESHOLD_C {
            Some(WeatherAdvice::Cold)
        } else if self.temp_c > HOT_THRESHOLD_C {
            Some(WeatherAdvice::Hot)
        } else {
            None
        }
    }

    /// Parse an OpenWeatherMap current-weather response body
    pub fn from_openweather_json(body: &str) -> Result<Self, WeatherError> {
        let response: OpenWeatherResponse =
            serde_json::from_str(body).map_err(|e| WeatherError::Decode(e.to_string()))?;
        response.try_into()
    }
}

#[derive(Debug, Deserialize)]
struct OpenWeatherResponse {
    weather: Vec<OpenWeatherCondition>,
    main: OpenWeatherMain,
    wind: OpenWeatherWind,
}

#[derive(Debug, Deserialize)]
struct OpenWeatherCondition {
    description: String,
}

#[derive(Debug, Deserialize)]
struct OpenWeatherMain {
    temp: f64,
    humidity: f64,
}

#[derive(Debug, Deserialize)]
struct OpenWeatherWind {
    speed: f64,
}

impl TryFrom<OpenWeatherResponse> for WeatherReport {
    type Error = WeatherError;

    fn try_from(response: OpenWeatherResponse) -> Result<Self, Self::Error> {
        let condition = response
            .weather
            .into_iter()
            .next()
            .ok_or_else(|| WeatherError::Decode("response has no weather conditions".to_string()))?;

        Ok(Self {
            description: condition.description,
            temp_c: response.main.temp,
            humidity_pct: response.main.humidity,
            wind_ms: response.wind.speed,
        })
    }
}

/// Weather lookup failures
#[derive(Debug)]
pub enum WeatherError {
    /// Non-success HTTP status, e.g. unknown city
    Status(u16),
    /// Network or client failure
    Http(reqwest::Error),
    /// Response body did not match the expected shape
    Decode(String),
}

impl std::fmt::Display for WeatherError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WeatherError::Status(code) => write!(f, "Weather API returned status {code}"),
            WeatherError::Http(err) => write!(f, "Weather API request failed: {err}"),
            WeatherError::Decode(msg) => write!(f, "Weather API response decode error: {msg}"),
        }
    }
}

impl std::error::Error for WeatherError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            WeatherError::Http(err) => Some(err),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for WeatherError {
    fn from(err: reqwest::Error) -> Self {
        WeatherError::Http(err)
    }
}

/// Source of current weather conditions
pub trait WeatherProvider: Send + Sync + 'static {
    fn fetch_weather(
        &self,
        city: &str,
    ) -> impl Future<Output = Result<WeatherReport, WeatherError>> + Send;
}

/// OpenWeatherMap client
#[derive(Debug, Clone)]
pub struct OpenWeatherClient {
    http: reqwest::Client,
    api_key: String,
    base_url: String,
}

impl OpenWeatherClient {
    pub fn new(api_key: impl Into<String>, base_url: impl Into<String>) -> Result<Self, WeatherError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;

        Ok(Self {
            http,
            api_key: api_key.into(),
            base_url: base_url.into(),
        })
    }
}

impl WeatherProvider for OpenWeatherClient {
    async fn fetch_weather(&self, city: &str) -> Result<WeatherReport, WeatherError> {
        debug!(city = city, "Requesting current weather");

        let response = self
            .http
            .get(&self.base_url)
            .query(&[
                ("q", city),
                ("appid", self.api_key.as_str()),
                ("units", "metric"),
                ("lang", "ru"),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(WeatherError::Status(status.as_u16()));
        }

        let body = response.text().await?;
        WeatherReport::from_openweather_json(&body)
    }
}
