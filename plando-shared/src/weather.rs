/// Weather lookup for new todos
///
/// Every todo records the weather of the day it was created. The upstream
/// feed is a static JSON array with one entry per calendar day:
///
/// ```json
/// [{ "date": "01-01", "weather": "Sunny" }, { "date": "01-02", "weather": "Cloudy" }]
/// ```
///
/// [`HttpWeatherClient`] fetches that feed; [`FixedWeatherClient`] returns a
/// constant and is what tests wire into the services.

use async_trait::async_trait;
use chrono::{Local, NaiveDate};
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, warn};

/// Default location of the weather feed
pub const DEFAULT_WEATHER_URL: &str = "https://f-api.github.io/f-api/weather.json";

/// Error type for weather lookups
#[derive(Debug, thiserror::Error)]
pub enum WeatherError {
    /// Transport or decoding failure
    #[error("날씨 데이터를 가져오는데 실패했습니다: {0}")]
    Request(#[from] reqwest::Error),

    /// Upstream answered with a non-success status
    #[error("날씨 데이터를 가져오는데 실패했습니다. 상태 코드: {0}")]
    Status(u16),

    #[error("날씨 데이터가 없습니다.")]
    Empty,

    #[error("오늘에 해당하는 날씨 데이터를 찾을 수 없습니다.")]
    NoEntryForToday,
}

/// One day in the weather feed
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct WeatherEntry {
    /// Day of year as `MM-dd`
    pub date: String,
    pub weather: String,
}

#[async_trait]
pub trait WeatherClient: Send + Sync {
    /// Returns the weather for the current local date
    async fn get_today_weather(&self) -> Result<String, WeatherError>;
}

/// Picks the entry for `today` out of the feed
///
/// # Errors
///
/// `WeatherError::Empty` for an empty feed, `WeatherError::NoEntryForToday`
/// when no entry matches.
pub fn weather_for_date(entries: &[WeatherEntry], today: NaiveDate) -> Result<String, WeatherError> {
    if entries.is_empty() {
        return Err(WeatherError::Empty);
    }

    let key = today.format("%m-%d").to_string();
    entries
        .iter()
        .find(|entry| entry.date == key)
        .map(|entry| entry.weather.clone())
        .ok_or(WeatherError::NoEntryForToday)
}

/// Weather client backed by the HTTP feed
#[derive(Debug, Clone)]
pub struct HttpWeatherClient {
    client: reqwest::Client,
    url: String,
}

impl HttpWeatherClient {
    /// Creates a client for the given feed URL
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be built.
    pub fn new(url: impl Into<String>) -> Result<Self, WeatherError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()?;

        Ok(Self {
            client,
            url: url.into(),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl WeatherClient for HttpWeatherClient {
    async fn get_today_weather(&self) -> Result<String, WeatherError> {
        let response = self.client.get(&self.url).send().await?;

        let status = response.status();
        if !status.is_success() {
            warn!(url = %self.url, status = status.as_u16(), "Weather feed returned an error status");
            return Err(WeatherError::Status(status.as_u16()));
        }

        let entries: Vec<WeatherEntry> = response.json().await?;
        let weather = weather_for_date(&entries, Local::now().date_naive())?;

        debug!(weather = %weather, "Fetched today's weather");
        Ok(weather)
    }
}

/// Weather client that always reports the same weather
#[derive(Debug, Clone)]
pub struct FixedWeatherClient {
    weather: String,
}

impl FixedWeatherClient {
    pub fn new(weather: impl Into<String>) -> Self {
        Self {
            weather: weather.into(),
        }
    }
}

#[async_trait]
impl WeatherClient for FixedWeatherClient {
    async fn get_today_weather(&self) -> Result<String, WeatherError> {
        Ok(self.weather.clone())
    }
}
