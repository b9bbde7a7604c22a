//! OpenWeatherMap current-weather client

use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use tracing::{debug, instrument, warn};

use super::WeatherProvider;
use crate::config::WeatherConfig;
use crate::error::FetchFailure;
use crate::models::{CityQuery, Credential, WeatherRecord};

/// Unit system sent with every request
const UNITS: &str = "metric";

/// Client for `GET {base_url}/weather?q=..&appid=..&units=metric`
pub struct OpenWeatherClient {
    client: Client,
    base_url: String,
    credential: Credential,
}

impl OpenWeatherClient {
    /// Create a client using the given key
    pub fn new(config: &WeatherConfig, credential: Credential) -> Result<Self> {
        let mut builder = Client::builder().user_agent(concat!(
            "weatherboard/",
            env!("CARGO_PKG_VERSION")
        ));
        if let Some(seconds) = config.timeout_seconds {
            builder = builder.timeout(Duration::from_secs(seconds));
        }
        let client = builder
            .build()
            .with_context(|| "Failed to create HTTP client")?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            credential,
        })
    }

    /// Create a client from configuration, or `None` when no key is configured
    pub fn from_config(config: &WeatherConfig) -> Result<Option<Self>> {
        match config.credential() {
            Some(credential) => Ok(Some(Self::new(config, credential)?)),
            None => {
                warn!("No OpenWeatherMap API key configured, weather fetching is disabled");
                Ok(None)
            }
        }
    }

    fn current_weather_url(&self, city: &CityQuery) -> String {
        format!(
            "{}/weather?q={}&appid={}&units={}",
            self.base_url,
            urlencoding::encode(city.as_str()),
            urlencoding::encode(self.credential.expose()),
            UNITS
        )
    }
}

#[async_trait]
impl WeatherProvider for OpenWeatherClient {
    #[instrument(name = "current_weather", skip_all, fields(city = %city))]
    async fn current_weather(&self, city: &CityQuery) -> Result<WeatherRecord, FetchFailure> {
        let start_time = Instant::now();

        let response = self
            .client
            .get(self.current_weather_url(city))
            .send()
            .await
            .map_err(|e| FetchFailure::Transport(e.without_url().to_string()))?;

        let status = response.status();
        if status != StatusCode::OK {
            debug!(status = status.as_u16(), "Weather service rejected request");
            return Err(FetchFailure::Status {
                status: status.as_u16(),
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| FetchFailure::Transport(e.without_url().to_string()))?;

        let record = openweather::parse_current_weather(&body)?;

        debug!(
            temperature = record.temperature,
            "Retrieved current weather in {:.3}s",
            start_time.elapsed().as_secs_f64()
        );
        Ok(record)
    }
}

/// OpenWeatherMap response structures
mod openweather {
    use serde::Deserialize;

    use crate::error::FetchFailure;
    use crate::models::WeatherRecord;

    /// Fields of the current-weather response that the table needs
    #[derive(Debug, Deserialize)]
    pub struct CurrentWeatherResponse {
        pub name: String,
        pub main: MainData,
        pub weather: Vec<ConditionData>,
    }

    #[derive(Debug, Deserialize)]
    pub struct MainData {
        pub temp: f64,
    }

    #[derive(Debug, Deserialize)]
    pub struct ConditionData {
        pub description: String,
    }

    /// Parse a 200 body; any shape mismatch is a per-city failure
    pub fn parse_current_weather(body: &str) -> Result<WeatherRecord, FetchFailure> {
        let response: CurrentWeatherResponse = serde_json::from_str(body)
            .map_err(|e| FetchFailure::MalformedResponse(e.to_string()))?;

        let condition = response
            .weather
            .into_iter()
            .next()
            .ok_or_else(|| {
                FetchFailure::MalformedResponse("no weather conditions in response".to_string())
            })?
            .description;

        Ok(WeatherRecord::new(response.name, response.main.temp, condition))
    }

}
