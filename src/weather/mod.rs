//! Weather fetching
//!
//! A [`WeatherProvider`] turns one city query into one weather record.
//! [`fetch_all`] walks a list of queries one at a time and keeps going when a
//! city fails, collecting the failure instead.

use std::time::Instant;

use async_trait::async_trait;
use serde::Serialize;
use tracing::{info, warn};

use crate::error::FetchFailure;
use crate::models::{CityQuery, WeatherRecord};

pub mod open_weather;

pub use open_weather::OpenWeatherClient;

/// Source of current weather for a single city
#[async_trait]
pub trait WeatherProvider: Send + Sync {
    async fn current_weather(&self, city: &CityQuery) -> Result<WeatherRecord, FetchFailure>;
}

/// A city that produced no row, with the reason
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CityFailure {
    /// The query as typed by the user
    pub city: String,
    pub reason: String,
}

impl CityFailure {
    pub fn new(city: &CityQuery, failure: &FetchFailure) -> Self {
        Self {
            city: city.to_string(),
            reason: failure.to_string(),
        }
    }

    /// Diagnostic line shown next to the table
    #[must_use]
    pub fn message(&self) -> String {
        format!("Could not retrieve data for {}", self.city)
    }
}

/// Outcome of one pass over the city list
#[derive(Debug, Clone, Default)]
pub struct FetchReport {
    /// Successful rows in query order
    pub records: Vec<WeatherRecord>,
    pub failures: Vec<CityFailure>,
}

/// Fetch every city in order, one request at a time.
///
/// A failing city is logged and recorded in [`FetchReport::failures`]; it
/// never stops the cities after it.
pub async fn fetch_all<P>(provider: &P, cities: &[CityQuery]) -> FetchReport
where
    P: WeatherProvider + ?Sized,
{
    let start_time = Instant::now();
    let mut report = FetchReport::default();

    for city in cities {
        match provider.current_weather(city).await {
            Ok(record) => report.records.push(record),
            Err(failure) => {
                warn!(city = %city, reason = %failure, "Could not retrieve data for {}", city);
                report.failures.push(CityFailure::new(city, &failure));
            }
        }
    }

    info!(
        requested = cities.len(),
        succeeded = report.records.len(),
        failed = report.failures.len(),
        "Fetched weather in {:.3}s",
        start_time.elapsed().as_secs_f64()
    );

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::parse_city_list;
    use std::sync::Mutex;

    /// Answers from a fixed table and remembers the call order
    struct ScriptedProvider {
        calls: Mutex<Vec<String>>,
    }

    impl ScriptedProvider {
        fn new() -> Self {
            Self {
                calls: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl WeatherProvider for ScriptedProvider {
        async fn current_weather(&self, city: &CityQuery) -> Result<WeatherRecord, FetchFailure> {
            self.calls.lock().unwrap().push(city.to_string());
            match city.as_str() {
                "Lahore" => Ok(WeatherRecord::new("Lahore", 31.0, "haze")),
                "Karachi" => Ok(WeatherRecord::new("Karachi", 29.5, "clear sky")),
                "Broken" => Err(FetchFailure::MalformedResponse("missing field `main`".into())),
                _ => Err(FetchFailure::Status { status: 404 }),
            }
        }
    }

    #[tokio::test]
    async fn test_fetch_all_keeps_query_order() {
        let provider = ScriptedProvider::new();
        let report = fetch_all(&provider, &parse_city_list("Karachi, Lahore")).await;

        let cities: Vec<_> = report.records.iter().map(|r| r.city.as_str()).collect();
        assert_eq!(cities, vec!["Karachi", "Lahore"]);
        assert!(report.failures.is_empty());
    }

    #[tokio::test]
    async fn test_failure_does_not_block_later_cities() {
        let provider = ScriptedProvider::new();
        let report = fetch_all(&provider, &parse_city_list("Atlantis, Broken, Lahore")).await;

        assert_eq!(report.records.len(), 1);
        assert_eq!(report.records[0].city, "Lahore");
        assert_eq!(report.failures.len(), 2);
        assert_eq!(report.failures[0].city, "Atlantis");
        assert_eq!(
            report.failures[0].message(),
            "Could not retrieve data for Atlantis"
        );
        assert!(report.failures[1].reason.contains("missing field"));
        assert_eq!(
            *provider.calls.lock().unwrap(),
            vec!["Atlantis", "Broken", "Lahore"]
        );
    }

    #[tokio::test]
    async fn test_duplicates_are_fetched_independently() {
        let provider = ScriptedProvider::new();
        let report = fetch_all(&provider, &parse_city_list("Lahore, Lahore")).await;

        assert_eq!(report.records.len(), 2);
        assert_eq!(provider.calls.lock().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_empty_list_makes_no_calls() {
        let provider = ScriptedProvider::new();
        let report = fetch_all(&provider, &[]).await;

        assert!(report.records.is_empty());
        assert!(provider.calls.lock().unwrap().is_empty());
    }
}
