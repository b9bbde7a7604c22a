//! Request-to-view boundary of the dashboard
//!
//! Every interaction is handled from scratch: parse the city list, fetch each
//! city, filter and sort the rows. Nothing is kept between requests.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use tracing::{debug, info};

use crate::config::WeatherConfig;
use crate::models::{ResultTable, SortKey, parse_city_list};
use crate::presenter;
use crate::weather::{CityFailure, OpenWeatherClient, WeatherProvider, fetch_all};

/// Shown instead of a table when there is nothing to fetch
pub const PLACEHOLDER_MESSAGE: &str = "Please enter city or list of cities to get weather data.";

/// The three user inputs
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct DashboardRequest {
    /// Comma-separated city list
    #[serde(default)]
    pub cities: String,
    /// Case-insensitive city substring
    #[serde(default)]
    pub search: String,
    /// Blank or missing selects the default column
    #[serde(default, deserialize_with = "sort_or_default")]
    pub sort: SortKey,
}

fn sort_or_default<'de, D>(deserializer: D) -> Result<SortKey, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(SortKey::default()),
        Some(value) => value.parse().map_err(serde::de::Error::custom),
    }
}

impl DashboardRequest {
    pub fn new(cities: impl Into<String>) -> Self {
        Self {
            cities: cities.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = search.into();
        self
    }

    #[must_use]
    pub fn with_sort(mut self, sort: SortKey) -> Self {
        self.sort = sort;
        self
    }
}

/// What the dashboard shows for one request
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum DashboardView {
    AwaitingInput {
        message: String,
    },
    Displaying {
        table: ResultTable,
        failures: Vec<CityFailure>,
        fetched_at: DateTime<Utc>,
    },
}

impl DashboardView {
    fn awaiting_input() -> Self {
        DashboardView::AwaitingInput {
            message: PLACEHOLDER_MESSAGE.to_string(),
        }
    }

    #[must_use]
    pub fn table(&self) -> Option<&ResultTable> {
        match self {
            DashboardView::Displaying { table, .. } => Some(table),
            DashboardView::AwaitingInput { .. } => None,
        }
    }

    #[must_use]
    pub fn failures(&self) -> &[CityFailure] {
        match self {
            DashboardView::Displaying { failures, .. } => failures,
            DashboardView::AwaitingInput { .. } => &[],
        }
    }
}

/// Turns dashboard requests into views.
///
/// Holds no provider when no API key is configured; every request then
/// answers with the placeholder.
#[derive(Clone)]
pub struct Dashboard {
    provider: Option<Arc<dyn WeatherProvider>>,
}

impl Dashboard {
    pub fn new(provider: Option<Arc<dyn WeatherProvider>>) -> Self {
        Self { provider }
    }

    /// Build the OpenWeatherMap-backed dashboard from configuration
    pub fn from_config(config: &WeatherConfig) -> anyhow::Result<Self> {
        let provider = OpenWeatherClient::from_config(config)?
            .map(|client| Arc::new(client) as Arc<dyn WeatherProvider>);
        Ok(Self::new(provider))
    }

    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.provider.is_some()
    }

    pub async fn handle(&self, request: &DashboardRequest) -> DashboardView {
        let Some(provider) = self.provider.as_deref() else {
            debug!("No credential configured, skipping fetch");
            return DashboardView::awaiting_input();
        };

        let cities = parse_city_list(&request.cities);
        if cities.is_empty() {
            debug!("No cities entered, skipping fetch");
            return DashboardView::awaiting_input();
        }

        info!(cities = cities.len(), sort = ?request.sort, "Building weather table");
        let report = fetch_all(provider, &cities).await;
        let table = presenter::present(report.records, &request.search, request.sort);

        DashboardView::Displaying {
            table,
            failures: report.failures,
            fetched_at: Utc::now(),
        }
    }
}
