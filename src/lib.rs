//! `weatherboard` - current weather for a list of cities
//!
//! This library fetches current conditions from OpenWeatherMap, one city at a
//! time, and presents them as a searchable, sortable table behind a small
//! web dashboard.

pub mod api;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod models;
pub mod presenter;
pub mod render;
pub mod telemetry;
pub mod weather;
pub mod web;

// Re-export core types for public API
pub use config::WeatherboardConfig;
pub use dashboard::{Dashboard, DashboardRequest, DashboardView};
pub use error::{FetchFailure, WeatherboardError};
pub use models::{CityQuery, Credential, ResultTable, SortKey, WeatherRecord};
pub use weather::{CityFailure, FetchReport, OpenWeatherClient, WeatherProvider};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Core result type used throughout the library
pub type Result<T> = std::result::Result<T, WeatherboardError>;
