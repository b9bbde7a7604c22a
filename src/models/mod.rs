//! Data models for the weatherboard
//!
//! - Query: user input parsed into city queries and a sort key
//! - Weather: fetched weather rows and the table they form
//! - Credential: the upstream API key

pub mod credential;
pub mod query;
pub mod weather;

pub use credential::Credential;
pub use query::{CityQuery, SortKey, parse_city_list};
pub use weather::{ResultTable, WeatherRecord};
