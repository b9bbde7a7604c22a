//! User input: the city list and the sort selection

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::WeatherboardError;

/// A single trimmed, non-empty place name to look up
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CityQuery(String);

impl CityQuery {
    /// Build a query from raw text. Blank text is rejected.
    pub fn new(raw: &str) -> crate::Result<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(WeatherboardError::validation("City name cannot be empty"));
        }
        Ok(Self(trimmed.to_string()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CityQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Split a comma-separated city list into queries.
///
/// Segments are trimmed and empty ones (e.g. from a trailing comma) are
/// dropped. Duplicates are kept and looked up independently.
#[must_use]
pub fn parse_city_list(input: &str) -> Vec<CityQuery> {
    input
        .split(',')
        .filter_map(|segment| CityQuery::new(segment).ok())
        .collect()
}

/// Column the result table is ordered by
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    City,
    #[default]
    Temperature,
}

impl SortKey {
    /// Column label as shown in the sort selector
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            SortKey::City => "City",
            SortKey::Temperature => "Temperature",
        }
    }

    /// Form value submitted for this key
    #[must_use]
    pub fn value(self) -> &'static str {
        match self {
            SortKey::City => "city",
            SortKey::Temperature => "temperature",
        }
    }

    pub const ALL: [SortKey; 2] = [SortKey::City, SortKey::Temperature];
}

impl FromStr for SortKey {
    type Err = WeatherboardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "city" => Ok(SortKey::City),
            "temperature" | "temp" => Ok(SortKey::Temperature),
            other => Err(WeatherboardError::validation(format!(
                "Unknown sort key '{other}'. Must be one of: city, temperature"
            ))),
        }
    }
}
