//! Weather rows and the table built from them

use serde::{Deserialize, Serialize};

/// One row of current weather for a city
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherRecord {
    /// City name as returned by the weather service
    pub city: String,
    /// Temperature in Celsius
    pub temperature: f64,
    /// Human-readable description of weather conditions
    pub condition: String,
}

impl WeatherRecord {
    pub fn new(city: impl Into<String>, temperature: f64, condition: impl Into<String>) -> Self {
        Self {
            city: city.into(),
            temperature,
            condition: condition.into(),
        }
    }

    /// Format temperature with unit
    #[must_use]
    pub fn format_temperature(&self) -> String {
        format!("{:.1}°C", self.temperature)
    }

    /// Format condition with the first letter capitalised
    #[must_use]
    pub fn format_condition(&self) -> String {
        let mut chars = self.condition.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => String::new(),
        }
    }
}

/// Ordered rows ready for display
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ResultTable {
    rows: Vec<WeatherRecord>,
}

impl ResultTable {
    pub const COLUMNS: [&'static str; 3] = ["City", "Temperature", "Condition"];

    #[must_use]
    pub fn new(rows: Vec<WeatherRecord>) -> Self {
        Self { rows }
    }

    #[must_use]
    pub fn rows(&self) -> &[WeatherRecord] {
        &self.rows
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &WeatherRecord> {
        self.rows.iter()
    }
}
