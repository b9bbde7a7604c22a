//! Filtering and ordering of fetched rows

use std::cmp::Ordering;

use crate::models::{ResultTable, SortKey, WeatherRecord};

/// Keep rows whose city contains `search`, ignoring case.
///
/// An empty search keeps everything.
#[must_use]
pub fn filter_by_city(records: Vec<WeatherRecord>, search: &str) -> Vec<WeatherRecord> {
    if search.is_empty() {
        return records;
    }
    let needle = search.to_lowercase();
    records
        .into_iter()
        .filter(|record| record.city.to_lowercase().contains(&needle))
        .collect()
}

/// Stable ascending sort by the chosen column
pub fn sort_records(records: &mut [WeatherRecord], key: SortKey) {
    records.sort_by(|a, b| compare(a, b, key));
}

fn compare(a: &WeatherRecord, b: &WeatherRecord, key: SortKey) -> Ordering {
    match key {
        SortKey::City => a.city.cmp(&b.city),
        SortKey::Temperature => a.temperature.total_cmp(&b.temperature),
    }
}

/// Filter then sort; never fails, possibly empty
#[must_use]
pub fn present(records: Vec<WeatherRecord>, search: &str, key: SortKey) -> ResultTable {
    let mut rows = filter_by_city(records, search);
    sort_records(&mut rows, key);
    ResultTable::new(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    #[fixture]
    fn rows() -> Vec<WeatherRecord> {
        vec![
            WeatherRecord::new("Lahore", 31.0, "haze"),
            WeatherRecord::new("Karachi", 29.5, "clear sky"),
            WeatherRecord::new("Sahiwal", 33.0, "sunny"),
        ]
    }

    fn cities(rows: &[WeatherRecord]) -> Vec<&str> {
        rows.iter().map(|r| r.city.as_str()).collect()
    }

    #[rstest]
    #[case("lah", vec!["Lahore"])]
    #[case("LAH", vec!["Lahore"])]
    #[case("a", vec!["Lahore", "Karachi", "Sahiwal"])]
    #[case("hi", vec!["Karachi", "Sahiwal"])]
    #[case("paris", vec![])]
    fn test_filter_is_case_insensitive(
        rows: Vec<WeatherRecord>,
        #[case] search: &str,
        #[case] expected: Vec<&str>,
    ) {
        assert_eq!(cities(&filter_by_city(rows, search)), expected);
    }

    #[rstest]
    fn test_empty_filter_is_noop(rows: Vec<WeatherRecord>) {
        let expected = rows.clone();
        assert_eq!(filter_by_city(rows, ""), expected);
    }

    #[rstest]
    fn test_sort_by_temperature(mut rows: Vec<WeatherRecord>) {
        sort_records(&mut rows, SortKey::Temperature);
        assert_eq!(cities(&rows), vec!["Karachi", "Lahore", "Sahiwal"]);
    }

    #[rstest]
    fn test_sort_by_city(mut rows: Vec<WeatherRecord>) {
        sort_records(&mut rows, SortKey::City);
        assert_eq!(cities(&rows), vec!["Karachi", "Lahore", "Sahiwal"]);
    }

    #[test]
    fn test_sort_by_city_is_lexicographic() {
        let mut rows = vec![
            WeatherRecord::new("lahore", 1.0, ""),
            WeatherRecord::new("Zurich", 2.0, ""),
            WeatherRecord::new("Amsterdam", 3.0, ""),
        ];
        sort_records(&mut rows, SortKey::City);
        assert_eq!(cities(&rows), vec!["Amsterdam", "Zurich", "lahore"]);
    }

    #[test]
    fn test_temperature_ties_keep_input_order() {
        let mut rows = vec![
            WeatherRecord::new("B", 20.0, "first"),
            WeatherRecord::new("A", 10.0, ""),
            WeatherRecord::new("C", 20.0, "second"),
        ];
        sort_records(&mut rows, SortKey::Temperature);
        assert_eq!(cities(&rows), vec!["A", "B", "C"]);
    }

    #[test]
    fn test_city_ties_keep_input_order() {
        let mut rows = vec![
            WeatherRecord::new("Lahore", 31.0, "first"),
            WeatherRecord::new("Karachi", 29.0, ""),
            WeatherRecord::new("Lahore", 12.0, "second"),
        ];
        sort_records(&mut rows, SortKey::City);
        let conditions: Vec<_> = rows.iter().map(|r| r.condition.as_str()).collect();
        assert_eq!(conditions, vec!["", "first", "second"]);
    }

    #[test]
    fn test_negative_temperatures_sort_numerically() {
        let mut rows = vec![
            WeatherRecord::new("Cairo", 5.0, ""),
            WeatherRecord::new("Oslo", -12.5, ""),
            WeatherRecord::new("Rome", -2.0, ""),
        ];
        sort_records(&mut rows, SortKey::Temperature);
        assert_eq!(cities(&rows), vec!["Oslo", "Rome", "Cairo"]);
    }

    #[rstest]
    fn test_present_filters_then_sorts(rows: Vec<WeatherRecord>) {
        let table = present(rows, "a", SortKey::Temperature);
        assert_eq!(cities(table.rows()), vec!["Karachi", "Lahore", "Sahiwal"]);
    }

    #[rstest]
    fn test_present_without_search_keeps_all_rows(rows: Vec<WeatherRecord>) {
        let table = present(rows, "", SortKey::City);
        assert_eq!(cities(table.rows()), vec!["Karachi", "Lahore", "Sahiwal"]);
    }

    #[rstest]
    fn test_present_without_match_is_empty(rows: Vec<WeatherRecord>) {
        let table = present(rows, "Atlantis", SortKey::City);
        assert!(table.is_empty());
    }
}
