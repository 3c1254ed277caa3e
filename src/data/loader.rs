use crate::error::{Result, TrendlabError};
use chrono::{NaiveDate, NaiveDateTime};
use polars::prelude::*;
use std::path::Path;

const CLOSE_ALIASES: [&str; 4] = ["close", "adj_close", "adj close", "price"];
const TIMESTAMP_ALIASES: [&str; 4] = ["timestamp", "date", "datetime", "time"];

/// CSV access for price series.
///
/// Column names are matched case-insensitively against the usual aliases;
/// when nothing close-like exists the first numeric column is used instead,
/// with a warning.
pub struct CsvSource;

impl CsvSource {
    /// Load a CSV file into a DataFrame, dropping rows with null values.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<DataFrame> {
        let df = CsvReadOptions::default()
            .try_into_reader_with_file_path(Some(path.as_ref().to_path_buf()))?
            .finish()
            .map_err(|e| TrendlabError::DataLoading(format!("Failed to read CSV: {}", e)))?;

        let df = df
            .lazy()
            .drop_nulls(None)
            .collect()
            .map_err(|e| TrendlabError::DataLoading(format!("Failed to drop null rows: {}", e)))?;

        Ok(df)
    }

    /// Extract the close price series as `Vec<f64>`.
    pub fn close_series(df: &DataFrame) -> Result<Vec<f64>> {
        let name = match Self::find_column(df, &CLOSE_ALIASES) {
            Some(name) => name,
            None => {
                let name = Self::first_numeric_column(df).ok_or_else(|| {
                    TrendlabError::DataLoading(
                        "No close-like or numeric column found".to_string(),
                    )
                })?;
                log::warn!("No close column found, falling back to '{}'", name);
                name
            }
        };

        let column = df.column(&name)?.cast(&DataType::Float64)?;
        let values = column.f64()?;
        let mut series = Vec::with_capacity(values.len());
        for i in 0..values.len() {
            match values.get(i) {
                Some(value) => series.push(value),
                None => {
                    return Err(TrendlabError::DataLoading(format!(
                        "Null price at row {} in column '{}'",
                        i, name
                    )))
                }
            }
        }
        Ok(series)
    }

    /// Parsed timestamps when a timestamp-like string column exists.
    pub fn timestamps(df: &DataFrame) -> Result<Option<Vec<NaiveDateTime>>> {
        let name = match Self::find_column(df, &TIMESTAMP_ALIASES) {
            Some(name) => name,
            None => return Ok(None),
        };

        let column = df.column(&name)?;
        let strings = match column.str() {
            Ok(strings) => strings,
            Err(_) => {
                log::warn!(
                    "Timestamp column '{}' is not a string column, skipping parse",
                    name
                );
                return Ok(None);
            }
        };

        let mut parsed = Vec::with_capacity(strings.len());
        for i in 0..strings.len() {
            let raw = strings
                .get(i)
                .ok_or_else(|| TrendlabError::DataLoading(format!("Null timestamp at row {}", i)))?;
            let value = parse_timestamp(raw).ok_or_else(|| {
                TrendlabError::DataLoading(format!("Unparseable timestamp '{}' at row {}", raw, i))
            })?;
            parsed.push(value);
        }
        Ok(Some(parsed))
    }

    /// Load a file and return its close series with any timestamps.
    pub fn load_close_series<P: AsRef<Path>>(
        path: P,
    ) -> Result<(Vec<f64>, Option<Vec<NaiveDateTime>>)> {
        let df = Self::load(path)?;
        let close = Self::close_series(&df)?;
        let timestamps = Self::timestamps(&df)?;
        Ok((close, timestamps))
    }

    fn find_column(df: &DataFrame, aliases: &[&str]) -> Option<String> {
        let columns = df.get_column_names();
        for alias in aliases {
            if let Some(col) = columns
                .iter()
                .find(|col| col.as_str().eq_ignore_ascii_case(alias))
            {
                return Some(col.to_string());
            }
        }
        None
    }

    fn first_numeric_column(df: &DataFrame) -> Option<String> {
        for column in df.get_columns() {
            if matches!(
                column.dtype(),
                DataType::Float64
                    | DataType::Float32
                    | DataType::Int64
                    | DataType::Int32
                    | DataType::UInt64
                    | DataType::UInt32
            ) {
                return Some(column.name().to_string());
            }
        }
        None
    }
}

fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    const DATETIME_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"];
    for format in DATETIME_FORMATS {
        if let Ok(value) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(value);
        }
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::df;

    #[test]
    fn test_close_series_case_insensitive() {
        let df = df! {
            "Date" => &["2024-01-02", "2024-01-03"],
            "Close" => &[100.5, 101.25],
        }
        .unwrap();

        let close = CsvSource::close_series(&df).unwrap();
        assert_eq!(close, vec![100.5, 101.25]);
    }

    #[test]
    fn test_close_series_numeric_fallback() {
        let df = df! {
            "symbol" => &["A", "A", "A"],
            "last_trade" => &[10.0, 11.0, 12.0],
        }
        .unwrap();

        let close = CsvSource::close_series(&df).unwrap();
        assert_eq!(close, vec![10.0, 11.0, 12.0]);
    }

    #[test]
    fn test_close_series_no_numeric_column() {
        let df = df! {
            "symbol" => &["A", "B"],
        }
        .unwrap();

        assert!(CsvSource::close_series(&df).is_err());
    }

    #[test]
    fn test_timestamps_parse_dates_and_datetimes() {
        let df = df! {
            "timestamp" => &["2024-01-02", "2024-01-03"],
            "close" => &[100.0, 101.0],
        }
        .unwrap();

        let parsed = CsvSource::timestamps(&df).unwrap().unwrap();
        assert_eq!(parsed.len(), 2);
        assert_eq!(
            parsed[0],
            NaiveDate::from_ymd_opt(2024, 1, 2)
                .unwrap()
                .and_hms_opt(0, 0, 0)
                .unwrap()
        );

        let df = df! {
            "time" => &["2024-01-02 09:30:00"],
            "close" => &[100.0],
        }
        .unwrap();
        let parsed = CsvSource::timestamps(&df).unwrap().unwrap();
        assert_eq!(
            parsed[0],
            NaiveDate::from_ymd_opt(2024, 1, 2)
                .unwrap()
                .and_hms_opt(9, 30, 0)
                .unwrap()
        );
    }

    #[test]
    fn test_timestamps_absent_column() {
        let df = df! {
            "close" => &[100.0, 101.0],
        }
        .unwrap();

        assert!(CsvSource::timestamps(&df).unwrap().is_none());
    }

    #[test]
    fn test_timestamps_unparseable_value() {
        let df = df! {
            "date" => &["02/01/2024"],
            "close" => &[100.0],
        }
        .unwrap();

        assert!(CsvSource::timestamps(&df).is_err());
    }
}
