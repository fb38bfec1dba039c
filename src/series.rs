//! Chart series derived from timestamp-keyed session records

use chrono::DateTime;
use log::debug;
use serde::Serialize;
use serde_json::Value;

use crate::api::models::{ChartConfiguration, ChartVariable, SessionRecords};

/// One plotted sample, `x` in epoch milliseconds
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DataPoint {
    pub x: i64,
    pub y: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Series {
    pub name: String,
    pub data: Vec<DataPoint>,
}

/// A configured chart with its series filled in
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSeries {
    pub id: i64,
    pub title: String,
    #[serde(rename = "type")]
    pub chart_type: String,
    #[serde(rename = "yAxisTitle")]
    pub y_axis_title: String,
    pub series: Vec<Series>,
}

/// Keys and labels of the speed series shown without a configuration
pub const DEFAULT_SERIES: [(&str, &str); 3] = [
    ("kd", "Speed (OBD)"),
    ("kff1001", "Speed (GPS)"),
    ("kff1237", "GPS vs OBD Speed difference"),
];

pub fn iso_to_millis(timestamp: &str) -> Option<i64> {
    DateTime::parse_from_rfc3339(timestamp)
        .ok()
        .map(|parsed| parsed.timestamp_millis())
}

/// Numeric value of a raw record field.
///
/// Strings contribute their longest leading decimal literal, so `"12.5 km"`
/// is 12.5. Anything without one is NaN.
pub fn parse_float(value: &Value) -> f64 {
    match value {
        Value::Number(number) => number.as_f64().unwrap_or(f64::NAN),
        Value::String(text) => parse_float_prefix(text),
        _ => f64::NAN,
    }
}

fn parse_float_prefix(text: &str) -> f64 {
    let text = text.trim_start_matches(|c: char| c.is_whitespace() || c == '\u{feff}');
    let bytes = text.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        end = 1;
    }
    if text[end..].starts_with("Infinity") {
        return if text.starts_with('-') { f64::NEG_INFINITY } else { f64::INFINITY };
    }

    let digits_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut mantissa_digits = end - digits_start;

    if end < bytes.len() && bytes[end] == b'.' {
        let fraction_start = end + 1;
        let mut fraction_end = fraction_start;
        while fraction_end < bytes.len() && bytes[fraction_end].is_ascii_digit() {
            fraction_end += 1;
        }
        mantissa_digits += fraction_end - fraction_start;
        if mantissa_digits > 0 {
            end = fraction_end;
        }
    }

    if mantissa_digits == 0 {
        return f64::NAN;
    }

    if end < bytes.len() && matches!(bytes[end], b'e' | b'E') {
        let mut exponent_end = end + 1;
        if matches!(bytes.get(exponent_end), Some(b'+') | Some(b'-')) {
            exponent_end += 1;
        }
        let exponent_digits_start = exponent_end;
        while exponent_end < bytes.len() && bytes[exponent_end].is_ascii_digit() {
            exponent_end += 1;
        }
        if exponent_end > exponent_digits_start {
            end = exponent_end;
        }
    }

    text[..end].parse().unwrap_or(f64::NAN)
}

/// Points of one variable across all records, ordered by time.
///
/// A record takes part when the key is present, even with a null value.
pub fn process_variable_data(records: &SessionRecords, key: &str) -> Vec<DataPoint> {
    let mut data: Vec<DataPoint> = records
        .iter()
        .filter_map(|(timestamp, record)| {
            let value = record.get(key)?;
            match iso_to_millis(timestamp) {
                Some(x) => Some(DataPoint { x, y: parse_float(value) }),
                None => {
                    debug!("Skipping record with unparsable timestamp '{}'", timestamp);
                    None
                }
            }
        })
        .collect();

    data.sort_by_key(|point| point.x);
    data
}

/// Legend label, with the unit in parentheses when there is one
pub fn series_name(variable: &ChartVariable) -> String {
    if variable.unit.is_empty() {
        variable.name.clone()
    } else {
        format!("{} ({})", variable.name, variable.unit)
    }
}

pub fn build_chart_series(configurations: &[ChartConfiguration], records: &SessionRecords) -> Vec<ChartSeries> {
    configurations
        .iter()
        .map(|chart| ChartSeries {
            id: chart.id,
            title: chart.title.clone(),
            chart_type: chart.chart_type.clone(),
            y_axis_title: chart.y_axis_title.clone(),
            series: chart
                .variables
                .iter()
                .map(|variable| Series {
                    name: series_name(variable),
                    data: process_variable_data(records, &variable.key),
                })
                .collect(),
        })
        .collect()
}

/// The three speed series, used when no configured chart applies
pub fn default_chart_series(records: &SessionRecords) -> Vec<Series> {
    if records.is_empty() {
        return Vec::new();
    }

    DEFAULT_SERIES
        .iter()
        .map(|(key, name)| Series {
            name: name.to_string(),
            data: process_variable_data(records, key),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn records(value: Value) -> SessionRecords {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_iso_to_millis() {
        assert_eq!(iso_to_millis("1970-01-01T00:00:01Z"), Some(1000));
        assert_eq!(iso_to_millis("2024-05-01T12:00:00+02:00"), Some(1_714_557_600_000));
        assert_eq!(iso_to_millis("yesterday"), None);
    }

    #[test]
    fn test_parse_float_numbers_and_strings() {
        assert_eq!(parse_float(&json!(42)), 42.0);
        assert_eq!(parse_float(&json!(-3.5)), -3.5);
        assert_eq!(parse_float(&json!("12.5")), 12.5);
        assert_eq!(parse_float(&json!("  7.25 km/h")), 7.25);
        assert_eq!(parse_float(&json!("\u{feff}5")), 5.0);
        assert_eq!(parse_float(&json!("\u{a0}\t-2")), -2.0);
        assert_eq!(parse_float(&json!(".5")), 0.5);
        assert_eq!(parse_float(&json!("3.")), 3.0);
        assert_eq!(parse_float(&json!("1e3x")), 1000.0);
        assert_eq!(parse_float(&json!("2e")), 2.0);
        assert_eq!(parse_float(&json!("-Infinity")), f64::NEG_INFINITY);
    }

    #[test]
    fn test_parse_float_nan_cases() {
        assert!(parse_float(&json!(null)).is_nan());
        assert!(parse_float(&json!(true)).is_nan());
        assert!(parse_float(&json!("abc")).is_nan());
        assert!(parse_float(&json!("")).is_nan());
        assert!(parse_float(&json!(".")).is_nan());
        assert!(parse_float(&json!({"v": 1})).is_nan());
    }

    #[test]
    fn test_process_variable_data_sorts_and_filters() {
        let records = records(json!({
            "2024-05-01T10:00:02Z": {"kd": "30"},
            "2024-05-01T09:59:59+00:00": {"kd": 10},
            "2024-05-01T10:00:01Z": {"kff1001": 5},
            "2024-05-01T10:00:00Z": {"kd": 20.5}
        }));

        let points = process_variable_data(&records, "kd");
        let xs: Vec<i64> = points.iter().map(|p| p.x).collect();
        let ys: Vec<f64> = points.iter().map(|p| p.y).collect();

        assert_eq!(ys, vec![10.0, 20.5, 30.0]);
        assert!(xs.windows(2).all(|pair| pair[0] <= pair[1]));
    }

    #[test]
    fn test_present_null_becomes_nan_point() {
        let records = records(json!({
            "2024-05-01T10:00:00Z": {"kd": null},
            "bad timestamp": {"kd": 1}
        }));

        let points = process_variable_data(&records, "kd");
        assert_eq!(points.len(), 1);
        assert!(points[0].y.is_nan());
    }

    #[test]
    fn test_series_name_unit_suffix() {
        assert_eq!(series_name(&ChartVariable::new("kd", "Speed (OBD)", "km/h")), "Speed (OBD) (km/h)");
        assert_eq!(series_name(&ChartVariable::new("k04", "Engine Load", "")), "Engine Load");
    }

    #[test]
    fn test_default_series_empty_without_records() {
        assert!(default_chart_series(&SessionRecords::new()).is_empty());
    }

    #[test]
    fn test_default_series_layout() {
        let records = records(json!({
            "2024-05-01T10:00:00Z": {"kd": 50, "kff1001": 48, "kff1237": 2}
        }));

        let series = default_chart_series(&records);
        let names: Vec<&str> = series.iter().map(|s| s.name.as_str()).collect();

        assert_eq!(names, vec!["Speed (OBD)", "Speed (GPS)", "GPS vs OBD Speed difference"]);
        assert_eq!(series[2].data, vec![DataPoint { x: 1_714_557_600_000, y: 2.0 }]);
    }

    #[test]
    fn test_chart_series_serializes_with_dashboard_names() {
        let chart = ChartSeries {
            id: 1,
            title: "Speeds".to_string(),
            chart_type: "line".to_string(),
            y_axis_title: "Value (km/h)".to_string(),
            series: vec![Series {
                name: "Speed".to_string(),
                data: vec![DataPoint { x: 1, y: f64::NAN }],
            }],
        };

        let value = serde_json::to_value(&chart).unwrap();
        assert_eq!(value["type"], "line");
        assert_eq!(value["yAxisTitle"], "Value (km/h)");
        assert_eq!(value["series"][0]["data"][0]["y"], Value::Null);
    }
}
