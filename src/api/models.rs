use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// One flat telemetry record: variable key -> raw value
pub type Record = Map<String, Value>;

/// Records of a session keyed by their RFC 3339 timestamp
pub type SessionRecords = BTreeMap<String, Record>;

/// A `[lat, lon]` pair as sent by the backend
pub type Coordinate = [f64; 2];

/// A variable plotted on a chart
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartVariable {
    pub key: String,
    pub name: String,
    #[serde(default)]
    pub unit: String,
}

impl ChartVariable {
    pub fn new(key: &str, name: &str, unit: &str) -> Self {
        Self {
            key: key.to_string(),
            name: name.to_string(),
            unit: unit.to_string(),
        }
    }
}

/// Chart layout served by `GET /configuration`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartConfiguration {
    pub id: i64,
    pub title: String,
    #[serde(rename = "type")]
    pub chart_type: String,
    #[serde(rename = "yAxisTitle", default)]
    pub y_axis_title: String,
    pub variables: Vec<ChartVariable>,
}

/// Response body of `GET /data`, also the state of the map store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionData {
    #[serde(default)]
    pub center: Coordinate,
    #[serde(default)]
    pub coords: Vec<Coordinate>,
    #[serde(default)]
    pub data: SessionRecords,
}

impl Default for SessionData {
    fn default() -> Self {
        Self {
            center: [0.0, 0.0],
            coords: Vec::new(),
            data: SessionRecords::new(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Device {
    #[serde(rename = "DeviceID")]
    pub device_id: String,
    #[serde(rename = "ProfileName", default)]
    pub profile_name: String,
    #[serde(rename = "LastSeen", default)]
    pub last_seen: Option<DateTime<Utc>>,
    #[serde(rename = "CreatedAt", default)]
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    #[serde(rename = "SessionID")]
    pub session_id: String,
    #[serde(rename = "DeviceID")]
    pub device_id: String,
    #[serde(rename = "StartTime", default)]
    pub start_time: Option<DateTime<Utc>>,
    #[serde(rename = "EndTime", default)]
    pub end_time: Option<DateTime<Utc>>,
    #[serde(rename = "TotalRecords", default)]
    pub total_records: i64,
    #[serde(rename = "IsActive", default)]
    pub is_active: bool,
}

#[derive(Debug, Deserialize)]
pub(crate) struct DeviceList {
    #[serde(default)]
    pub devices: Vec<Device>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct SessionList {
    #[serde(default)]
    pub sessions: Vec<Session>,
}

/// Authenticated user as returned by `GET /profile`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Profile {
    pub id: u64,
    pub email: String,
    #[serde(default)]
    pub name: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_chart_configuration_wire_names() {
        let config: ChartConfiguration = serde_json::from_value(json!({
            "id": 2,
            "title": "Engine performance and load",
            "type": "line",
            "yAxisTitle": "",
            "variables": [{"key": "k04", "name": "Engine Load", "unit": "%"}]
        }))
        .unwrap();

        assert_eq!(config.chart_type, "line");
        assert_eq!(config.variables[0], ChartVariable::new("k04", "Engine Load", "%"));
    }

    #[test]
    fn test_session_data_defaults() {
        let data: SessionData = serde_json::from_value(json!({})).unwrap();
        assert_eq!(data, SessionData::default());
    }

    #[test]
    fn test_session_accepts_null_end_time() {
        let session: Session = serde_json::from_value(json!({
            "SessionID": "s-1",
            "DeviceID": "d-1",
            "StartTime": "2024-05-01T10:00:00Z",
            "EndTime": null,
            "TotalRecords": 42,
            "IsActive": true,
            "User": {"ID": 1}
        }))
        .unwrap();

        assert!(session.end_time.is_none());
        assert_eq!(session.total_records, 42);
    }
}
