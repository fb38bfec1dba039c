//! Chart and map stores sharing one telemetry source, the way the dashboard
//! home view uses them

use async_trait::async_trait;
use gorque_dash::store::{ChartStore, MapStore, TelemetrySource, fallback_configuration};
use serde_json::{Value, json};
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

/// In-memory backend keyed by `device/session`
struct Backend {
    configuration: Option<Value>,
    sessions: HashMap<String, Value>,
    data_requests: AtomicUsize,
}

impl Backend {
    fn new(configuration: Option<Value>) -> Self {
        Self {
            configuration,
            sessions: HashMap::new(),
            data_requests: AtomicUsize::new(0),
        }
    }

    fn with_session(mut self, device_id: &str, session_id: &str, body: Value) -> Self {
        self.sessions.insert(format!("{}/{}", device_id, session_id), body);
        self
    }

    fn data_requests(&self) -> usize {
        self.data_requests.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TelemetrySource for Backend {
    async fn fetch_configuration(&self) -> anyhow::Result<Value> {
        match &self.configuration {
            Some(body) => Ok(body.clone()),
            None => anyhow::bail!("HTTP error when fetching chart configurations: 503"),
        }
    }

    async fn fetch_session_data(&self, device_id: &str, session_id: &str) -> anyhow::Result<Value> {
        self.data_requests.fetch_add(1, Ordering::SeqCst);
        match self.sessions.get(&format!("{}/{}", device_id, session_id)) {
            Some(body) => Ok(body.clone()),
            None => anyhow::bail!("HTTP error: 404"),
        }
    }
}

fn drive() -> Value {
    json!({
        "center": [47.50, 19.05],
        "coords": [[47.49, 19.04], [47.50, 19.05], [47.51, 19.06]],
        "data": {
            "2024-05-01T10:00:02Z": {"kd": 54, "kff1001": "53.2", "kff1237": 0.8, "kff1006": 47.51, "kff1005": 19.06},
            "2024-05-01T10:00:00Z": {"kd": 50, "kff1001": "49.0", "kff1237": 1.0, "kff1006": 47.49, "kff1005": 19.04},
            "2024-05-01T10:00:01Z": {"kd": 52, "kff1006": 47.50, "kff1005": 19.05}
        }
    })
}

#[tokio::test]
async fn test_home_view_without_configuration_endpoint() {
    let backend = Arc::new(Backend::new(None).with_session("car-1", "trip-1", drive()));
    let mut charts = ChartStore::new(backend.clone());
    let mut map = MapStore::new(backend.clone());

    charts.fetch_chart_data("car-1", "trip-1").await;
    map.fetch_map_data("car-1", "trip-1").await;

    assert_eq!(charts.error(), None);
    assert!(charts.config_error().is_some());
    assert_eq!(charts.chart_configurations(), fallback_configuration().as_slice());

    let series = charts.chart_series();
    assert_eq!(series.len(), 3);
    assert_eq!(series[0].name, "Speed (OBD) (km/h)");
    let obd: Vec<f64> = series[0].data.iter().map(|p| p.y).collect();
    assert_eq!(obd, vec![50.0, 52.0, 54.0]);
    let gps: Vec<f64> = series[1].data.iter().map(|p| p.y).collect();
    assert_eq!(gps, vec![49.0, 53.2]);

    assert_eq!(map.track_len(), 3);
    assert_eq!(map.data_map().center, [47.50, 19.05]);
    assert_eq!(map.data_map().data.len(), 3);
    assert_eq!(backend.data_requests(), 2);
}

#[tokio::test]
async fn test_switching_sessions_refetches_only_on_change() {
    let backend = Arc::new(
        Backend::new(Some(json!({
            "configuration": {"charts": [{
                "id": 7,
                "title": "Speeds",
                "type": "line",
                "yAxisTitle": "Value (km/h)",
                "variables": [{"key": "kd", "name": "Speed (OBD)", "unit": "km/h"}]
            }]}
        })))
        .with_session("car-1", "trip-1", drive())
        .with_session("car-1", "trip-2", json!({"center": [0.0, 0.0], "coords": [], "data": {}})),
    );
    let mut charts = ChartStore::new(backend.clone());

    charts.fetch_chart_data("car-1", "trip-1").await;
    charts.fetch_chart_data("car-1", "trip-1").await;
    assert_eq!(backend.data_requests(), 1);
    assert_eq!(charts.all_chart_series()[0].id, 7);

    charts.fetch_chart_data("car-1", "trip-2").await;
    assert_eq!(backend.data_requests(), 2);
    assert!(charts.chart_data().is_empty());
    assert!(charts.chart_series().is_empty());

    // An empty session is still a cache hit for the chart store
    charts.fetch_chart_data("car-1", "trip-2").await;
    assert_eq!(backend.data_requests(), 2);
}

#[tokio::test]
async fn test_unknown_session_surfaces_error() {
    let backend = Arc::new(Backend::new(None));
    let mut charts = ChartStore::new(backend.clone());
    let mut map = MapStore::new(backend.clone());

    charts.fetch_chart_data("car-9", "trip-9").await;
    map.fetch_map_data("car-9", "trip-9").await;

    assert_eq!(charts.error().as_deref(), Some("HTTP error: 404"));
    assert_eq!(map.error().as_deref(), Some("HTTP error: 404"));
    assert!(!charts.initialized());
    assert!(!map.initialized());
    assert!(!charts.loading());
    assert!(!map.loading());
}
