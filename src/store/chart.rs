use std::sync::Arc;

use log::{debug, error, info, warn};
use serde_json::Value;
use tokio::sync::watch;

use super::{CacheKey, FetchStatus, TelemetrySource};
use crate::api::models::{ChartConfiguration, ChartVariable, SessionRecords};
use crate::series::{self, ChartSeries, Series};

/// Chart layout used until the backend provides a valid one
pub fn fallback_configuration() -> Vec<ChartConfiguration> {
    vec![ChartConfiguration {
        id: 1,
        title: "Speeds".to_string(),
        chart_type: "line".to_string(),
        y_axis_title: "Value (km/h)".to_string(),
        variables: vec![
            ChartVariable::new("kd", "Speed (OBD)", "km/h"),
            ChartVariable::new("kff1001", "Speed (GPS)", "km/h"),
            ChartVariable::new("kff1237", "GPS vs OBD Speed difference", "km/h"),
        ],
    }]
}

/// Chart configuration and session records for one device session
pub struct ChartStore {
    source: Arc<dyn TelemetrySource>,
    chart_data: SessionRecords,
    chart_configurations: Vec<ChartConfiguration>,
    initialized: bool,
    current: CacheKey,
    status: watch::Sender<FetchStatus>,
    config_status: watch::Sender<FetchStatus>,
}

impl ChartStore {
    pub fn new(source: Arc<dyn TelemetrySource>) -> Self {
        let mut store = Self {
            source,
            chart_data: SessionRecords::new(),
            chart_configurations: Vec::new(),
            initialized: false,
            current: CacheKey::default(),
            status: watch::channel(FetchStatus::default()).0,
            config_status: watch::channel(FetchStatus::default()).0,
        };
        store.set_fallback_configuration();
        store
    }

    pub fn chart_data(&self) -> &SessionRecords {
        &self.chart_data
    }

    pub fn chart_configurations(&self) -> &[ChartConfiguration] {
        &self.chart_configurations
    }

    pub fn initialized(&self) -> bool {
        self.initialized
    }

    pub fn loading(&self) -> bool {
        self.status.borrow().loading
    }

    pub fn error(&self) -> Option<String> {
        self.status.borrow().error.clone()
    }

    pub fn config_loading(&self) -> bool {
        self.config_status.borrow().loading
    }

    pub fn config_error(&self) -> Option<String> {
        self.config_status.borrow().error.clone()
    }

    pub fn current_device_id(&self) -> Option<&str> {
        self.current.device_id.as_deref()
    }

    pub fn current_session_id(&self) -> Option<&str> {
        self.current.session_id.as_deref()
    }

    /// Status of the data fetch
    pub fn subscribe(&self) -> watch::Receiver<FetchStatus> {
        self.status.subscribe()
    }

    pub fn set_fallback_configuration(&mut self) {
        self.chart_configurations = fallback_configuration();
        debug!("Set fallback configuration with {} chart(s)", self.chart_configurations.len());
    }

    /// Replace the chart configurations from `GET /configuration`.
    ///
    /// Never fails: a bad response or a malformed body installs the fallback.
    pub async fn fetch_chart_configurations(&mut self) {
        self.config_status.send_replace(FetchStatus::started());

        let error = match self.source.fetch_configuration().await {
            Ok(body) => {
                match parse_configurations(&body) {
                    Some(charts) => {
                        info!("Set {} chart configuration(s) from API", charts.len());
                        self.chart_configurations = charts;
                    }
                    None => {
                        warn!("Invalid configuration format, using fallback");
                        self.set_fallback_configuration();
                    }
                }
                None
            }
            Err(err) => {
                error!("Error fetching chart configurations: {}", err);
                self.set_fallback_configuration();
                Some(err.to_string())
            }
        };

        self.config_status.send_replace(FetchStatus {
            loading: false,
            error,
        });
    }

    /// Load configurations and records for a session unless they are cached.
    ///
    /// Failures end up in [`ChartStore::error`]; the previous session stays
    /// current.
    pub async fn fetch_chart_data(&mut self, device_id: &str, session_id: &str) {
        if self.initialized && self.current.matches(device_id, session_id) {
            debug!("Chart data for {}/{} already loaded", device_id, session_id);
            return;
        }

        self.status.send_replace(FetchStatus::started());

        let error = match self.load_chart_data(device_id, session_id).await {
            Ok(()) => None,
            Err(err) => {
                error!("Error fetching chart data: {}", err);
                Some(err.to_string())
            }
        };

        self.status.send_replace(FetchStatus {
            loading: false,
            error,
        });
    }

    async fn load_chart_data(&mut self, device_id: &str, session_id: &str) -> anyhow::Result<()> {
        self.fetch_chart_configurations().await;

        let body = self.source.fetch_session_data(device_id, session_id).await?;

        match body.get("data").and_then(records_from_value) {
            Some(records) => {
                debug!(
                    "Chart data set, sample keys: {:?}",
                    records.keys().take(3).collect::<Vec<_>>()
                );
                self.chart_data = records;
            }
            None => {
                warn!("Invalid data format received");
                self.chart_data = SessionRecords::new();
            }
        }

        self.current.set(device_id, session_id);
        self.initialized = true;

        if self.chart_configurations.is_empty() {
            warn!("No chart configurations available after data fetch, setting fallback");
            self.set_fallback_configuration();
        }

        Ok(())
    }

    /// Every configured chart with its series
    pub fn all_chart_series(&self) -> Vec<ChartSeries> {
        if self.chart_configurations.is_empty() {
            debug!("No chart configurations found");
            return Vec::new();
        }
        series::build_chart_series(&self.chart_configurations, &self.chart_data)
    }

    /// Series of the primary chart, or the default speed series when there is
    /// nothing configured or loaded
    pub fn chart_series(&self) -> Vec<Series> {
        if self.chart_configurations.is_empty() || self.chart_data.is_empty() {
            return series::default_chart_series(&self.chart_data);
        }

        self.all_chart_series()
            .into_iter()
            .next()
            .map(|chart| chart.series)
            .unwrap_or_default()
    }
}

/// `configuration.charts` of a configuration response, if well formed
fn parse_configurations(body: &Value) -> Option<Vec<ChartConfiguration>> {
    let charts = body.get("configuration")?.get("charts")?;
    if !charts.is_array() {
        return None;
    }

    match serde_json::from_value(charts.clone()) {
        Ok(charts) => Some(charts),
        Err(err) => {
            warn!("Malformed chart configuration: {}", err);
            None
        }
    }
}

/// Timestamp-keyed records of a `data` object; non-object records are dropped
fn records_from_value(value: &Value) -> Option<SessionRecords> {
    let object = value.as_object()?;
    let records = object
        .iter()
        .filter_map(|(timestamp, record)| match record.as_object() {
            Some(fields) => Some((timestamp.clone(), fields.clone())),
            None => {
                debug!("Dropping non-object record at '{}'", timestamp);
                None
            }
        })
        .collect();
    Some(records)
}
