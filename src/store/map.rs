use std::sync::Arc;

use anyhow::Context;
use log::{debug, error, info};
use serde::Serialize;
use tokio::sync::watch;

use super::{CacheKey, FetchStatus, TelemetrySource};
use crate::api::models::{Coordinate, SessionData};

/// Bounding box of a GPS track
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Bounds {
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_lon: f64,
    pub max_lon: f64,
}

impl Bounds {
    pub fn of(coords: &[Coordinate]) -> Option<Self> {
        let (first, rest) = coords.split_first()?;
        let start = Self {
            min_lat: first[0],
            max_lat: first[0],
            min_lon: first[1],
            max_lon: first[1],
        };

        Some(rest.iter().fold(start, |bounds, [lat, lon]| Self {
            min_lat: bounds.min_lat.min(*lat),
            max_lat: bounds.max_lat.max(*lat),
            min_lon: bounds.min_lon.min(*lon),
            max_lon: bounds.max_lon.max(*lon),
        }))
    }
}

/// GPS track and raw records of one device session
pub struct MapStore {
    source: Arc<dyn TelemetrySource>,
    data_map: SessionData,
    initialized: bool,
    current: CacheKey,
    status: watch::Sender<FetchStatus>,
}

impl MapStore {
    pub fn new(source: Arc<dyn TelemetrySource>) -> Self {
        Self {
            source,
            data_map: SessionData::default(),
            initialized: false,
            current: CacheKey::default(),
            status: watch::channel(FetchStatus::default()).0,
        }
    }

    pub fn data_map(&self) -> &SessionData {
        &self.data_map
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

    pub fn current_device_id(&self) -> Option<&str> {
        self.current.device_id.as_deref()
    }

    pub fn current_session_id(&self) -> Option<&str> {
        self.current.session_id.as_deref()
    }

    pub fn subscribe(&self) -> watch::Receiver<FetchStatus> {
        self.status.subscribe()
    }

    pub fn bounds(&self) -> Option<Bounds> {
        Bounds::of(&self.data_map.coords)
    }

    pub fn track_len(&self) -> usize {
        self.data_map.coords.len()
    }

    /// Load the session's map data unless it is already held.
    ///
    /// A cached session without records is fetched again.
    pub async fn fetch_map_data(&mut self, device_id: &str, session_id: &str) {
        if self.initialized && self.current.matches(device_id, session_id) && !self.data_map.data.is_empty() {
            debug!("Map data for {}/{} already loaded", device_id, session_id);
            return;
        }

        self.status.send_replace(FetchStatus::started());

        let error = match self.load_map_data(device_id, session_id).await {
            Ok(()) => None,
            Err(err) => {
                error!("Error fetching map data: {:#}", err);
                Some(err.to_string())
            }
        };

        self.status.send_replace(FetchStatus {
            loading: false,
            error,
        });
    }

    async fn load_map_data(&mut self, device_id: &str, session_id: &str) -> anyhow::Result<()> {
        let body = self.source.fetch_session_data(device_id, session_id).await?;
        let data_map: SessionData = serde_json::from_value(body).context("Invalid map data format")?;

        info!(
            "Loaded map data for {}/{}: {} coordinates, {} records",
            device_id,
            session_id,
            data_map.coords.len(),
            data_map.data.len()
        );

        self.data_map = data_map;
        self.current.set(device_id, session_id);
        self.initialized = true;
        Ok(())
    }

    pub fn reset_state(&mut self) {
        self.data_map = SessionData::default();
        self.initialized = false;
        self.current = CacheKey::default();
        self.status.send_replace(FetchStatus::default());
        debug!("Map store reset");
    }
}
