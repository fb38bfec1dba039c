//! Client-side stores for session telemetry
//!
//! Each store wraps one backend resource, caches the last fetched blob keyed
//! by device and session, and publishes its loading/error status on a watch
//! channel so callers can follow a fetch while it runs.

pub mod chart;
pub mod map;

pub use chart::{ChartStore, fallback_configuration};
pub use map::{Bounds, MapStore};

use async_trait::async_trait;
use serde_json::Value;

/// Where the stores get their JSON from
#[async_trait]
pub trait TelemetrySource: Send + Sync {
    /// Body of `GET /configuration`
    async fn fetch_configuration(&self) -> anyhow::Result<Value>;

    /// Body of `GET /data` for one device session
    async fn fetch_session_data(&self, device_id: &str, session_id: &str) -> anyhow::Result<Value>;
}

/// Observable state of a store's single in-flight fetch
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FetchStatus {
    pub loading: bool,
    pub error: Option<String>,
}

impl FetchStatus {
    fn started() -> Self {
        Self {
            loading: true,
            error: None,
        }
    }
}

/// Device and session the cached data belongs to
#[derive(Debug, Clone, Default, PartialEq)]
pub(crate) struct CacheKey {
    pub device_id: Option<String>,
    pub session_id: Option<String>,
}

impl CacheKey {
    pub fn matches(&self, device_id: &str, session_id: &str) -> bool {
        self.device_id.as_deref() == Some(device_id) && self.session_id.as_deref() == Some(session_id)
    }

    pub fn set(&mut self, device_id: &str, session_id: &str) {
        self.device_id = Some(device_id.to_string());
        self.session_id = Some(session_id.to_string());
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Canned responses with call counters
    #[derive(Default)]
    pub struct FakeSource {
        pub configuration: Mutex<Option<anyhow::Result<Value>>>,
        pub data: Mutex<Option<anyhow::Result<Value>>>,
        pub configuration_calls: AtomicUsize,
        pub data_calls: AtomicUsize,
    }

    impl FakeSource {
        pub fn new(configuration: anyhow::Result<Value>, data: anyhow::Result<Value>) -> Self {
            Self {
                configuration: Mutex::new(Some(configuration)),
                data: Mutex::new(Some(data)),
                ..Default::default()
            }
        }

        pub fn set_data(&self, data: anyhow::Result<Value>) {
            *self.data.lock().unwrap() = Some(data);
        }

        pub fn data_calls(&self) -> usize {
            self.data_calls.load(Ordering::SeqCst)
        }

        pub fn configuration_calls(&self) -> usize {
            self.configuration_calls.load(Ordering::SeqCst)
        }

        fn replay(slot: &Mutex<Option<anyhow::Result<Value>>>) -> anyhow::Result<Value> {
            match slot.lock().unwrap().as_ref() {
                Some(Ok(value)) => Ok(value.clone()),
                Some(Err(error)) => Err(anyhow::anyhow!("{}", error)),
                None => Err(anyhow::anyhow!("no canned response")),
            }
        }
    }

    #[async_trait]
    impl TelemetrySource for FakeSource {
        async fn fetch_configuration(&self) -> anyhow::Result<Value> {
            self.configuration_calls.fetch_add(1, Ordering::SeqCst);
            Self::replay(&self.configuration)
        }

        async fn fetch_session_data(&self, _device_id: &str, _session_id: &str) -> anyhow::Result<Value> {
            self.data_calls.fetch_add(1, Ordering::SeqCst);
            Self::replay(&self.data)
        }
    }
}
