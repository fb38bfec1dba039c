use super::constants::{self, params};
use super::models::{Device, DeviceList, Profile, Session, SessionList};
use super::resilience::{RetryConfig, RetryPolicy};
use crate::auth::TokenStore;
use crate::config::Config;
use crate::store::TelemetrySource;
use async_trait::async_trait;
use log::{debug, error};
use serde_json::Value;
use std::time::{Duration, Instant};

/// Telemetry REST API client with connection pooling
#[derive(Clone)]
pub struct TelemetryClient {
    base_url: String,
    http_client: reqwest::Client,
    tokens: TokenStore,
    retry_policy: RetryPolicy,
}

impl TelemetryClient {
    pub fn new(config: &Config, tokens: TokenStore) -> anyhow::Result<Self> {
        let http_client = reqwest::Client::builder()
            .pool_max_idle_per_host(4)
            .pool_idle_timeout(Duration::from_secs(90))
            .timeout(config.settings.request_timeout())
            .connect_timeout(Duration::from_secs(10))
            .user_agent(constants::USER_AGENT)
            .build()?;

        let retry_config = RetryConfig::default().with_max_attempts(config.settings.max_retries);
        Ok(Self::with_custom_client(config.api_url.clone(), tokens, http_client, retry_config))
    }

    pub fn with_custom_client(
        base_url: String,
        tokens: TokenStore,
        http_client: reqwest::Client,
        retry_config: RetryConfig,
    ) -> Self {
        Self {
            base_url,
            http_client,
            tokens,
            retry_policy: RetryPolicy::new(retry_config),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// GET an endpoint and return the response only when it is successful.
    ///
    /// The token is read on every call so a token stored mid-session is
    /// picked up without rebuilding the client.
    async fn get(&self, path: &str, query: &[(&str, &str)], context: &str) -> anyhow::Result<reqwest::Response> {
        let url = constants::endpoint(&self.base_url, path);
        let token = self.tokens.load()?;
        let correlation_id = uuid::Uuid::new_v4().to_string();
        let started = Instant::now();

        debug!("[{}] GET {} {:?}", correlation_id, url, query);
        if token.is_none() {
            debug!("[{}] No token stored, sending request without Authorization", correlation_id);
        }

        let response = self
            .retry_policy
            .execute(|| {
                let mut request = self.http_client.get(&url).query(query);
                if let Some(token) = &token {
                    request = request.bearer_auth(token);
                }
                request.send()
            })
            .await?;

        let status = response.status();
        debug!("[{}] {} in {:?}", correlation_id, status, started.elapsed());

        if !status.is_success() {
            error!("[{}] GET {} failed with {}", correlation_id, url, status);
            anyhow::bail!("{}: {}", context, status.as_u16());
        }

        Ok(response)
    }

    pub async fn list_devices(&self) -> anyhow::Result<Vec<Device>> {
        let response = self.get(constants::DEVICE_ENDPOINT, &[], "HTTP error").await?;
        let list: DeviceList = response.json().await?;
        Ok(list.devices)
    }

    pub async fn list_sessions(&self, device_id: &str) -> anyhow::Result<Vec<Session>> {
        let response = self
            .get(constants::SESSION_ENDPOINT, &[(params::DEVICE_ID, device_id)], "HTTP error")
            .await?;
        let list: SessionList = response.json().await?;
        Ok(list.sessions)
    }

    pub async fn profile(&self) -> anyhow::Result<Profile> {
        let response = self.get(constants::PROFILE_ENDPOINT, &[], "HTTP error").await?;
        Ok(response.json().await?)
    }
}

#[async_trait]
impl TelemetrySource for TelemetryClient {
    async fn fetch_configuration(&self) -> anyhow::Result<Value> {
        let response = self
            .get(
                constants::CONFIGURATION_ENDPOINT,
                &[],
                "HTTP error when fetching chart configurations",
            )
            .await?;
        Ok(response.json().await?)
    }

    async fn fetch_session_data(&self, device_id: &str, session_id: &str) -> anyhow::Result<Value> {
        let response = self
            .get(
                constants::DATA_ENDPOINT,
                &[(params::DEVICE_ID, device_id), (params::SESSION_ID, session_id)],
                "HTTP error",
            )
            .await?;
        Ok(response.json().await?)
    }
}
