use anyhow::Result;
use log::debug;
use std::sync::Arc;

use crate::api::TelemetryClient;
use crate::auth::TokenStore;
use crate::config::Config;
use crate::router::{self, Navigation};

/// Everything a command needs: settings, stored token and the API client
pub struct AppContext {
    pub config: Config,
    pub tokens: TokenStore,
    pub client: Arc<TelemetryClient>,
}

impl AppContext {
    pub fn load() -> Result<Self> {
        let config = Config::load()?;
        let tokens = TokenStore::open_default()?;
        let client = Arc::new(TelemetryClient::new(&config, tokens.clone())?);
        debug!("Using API at {}", client.base_url());

        Ok(Self { config, tokens, client })
    }

    /// Refuse to continue unless the dashboard home would be reachable
    pub fn require_login(&self) -> Result<()> {
        let token = self.tokens.load()?;
        match router::guard(router::HOME_PATH, router::is_logged_in(token.as_deref())) {
            Navigation::Proceed => Ok(()),
            Navigation::Redirect(_) => {
                anyhow::bail!("Not logged in. Store an API token with 'gorque-dash auth token' first.")
            }
        }
    }
}
