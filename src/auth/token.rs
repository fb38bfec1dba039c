use anyhow::{Context, Result};
use log::{debug, info};
use std::fs;
use std::path::{Path, PathBuf};

use crate::config::Config;

/// File-backed holder of the bearer token used for API requests.
///
/// The token is issued by the backend's login endpoint; this type only keeps
/// it between runs and hands it to the client.
#[derive(Debug, Clone)]
pub struct TokenStore {
    path: PathBuf,
}

impl TokenStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Token store next to the config file
    pub fn open_default() -> Result<Self> {
        Ok(Self::new(Config::config_dir()?.join("token")))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the stored token, `None` when absent or blank
    pub fn load(&self) -> Result<Option<String>> {
        if !self.path.exists() {
            return Ok(None);
        }

        let token = fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read token file: {:?}", self.path))?;
        let token = token.trim();

        if token.is_empty() {
            Ok(None)
        } else {
            Ok(Some(token.to_string()))
        }
    }

    pub fn save(&self, token: &str) -> Result<()> {
        let token = token.trim();
        if token.is_empty() {
            anyhow::bail!("Refusing to store an empty token");
        }

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create token directory: {:?}", parent))?;
        }

        fs::write(&self.path, token)
            .with_context(|| format!("Failed to write token file: {:?}", self.path))?;
        restrict_permissions(&self.path)?;

        info!("Stored API token at {:?}", self.path);
        Ok(())
    }

    pub fn clear(&self) -> Result<()> {
        if self.path.exists() {
            fs::remove_file(&self.path)
                .with_context(|| format!("Failed to remove token file: {:?}", self.path))?;
            info!("Removed API token");
        } else {
            debug!("No token stored at {:?}", self.path);
        }
        Ok(())
    }

    /// Unreadable token files count as logged out
    pub fn is_logged_in(&self) -> bool {
        matches!(self.load(), Ok(Some(_)))
    }
}

#[cfg(unix)]
fn restrict_permissions(path: &Path) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;
    fs::set_permissions(path, fs::Permissions::from_mode(0o600))
        .with_context(|| format!("Failed to restrict permissions on {:?}", path))
}

#[cfg(not(unix))]
fn restrict_permissions(_path: &Path) -> Result<()> {
    Ok(())
}
