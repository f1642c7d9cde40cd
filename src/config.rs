//! Application configuration for the command-line tools
//!
//! Every key is optional; missing keys take the defaults below.
//!
//! ```json
//! {
//!   "storage_dir": "data",
//!   "session_timeout_minutes": 30,
//!   "engine": { "autosave": true, "cache_totals": true }
//! }
//! ```

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::engine::EngineConfig;
use crate::error::{FormError, Result};
use crate::session::DEFAULT_SESSION_TIMEOUT_MINUTES;

/// Longest accepted session timeout (one year)
pub const MAX_SESSION_TIMEOUT_MINUTES: i64 = 60 * 24 * 365;

/// Default root for forms and the user directory
pub const DEFAULT_DATA_DIR: &str = "data";

fn default_storage_dir() -> PathBuf {
    PathBuf::from(DEFAULT_DATA_DIR)
}

fn default_timeout() -> i64 {
    DEFAULT_SESSION_TIMEOUT_MINUTES
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Root directory; forms live in `forms/`, credentials in `users.json`
    #[serde(default = "default_storage_dir")]
    pub storage_dir: PathBuf,

    /// Inactivity timeout for login sessions
    #[serde(default = "default_timeout")]
    pub session_timeout_minutes: i64,

    #[serde(default)]
    pub engine: EngineConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            storage_dir: default_storage_dir(),
            session_timeout_minutes: default_timeout(),
            engine: EngineConfig::default(),
        }
    }
}

impl AppConfig {
    /// Read and validate a JSON config file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&text)?;
        config.validate()?;
        Ok(config)
    }

    /// Session timeout must be within `1..=MAX_SESSION_TIMEOUT_MINUTES`
    pub fn validate(&self) -> Result<()> {
        if !(1..=MAX_SESSION_TIMEOUT_MINUTES).contains(&self.session_timeout_minutes) {
            return Err(FormError::InvalidConfig(format!(
                "session_timeout_minutes must be between 1 and {}, got {}",
                MAX_SESSION_TIMEOUT_MINUTES, self.session_timeout_minutes
            )));
        }
        Ok(())
    }

    /// Read a config file when given, otherwise defaults
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    /// Override the storage root
    pub fn with_storage_dir<P: AsRef<Path>>(mut self, dir: P) -> Self {
        self.storage_dir = dir.as_ref().to_path_buf();
        self
    }

    pub fn forms_dir(&self) -> PathBuf {
        self.storage_dir.join("forms")
    }

    pub fn users_path(&self) -> PathBuf {
        self.storage_dir.join("users.json")
    }
}
