//! Network configuration loaded from `config.json`.
//!
//! Every field has a default, so an empty object (or no file at all) is a
//! valid configuration.
//!
//! ```json
//! {
//!   "password": {
//!     "min_length": 8,
//!     "require_lowercase": true,
//!     "require_uppercase": true,
//!     "require_digit": true,
//!     "require_special": true,
//!     "special_characters": "@$!%*?&"
//!   },
//!   "max_login_attempts": 3
//! }
//! ```

use crate::error::ConfigError;
use agora_core::PasswordPolicy;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NetworkConfig {
    /// Rules for signup and password resets.
    pub password: PasswordPolicy,

    /// Passwords tried by `login_with_attempts` before falling back to the
    /// recovery question.
    pub max_login_attempts: u32,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            password: PasswordPolicy::default(),
            max_login_attempts: 3,
        }
    }
}

impl NetworkConfig {
    /// Reads a config file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path)?;
        let config = serde_json::from_str(&raw)?;
        debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Reads a config file if it exists, otherwise returns defaults.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Writes the config as pretty-printed JSON.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        fs::write(path, serde_json::to_string_pretty(self)?)?;
        Ok(())
    }
}
