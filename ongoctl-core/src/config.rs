//! Configuration for the ongoctl tools.
//!
//! Resolution priority is flag/env > `~/.ongoctl/config.toml` > built-in
//! default; this module only covers the file layer.

use std::fs;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::ApiError;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OngoConfig {
    #[serde(default)]
    pub api: ApiSection,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ApiSection {
    /// Backend base URL; falls back to the production default when unset.
    pub base_url: Option<String>,
    /// Bearer token to seed the session with.
    pub token: Option<String>,
}

impl OngoConfig {
    /// Load `~/.ongoctl/config.toml`. A missing file is an empty config.
    pub fn load() -> Result<Self, ApiError> {
        Self::load_from(Self::config_path())
    }

    pub fn load_from(path: PathBuf) -> Result<Self, ApiError> {
        let raw = match fs::read_to_string(&path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                return Ok(Self::default());
            }
            Err(err) => return Err(ApiError::storage(path, err)),
        };

        toml::from_str(&raw).map_err(|err| {
            ApiError::config(format!("invalid TOML in {}: {err}", path.display()))
        })
    }

    /// Config file path: ~/.ongoctl/config.toml
    pub fn config_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".ongoctl")
            .join("config.toml")
    }
}
