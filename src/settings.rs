//! User settings stored as settings.json in the app data directory,
//! plus the remote connection resolved from them and the environment

use crate::constants::{KEY_ENV_VARS, URL_ENV_VARS};
use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, warn};
use url::Url;

const SETTINGS_FILE: &str = "settings.json";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // Window geometry
    pub window_x: Option<f32>,
    pub window_y: Option<f32>,
    pub window_w: Option<f32>,
    pub window_h: Option<f32>,

    // Remote store
    pub supabase_url: Option<String>,
    pub supabase_key: Option<String>,
}

impl Settings {
    pub fn load(data_dir: &Path) -> Self {
        let path = data_dir.join(SETTINGS_FILE);
        match std::fs::read_to_string(&path) {
            Ok(s) => match serde_json::from_str(&s) {
                Ok(settings) => {
                    debug!(path = %path.display(), "Settings loaded");
                    settings
                }
                Err(e) => {
                    warn!(error = %e, "Failed to parse settings, using defaults");
                    Self::default()
                }
            },
            Err(_) => {
                debug!("No settings file found, using defaults");
                Self::default()
            }
        }
    }

    pub fn save(&self, data_dir: &Path) {
        let path = data_dir.join(SETTINGS_FILE);
        match serde_json::to_string_pretty(self) {
            Ok(json) => {
                if let Err(e) = std::fs::write(&path, json) {
                    warn!(error = %e, "Failed to save settings");
                }
            }
            Err(e) => warn!(error = %e, "Failed to serialize settings"),
        }
    }
}

/// Where the books table lives and the key sent with every request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteConfig {
    pub base_url: Url,
    pub api_key: String,
}

impl RemoteConfig {
    /// Environment first, then settings.json.
    pub fn resolve(settings: &Settings, data_dir: &Path) -> Result<Self, ConfigError> {
        Self::resolve_with(settings, data_dir, |name| std::env::var(name).ok())
    }

    pub fn resolve_with(
        settings: &Settings,
        data_dir: &Path,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        let settings_path = data_dir.join(SETTINGS_FILE).display().to_string();
        let lookup = |names: &[&str], fallback: &Option<String>| {
            names
                .iter()
                .filter_map(|name| env(name))
                .chain(fallback.clone())
                .map(|v| v.trim().to_string())
                .find(|v| !v.is_empty())
        };

        let raw_url = lookup(URL_ENV_VARS, &settings.supabase_url).ok_or_else(|| {
            ConfigError::MissingUrl {
                settings: settings_path.clone(),
            }
        })?;
        let api_key = lookup(KEY_ENV_VARS, &settings.supabase_key)
            .ok_or(ConfigError::MissingKey { settings: settings_path })?;

        let base_url = parse_base_url(&raw_url)?;
        debug!(url = %base_url, "Remote store configured");
        Ok(Self { base_url, api_key })
    }
}

/// Absolute http(s) URL, normalized to end with a slash so joins keep any path prefix.
fn parse_base_url(raw: &str) -> Result<Url, ConfigError> {
    let invalid = |reason: String| ConfigError::InvalidUrl {
        url: raw.to_string(),
        reason,
    };
    let mut url = Url::parse(raw).map_err(|e| invalid(e.to_string()))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(invalid(format!("unsupported scheme '{}'", url.scheme())));
    }
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}
