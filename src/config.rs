use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::data::LatLng;
use crate::error::ConfigError;

pub const ENDPOINT_ENV: &str = "KLINIKMAP_ENDPOINT";
const CONFIG_DIR: &str = "klinikmap";
const CONFIG_FILE: &str = "config.toml";

/// User settings, read from `~/.config/klinikmap/config.toml`.
///
/// Every key is optional; missing keys keep the Nalumsari defaults.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct Settings {
    pub endpoint: String,
    pub tile_url: String,
    pub center_lat: f64,
    pub center_lng: f64,
    pub zoom: f64,
    pub focus_zoom: f64,
    pub max_zoom: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            endpoint: "http://localhost/sig-klinik/api/klinik.php".to_string(),
            tile_url: "https://tile.openstreetmap.org/{z}/{x}/{y}.png".to_string(),
            center_lat: -6.6584,
            center_lng: 110.7456,
            zoom: 14.0,
            focus_zoom: 17.0,
            max_zoom: 19,
        }
    }
}

impl Settings {
    pub fn center(&self) -> LatLng {
        LatLng::new(self.center_lat, self.center_lng)
    }

    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(CONFIG_DIR).join(CONFIG_FILE))
    }

    /// Loads the default config file (if any) and applies environment overrides.
    pub fn load() -> Result<Self, ConfigError> {
        let mut settings = match Self::default_path() {
            Some(path) if path.exists() => Self::from_file(&path)?,
            _ => Self::default(),
        };
        if let Ok(endpoint) = std::env::var(ENDPOINT_ENV) {
            settings.apply_endpoint_override(endpoint);
        }
        Ok(settings)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    fn apply_endpoint_override(&mut self, endpoint: String) {
        if !endpoint.trim().is_empty() {
            self.endpoint = endpoint;
        }
    }
}
