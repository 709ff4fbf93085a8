use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;
use tracing::{info, warn};

use crate::theme::DisplayTheme;

pub const DEFAULT_CONFIG_FILE: &str = "sehat.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("Failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
    #[error("Failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ApiConfig {
    pub base_url: String,
    pub timeout_secs: u64,
    pub connect_timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct NearbyConfig {
    /// Search radius around the chosen point, in metres.
    pub radius_m: u32,
    /// Per-mirror request timeout.
    pub mirror_timeout_secs: u64,
    pub overpass_mirrors: Vec<String>,
    pub nominatim_url: String,
    pub routing_url: String,
    /// Nominatim's usage policy requires an identifying agent.
    pub user_agent: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct WizardConfig {
    pub animate: bool,
    pub transition_ms: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct StorageConfig {
    pub token_path: PathBuf,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DisplayConfig {
    pub theme: DisplayTheme,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SehatConfig {
    pub api: ApiConfig,
    pub nearby: NearbyConfig,
    pub wizard: WizardConfig,
    pub storage: StorageConfig,
    pub display: DisplayConfig,
}

impl Default for ApiConfig {
    fn default() -> Self {
        ApiConfig {
            base_url: "http://localhost:8081".to_string(),
            timeout_secs: 30,
            connect_timeout_secs: 10,
        }
    }
}

impl Default for NearbyConfig {
    fn default() -> Self {
        NearbyConfig {
            radius_m: 2000,
            mirror_timeout_secs: 10,
            overpass_mirrors: vec![
                "https://overpass.kumi.systems/api/interpreter".to_string(),
                "https://overpass-api.de/api/interpreter".to_string(),
                "https://overpass.openstreetmap.ru/api/interpreter".to_string(),
                "https://overpass.nchc.org.tw/api/interpreter".to_string(),
            ],
            nominatim_url: "https://nominatim.openstreetmap.org".to_string(),
            routing_url: "https://router.project-osrm.org".to_string(),
            user_agent: concat!("sehat/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

impl Default for WizardConfig {
    fn default() -> Self {
        WizardConfig {
            animate: true,
            transition_ms: 350,
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        StorageConfig {
            token_path: PathBuf::from(".sehat-token"),
        }
    }
}

impl WizardConfig {
    /// Delay between "begin exit" and "commit" of a step change; zero when not animating.
    pub fn transition_delay(&self) -> Duration {
        if self.animate {
            Duration::from_millis(self.transition_ms)
        } else {
            Duration::ZERO
        }
    }
}

impl SehatConfig {
    /// Load `sehat.toml` from the working directory (defaults when absent), then apply
    /// environment overrides.
    pub fn load() -> Result<Self, ConfigError> {
        let path = Path::new(DEFAULT_CONFIG_FILE);
        let mut config = if path.exists() {
            Self::load_from_file(path)?
        } else {
            warn!("{} not found, using defaults", DEFAULT_CONFIG_FILE);
            SehatConfig::default()
        };

        config.apply_env_overrides();
        Ok(config)
    }

    /// Load an explicit file; a missing file is an error here.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::load_from_file(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let config = toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        info!(path = %path.display(), "loaded configuration");
        Ok(config)
    }

    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| env::var(key).ok());
    }

    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(url) = lookup("SEHAT_API_URL") {
            self.api.base_url = url;
        }

        if let Some(mirrors) = lookup("SEHAT_OVERPASS_MIRRORS") {
            let mirrors: Vec<String> = mirrors
                .split(',')
                .map(str::trim)
                .filter(|m| !m.is_empty())
                .map(str::to_string)
                .collect();
            if !mirrors.is_empty() {
                self.nearby.overpass_mirrors = mirrors;
            }
        }

        if let Some(path) = lookup("SEHAT_TOKEN_PATH") {
            self.storage.token_path = PathBuf::from(path);
        }

        if let Some(theme) = lookup("SEHAT_THEME") {
            match theme.parse() {
                Ok(theme) => self.display.theme = theme,
                Err(_) => warn!(%theme, "ignoring unknown SEHAT_THEME"),
            }
        }
    }

    pub fn save_to_file(&self, path: &Path) -> Result<(), ConfigError> {
        let content = toml::to_string_pretty(self)?;
        fs::write(path, content).map_err(|source| ConfigError::Write {
            path: path.to_path_buf(),
            source,
        })
    }
}
