use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf};
use tracing::debug;

pub const DEFAULT_BASE_URL: &str = "https://openexchangerates.org";
pub const DEFAULT_APP_ID_ENV: &str = "app_id";
const DATA_FILE_NAME: &str = "data.json";

fn default_app_id_env() -> String {
    DEFAULT_APP_ID_ENV.to_string()
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct OpenExchangeRatesConfig {
    pub base_url: String,
    /// Name of the environment variable holding the app id.
    #[serde(default = "default_app_id_env")]
    pub app_id_env: String,
}

impl Default for OpenExchangeRatesConfig {
    fn default() -> Self {
        OpenExchangeRatesConfig {
            base_url: DEFAULT_BASE_URL.to_string(),
            app_id_env: default_app_id_env(),
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ProvidersConfig {
    pub openexchangerates: Option<OpenExchangeRatesConfig>,
}

impl Default for ProvidersConfig {
    fn default() -> Self {
        ProvidersConfig {
            openexchangerates: Some(OpenExchangeRatesConfig::default()),
        }
    }
}

#[derive(Debug, Default, Deserialize, Serialize, Clone)]
pub struct AppConfig {
    #[serde(default)]
    pub providers: ProvidersConfig,
    /// Location of the cached rate table; defaults to the platform data dir.
    pub data_path: Option<String>,
}

impl AppConfig {
    /// Loads the default config file, falling back to defaults when absent.
    pub fn load() -> Result<Self> {
        debug!("Loading default config");
        let config_path = Self::default_config_path()?;
        if !config_path.exists() {
            debug!(
                "No config at {}, using defaults",
                config_path.display()
            );
            return Ok(Self::default());
        }
        Self::load_from_path(&config_path)
    }

    pub fn default_config_path() -> Result<PathBuf> {
        let proj_dirs = ProjectDirs::from("org", "cconv", "cconv")
            .context("Could not determine project directories")?;
        Ok(proj_dirs.config_dir().join("config.yaml"))
    }

    pub fn data_file_path(&self) -> Result<PathBuf> {
        if let Some(custom_path) = &self.data_path {
            return Ok(PathBuf::from(custom_path));
        }
        let proj_dirs = ProjectDirs::from("org", "cconv", "cconv")
            .context("Could not determine project directories")?;
        Ok(proj_dirs.data_dir().join(DATA_FILE_NAME))
    }

    pub fn provider(&self) -> OpenExchangeRatesConfig {
        self.providers.openexchangerates.clone().unwrap_or_default()
    }

    pub fn load_from_path<P: AsRef<std::path::Path>>(path: P) -> Result<Self> {
        let config_str = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;

        let config: Self = serde_yaml::from_str(&config_str)
            .with_context(|| format!("Failed to parse config file: {}", path.as_ref().display()))?;
        debug!("Successfully loaded config");
        Ok(config)
    }
}
