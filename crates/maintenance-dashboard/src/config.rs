/*
[INPUT]:  Built-in defaults, optional YAML file, MAINTENANCE_* environment variables
[OUTPUT]: Validated dashboard configuration
[POS]:    Configuration layer - API endpoint, UI timing, logging
[UPDATE]: When adding new configuration options
*/

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result, anyhow, bail};
use chrono::FixedOffset;
use config::{Config, Environment, File};
use maintenance_adapter::{ClientConfig, DEFAULT_BASE_URL};
use serde::{Deserialize, Serialize};

pub const ENV_PREFIX: &str = "MAINTENANCE";
const CONFIG_DIR_NAME: &str = "maintenance-dashboard";
const CONFIG_FILE_NAME: &str = "config.yaml";

/// Top-level configuration for the dashboard
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct DashboardConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub ui: UiConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Backend connection settings
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ApiConfig {
    /// Root of the maintenance REST API
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Total request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Connect timeout in seconds
    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,
}

/// Terminal UI settings
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct UiConfig {
    /// Redraw interval in milliseconds
    #[serde(default = "default_tick_ms")]
    pub tick_ms: u64,
    /// Fixed offset (e.g. "+02:00") for reading and showing due dates;
    /// the system zone is used when unset
    #[serde(default)]
    pub utc_offset: Option<String>,
}

/// Log output settings
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct LoggingConfig {
    /// Filter directive, e.g. "info" or "maintenance_adapter=debug,info"
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Also append logs to this file
    #[serde(default)]
    pub file: Option<PathBuf>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
            connect_timeout_secs: default_connect_timeout_secs(),
        }
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            tick_ms: default_tick_ms(),
            utc_offset: None,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file: None,
        }
    }
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_connect_timeout_secs() -> u64 {
    10
}

fn default_tick_ms() -> u64 {
    250
}

fn default_log_level() -> String {
    "info".to_string()
}

impl DashboardConfig {
    /// Load configuration from YAML file
    pub fn from_file(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_yaml::from_str(&content)?;
        Ok(config)
    }

    /// Layer defaults, an optional file and `MAINTENANCE_*` environment variables.
    ///
    /// With no explicit path the per-user config file is used if it exists.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut builder = Config::builder()
            .add_source(Config::try_from(&DashboardConfig::default()).context("encode defaults")?);

        match path {
            Some(path) => {
                builder = builder.add_source(File::from(path).required(true));
            }
            None => {
                if let Some(path) = default_config_path().filter(|path| path.exists()) {
                    tracing::debug!(path = %path.display(), "using per-user config file");
                    builder = builder.add_source(File::from(path).required(false));
                }
            }
        }

        builder = builder.add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let config: Self = builder
            .build()
            .context("read configuration sources")?
            .try_deserialize()
            .context("decode configuration")?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        url::Url::parse(&self.api.base_url)
            .with_context(|| format!("api.base_url is not a valid URL: {}", self.api.base_url))?;
        if self.api.timeout_secs == 0 {
            bail!("api.timeout_secs must be greater than zero");
        }
        if self.api.connect_timeout_secs == 0 {
            bail!("api.connect_timeout_secs must be greater than zero");
        }
        if self.ui.tick_ms == 0 {
            bail!("ui.tick_ms must be greater than zero");
        }
        self.ui.fixed_offset()?;
        if self.logging.level.trim().is_empty() {
            bail!("logging.level must not be empty");
        }
        Ok(())
    }

    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self).context("encode configuration as YAML")
    }
}

impl ApiConfig {
    pub fn client_config(&self) -> ClientConfig {
        ClientConfig {
            timeout: Duration::from_secs(self.timeout_secs),
            connect_timeout: Duration::from_secs(self.connect_timeout_secs),
        }
    }
}

impl UiConfig {
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_ms)
    }

    /// Parsed `utc_offset`, `None` when the system zone should be used
    pub fn fixed_offset(&self) -> Result<Option<FixedOffset>> {
        self.utc_offset
            .as_deref()
            .map(|raw| {
                raw.parse::<FixedOffset>().map_err(|err| {
                    anyhow!("ui.utc_offset {raw:?} is not an offset like +02:00: {err}")
                })
            })
            .transpose()
    }
}

/// `<config_dir>/maintenance-dashboard/config.yaml`
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
}
