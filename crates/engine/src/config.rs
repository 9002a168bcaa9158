use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;
use tracing::{info, warn};

use crate::app::{DEFAULT_MIN_SLEEP, DEFAULT_TARGET_TPS, DEFAULT_VISUALIZING_MIN};

pub const CONFIG_ENV_VAR: &str = "RPG_CONFIG";
pub const TARGET_TPS_ENV_VAR: &str = "RPG_TARGET_TPS";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoopConfig {
    pub window_title: String,
    pub window_width: u32,
    pub window_height: u32,
    pub target_tps: u32,
    pub min_sleep_ms: u64,
    pub visualizing_min_ms: u64,
    pub menu_exit_delay_ms: u64,
    pub metrics_log_interval_ms: u64,
    pub show_state_label: bool,
}

impl Default for LoopConfig {
    fn default() -> Self {
        Self {
            window_title: "Sekiro Shadow Die Twice".to_string(),
            window_width: 1366,
            window_height: 768,
            target_tps: DEFAULT_TARGET_TPS,
            min_sleep_ms: DEFAULT_MIN_SLEEP.as_millis() as u64,
            visualizing_min_ms: DEFAULT_VISUALIZING_MIN.as_millis() as u64,
            menu_exit_delay_ms: 100,
            metrics_log_interval_ms: 1000,
            show_state_label: true,
        }
    }
}

impl LoopConfig {
    pub fn target_tps(&self) -> u32 {
        self.target_tps.max(1)
    }

    /// Zero would let an overloaded loop spin without yielding, so it falls back to the default.
    pub fn min_sleep(&self) -> Duration {
        normalize_non_zero_duration(Duration::from_millis(self.min_sleep_ms), DEFAULT_MIN_SLEEP)
    }

    pub fn visualizing_min(&self) -> Duration {
        Duration::from_millis(self.visualizing_min_ms)
    }

    pub fn menu_exit_delay(&self) -> Duration {
        Duration::from_millis(self.menu_exit_delay_ms)
    }

    pub fn metrics_log_interval(&self) -> Duration {
        normalize_non_zero_duration(
            Duration::from_millis(self.metrics_log_interval_ms),
            Duration::from_secs(1),
        )
    }

    pub fn from_json_str(raw: &str) -> Result<Self, serde_path_to_error::Error<serde_json::Error>> {
        let deserializer = &mut serde_json::Deserializer::from_str(raw);
        serde_path_to_error::deserialize(deserializer)
    }

    pub fn from_json_file(path: &Path) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&raw).map_err(|error| ConfigError::Parse {
            path: path.to_path_buf(),
            field: error.path().to_string(),
            source: error.into_inner(),
        })
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read environment variable {var}: {source}")]
    EnvVar {
        var: &'static str,
        #[source]
        source: env::VarError,
    },
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config file {path} at `{field}`: {source}")]
    Parse {
        path: PathBuf,
        field: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Defaults, then the JSON file named by `RPG_CONFIG`, then `RPG_TARGET_TPS`.
pub fn resolve_loop_config() -> Result<LoopConfig, ConfigError> {
    let mut config = match env::var(CONFIG_ENV_VAR) {
        Ok(path) => {
            let path = PathBuf::from(path);
            let config = LoopConfig::from_json_file(&path)?;
            info!(path = %path.display(), "config_file_loaded");
            config
        }
        Err(env::VarError::NotPresent) => LoopConfig::default(),
        Err(source) => {
            return Err(ConfigError::EnvVar {
                var: CONFIG_ENV_VAR,
                source,
            })
        }
    };
    config.target_tps = resolve_target_tps(env::var(TARGET_TPS_ENV_VAR), config.target_tps);
    Ok(config)
}

fn resolve_target_tps(raw: Result<String, env::VarError>, config_tps: u32) -> u32 {
    match raw {
        Ok(value) => match value.trim().parse::<u32>() {
            Ok(tps) if tps > 0 => tps,
            _ => {
                warn!(
                    env_var = TARGET_TPS_ENV_VAR,
                    value = value.as_str(),
                    "invalid target tps env var value; falling back to config"
                );
                config_tps
            }
        },
        Err(env::VarError::NotPresent) => config_tps,
        Err(err) => {
            warn!(
                env_var = TARGET_TPS_ENV_VAR,
                error = %err,
                "unable to read target tps env var; falling back to config"
            );
            config_tps
        }
    }
}

fn normalize_non_zero_duration(value: Duration, fallback: Duration) -> Duration {
    if value.is_zero() {
        fallback
    } else {
        value
    }
}
