use serde::Deserialize;
use std::{fs, io::ErrorKind, path::PathBuf};

use crate::{error::OracleError, observability};

pub const CONFIG_ENV: &str = "ORACLE_CONFIG";
pub const DEFAULT_CONFIG_PATH: &str = "oracle-config.toml";

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DatasetConfig {
    /// Datasets larger than this are refused before parsing.
    pub max_bytes: u64,
}

impl Default for DatasetConfig {
    fn default() -> Self {
        Self {
            max_bytes: 256 * 1024 * 1024,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub filter: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "oracle_service=info".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub dataset: DatasetConfig,
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load from `$ORACLE_CONFIG`, falling back to `oracle-config.toml`.
    ///
    /// A missing default file yields the defaults; a missing file named by the
    /// environment is an error.
    pub fn load() -> Result<Self, OracleError> {
        match std::env::var_os(CONFIG_ENV) {
            Some(path) => Self::from_file(PathBuf::from(path), true),
            None => Self::from_file(PathBuf::from(DEFAULT_CONFIG_PATH), false),
        }
    }

    pub fn from_file(path: PathBuf, required: bool) -> Result<Self, OracleError> {
        let contents = match fs::read_to_string(&path) {
            Ok(c) => c,
            Err(e) if e.kind() == ErrorKind::NotFound && !required => return Ok(Self::default()),
            Err(e) => {
                return Err(OracleError::Config {
                    path,
                    reason: e.to_string(),
                })
            }
        };
        Self::from_toml(&contents).map_err(|reason| OracleError::Config { path, reason })
    }

    pub fn from_toml(contents: &str) -> Result<Self, String> {
        let cfg: AppConfig = toml::from_str(contents).map_err(|e| e.to_string())?;
        observability::parse_directives(&cfg.logging.filter)
            .map_err(|e| format!("invalid logging.filter '{}': {e}", cfg.logging.filter))?;
        Ok(cfg)
    }
}
