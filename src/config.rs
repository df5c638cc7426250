//! Server configuration.
//!
//! Settings come from an optional TOML file (`STORE_MONITOR_CONFIG` names
//! its path) with per-field serde defaults; individual environment
//! variables override the file.

use std::env;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreMonitorConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    /// Directory holding the three input CSV datasets.
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
    /// Directory report artifacts are written to.
    #[serde(default = "default_reports_dir")]
    pub reports_dir: PathBuf,
    /// Admission limit for concurrently running report tasks.
    #[serde(default = "default_max_concurrent_reports")]
    pub max_concurrent_reports: usize,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("data")
}

fn default_reports_dir() -> PathBuf {
    PathBuf::from("reports")
}

fn default_max_concurrent_reports() -> usize {
    4
}

impl Default for StoreMonitorConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            data_dir: default_data_dir(),
            reports_dir: default_reports_dir(),
            max_concurrent_reports: default_max_concurrent_reports(),
        }
    }
}

impl StoreMonitorConfig {
    /// Load configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load configuration: file named by `STORE_MONITOR_CONFIG` if set,
    /// defaults otherwise, then environment overrides on top.
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = match env::var("STORE_MONITOR_CONFIG") {
            Ok(path) => Self::from_file(Path::new(&path))?,
            Err(_) => Self::default(),
        };
        config.apply_env_overrides();
        Ok(config)
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(host) = env::var("HOST") {
            self.host = host;
        }
        if let Ok(port) = env::var("PORT") {
            if let Ok(port) = port.parse() {
                self.port = port;
            }
        }
        if let Ok(dir) = env::var("DATA_DIR") {
            self.data_dir = PathBuf::from(dir);
        }
        if let Ok(dir) = env::var("REPORTS_DIR") {
            self.reports_dir = PathBuf::from(dir);
        }
        if let Ok(n) = env::var("MAX_CONCURRENT_REPORTS") {
            if let Ok(n) = n.parse() {
                self.max_concurrent_reports = n;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_fill_missing_fields() {
        let config: StoreMonitorConfig = toml::from_str("port = 9000").unwrap();
        assert_eq!(config.port, 9000);
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.data_dir, PathBuf::from("data"));
        assert_eq!(config.max_concurrent_reports, 4);
    }

    #[test]
    fn full_file_parses() {
        let config: StoreMonitorConfig = toml::from_str(
            r#"
            host = "127.0.0.1"
            port = 3000
            data_dir = "/srv/store-monitor/data"
            reports_dir = "/srv/store-monitor/reports"
            max_concurrent_reports = 8
            "#,
        )
        .unwrap();
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.reports_dir, PathBuf::from("/srv/store-monitor/reports"));
        assert_eq!(config.max_concurrent_reports, 8);
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = StoreMonitorConfig::from_file(Path::new("/no/such/config.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
