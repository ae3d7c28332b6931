use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::Parser;
use serde::Deserialize;
use thiserror::Error;

pub const DEFAULT_BASE_URL: &str = "http://localhost:8080";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Parser, Debug, Default)]
#[command(name = "cpview", about = "Terminal viewer for oil price change-point analysis results")]
pub struct Cli {
    /// Analysis backend base URL
    #[arg(long, env = "CPVIEW_BASE_URL")]
    pub base_url: Option<String>,

    /// Request timeout in seconds
    #[arg(long, env = "CPVIEW_TIMEOUT", value_parser = clap::value_parser!(u64).range(1..))]
    pub timeout: Option<u64>,

    /// Path to the events catalog (events.csv)
    #[arg(long, env = "CPVIEW_EVENTS")]
    pub events: Option<PathBuf>,

    /// Directory the fetched plot image is written to
    #[arg(long, env = "CPVIEW_PLOT_DIR")]
    pub plot_dir: Option<PathBuf>,

    /// Config file path (defaults to <config dir>/cpview/config.toml)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Log file path
    #[arg(long, env = "CPVIEW_LOG_FILE")]
    pub log_file: Option<PathBuf>,

    /// Fetch the change points once, print them and exit
    #[arg(long)]
    pub once: bool,
}

#[derive(Debug, Deserialize, Default, PartialEq, Eq)]
pub struct ConfigFile {
    pub base_url: Option<String>,
    pub timeout_secs: Option<u64>,
    pub events_path: Option<PathBuf>,
    pub plot_dir: Option<PathBuf>,
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("invalid config file {path}: {message}")]
    Parse { path: String, message: String },
    #[error("invalid setting {key}: {message}")]
    Invalid { key: &'static str, message: String },
}

impl ConfigFile {
    pub fn default_path() -> Option<PathBuf> {
        Some(dirs::config_dir()?.join("cpview").join("config.toml"))
    }

    /// A missing or unreadable file yields `None`; a file that does not parse
    /// is an error.
    pub fn load(path: &Path) -> Result<Option<Self>, ConfigError> {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) => {
                tracing::debug!(path = %path.display(), error = %e, "no config file");
                return Ok(None);
            }
        };
        toml::from_str(&content)
            .map(Some)
            .map_err(|e| ConfigError::Parse {
                path: path.display().to_string(),
                message: e.to_string(),
            })
    }
}

/// Effective settings after merging CLI/env over the config file over defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub base_url: String,
    pub timeout: Duration,
    pub events_path: Option<PathBuf>,
    pub plot_dir: Option<PathBuf>,
    pub log_file: Option<PathBuf>,
    pub once: bool,
}

impl Settings {
    pub fn resolve(cli: Cli, file: Option<ConfigFile>) -> Result<Self, ConfigError> {
        let file = file.unwrap_or_default();
        let timeout_secs = cli
            .timeout
            .or(file.timeout_secs)
            .unwrap_or(DEFAULT_TIMEOUT_SECS);
        if timeout_secs == 0 {
            return Err(ConfigError::Invalid {
                key: "timeout_secs",
                message: "must be at least 1 second".to_string(),
            });
        }

        Ok(Self {
            base_url: cli
                .base_url
                .or(file.base_url)
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            timeout: Duration::from_secs(timeout_secs),
            events_path: cli.events.or(file.events_path),
            plot_dir: cli
                .plot_dir
                .or(file.plot_dir)
                .or_else(|| dirs::cache_dir().map(|d| d.join("cpview"))),
            log_file: cli.log_file,
            once: cli.once,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply_without_overrides() {
        let settings = Settings::resolve(Cli::default(), None).unwrap();
        assert_eq!(settings.base_url, DEFAULT_BASE_URL);
        assert_eq!(settings.timeout, Duration::from_secs(DEFAULT_TIMEOUT_SECS));
        assert_eq!(settings.events_path, None);
        assert!(!settings.once);
    }

    #[test]
    fn cli_beats_config_file() {
        let cli = Cli {
            base_url: Some("http://analysis:9000".to_string()),
            ..Cli::default()
        };
        let file = ConfigFile {
            base_url: Some("http://ignored".to_string()),
            timeout_secs: Some(5),
            events_path: Some(PathBuf::from("data/events.csv")),
            plot_dir: Some(PathBuf::from("/tmp/plots")),
        };
        let settings = Settings::resolve(cli, Some(file)).unwrap();
        assert_eq!(settings.base_url, "http://analysis:9000");
        assert_eq!(settings.timeout, Duration::from_secs(5));
        assert_eq!(settings.events_path, Some(PathBuf::from("data/events.csv")));
        assert_eq!(settings.plot_dir, Some(PathBuf::from("/tmp/plots")));
    }

    #[test]
    fn parses_cli_flags() {
        let cli = Cli::try_parse_from([
            "cpview",
            "--base-url",
            "http://127.0.0.1:5000",
            "--timeout",
            "3",
            "--once",
        ])
        .unwrap();
        assert_eq!(cli.base_url.as_deref(), Some("http://127.0.0.1:5000"));
        assert_eq!(cli.timeout, Some(3));
        assert!(cli.once);
    }

    #[test]
    fn zero_timeout_flag_is_rejected() {
        let result = Cli::try_parse_from(["cpview", "--timeout", "0"]);
        assert!(result.is_err());
    }

    #[test]
    fn zero_timeout_in_config_file_is_rejected() {
        let file = ConfigFile {
            timeout_secs: Some(0),
            ..ConfigFile::default()
        };
        let err = Settings::resolve(Cli::default(), Some(file)).unwrap_err();
        assert!(err.to_string().contains("timeout_secs"));
    }

    #[test]
    fn loads_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "base_url = \"http://backend:8080\"\ntimeout_secs = 10\n").unwrap();
        let file = ConfigFile::load(&path).unwrap().unwrap();
        assert_eq!(file.base_url.as_deref(), Some("http://backend:8080"));
        assert_eq!(file.timeout_secs, Some(10));
    }

    #[test]
    fn missing_config_file_is_none() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(ConfigFile::load(&dir.path().join("absent.toml")).unwrap(), None);
    }

    #[test]
    fn malformed_config_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "timeout_secs = \"soon\"").unwrap();
        assert!(ConfigFile::load(&path).is_err());
    }
}
