use anyhow::{anyhow, Context, Result};
use encoding_rs::Encoding;
use log::warn;
use serde::{Deserialize, Serialize};
use std::default::Default;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

// Application configuration module
// Loads and validates the settings of a conversion run. There is no
// configuration file by default; one can be supplied through `SUB2SRT_CONFIG`.

/// Environment variable naming an optional JSON configuration file
pub const CONFIG_ENV_VAR: &str = "SUB2SRT_CONFIG";

/// Environment variable overriding the log level
pub const LOG_LEVEL_ENV_VAR: &str = "SUB2SRT_LOG";

/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Config {
    /// Directory receiving the `.srt` files; `None` writes next to each input
    #[serde(default)]
    pub output_dir: Option<PathBuf>,

    /// Encoding label tried when a file is not valid UTF-8
    #[serde(default = "default_fallback_encoding")]
    pub fallback_encoding: String,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    /// Matching `log` filter
    pub fn to_level_filter(&self) -> log::LevelFilter {
        match self {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

// Implement FromStr trait for LogLevel
impl std::str::FromStr for LogLevel {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "error" => Ok(Self::Error),
            "warn" | "warning" => Ok(Self::Warn),
            "info" => Ok(Self::Info),
            "debug" => Ok(Self::Debug),
            "trace" => Ok(Self::Trace),
            _ => Err(anyhow!("Invalid log level: {}", s)),
        }
    }
}

fn default_fallback_encoding() -> String {
    "gbk".to_string()
}

impl Config {
    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<()> {
        self.fallback_encoding()?;
        Ok(())
    }

    /// Resolve the fallback encoding label
    pub fn fallback_encoding(&self) -> Result<&'static Encoding> {
        Encoding::for_label(self.fallback_encoding.trim().as_bytes())
            .ok_or_else(|| anyhow!("Unknown fallback encoding: {}", self.fallback_encoding))
    }

    /// Load a configuration from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)
            .context(format!("Failed to open config file: {:?}", path))?;

        let reader = BufReader::new(file);
        let config: Config = serde_json::from_reader(reader)
            .context(format!("Failed to parse config file: {:?}", path))?;

        Ok(config)
    }

    /// Load from `SUB2SRT_CONFIG` if set, then apply `SUB2SRT_LOG`
    pub fn from_env() -> Result<Self> {
        let mut config = match std::env::var_os(CONFIG_ENV_VAR) {
            Some(path) if !path.is_empty() => Self::from_file(PathBuf::from(path))?,
            _ => Config::default(),
        };

        if let Ok(level) = std::env::var(LOG_LEVEL_ENV_VAR) {
            config.apply_log_level_override(&level);
        }

        Ok(config)
    }

    /// Apply a textual log level; an unknown value keeps the current level
    pub fn apply_log_level_override(&mut self, level: &str) {
        match level.parse() {
            Ok(parsed) => self.log_level = parsed,
            Err(e) => warn!("{} ignored: {}; keeping {:?}", LOG_LEVEL_ENV_VAR, e, self.log_level),
        }
    }
}

/// Default implementation for Config
impl Default for Config {
    fn default() -> Self {
        Config {
            output_dir: None,
            fallback_encoding: default_fallback_encoding(),
            log_level: LogLevel::default(),
        }
    }
}
