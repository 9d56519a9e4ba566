//! Environment-backed configuration.
//!
//! Most settings have defaults. Override with `SUPPORTBOT_*` environment variables
//! (a `.env` file in the working directory is honoured by the binary).

pub mod error;


pub use error::ConfigError;

use std::env;
use std::net::{IpAddr, Ipv4Addr};
use std::path::PathBuf;
use std::time::Duration;

use crate::constants::{
    DEFAULT_CHAT_MODEL, DEFAULT_CONFIDENCE_THRESHOLD, DEFAULT_PROVIDER_TIMEOUT_SECS,
};

/// Server configuration loaded from environment variables.
///
/// Use [`Config::from_env`] to read `SUPPORTBOT_*` overrides on top of defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server port. Default: `5000`.
    pub port: u16,

    /// IP address to bind to. Default: `127.0.0.1`.
    pub bind_addr: IpAddr,

    /// FAQ table with `question` and `answer` columns. Default: `faq_auto.csv`.
    pub faq_path: PathBuf,

    /// Precomputed answer embeddings (`.npy`). Default: `answer_embeddings.npy`.
    pub embeddings_path: PathBuf,

    /// Sentence encoder directory (`config.json`, `model.safetensors`, `tokenizer.json`).
    pub encoder_path: Option<PathBuf>,

    /// Completion model name. Default: `gpt-3.5-turbo`.
    pub chat_model: String,

    /// Similarity a match must strictly exceed. Default: `0.6`.
    pub confidence_threshold: f32,

    /// Upper bound on one completion call. Default: 30s.
    pub provider_timeout: Duration,

    /// Answer fallbacks with a local echo instead of calling the provider.
    pub mock_provider: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 5000,
            bind_addr: IpAddr::V4(Ipv4Addr::new(127, 0, 0, 1)),
            faq_path: PathBuf::from("faq_auto.csv"),
            embeddings_path: PathBuf::from("answer_embeddings.npy"),
            encoder_path: None,
            chat_model: DEFAULT_CHAT_MODEL.to_string(),
            confidence_threshold: DEFAULT_CONFIDENCE_THRESHOLD,
            provider_timeout: Duration::from_secs(DEFAULT_PROVIDER_TIMEOUT_SECS),
            mock_provider: false,
        }
    }
}

impl Config {
    pub const ENV_PORT: &'static str = "SUPPORTBOT_PORT";
    pub const ENV_BIND_ADDR: &'static str = "SUPPORTBOT_BIND_ADDR";
    pub const ENV_FAQ_PATH: &'static str = "SUPPORTBOT_FAQ_PATH";
    pub const ENV_EMBEDDINGS_PATH: &'static str = "SUPPORTBOT_EMBEDDINGS_PATH";
    pub const ENV_ENCODER_PATH: &'static str = "SUPPORTBOT_ENCODER_PATH";
    pub const ENV_CHAT_MODEL: &'static str = "SUPPORTBOT_CHAT_MODEL";
    pub const ENV_CONFIDENCE_THRESHOLD: &'static str = "SUPPORTBOT_CONFIDENCE_THRESHOLD";
    pub const ENV_PROVIDER_TIMEOUT_SECS: &'static str = "SUPPORTBOT_PROVIDER_TIMEOUT_SECS";
    pub const ENV_MOCK_PROVIDER: &'static str = "SUPPORTBOT_MOCK_PROVIDER";

    /// Loads configuration from environment variables (falling back to defaults).
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let port = Self::parse_port_from_env(defaults.port)?;
        let bind_addr = Self::parse_bind_addr_from_env(defaults.bind_addr)?;
        let faq_path = Self::parse_path_from_env(Self::ENV_FAQ_PATH, defaults.faq_path);
        let embeddings_path =
            Self::parse_path_from_env(Self::ENV_EMBEDDINGS_PATH, defaults.embeddings_path);
        let encoder_path = Self::parse_optional_path_from_env(Self::ENV_ENCODER_PATH);
        let chat_model = Self::parse_string_from_env(Self::ENV_CHAT_MODEL, defaults.chat_model);
        let confidence_threshold =
            Self::parse_threshold_from_env(defaults.confidence_threshold)?;
        let provider_timeout = Self::parse_timeout_from_env(defaults.provider_timeout)?;
        let mock_provider = env::var_os(Self::ENV_MOCK_PROVIDER).is_some_and(|v| !v.is_empty());

        Ok(Self {
            port,
            bind_addr,
            faq_path,
            embeddings_path,
            encoder_path,
            chat_model,
            confidence_threshold,
            provider_timeout,
            mock_provider,
        })
    }

    /// Validates paths and basic invariants (does not read the files).
    pub fn validate(&self) -> Result<(), ConfigError> {
        for path in [&self.faq_path, &self.embeddings_path] {
            if !path.exists() {
                return Err(ConfigError::PathNotFound { path: path.clone() });
            }
            if !path.is_file() {
                return Err(ConfigError::NotAFile { path: path.clone() });
            }
        }

        if let Some(ref path) = self.encoder_path {
            if !path.exists() {
                return Err(ConfigError::PathNotFound { path: path.clone() });
            }
            if !path.is_dir() {
                return Err(ConfigError::NotADirectory { path: path.clone() });
            }
        }

        Ok(())
    }

    /// Returns `"{bind_addr}:{port}"` (useful for logging/binding).
    pub fn socket_addr(&self) -> String {
        match self.bind_addr {
            IpAddr::V4(addr) => format!("{}:{}", addr, self.port),
            IpAddr::V6(addr) => format!("[{}]:{}", addr, self.port),
        }
    }

    fn parse_port_from_env(default: u16) -> Result<u16, ConfigError> {
        match env::var(Self::ENV_PORT) {
            Ok(value) => {
                let port: u16 = value.parse().map_err(|e| ConfigError::PortParseError {
                    value: value.clone(),
                    source: e,
                })?;

                if port == 0 {
                    return Err(ConfigError::InvalidPort { value });
                }

                Ok(port)
            }
            Err(_) => Ok(default),
        }
    }

    fn parse_bind_addr_from_env(default: IpAddr) -> Result<IpAddr, ConfigError> {
        match env::var(Self::ENV_BIND_ADDR) {
            Ok(value) => value
                .parse()
                .map_err(|e| ConfigError::InvalidBindAddr { value, source: e }),
            Err(_) => Ok(default),
        }
    }

    fn parse_threshold_from_env(default: f32) -> Result<f32, ConfigError> {
        match env::var(Self::ENV_CONFIDENCE_THRESHOLD) {
            Ok(value) => match value.trim().parse::<f32>() {
                Ok(threshold) if threshold.is_finite() => Ok(threshold),
                _ => Err(ConfigError::InvalidThreshold { value }),
            },
            Err(_) => Ok(default),
        }
    }

    fn parse_timeout_from_env(default: Duration) -> Result<Duration, ConfigError> {
        match env::var(Self::ENV_PROVIDER_TIMEOUT_SECS) {
            Ok(value) => match value.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => Ok(Duration::from_secs(secs)),
                _ => Err(ConfigError::InvalidTimeout { value }),
            },
            Err(_) => Ok(default),
        }
    }

    fn parse_path_from_env(var_name: &str, default: PathBuf) -> PathBuf {
        env::var(var_name).map(PathBuf::from).unwrap_or(default)
    }

    fn parse_optional_path_from_env(var_name: &str) -> Option<PathBuf> {
        env::var(var_name)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .map(PathBuf::from)
    }

    fn parse_string_from_env(var_name: &str, default: String) -> String {
        env::var(var_name)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .unwrap_or(default)
    }
}
