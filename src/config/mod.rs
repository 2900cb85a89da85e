use dashmap::DashMap;
use std::env;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

pub const HOST_KEY: &str = "HOST";
pub const PORT_KEY: &str = "PORT";
pub const BASE_URL_KEY: &str = "PRODUCT_BASE_URL";
pub const CONNECT_TIMEOUT_KEY: &str = "PRODUCT_CONNECT_TIMEOUT_MS";
pub const READ_TIMEOUT_KEY: &str = "PRODUCT_READ_TIMEOUT_MS";

const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 8080;
const DEFAULT_BASE_URL: &str = "http://localhost:8080";
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid value '{value}' for {key}: {reason}")]
    InvalidValue {
        key: String,
        value: String,
        reason: String,
    },
}

/// Configuration service
#[derive(Clone, Default)]
pub struct ConfigService {
    config: Arc<DashMap<String, String>>,
}

impl ConfigService {
    /// Seeded from the process environment.
    pub fn from_env() -> Self {
        let service = Self::default();
        for (key, value) in env::vars() {
            service.set(&key, &value);
        }
        service
    }

    pub fn get(&self, key: &str) -> Option<String> {
        self.config.get(key).map(|v| v.clone())
    }

    pub fn set(&self, key: &str, value: &str) {
        self.config.insert(key.to_string(), value.to_string());
    }

    /// Parses `key`, falling back to `default` when unset.
    pub fn get_parsed<T>(&self, key: &str, default: T) -> Result<T, ConfigError>
    where
        T: FromStr,
        T::Err: std::fmt::Display,
    {
        match self.get(key) {
            None => Ok(default),
            Some(value) => {
                let parsed = value.trim().parse::<T>();
                parsed.map_err(|e| ConfigError::InvalidValue {
                    key: key.to_string(),
                    reason: e.to_string(),
                    value,
                })
            }
        }
    }
}

/// Where the product server listens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn load(config: &ConfigService) -> Result<Self, ConfigError> {
        Ok(Self {
            host: config
                .get(HOST_KEY)
                .unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port: config.get_parsed(PORT_KEY, DEFAULT_PORT)?,
        })
    }

    /// `host:port`, resolved by the listener so host names are accepted.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
        }
    }
}

/// How the product client reaches the server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub base_url: String,
    pub connect_timeout: Duration,
    pub read_timeout: Duration,
}

impl ClientConfig {
    pub fn load(config: &ConfigService) -> Result<Self, ConfigError> {
        let connect_ms = config.get_parsed(CONNECT_TIMEOUT_KEY, millis(DEFAULT_TIMEOUT))?;
        let read_ms = config.get_parsed(READ_TIMEOUT_KEY, millis(DEFAULT_TIMEOUT))?;
        Ok(Self {
            base_url: config
                .get(BASE_URL_KEY)
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            connect_timeout: Duration::from_millis(connect_ms),
            read_timeout: Duration::from_millis(read_ms),
        })
    }

    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            connect_timeout: DEFAULT_TIMEOUT,
            read_timeout: DEFAULT_TIMEOUT,
        }
    }
}

fn millis(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}
