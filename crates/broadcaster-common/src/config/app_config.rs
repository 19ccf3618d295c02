//! Application configuration structs
//!
//! Loads configuration from environment variables (and a `.env` file if present).

use broadcaster_core::OverflowPolicy;
use serde::Deserialize;
use std::env;

/// Main application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub app: AppSettings,
    pub server: ServerConfig,
    pub hub: HubConfig,
}

/// General application settings
#[derive(Debug, Clone, Deserialize)]
pub struct AppSettings {
    #[serde(default = "default_app_name")]
    pub name: String,
    #[serde(default = "default_env")]
    pub env: Environment,
}

/// Environment type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Staging,
    Production,
}

impl Environment {
    #[must_use]
    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }

    #[must_use]
    pub fn is_development(&self) -> bool {
        matches!(self, Self::Development)
    }
}

/// Listener configuration for the WebSocket gateway
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    /// Path the WebSocket upgrade is served on
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
}

impl ServerConfig {
    #[must_use]
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Hub tuning
#[derive(Debug, Clone, Deserialize)]
pub struct HubConfig {
    /// Capacity of each session's outbound queue
    #[serde(default = "default_outbound_buffer")]
    pub outbound_buffer: usize,
    /// What to do when a session's outbound queue is full
    #[serde(default)]
    pub overflow_policy: OverflowPolicy,
}

impl Default for HubConfig {
    fn default() -> Self {
        Self {
            outbound_buffer: default_outbound_buffer(),
            overflow_policy: OverflowPolicy::default(),
        }
    }
}

// Default value functions
fn default_app_name() -> String {
    "broadcaster".to_string()
}

fn default_env() -> Environment {
    Environment::Development
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    9218
}

fn default_endpoint() -> String {
    "/".to_string()
}

fn default_outbound_buffer() -> usize {
    100
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    /// Returns an error if a variable is set to an invalid value
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let env = match lookup("APP_ENV") {
            None => default_env(),
            Some(s) => match s.to_lowercase().as_str() {
                "production" => Environment::Production,
                "staging" => Environment::Staging,
                "development" => Environment::Development,
                _ => return Err(ConfigError::InvalidValue("APP_ENV", s)),
            },
        };

        let endpoint = lookup("HUB_ENDPOINT").unwrap_or_else(default_endpoint);
        if !endpoint.starts_with('/') {
            return Err(ConfigError::InvalidValue("HUB_ENDPOINT", endpoint));
        }

        let outbound_buffer = parse_or(&lookup, "HUB_OUTBOUND_BUFFER", default_outbound_buffer)?;
        if outbound_buffer == 0 {
            return Err(ConfigError::InvalidValue("HUB_OUTBOUND_BUFFER", "0".to_string()));
        }

        let overflow_policy = match lookup("HUB_OVERFLOW_POLICY") {
            None => OverflowPolicy::default(),
            Some(s) => s
                .parse()
                .map_err(|_| ConfigError::InvalidValue("HUB_OVERFLOW_POLICY", s))?,
        };

        Ok(Self {
            app: AppSettings {
                name: lookup("APP_NAME").unwrap_or_else(default_app_name),
                env,
            },
            server: ServerConfig {
                host: lookup("HUB_HOST").unwrap_or_else(default_host),
                port: parse_or(&lookup, "HUB_PORT", default_port)?,
                endpoint,
            },
            hub: HubConfig {
                outbound_buffer,
                overflow_policy,
            },
        })
    }
}

fn parse_or<F, T>(lookup: &F, key: &'static str, default: fn() -> T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    match lookup(key) {
        None => Ok(default()),
        Some(s) => s.trim().parse().map_err(|_| ConfigError::InvalidValue(key, s)),
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}: {1}")]
    InvalidValue(&'static str, String),
}
