//! Application configuration structs
//!
//! Loads configuration from environment variables (and a `.env` file when
//! present).

use feedback_core::WindowRadius;
use serde::Deserialize;
use std::env;

/// Main application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub app: AppSettings,
    pub feedback: FeedbackConfig,
    pub ids: IdConfig,
}

/// General application settings
#[derive(Debug, Clone, Deserialize)]
pub struct AppSettings {
    #[serde(default = "default_app_name")]
    pub name: String,
    #[serde(default = "default_env")]
    pub env: Environment,
    /// Emit JSON logs instead of the pretty format
    #[serde(default)]
    pub log_json: bool,
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

    fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "production" => Some(Self::Production),
            "staging" => Some(Self::Staging),
            "development" => Some(Self::Development),
            _ => None,
        }
    }
}

/// Feedback engine tuning
#[derive(Debug, Clone, Deserialize)]
pub struct FeedbackConfig {
    /// Symmetric grouping radius in timeline seconds
    #[serde(default)]
    pub window: WindowRadius,
    #[serde(default = "default_max_comment_length")]
    pub max_comment_length: usize,
    /// Buffered events per live-feed subscriber before it starts lagging
    #[serde(default = "default_broadcast_capacity")]
    pub broadcast_capacity: usize,
}

impl FeedbackConfig {
    /// Default configuration with a different window radius
    #[must_use]
    pub fn with_window(window: WindowRadius) -> Self {
        Self {
            window,
            ..Self::default()
        }
    }
}

impl Default for FeedbackConfig {
    fn default() -> Self {
        Self {
            window: WindowRadius::DEFAULT,
            max_comment_length: default_max_comment_length(),
            broadcast_capacity: default_broadcast_capacity(),
        }
    }
}

/// Snowflake ID generator configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct IdConfig {
    #[serde(default)]
    pub worker_id: u16,
}

// Default value functions
fn default_app_name() -> String {
    "feedback-engine".to_string()
}

fn default_env() -> Environment {
    Environment::Development
}

fn default_max_comment_length() -> usize {
    2000
}

fn default_broadcast_capacity() -> usize {
    256
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            app: AppSettings {
                name: default_app_name(),
                env: default_env(),
                log_json: false,
            },
            feedback: FeedbackConfig::default(),
            ids: IdConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    /// Returns an error if a variable is present but holds an invalid value
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable source
    ///
    /// Every variable is optional; missing ones fall back to defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let window = match lookup("FEEDBACK_WINDOW_SECONDS") {
            Some(raw) => raw
                .trim()
                .parse::<f64>()
                .ok()
                .and_then(|secs| WindowRadius::new(secs).ok())
                .ok_or(ConfigError::InvalidValue("FEEDBACK_WINDOW_SECONDS", raw))?,
            None => WindowRadius::DEFAULT,
        };

        let worker_id = match lookup("WORKER_ID") {
            Some(raw) => raw
                .trim()
                .parse::<u16>()
                .ok()
                .filter(|id| *id < 1024)
                .ok_or(ConfigError::InvalidValue("WORKER_ID", raw))?,
            None => 0,
        };

        Ok(Self {
            app: AppSettings {
                name: lookup("APP_NAME").unwrap_or_else(default_app_name),
                env: lookup("APP_ENV")
                    .as_deref()
                    .and_then(Environment::parse)
                    .unwrap_or_default(),
                log_json: lookup("LOG_JSON")
                    .and_then(|s| s.trim().parse().ok())
                    .unwrap_or(false),
            },
            feedback: FeedbackConfig {
                window,
                max_comment_length: lookup("FEEDBACK_MAX_COMMENT_LENGTH")
                    .and_then(|s| s.trim().parse().ok())
                    .unwrap_or_else(default_max_comment_length),
                broadcast_capacity: lookup("FEEDBACK_BROADCAST_CAPACITY")
                    .and_then(|s| s.trim().parse().ok())
                    .filter(|cap| *cap > 0)
                    .unwrap_or_else(default_broadcast_capacity),
            },
            ids: IdConfig { worker_id },
        })
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingVar(&'static str),

    #[error("Invalid value for {0}: {1}")]
    InvalidValue(&'static str, String),
}
