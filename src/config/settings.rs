//! Application settings and configuration
//!
//! Settings are read once from environment variables (and an optional `.env`
//! file) at startup. Credentials are kept as plain optional strings here and
//! handed to the credential guard, which decides which features are enabled.

use anyhow::{Context, Result};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::env;
use std::fmt;

/// Default Gemini REST endpoint
pub const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Default Gemini model used for chat
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-2.5-flash";

/// Default Moltbook REST endpoint
pub const DEFAULT_MOLTBOOK_BASE_URL: &str = "https://www.moltbook.com/api/v1";

/// Request timeout applied to every Moltbook call
pub const DEFAULT_MOLTBOOK_TIMEOUT_SECONDS: u64 = 15;

/// Application environment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    #[value(alias = "dev")]
    Development,
    #[value(alias = "stage")]
    Staging,
    #[value(alias = "prod")]
    Production,
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Staging => write!(f, "staging"),
            Environment::Production => write!(f, "production"),
        }
    }
}

impl std::str::FromStr for Environment {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "development" | "dev" => Ok(Environment::Development),
            "staging" | "stage" => Ok(Environment::Staging),
            "production" | "prod" => Ok(Environment::Production),
            _ => anyhow::bail!("Invalid environment: {}. Expected: development, staging, or production", s),
        }
    }
}

/// Shape of the `/chat` response body
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatResponseStyle {
    /// `{"reply": "..."}`
    #[default]
    Compact,
    /// The reply echoed under every key older clients look for, plus `sources: []`
    Aliased,
}

impl std::str::FromStr for ChatResponseStyle {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "compact" | "reply" => Ok(ChatResponseStyle::Compact),
            "aliased" | "alias" | "universal" => Ok(ChatResponseStyle::Aliased),
            _ => anyhow::bail!("Invalid chat response style: {}. Expected: compact or aliased", s),
        }
    }
}

/// How a failed chat relay is reported to the client
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatFailureMode {
    /// HTTP 200 with the fallback text in the normal reply body
    #[default]
    Body,
    /// HTTP 500 with `{"detail": "..."}`
    Status,
}

impl std::str::FromStr for ChatFailureMode {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "body" => Ok(ChatFailureMode::Body),
            "status" | "http" => Ok(ChatFailureMode::Status),
            _ => anyhow::bail!("Invalid chat failure mode: {}. Expected: body or status", s),
        }
    }
}

/// CORS configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct CorsConfig {
    /// Allowed origins; empty means any origin
    pub allowed_origins: Vec<String>,
}

impl CorsConfig {
    /// Parse a comma-separated origin list; `*` (or nothing) allows any origin
    pub fn parse(raw: &str) -> Self {
        let allowed_origins = raw
            .split(',')
            .map(str::trim)
            .filter(|origin| !origin.is_empty() && *origin != "*")
            .map(str::to_string)
            .collect();

        Self { allowed_origins }
    }

    pub fn is_permissive(&self) -> bool {
        self.allowed_origins.is_empty()
    }
}

/// Gemini upstream configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GeminiSettings {
    #[serde(skip_serializing)]
    pub api_key: Option<String>,
    pub model: String,
    pub base_url: String,
    /// `None` keeps the transport default
    pub timeout_seconds: Option<u64>,
}

impl Default for GeminiSettings {
    fn default() -> Self {
        Self {
            api_key: None,
            model: DEFAULT_GEMINI_MODEL.to_string(),
            base_url: DEFAULT_GEMINI_BASE_URL.to_string(),
            timeout_seconds: None,
        }
    }
}

/// Moltbook upstream configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MoltbookSettings {
    #[serde(skip_serializing)]
    pub api_key: Option<String>,
    pub base_url: String,
    pub timeout_seconds: u64,
}

impl Default for MoltbookSettings {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_MOLTBOOK_BASE_URL.to_string(),
            timeout_seconds: DEFAULT_MOLTBOOK_TIMEOUT_SECONDS,
        }
    }
}

/// Main application settings
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Settings {
    // App settings
    pub app_name: String,
    pub app_version: String,
    pub environment: Environment,
    pub log_level: String,

    // Server settings
    pub host: String,
    pub port: u16,

    // Upstreams
    pub gemini: GeminiSettings,
    pub moltbook: MoltbookSettings,

    // HTTP surface
    pub cors: CorsConfig,
    pub chat_response_style: ChatResponseStyle,
    pub chat_failure_mode: ChatFailureMode,
}

impl Settings {
    /// Load settings from environment variables with defaults
    pub fn load() -> Result<Self> {
        // Load .env file if it exists
        dotenvy::dotenv().ok();

        let settings = Self {
            app_name: env_or_default("APP_NAME", "moltnet-relay"),
            app_version: env!("CARGO_PKG_VERSION").to_string(),
            environment: env_or_default("ENVIRONMENT", "development")
                .parse()
                .unwrap_or_default(),
            log_level: env_or_default("LOG_LEVEL", "info"),

            host: env_or_default("HOST", "0.0.0.0"),
            port: env_or_default("PORT", "8000")
                .parse()
                .context("Invalid PORT value")?,

            gemini: GeminiSettings {
                api_key: env::var("GEMINI_API_KEY").ok(),
                model: env_or_default("GEMINI_MODEL", DEFAULT_GEMINI_MODEL),
                base_url: env_or_default("GEMINI_BASE_URL", DEFAULT_GEMINI_BASE_URL),
                timeout_seconds: env::var("GEMINI_TIMEOUT_SECONDS")
                    .ok()
                    .map(|v| v.parse::<u64>())
                    .transpose()
                    .context("Invalid GEMINI_TIMEOUT_SECONDS value")?,
            },

            moltbook: MoltbookSettings {
                api_key: env::var("MOLTBOOK_API_KEY").ok(),
                base_url: env_or_default("MOLTBOOK_BASE_URL", DEFAULT_MOLTBOOK_BASE_URL),
                timeout_seconds: env_or_default("MOLTBOOK_TIMEOUT_SECONDS", "15")
                    .parse()
                    .context("Invalid MOLTBOOK_TIMEOUT_SECONDS value")?,
            },

            cors: CorsConfig::parse(&env_or_default("CORS_ALLOWED_ORIGINS", "*")),
            chat_response_style: env_or_default("CHAT_RESPONSE_STYLE", "compact").parse()?,
            chat_failure_mode: env_or_default("CHAT_FAILURE_MODE", "body").parse()?,
        };

        settings.validate()?;

        Ok(settings)
    }

    /// Validate settings
    fn validate(&self) -> Result<()> {
        if self.port == 0 {
            anyhow::bail!("Port cannot be 0");
        }

        if self.moltbook.timeout_seconds == 0 {
            anyhow::bail!("MOLTBOOK_TIMEOUT_SECONDS must be > 0");
        }

        if self.gemini.timeout_seconds == Some(0) {
            anyhow::bail!("GEMINI_TIMEOUT_SECONDS must be > 0 when set");
        }

        if self.gemini.model.trim().is_empty() {
            anyhow::bail!("GEMINI_MODEL cannot be empty");
        }

        Ok(())
    }

    /// Non-fatal configuration problems, logged once tracing is up
    pub fn warnings(&self) -> Vec<&'static str> {
        let mut warnings = Vec::new();

        if self.environment == Environment::Production && self.cors.is_permissive() {
            warnings.push("Running in production with CORS open to any origin");
        }

        warnings
    }

    /// Get the server address string
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            app_name: "moltnet-relay".to_string(),
            app_version: env!("CARGO_PKG_VERSION").to_string(),
            environment: Environment::Development,
            log_level: "info".to_string(),
            host: "0.0.0.0".to_string(),
            port: 8000,
            gemini: GeminiSettings::default(),
            moltbook: MoltbookSettings::default(),
            cors: CorsConfig::default(),
            chat_response_style: ChatResponseStyle::default(),
            chat_failure_mode: ChatFailureMode::default(),
        }
    }
}

/// Helper function to get environment variable with default
fn env_or_default(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}
