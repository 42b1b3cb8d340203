//! Configuration management module
//!
//! This module handles loading and validating application configuration
//! from environment variables and .env files.

pub mod settings;

pub use settings::{
    ChatFailureMode, ChatResponseStyle, CorsConfig, Environment, GeminiSettings,
    MoltbookSettings, Settings,
};
