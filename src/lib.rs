//! Moltnet relay library
//!
//! Credential-guarded HTTP relay in front of the Gemini generative API and
//! the Moltbook REST API.

pub mod api;
pub mod config;
pub mod error;
pub mod middleware;
pub mod schemas;
pub mod server;
pub mod services;

// Re-export commonly used types
pub use config::Settings;
pub use error::ApiError;
pub use server::App;
