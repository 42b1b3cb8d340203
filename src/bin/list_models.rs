//! List the Gemini models visible to the configured API key
//!
//! Reads settings the same way the server does and prints every model whose
//! name contains "gemini".
//!
//! Usage:
//!   GEMINI_API_KEY=... cargo run --bin list_models

use anyhow::{Context, Result};
use moltnet_relay::{
    config::Settings,
    services::{CredentialGuard, GeminiService, Upstream},
};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let settings = Settings::load()?;
    let guard = CredentialGuard::from_settings(&settings);

    let credential = guard
        .credential(Upstream::Gemini)
        .cloned()
        .with_context(|| format!("{} is not set", Upstream::Gemini.env_var()))?;

    let gemini = GeminiService::new(&settings.gemini, credential)?;

    println!("--- Available Gemini models ---");

    let models = gemini.list_models().await.context("Failed to list models")?;
    let mut found = 0;
    for model in models.iter().filter(|m| m.name.contains("gemini")) {
        let methods = model.supported_generation_methods.join(", ");
        println!("  {:<45} {}", model.name, methods);
        found += 1;
    }

    println!("\n{} model(s) found", found);

    Ok(())
}
