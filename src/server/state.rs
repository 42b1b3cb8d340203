//! Application state container
//!
//! This module defines the shared application state that is passed
//! to all request handlers via Axum's state extraction.

use std::sync::Arc;
use std::time::Instant;

use crate::config::Settings;
use crate::services::{ChatRelay, CredentialGuard, MoltbookProxy, Upstream};

/// Shared application state
///
/// Everything in here is fixed after startup. Upstream clients are built
/// once and shared by every request; cloning the state is cheap.
#[derive(Clone)]
pub struct AppState {
    /// Application settings
    pub settings: Arc<Settings>,

    /// Which upstreams have credentials
    pub guard: Arc<CredentialGuard>,

    /// Gemini chat relay
    pub chat: ChatRelay,

    /// Moltbook read-only proxy
    pub moltbook: MoltbookProxy,

    /// Application start time (for uptime calculation)
    pub start_time: Instant,
}

impl AppState {
    /// Resolve credentials and build the upstream clients
    pub fn new(settings: Settings) -> Self {
        let settings = Arc::new(settings);

        let guard = CredentialGuard::from_settings(&settings);
        let chat = ChatRelay::new(&guard, &settings.gemini);
        let moltbook = MoltbookProxy::new(&guard, &settings.moltbook);

        tracing::info!(
            gemini = chat.is_enabled(),
            moltbook = moltbook.is_enabled(),
            "Application state initialized"
        );

        Self {
            settings,
            guard: Arc::new(guard),
            chat,
            moltbook,
            start_time: Instant::now(),
        }
    }

    /// Get the application uptime in seconds
    pub fn uptime_seconds(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }

    pub fn is_configured(&self, upstream: Upstream) -> bool {
        self.guard.is_configured(upstream)
    }
}
