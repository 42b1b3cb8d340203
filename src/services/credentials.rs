//! Startup credential guard
//!
//! Each upstream the relay talks to needs one secret. The guard resolves
//! those secrets once from [`Settings`] and records which upstreams are
//! usable. A missing secret disables the feature that depends on it; it is
//! never a startup failure.

use secrecy::{ExposeSecret, SecretString};
use std::fmt;

use crate::config::Settings;

/// An upstream dependency that requires a credential
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Upstream {
    Gemini,
    Moltbook,
}

impl Upstream {
    /// Environment variable the credential is read from
    pub fn env_var(&self) -> &'static str {
        match self {
            Upstream::Gemini => "GEMINI_API_KEY",
            Upstream::Moltbook => "MOLTBOOK_API_KEY",
        }
    }
}

impl fmt::Display for Upstream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Upstream::Gemini => write!(f, "gemini"),
            Upstream::Moltbook => write!(f, "moltbook"),
        }
    }
}

/// An opaque upstream secret
///
/// The value is only reachable through [`Credential::expose`]; `Debug`
/// output is redacted.
pub struct Credential {
    secret: SecretString,
}

impl Credential {
    /// Wrap a raw secret. Blank values are rejected.
    pub fn new(raw: impl Into<String>) -> Option<Self> {
        let raw = raw.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return None;
        }
        Some(Self {
            secret: SecretString::new(trimmed.to_string()),
        })
    }

    pub fn expose(&self) -> &str {
        self.secret.expose_secret()
    }
}

impl Clone for Credential {
    fn clone(&self) -> Self {
        Self {
            secret: SecretString::new(self.expose().to_string()),
        }
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential([REDACTED])")
    }
}

/// Which upstreams have a usable credential
///
/// Built once at startup and never re-evaluated, so `is_configured` gives
/// the same answer for the lifetime of the process.
#[derive(Debug, Clone, Default)]
pub struct CredentialGuard {
    gemini: Option<Credential>,
    moltbook: Option<Credential>,
}

impl CredentialGuard {
    /// Resolve credentials from settings, logging each missing one
    pub fn from_settings(settings: &Settings) -> Self {
        let guard = Self {
            gemini: settings.gemini.api_key.clone().and_then(Credential::new),
            moltbook: settings.moltbook.api_key.clone().and_then(Credential::new),
        };

        for upstream in [Upstream::Gemini, Upstream::Moltbook] {
            if guard.is_configured(upstream) {
                tracing::info!(upstream = %upstream, "Upstream credential loaded");
            } else {
                tracing::warn!(
                    upstream = %upstream,
                    env_var = upstream.env_var(),
                    "Upstream credential missing, feature disabled"
                );
            }
        }

        guard
    }

    /// Build a guard from explicit credentials
    pub fn new(gemini: Option<Credential>, moltbook: Option<Credential>) -> Self {
        Self { gemini, moltbook }
    }

    pub fn is_configured(&self, upstream: Upstream) -> bool {
        self.credential(upstream).is_some()
    }

    pub fn credential(&self, upstream: Upstream) -> Option<&Credential> {
        match upstream {
            Upstream::Gemini => self.gemini.as_ref(),
            Upstream::Moltbook => self.moltbook.as_ref(),
        }
    }
}
