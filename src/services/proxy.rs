//! Read-only Moltbook proxy
//!
//! Each endpoint has a whitelist of forwarded query parameters with
//! defaults, and a fixed fallback body returned whenever the upstream call
//! cannot produce a result. Fallback bodies differ per endpoint; clients
//! depend on those exact shapes.

use serde_json::{json, Value};

use crate::config::MoltbookSettings;
use crate::schemas::moltbook::{ListQuery, NetworkStats};
use crate::services::credentials::{CredentialGuard, Upstream};
use crate::services::moltbook::MoltbookService;

/// A proxied Moltbook resource
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProxyEndpoint {
    Submolts,
    Posts,
    Agents,
}

impl ProxyEndpoint {
    /// Upstream path, relative to the Moltbook base URL
    pub fn path(&self) -> &'static str {
        match self {
            ProxyEndpoint::Submolts => "/submolts",
            ProxyEndpoint::Posts => "/posts",
            ProxyEndpoint::Agents => "/agents",
        }
    }

    /// Default `(sort, limit)`; `None` for endpoints that forward nothing
    pub fn list_defaults(&self) -> Option<(&'static str, i64)> {
        match self {
            ProxyEndpoint::Submolts => None,
            ProxyEndpoint::Posts => Some(("hot", 10)),
            ProxyEndpoint::Agents => Some(("karma", 5)),
        }
    }

    /// Outbound query pairs: whitelisted keys only, defaults filled in
    pub fn upstream_query(&self, query: &ListQuery) -> Vec<(&'static str, String)> {
        match self.list_defaults() {
            None => Vec::new(),
            Some((sort, limit)) => vec![
                ("sort", query.sort.clone().unwrap_or_else(|| sort.to_string())),
                ("limit", query.limit.unwrap_or(limit).to_string()),
            ],
        }
    }

    pub fn fallback(&self) -> Value {
        match self {
            ProxyEndpoint::Submolts => json!({"success": false, "error": "Failed to fetch submolts"}),
            ProxyEndpoint::Posts => json!({"success": false, "posts": []}),
            ProxyEndpoint::Agents => json!({"success": false, "agents": []}),
        }
    }
}

#[derive(Clone, Default)]
pub struct MoltbookProxy {
    moltbook: Option<MoltbookService>,
}

impl MoltbookProxy {
    /// Build the proxy; without a Moltbook credential every call falls back
    pub fn new(guard: &CredentialGuard, settings: &MoltbookSettings) -> Self {
        let moltbook = guard.credential(Upstream::Moltbook).and_then(|credential| {
            match MoltbookService::new(settings, credential.clone()) {
                Ok(service) => Some(service),
                Err(e) => {
                    tracing::error!(error = %e, "Failed to build Moltbook client, proxy disabled");
                    None
                }
            }
        });

        Self { moltbook }
    }

    pub fn is_enabled(&self) -> bool {
        self.moltbook.is_some()
    }

    /// Forward one GET; upstream JSON passes through, any failure yields the fallback
    pub async fn proxy_get(&self, endpoint: ProxyEndpoint, query: &ListQuery) -> Value {
        let Some(moltbook) = &self.moltbook else {
            tracing::warn!(endpoint = endpoint.path(), "Moltbook is not configured");
            return endpoint.fallback();
        };

        let upstream_query = endpoint.upstream_query(query);

        match moltbook.get_json(endpoint.path(), &upstream_query).await {
            Ok(body) => body,
            Err(e) => {
                tracing::error!(endpoint = endpoint.path(), error = %e, "Moltbook proxy failed");
                endpoint.fallback()
            }
        }
    }

    /// Network totals derived from one `/submolts` call
    pub async fn stats(&self) -> NetworkStats {
        let Some(moltbook) = &self.moltbook else {
            tracing::warn!("Moltbook is not configured, serving snapshot stats");
            return NetworkStats::fallback();
        };

        match moltbook.get_json(ProxyEndpoint::Submolts.path(), &[]).await {
            Ok(body) => NetworkStats::from_submolts(&body),
            Err(e) => {
                tracing::error!(error = %e, "Failed to derive Moltbook stats");
                NetworkStats::fallback()
            }
        }
    }
}
