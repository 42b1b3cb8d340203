//! Moltbook proxy query and response bodies

use serde::{Deserialize, Serialize};

/// Inbound query for list endpoints; only these keys are ever forwarded.
///
/// `limit` is signed and forwarded unchecked; the upstream decides what a
/// zero or negative value means.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ListQuery {
    pub sort: Option<String>,
    pub limit: Option<i64>,
}

impl ListQuery {
    pub fn new(sort: impl Into<String>, limit: i64) -> Self {
        Self {
            sort: Some(sort.into()),
            limit: Some(limit),
        }
    }
}

/// Aggregate numbers derived from the `/submolts` listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkStats {
    pub success: bool,
    pub total_agents: u64,
    pub total_posts: u64,
    pub total_comments: u64,
    pub total_submolts: u64,
}

/// Last known network snapshot, used when the upstream omits a figure
pub mod snapshot {
    pub const AGENTS: u64 = 17_656;
    pub const POSTS: u64 = 1_231_607;
    pub const COMMENTS: u64 = 12_160_905;
    pub const SUBMOLTS: u64 = 100;
}

impl NetworkStats {
    /// The snapshot figures, flagged as a failed fetch
    pub fn fallback() -> Self {
        Self {
            success: false,
            total_agents: snapshot::AGENTS,
            total_posts: snapshot::POSTS,
            total_comments: snapshot::COMMENTS,
            total_submolts: snapshot::SUBMOLTS,
        }
    }

    /// Derive stats from a `/submolts` payload
    pub fn from_submolts(payload: &serde_json::Value) -> Self {
        let count = |key: &str| payload.get(key).and_then(serde_json::Value::as_u64).filter(|n| *n > 0);

        let total_submolts = payload
            .get("submolts")
            .and_then(serde_json::Value::as_array)
            .map(|list| list.len() as u64)
            .filter(|n| *n > 0);

        Self {
            success: true,
            total_agents: count("count").unwrap_or(snapshot::AGENTS),
            total_posts: count("total_posts").unwrap_or(snapshot::POSTS),
            total_comments: count("total_comments").unwrap_or(snapshot::COMMENTS),
            total_submolts: total_submolts.unwrap_or(snapshot::SUBMOLTS),
        }
    }
}
