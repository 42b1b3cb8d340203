//! Moltbook proxy endpoints
//!
//! GET /api/moltbook/{submolts,posts,agents} pass upstream JSON through;
//! GET /api/moltbook/stats returns totals derived from the submolt listing.
//! Every outcome is HTTP 200; an unparseable query gets the endpoint's
//! fallback body without an upstream call.

use axum::{
    extract::{rejection::QueryRejection, Query, State},
    Json,
};
use serde_json::Value;

use crate::schemas::moltbook::{ListQuery, NetworkStats};
use crate::server::state::AppState;
use crate::services::ProxyEndpoint;

/// GET /api/moltbook/submolts
pub async fn submolts(State(state): State<AppState>) -> Json<Value> {
    Json(
        state
            .moltbook
            .proxy_get(ProxyEndpoint::Submolts, &ListQuery::default())
            .await,
    )
}

/// GET /api/moltbook/posts?sort=hot&limit=10
pub async fn posts(
    State(state): State<AppState>,
    query: Result<Query<ListQuery>, QueryRejection>,
) -> Json<Value> {
    list(state, ProxyEndpoint::Posts, query).await
}

/// GET /api/moltbook/agents?sort=karma&limit=5
pub async fn agents(
    State(state): State<AppState>,
    query: Result<Query<ListQuery>, QueryRejection>,
) -> Json<Value> {
    list(state, ProxyEndpoint::Agents, query).await
}

/// GET /api/moltbook/stats
pub async fn stats(State(state): State<AppState>) -> Json<NetworkStats> {
    Json(state.moltbook.stats().await)
}

async fn list(
    state: AppState,
    endpoint: ProxyEndpoint,
    query: Result<Query<ListQuery>, QueryRejection>,
) -> Json<Value> {
    match query {
        Ok(Query(query)) => Json(state.moltbook.proxy_get(endpoint, &query).await),
        Err(rejection) => {
            tracing::warn!(
                path = endpoint.path(),
                error = %rejection.body_text(),
                "Unparseable list query"
            );
            Json(endpoint.fallback())
        }
    }
}
