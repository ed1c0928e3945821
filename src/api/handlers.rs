//! HTTP keep-alive handlers.

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde::Serialize;
use std::sync::Arc;

use crate::history::{standard_summary, HistoryStore};

/// Application state shared with handlers.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Whether the service finished starting up.
    pub ready: Arc<std::sync::atomic::AtomicBool>,
    /// Conversion history log.
    pub store: Arc<HistoryStore>,
}

impl AppState {
    /// Create new app state around a history store.
    pub fn new(store: Arc<HistoryStore>) -> Self {
        Self {
            ready: Arc::new(std::sync::atomic::AtomicBool::new(false)),
            store,
        }
    }

    /// Set ready state.
    pub fn set_ready(&self, ready: bool) {
        self.ready
            .store(ready, std::sync::atomic::Ordering::SeqCst);
    }

    /// Check if ready.
    pub fn is_ready(&self) -> bool {
        self.ready.load(std::sync::atomic::Ordering::SeqCst)
    }
}

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Status: "ok".
    pub status: &'static str,
}

/// Readiness check response.
#[derive(Debug, Serialize)]
pub struct ReadyResponse {
    /// Whether service is ready.
    pub ready: bool,
}

/// Status response with history statistics.
#[derive(Debug, Serialize)]
pub struct StatusResponse {
    /// Service status.
    pub status: &'static str,
    /// Number of recorded conversions.
    pub entries: usize,
    /// Total freebet volume over standard conversions.
    pub total_freebet: Option<String>,
    /// Freebet-weighted average rate over standard conversions.
    pub weighted_rate_pct: Option<String>,
}

/// Health check handler - always returns 200.
pub async fn health() -> impl IntoResponse {
    Json(HealthResponse { status: "ok" })
}

/// Readiness check handler - returns 200 if ready, 503 otherwise.
pub async fn ready(State(state): State<AppState>) -> impl IntoResponse {
    let is_ready = state.is_ready();
    let response = ReadyResponse { ready: is_ready };

    if is_ready {
        (StatusCode::OK, Json(response))
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, Json(response))
    }
}

/// Status handler - returns history statistics.
pub async fn status(State(state): State<AppState>) -> impl IntoResponse {
    let entries = state.store.entries();
    let summary = standard_summary(&entries);

    let status = if state.is_ready() { "running" } else { "starting" };

    Json(StatusResponse {
        status,
        entries: entries.len(),
        total_freebet: summary.map(|s| s.total_freebet.round_dp(2).to_string()),
        weighted_rate_pct: summary.map(|s| s.average_rate_pct.round_dp(2).to_string()),
    })
}
