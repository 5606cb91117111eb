//! Liveness check.
//!
//! Reports database connectivity and migration state. Answers 503 when the
//! database does not respond.

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::state::AppState;

/// Body of `GET /health`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    /// `SERVING` or `NOT_SERVING`
    pub status: String,
    pub migrations_total: usize,
    pub migrations_applied: usize,
}

pub fn build_health_routes() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}

pub async fn health_check(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    if !state.db.health_check().await {
        warn!("Health check failed: database not responding");
        return not_serving();
    }

    let migrations = match state.db.migration_status().await {
        Ok(migrations) => migrations,
        Err(e) => {
            warn!(error = %e, "Health check failed: migration status unavailable");
            return not_serving();
        }
    };

    if !migrations.is_current() {
        warn!(
            total = migrations.total,
            applied = migrations.applied,
            "Database schema is behind"
        );
    }

    (
        StatusCode::OK,
        Json(HealthResponse {
            status: "SERVING".to_string(),
            migrations_total: migrations.total,
            migrations_applied: migrations.applied,
        }),
    )
}

fn not_serving() -> (StatusCode, Json<HealthResponse>) {
    (
        StatusCode::SERVICE_UNAVAILABLE,
        Json(HealthResponse {
            status: "NOT_SERVING".to_string(),
            migrations_total: 0,
            migrations_applied: 0,
        }),
    )
}
