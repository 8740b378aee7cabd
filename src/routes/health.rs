use axum::extract::State;
use axum::Json;
use serde::Serialize;

use crate::state::SharedState;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub status: String,
    pub refresh: RefreshHealth,
    pub data: DataHealth,
    pub service: ServiceInfo,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshHealth {
    pub interval_secs: u64,
    pub refresh_count: u64,
    pub last_updated: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DataHealth {
    pub metric_samples: usize,
    pub timeline_points: usize,
    pub towers: usize,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceInfo {
    pub version: String,
    pub seeded: bool,
    pub simulation_delay_ms: u64,
}

/// Overall status from refresh progress.
/// This is a pure function extracted for testability.
pub fn determine_overall_status(refresh_count: u64, has_metrics: bool) -> &'static str {
    if refresh_count == 0 {
        "loading"
    } else if has_metrics {
        "healthy"
    } else {
        "degraded"
    }
}

/// GET /health
pub async fn health(State(state): State<SharedState>) -> Json<HealthResponse> {
    Json(build_health_response(&state).await)
}

pub async fn build_health_response(state: &SharedState) -> HealthResponse {
    let snapshot = state.snapshot.read().await;

    let status = determine_overall_status(snapshot.refresh_count, !snapshot.metrics.is_empty());

    HealthResponse {
        status: status.to_string(),
        refresh: RefreshHealth {
            interval_secs: state.config.refresh_secs,
            refresh_count: snapshot.refresh_count,
            last_updated: snapshot.last_updated.map(|t| t.to_rfc3339()),
        },
        data: DataHealth {
            metric_samples: snapshot.metrics.len(),
            timeline_points: snapshot.timeline.len(),
            towers: snapshot.towers.len(),
        },
        service: ServiceInfo {
            version: env!("CARGO_PKG_VERSION").to_string(),
            seeded: state.config.seed.is_some(),
            simulation_delay_ms: state.config.simulation_delay_ms,
        },
    }
}
