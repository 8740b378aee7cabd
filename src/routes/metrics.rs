use axum::extract::{Query, State};
use axum::Json;

use crate::error::DashboardError;
use crate::filters::{FilterQuery, FilterState};
use crate::metrics::call_volume;
use crate::overview::performance_overview;
use crate::state::SharedState;

/// GET /api/metrics: hourly metrics clipped to the requested time range.
pub async fn get_metrics(
    State(state): State<SharedState>,
    Query(query): Query<FilterQuery>,
) -> Result<Json<serde_json::Value>, DashboardError> {
    let filter = FilterState::try_from(query)?;
    let snapshot = state.snapshot.read().await;
    let metrics = filter.apply_metrics(&snapshot.metrics);

    Ok(Json(serde_json::json!({
        "timeRange": filter.time_range,
        "metrics": metrics,
        "callVolume": call_volume(metrics),
        "lastUpdated": snapshot.last_updated,
    })))
}

/// GET /api/overview: KPI cards for the latest hour.
pub async fn get_overview(State(state): State<SharedState>) -> Json<serde_json::Value> {
    let snapshot = state.snapshot.read().await;
    let cards = performance_overview(&snapshot.metrics).unwrap_or_default();

    Json(serde_json::json!({
        "loading": snapshot.is_loading(),
        "cards": cards,
        "lastUpdated": snapshot.last_updated,
    }))
}
