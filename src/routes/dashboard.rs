use axum::extract::{Query, State};
use axum::Json;
use serde::Serialize;

use crate::config::RECENT_INSIGHTS_LIMIT;
use crate::error::DashboardError;
use crate::filters::{FilterQuery, FilterState};
use crate::metrics::{call_volume, CallVolumePoint, MetricSample};
use crate::overview::{performance_overview, KpiCard};
use crate::routes::towers::TowerView;
use crate::state::{DashboardSnapshot, SharedState, SnapshotSummary};
use crate::timeline::{recent_insights, Insight, TimelineDataPoint};

/// Everything one dashboard page needs for a given set of filters.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardView<'a> {
    pub loading: bool,
    pub last_updated: Option<String>,
    pub overview: Vec<KpiCard>,
    pub metrics: &'a [MetricSample],
    pub call_volume: Vec<CallVolumePoint>,
    pub timeline: &'a [TimelineDataPoint],
    pub insights: Vec<Insight>,
    pub towers: Vec<TowerView<'a>>,
}

pub fn build_view<'a>(snapshot: &'a DashboardSnapshot, filter: &FilterState) -> DashboardView<'a> {
    let metrics = filter.apply_metrics(&snapshot.metrics);

    DashboardView {
        loading: snapshot.is_loading(),
        last_updated: snapshot.last_updated.map(|t| t.to_rfc3339()),
        // Cards always reflect the latest two hours, whatever the range
        overview: performance_overview(&snapshot.metrics).unwrap_or_default(),
        metrics,
        call_volume: call_volume(metrics),
        timeline: &snapshot.timeline,
        insights: recent_insights(&snapshot.timeline, RECENT_INSIGHTS_LIMIT),
        towers: filter
            .apply_towers(&snapshot.towers)
            .into_iter()
            .map(TowerView::from)
            .collect(),
    }
}

/// GET /api/dashboard
pub async fn get_dashboard(
    State(state): State<SharedState>,
    Query(query): Query<FilterQuery>,
) -> Result<Json<serde_json::Value>, DashboardError> {
    let filter = FilterState::try_from(query)?;
    let snapshot = state.snapshot.read().await;
    let view = build_view(&snapshot, &filter);

    let value = serde_json::to_value(&view).map_err(|e| DashboardError::Other(e.to_string()))?;
    Ok(Json(value))
}

/// POST /api/refresh: regenerate immediately instead of waiting for the timer.
pub async fn refresh(State(state): State<SharedState>) -> Json<SnapshotSummary> {
    Json(state.refresh().await)
}
