use axum::extract::{Query, State};
use axum::Json;
use serde::Deserialize;

use crate::config::RECENT_INSIGHTS_LIMIT;
use crate::state::SharedState;
use crate::timeline::recent_insights;

#[derive(Deserialize)]
pub struct InsightsQuery {
    #[serde(default = "default_limit")]
    pub limit: usize,
}

fn default_limit() -> usize {
    RECENT_INSIGHTS_LIMIT
}

/// GET /api/timeline: minute-by-minute quality for the last hour.
pub async fn get_timeline(State(state): State<SharedState>) -> Json<serde_json::Value> {
    let snapshot = state.snapshot.read().await;

    Json(serde_json::json!({
        "points": snapshot.timeline,
        "lastUpdated": snapshot.last_updated,
    }))
}

/// GET /api/insights: the most recent anomaly insights, oldest first.
pub async fn get_insights(
    State(state): State<SharedState>,
    Query(query): Query<InsightsQuery>,
) -> Json<serde_json::Value> {
    let snapshot = state.snapshot.read().await;
    let insights = recent_insights(&snapshot.timeline, query.limit);
    let total = snapshot
        .timeline
        .iter()
        .filter(|p| p.insight.is_some())
        .count();

    Json(serde_json::json!({
        "insights": insights,
        "total": total,
        "limit": query.limit,
    }))
}
