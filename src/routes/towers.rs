use axum::extract::{Path, Query, State};
use axum::Json;
use serde::Serialize;

use crate::error::DashboardError;
use crate::filters::{FilterQuery, FilterState};
use crate::state::SharedState;
use crate::towers::{regions, Tower};

/// A tower as the map panel shows it, with its load ratio precomputed.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TowerView<'a> {
    #[serde(flatten)]
    pub tower: &'a Tower,
    pub utilization_percent: f64,
}

impl<'a> From<&'a Tower> for TowerView<'a> {
    fn from(tower: &'a Tower) -> Self {
        TowerView {
            tower,
            utilization_percent: tower.utilization_percent(),
        }
    }
}

/// GET /api/towers: towers matching the region/technology filters.
pub async fn list_towers(
    State(state): State<SharedState>,
    Query(query): Query<FilterQuery>,
) -> Result<Json<serde_json::Value>, DashboardError> {
    let filter = FilterState::try_from(query)?;
    let snapshot = state.snapshot.read().await;
    let towers: Vec<TowerView> = filter
        .apply_towers(&snapshot.towers)
        .into_iter()
        .map(TowerView::from)
        .collect();

    Ok(Json(serde_json::json!({
        "towers": towers,
        "total": snapshot.towers.len(),
        "region": filter.region,
        "technology": filter.technology,
    })))
}

/// GET /api/towers/{id}
pub async fn get_tower(
    State(state): State<SharedState>,
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>, DashboardError> {
    let snapshot = state.snapshot.read().await;
    let tower = snapshot
        .towers
        .iter()
        .find(|t| t.id == id)
        .ok_or(DashboardError::TowerNotFound(id))?;

    Ok(Json(serde_json::json!({
        "tower": TowerView::from(tower),
    })))
}

/// GET /api/regions
pub async fn list_regions() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "regions": regions() }))
}
