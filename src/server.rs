use axum::routing::{get, post};
use axum::Router;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::state::SharedState;

pub fn build_router(state: SharedState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Health
        .route("/health", get(crate::routes::health::health))
        // Dashboard view model
        .route("/api/dashboard", get(crate::routes::dashboard::get_dashboard))
        .route("/api/refresh", post(crate::routes::dashboard::refresh))
        .route("/api/stream", get(crate::routes::stream::snapshot_stream))
        // Metrics
        .route("/api/metrics", get(crate::routes::metrics::get_metrics))
        .route("/api/overview", get(crate::routes::metrics::get_overview))
        // Timeline
        .route("/api/timeline", get(crate::routes::timeline::get_timeline))
        .route("/api/insights", get(crate::routes::timeline::get_insights))
        // Towers
        .route("/api/towers", get(crate::routes::towers::list_towers))
        .route("/api/towers/{id}", get(crate::routes::towers::get_tower))
        .route("/api/regions", get(crate::routes::towers::list_regions))
        // Simulator
        .route("/api/simulate", post(crate::routes::simulator::simulate))
        .layer(CatchPanicLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
