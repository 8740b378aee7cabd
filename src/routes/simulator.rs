use axum::extract::State;
use axum::Json;
use std::time::Duration;
use tracing::info;

use crate::error::DashboardError;
use crate::simulator::{simulate_call, SimulatorInput, SimulatorRequest, SimulatorResult};
use crate::state::SharedState;

/// POST /api/simulate: predict call quality for a what-if scenario.
///
/// The response is held back by the configured presentation delay; the
/// prediction itself is computed up front and the delay is not cancelable.
pub async fn simulate(
    State(state): State<SharedState>,
    Json(body): Json<SimulatorRequest>,
) -> Result<Json<SimulatorResult>, DashboardError> {
    let input = SimulatorInput::try_from(body)?;
    let result = simulate_call(&input);

    info!(
        location = %input.location,
        time_of_day = ?input.time_of_day,
        device = ?input.device_type,
        connection = ?input.connection_type,
        risk = %result.risk_level,
        "Simulation complete"
    );

    let delay = state.config.simulation_delay_ms;
    if delay > 0 {
        tokio::time::sleep(Duration::from_millis(delay)).await;
    }

    Ok(Json(result))
}
