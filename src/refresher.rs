use tokio::time::{interval, Duration, MissedTickBehavior};
use tracing::{debug, info};

use crate::config::REFRESH_SUMMARY_EVERY;
use crate::state::SharedState;

/// Spawn the periodic refresh task. The first tick fires immediately so the
/// dashboard has data as soon as the server is up.
pub fn spawn_refresher(state: SharedState) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        let period = Duration::from_secs(state.config.refresh_secs);
        let mut ticker = interval(period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        let mut shutdown_rx = state.shutdown_tx.subscribe();

        info!("Refresher started ({}s period)", period.as_secs());

        loop {
            tokio::select! {
                _ = ticker.tick() => {},
                _ = shutdown_rx.recv() => {
                    info!("Refresher stopping");
                    break;
                }
            }

            let summary = state.refresh().await;

            // Summary once every few refreshes, per-tick detail at debug
            if summary.refresh_count % REFRESH_SUMMARY_EVERY == 1 {
                info!(
                    refresh_count = summary.refresh_count,
                    insights = summary.insight_count,
                    latest_mos = summary.latest_mos.unwrap_or_default(),
                    "Dashboard data refreshed"
                );
            }
            debug!(refresh_count = summary.refresh_count, "Snapshot replaced");
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DashboardConfig;
    use crate::sampling::ScriptedSource;
    use crate::state::DashboardState;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_first_tick_refreshes_immediately() {
        let state = Arc::new(DashboardState::with_source(
            DashboardConfig::default(),
            Box::new(ScriptedSource::constant(0.5)),
        ));
        let mut rx = state.snapshot_tx.subscribe();
        let handle = spawn_refresher(state.clone());

        let summary = tokio::time::timeout(Duration::from_secs(5), rx.recv())
            .await
            .expect("refresh within timeout")
            .expect("channel open");
        assert_eq!(summary.refresh_count, 1);

        state.request_shutdown();
        tokio::time::timeout(Duration::from_secs(5), handle)
            .await
            .expect("refresher stops on shutdown")
            .expect("task did not panic");
    }
}
