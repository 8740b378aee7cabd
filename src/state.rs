use chrono::{DateTime, FixedOffset, Local, TimeZone};
use serde::Serialize;
use std::sync::Arc;
use tokio::sync::{broadcast, Mutex, RwLock};

use crate::config::{DashboardConfig, SNAPSHOT_CHANNEL_CAPACITY};
use crate::metrics::{generate_call_metrics_with, MetricSample};
use crate::sampling::{RngSource, UniformSource};
use crate::timeline::{generate_timeline_data_with, TimelineDataPoint};
use crate::towers::{build_towers, Tower};

pub type SharedState = Arc<DashboardState>;

type BoxedSource = Box<dyn UniformSource + Send>;

pub struct DashboardState {
    pub config: DashboardConfig,
    pub snapshot: RwLock<DashboardSnapshot>,
    pub snapshot_tx: broadcast::Sender<SnapshotSummary>,
    pub shutdown_tx: broadcast::Sender<()>,
    source: Mutex<BoxedSource>,
}

/// Everything the dashboard renders; replaced wholesale on every refresh.
#[derive(Debug, Clone, Default)]
pub struct DashboardSnapshot {
    pub metrics: Vec<MetricSample>,
    pub timeline: Vec<TimelineDataPoint>,
    pub towers: Vec<Tower>,
    pub last_updated: Option<DateTime<FixedOffset>>,
    pub refresh_count: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SnapshotSummary {
    pub refresh_count: u64,
    pub last_updated: DateTime<FixedOffset>,
    pub latest_mos: Option<f64>,
    pub insight_count: usize,
    pub tower_count: usize,
}

impl DashboardSnapshot {
    /// True until the first refresh has populated the series.
    pub fn is_loading(&self) -> bool {
        self.metrics.is_empty()
    }

    pub fn summary(&self) -> Option<SnapshotSummary> {
        self.last_updated.map(|t| self.summarize(t))
    }

    fn summarize(&self, last_updated: DateTime<FixedOffset>) -> SnapshotSummary {
        SnapshotSummary {
            refresh_count: self.refresh_count,
            last_updated,
            latest_mos: self.metrics.last().map(|m| m.mos_score),
            insight_count: self.timeline.iter().filter(|p| p.insight.is_some()).count(),
            tower_count: self.towers.len(),
        }
    }
}

impl DashboardState {
    pub fn new(config: DashboardConfig) -> Self {
        let source: BoxedSource = match config.seed {
            Some(seed) => Box::new(RngSource::seeded(seed)),
            None => Box::new(RngSource::from_os()),
        };
        Self::with_source(config, source)
    }

    /// Build with an explicit sampling source (scripted sources in tests).
    pub fn with_source(config: DashboardConfig, source: BoxedSource) -> Self {
        let (snapshot_tx, _) = broadcast::channel(SNAPSHOT_CHANNEL_CAPACITY);
        let (shutdown_tx, _) = broadcast::channel(1);
        Self {
            config,
            snapshot: RwLock::new(DashboardSnapshot::default()),
            snapshot_tx,
            shutdown_tx,
            source: Mutex::new(source),
        }
    }

    pub async fn refresh(&self) -> SnapshotSummary {
        let mut source = self.source.lock().await;
        // Read the clock under the lock so snapshots land in time order
        self.regenerate(&mut **source, Local::now()).await
    }

    /// Regenerate every series relative to `now` and swap the snapshot in.
    pub async fn refresh_at<Tz: TimeZone>(&self, now: DateTime<Tz>) -> SnapshotSummary {
        let mut source = self.source.lock().await;
        self.regenerate(&mut **source, now).await
    }

    /// Callers hold the source lock until the swap, so refreshes never interleave.
    async fn regenerate<Tz: TimeZone>(
        &self,
        source: &mut (dyn UniformSource + Send),
        now: DateTime<Tz>,
    ) -> SnapshotSummary {
        let last_updated = now.fixed_offset();
        let (metrics, timeline, towers) = {
            let source: &mut dyn UniformSource = source;
            let metrics = generate_call_metrics_with(source, now.clone());
            let timeline = generate_timeline_data_with(source, now.clone());
            let towers = build_towers(source, now);
            (metrics, timeline, towers)
        };

        let summary = {
            let mut guard = self.snapshot.write().await;
            let next = DashboardSnapshot {
                metrics,
                timeline,
                towers,
                last_updated: Some(last_updated),
                refresh_count: guard.refresh_count + 1,
            };
            let summary = next.summarize(last_updated);
            *guard = next;
            summary
        };

        let _ = self.snapshot_tx.send(summary.clone());
        summary
    }

    pub fn request_shutdown(&self) {
        let _ = self.shutdown_tx.send(());
    }
}
