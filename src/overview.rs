use serde::Serialize;

use crate::metrics::MetricSample;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Up,
    Down,
    Neutral,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum KpiStatus {
    Good,
    Warning,
    Critical,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Kpi {
    SuccessRate,
    DroppedRate,
    SetupTime,
    Mos,
    Jitter,
    Latency,
}

impl Kpi {
    pub const ALL: [Kpi; 6] = [
        Kpi::SuccessRate,
        Kpi::DroppedRate,
        Kpi::SetupTime,
        Kpi::Mos,
        Kpi::Jitter,
        Kpi::Latency,
    ];

    pub fn title(&self) -> &'static str {
        match self {
            Kpi::SuccessRate => "Call Success Rate",
            Kpi::DroppedRate => "Dropped Call Rate",
            Kpi::SetupTime => "Avg Setup Time",
            Kpi::Mos => "MOS Score",
            Kpi::Jitter => "Network Jitter",
            Kpi::Latency => "Latency",
        }
    }

    pub fn unit(&self) -> &'static str {
        match self {
            Kpi::SuccessRate | Kpi::DroppedRate => "%",
            Kpi::SetupTime | Kpi::Jitter | Kpi::Latency => "ms",
            Kpi::Mos => "/ 5",
        }
    }

    fn higher_is_better(&self) -> bool {
        matches!(self, Kpi::SuccessRate | Kpi::Mos)
    }

    pub fn value(&self, sample: &MetricSample) -> f64 {
        match self {
            Kpi::SuccessRate => sample.call_success_rate,
            Kpi::DroppedRate => sample.dropped_call_rate,
            Kpi::SetupTime => sample.avg_setup_time_ms,
            Kpi::Mos => sample.mos_score,
            Kpi::Jitter => sample.jitter_ms,
            Kpi::Latency => sample.latency_ms,
        }
    }

    /// Good/warning cut-offs, inclusive.
    fn thresholds(&self) -> (f64, f64) {
        match self {
            Kpi::SuccessRate => (98.0, 95.0),
            Kpi::DroppedRate => (2.0, 4.0),
            Kpi::SetupTime => (250.0, 400.0),
            Kpi::Mos => (4.0, 3.5),
            Kpi::Jitter => (15.0, 25.0),
            Kpi::Latency => (50.0, 80.0),
        }
    }

    pub fn status(&self, value: f64) -> KpiStatus {
        let (good, warning) = self.thresholds();
        let (is_good, is_warning) = if self.higher_is_better() {
            (value >= good, value >= warning)
        } else {
            (value <= good, value <= warning)
        };
        if is_good {
            KpiStatus::Good
        } else if is_warning {
            KpiStatus::Warning
        } else {
            KpiStatus::Critical
        }
    }

    /// "up" always means the KPI got better, whichever direction that is.
    pub fn trend(&self, current: f64, previous: Option<f64>) -> Trend {
        let Some(previous) = previous else {
            return Trend::Neutral;
        };
        let improved = if self.higher_is_better() {
            current > previous
        } else {
            current < previous
        };
        if improved {
            Trend::Up
        } else if current == previous {
            Trend::Neutral
        } else {
            Trend::Down
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct KpiCard {
    pub kpi: Kpi,
    pub title: &'static str,
    pub value: f64,
    pub unit: &'static str,
    pub trend: Trend,
    /// Absolute change from the previous hour; previous counts as 0 when absent.
    pub delta: f64,
    pub status: KpiStatus,
}

/// KPI cards for the newest sample, compared with the hour before.
pub fn performance_overview(metrics: &[MetricSample]) -> Option<Vec<KpiCard>> {
    let (current, rest) = metrics.split_last()?;
    let previous = rest.last();

    let cards = Kpi::ALL
        .iter()
        .map(|kpi| {
            let value = kpi.value(current);
            let prev = previous.map(|p| kpi.value(p));
            KpiCard {
                kpi: *kpi,
                title: kpi.title(),
                value,
                unit: kpi.unit(),
                trend: kpi.trend(value, prev),
                delta: (value - prev.unwrap_or(0.0)).abs(),
                status: kpi.status(value),
            }
        })
        .collect();
    Some(cards)
}
