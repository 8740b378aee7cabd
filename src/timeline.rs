use chrono::{DateTime, Duration, FixedOffset, Local, TimeZone, Timelike};
use serde::Serialize;

use crate::config::{
    INSIGHT_DROP_RATE_CEILING, INSIGHT_JITTER_CEILING_MS, INSIGHT_MOS_FLOOR,
    TIMELINE_PEAK_MODIFIER, TIMELINE_WINDOW_MINUTES,
};
use crate::metrics::is_peak_hour;
use crate::sampling::{thread_source, UniformSource};

/// One minute of call quality, optionally annotated with an anomaly insight.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimelineDataPoint {
    pub timestamp: DateTime<FixedOffset>,
    pub mos: f64,
    pub jitter: f64,
    pub latency: f64,
    pub dropped_rate: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub insight: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Insight {
    pub timestamp: DateTime<FixedOffset>,
    pub message: String,
}

/// Minute-by-minute series for the last hour (61 points, oldest first).
pub fn generate_timeline_data() -> Vec<TimelineDataPoint> {
    generate_timeline_data_with(&mut thread_source(), Local::now())
}

pub fn generate_timeline_data_with<Tz: TimeZone>(
    source: &mut dyn UniformSource,
    now: DateTime<Tz>,
) -> Vec<TimelineDataPoint> {
    (0..=TIMELINE_WINDOW_MINUTES)
        .rev()
        .map(|minutes_ago| {
            let at = now.clone() - Duration::minutes(minutes_ago);
            let peak = is_peak_hour(at.hour());
            let modifier = if peak { TIMELINE_PEAK_MODIFIER } else { 1.0 };

            let mos = source.uniform(3.2, 4.8) * modifier;
            let jitter = source.uniform(5.0, 35.0) / modifier;
            let latency = source.uniform(20.0, 90.0) / modifier;
            let dropped_rate = source.uniform(0.5, 4.0) / modifier;

            let insight = detect_insight(
                source,
                mos,
                jitter,
                dropped_rate,
                peak,
                at.minute(),
            );

            TimelineDataPoint {
                timestamp: at.fixed_offset(),
                mos,
                jitter,
                latency,
                dropped_rate,
                insight,
            }
        })
        .collect()
}

/// First matching anomaly rule wins; at most one insight per point.
///
/// The capacity figure for the peak-traffic insight is only drawn from
/// `source` when that rule fires.
pub fn detect_insight(
    source: &mut dyn UniformSource,
    mos: f64,
    jitter: f64,
    dropped_rate: f64,
    peak: bool,
    minute: u32,
) -> Option<String> {
    if mos < INSIGHT_MOS_FLOOR {
        Some(format!(
            "MOS dropped to {:.1} due to high network congestion",
            mos
        ))
    } else if jitter > INSIGHT_JITTER_CEILING_MS {
        Some(format!(
            "High jitter detected ({:.0}ms) - possible network instability",
            jitter
        ))
    } else if dropped_rate > INSIGHT_DROP_RATE_CEILING {
        Some(format!(
            "Elevated drop rate ({:.1}%) - recommend load balancing",
            dropped_rate
        ))
    } else if peak && minute == 0 {
        let capacity = source.uniform(75.0, 95.0).floor() as u32;
        Some(format!(
            "Peak hour traffic detected - capacity at {}%",
            capacity
        ))
    } else {
        None
    }
}

/// The most recent `limit` insights, oldest first.
pub fn recent_insights(timeline: &[TimelineDataPoint], limit: usize) -> Vec<Insight> {
    let annotated: Vec<Insight> = timeline
        .iter()
        .filter_map(|p| {
            p.insight.as_ref().map(|message| Insight {
                timestamp: p.timestamp,
                message: message.clone(),
            })
        })
        .collect();
    let skip = annotated.len().saturating_sub(limit);
    annotated.into_iter().skip(skip).collect()
}
