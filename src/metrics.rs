use chrono::{DateTime, Duration, FixedOffset, Local, TimeZone, Timelike};
use serde::Serialize;

use crate::config::{
    METRICS_HISTORY_HOURS, METRICS_PEAK_MODIFIER, PEAK_CALL_VOLUME_FACTOR, PEAK_HOUR_WINDOWS,
};
use crate::sampling::{thread_source, UniformSource};

/// One hour of aggregate call-quality telemetry.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricSample {
    pub timestamp: DateTime<FixedOffset>,
    pub call_success_rate: f64,
    pub dropped_call_rate: f64,
    pub avg_setup_time_ms: f64,
    pub mos_score: f64,
    pub jitter_ms: f64,
    pub latency_ms: f64,
    pub total_calls: u64,
    pub successful_calls: u64,
    pub dropped_calls: u64,
}

/// Whether a local hour-of-day falls inside one of the peak windows.
pub fn is_peak_hour(hour: u32) -> bool {
    PEAK_HOUR_WINDOWS
        .iter()
        .any(|&(start, end)| hour >= start && hour <= end)
}

/// Hourly metrics for the past 24 hours (25 samples, oldest first).
pub fn generate_call_metrics() -> Vec<MetricSample> {
    generate_call_metrics_with(&mut thread_source(), Local::now())
}

/// Peak hours are judged in `now`'s time zone at each sample's own instant,
/// so a `Local` clock follows DST changes inside the window.
pub fn generate_call_metrics_with<Tz: TimeZone>(
    source: &mut dyn UniformSource,
    now: DateTime<Tz>,
) -> Vec<MetricSample> {
    (0..=METRICS_HISTORY_HOURS)
        .rev()
        .map(|hours_ago| {
            let timestamp = now.clone() - Duration::hours(hours_ago);
            hourly_sample(source, &timestamp)
        })
        .collect()
}

fn hourly_sample<Tz: TimeZone>(source: &mut dyn UniformSource, at: &DateTime<Tz>) -> MetricSample {
    let timestamp = at.fixed_offset();
    let peak = is_peak_hour(at.hour());
    let modifier = if peak { METRICS_PEAK_MODIFIER } else { 1.0 };
    let volume_factor = if peak { PEAK_CALL_VOLUME_FACTOR } else { 1.0 };

    let total_calls = (source.uniform(5000.0, 15000.0) * volume_factor).floor() as u64;
    let success_rate = source.uniform(96.0, 99.5) * modifier;
    let successful_calls = ((total_calls as f64) * (success_rate / 100.0)).floor() as u64;
    let dropped_calls = total_calls - successful_calls;

    MetricSample {
        timestamp,
        call_success_rate: success_rate,
        dropped_call_rate: 100.0 - success_rate,
        avg_setup_time_ms: source.uniform(150.0, 400.0) / modifier,
        mos_score: source.uniform(3.5, 4.8) * modifier,
        jitter_ms: source.uniform(5.0, 30.0) / modifier,
        latency_ms: source.uniform(20.0, 80.0) / modifier,
        total_calls,
        successful_calls,
        dropped_calls,
    }
}

/// Call volume point for the volume chart.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CallVolumePoint {
    pub timestamp: DateTime<FixedOffset>,
    pub total_calls: u64,
    pub dropped_calls: u64,
}

pub fn call_volume(metrics: &[MetricSample]) -> Vec<CallVolumePoint> {
    metrics
        .iter()
        .map(|m| CallVolumePoint {
            timestamp: m.timestamp,
            total_calls: m.total_calls,
            dropped_calls: m.dropped_calls,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sampling::ScriptedSource;
    use chrono::{LocalResult, NaiveDate, NaiveDateTime, Offset};

    /// US Eastern around the 2024 fall-back, which happens at 06:00 UTC on Nov 3.
    #[derive(Debug, Clone, Copy)]
    struct EasternFallBack;

    impl EasternFallBack {
        fn switch() -> NaiveDateTime {
            NaiveDate::from_ymd_opt(2024, 11, 3)
                .unwrap()
                .and_hms_opt(6, 0, 0)
                .unwrap()
        }
    }

    impl TimeZone for EasternFallBack {
        type Offset = FixedOffset;

        fn from_offset(_: &FixedOffset) -> Self {
            EasternFallBack
        }

        fn offset_from_local_date(&self, _: &NaiveDate) -> LocalResult<FixedOffset> {
            LocalResult::Single(FixedOffset::west_opt(5 * 3600).unwrap())
        }

        fn offset_from_local_datetime(&self, _: &NaiveDateTime) -> LocalResult<FixedOffset> {
            LocalResult::Single(FixedOffset::west_opt(5 * 3600).unwrap())
        }

        fn offset_from_utc_date(&self, _: &NaiveDate) -> FixedOffset {
            FixedOffset::west_opt(5 * 3600).unwrap()
        }

        fn offset_from_utc_datetime(&self, utc: &NaiveDateTime) -> FixedOffset {
            let hours = if *utc < Self::switch() { 4 } else { 5 };
            FixedOffset::west_opt(hours * 3600).unwrap()
        }
    }

    fn at(hour: u32, minute: u32) -> DateTime<FixedOffset> {
        FixedOffset::east_opt(0)
            .unwrap()
            .with_ymd_and_hms(2024, 3, 14, hour, minute, 0)
            .unwrap()
    }

    #[test]
    fn test_peak_windows_inclusive() {
        for hour in [8, 9, 10, 17, 18, 19, 20] {
            assert!(is_peak_hour(hour), "hour {} should be peak", hour);
        }
        for hour in [0, 7, 11, 12, 16, 21, 23] {
            assert!(!is_peak_hour(hour), "hour {} should be off-peak", hour);
        }
    }

    #[test]
    fn test_off_peak_sample_from_midpoints() {
        let mut source = ScriptedSource::constant(0.5);
        let sample = hourly_sample(&mut source, &at(3, 0));
        assert_eq!(sample.total_calls, 10_000);
        assert!((sample.call_success_rate - 97.75).abs() < 1e-9);
        assert_eq!(sample.successful_calls, 9_775);
        assert_eq!(sample.dropped_calls, 225);
        assert!((sample.avg_setup_time_ms - 275.0).abs() < 1e-9);
        assert!((sample.mos_score - 4.15).abs() < 1e-9);
        assert!((sample.jitter_ms - 17.5).abs() < 1e-9);
        assert!((sample.latency_ms - 50.0).abs() < 1e-9);
        assert_eq!(source.draws(), 6);
    }

    #[test]
    fn test_peak_sample_applies_modifier() {
        let mut source = ScriptedSource::constant(0.0);
        let sample = hourly_sample(&mut source, &at(18, 0));
        assert_eq!(sample.total_calls, 7_500);
        assert!((sample.call_success_rate - 96.0 * 0.95).abs() < 1e-9);
        assert!((sample.avg_setup_time_ms - 150.0 / 0.95).abs() < 1e-9);
        assert!((sample.mos_score - 3.5 * 0.95).abs() < 1e-9);
        assert!((sample.latency_ms - 20.0 / 0.95).abs() < 1e-9);
    }

    #[test]
    fn test_series_shape_and_spacing() {
        let now = at(12, 30);
        let metrics = generate_call_metrics_with(&mut ScriptedSource::constant(0.25), now);
        assert_eq!(metrics.len(), 25);
        assert_eq!(metrics[0].timestamp, now - Duration::hours(24));
        assert_eq!(metrics[24].timestamp, now);
        for pair in metrics.windows(2) {
            assert_eq!(pair[1].timestamp - pair[0].timestamp, Duration::hours(1));
        }
    }

    #[test]
    fn test_call_volume_mirrors_metrics() {
        let metrics = generate_call_metrics_with(&mut ScriptedSource::constant(0.5), at(0, 0));
        let volume = call_volume(&metrics);
        assert_eq!(volume.len(), metrics.len());
        assert_eq!(volume[3].total_calls, metrics[3].total_calls);
        assert_eq!(volume[3].dropped_calls, metrics[3].dropped_calls);
    }

    #[test]
    fn test_serializes_camel_case() {
        let metrics = generate_call_metrics_with(&mut ScriptedSource::constant(0.5), at(3, 0));
        let json = serde_json::to_value(&metrics[0]).unwrap();
        assert!(json.get("callSuccessRate").is_some());
        assert!(json.get("droppedCallRate").is_some());
        assert!(json.get("avgSetupTimeMs").is_some());
    }

    #[test]
    fn test_peak_hours_follow_dst_change() {
        // 20:30 EST on Nov 3; 24h earlier the clock read 21:30 EDT
        let utc = NaiveDate::from_ymd_opt(2024, 11, 4)
            .unwrap()
            .and_hms_opt(1, 30, 0)
            .unwrap();
        let now = EasternFallBack.from_utc_datetime(&utc);
        let metrics = generate_call_metrics_with(&mut ScriptedSource::constant(0.5), now);

        let oldest = &metrics[0];
        assert_eq!(oldest.timestamp.offset().fix().local_minus_utc(), -4 * 3600);
        assert_eq!(oldest.timestamp.hour(), 21);
        assert_eq!(oldest.total_calls, 10_000);

        let newest = &metrics[24];
        assert_eq!(newest.timestamp.offset().fix().local_minus_utc(), -5 * 3600);
        assert_eq!(newest.timestamp.hour(), 20);
        assert_eq!(newest.total_calls, 15_000);
    }
}
