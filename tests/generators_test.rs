use call_quality_dashboard::metrics::{generate_call_metrics_with, is_peak_hour};
use call_quality_dashboard::sampling::{RngSource, ScriptedSource};
use call_quality_dashboard::timeline::{detect_insight, generate_timeline_data_with};
use call_quality_dashboard::towers::{build_towers, generate_tower_performance_with};
use call_quality_dashboard::{
    generate_call_metrics, generate_timeline_data, generate_tower_performance, TOWER_CATALOG,
};
use chrono::{DateTime, Duration, FixedOffset, TimeZone, Timelike};
use std::collections::HashSet;

const EPS: f64 = 1e-9;

fn at(hour: u32, minute: u32) -> DateTime<FixedOffset> {
    FixedOffset::east_opt(-5 * 3600)
        .unwrap()
        .with_ymd_and_hms(2024, 11, 5, hour, minute, 0)
        .unwrap()
}

#[test]
fn test_metric_invariants_over_many_runs() {
    for seed in 0..20 {
        let metrics = generate_call_metrics_with(&mut RngSource::seeded(seed), at(19, 42));
        assert_eq!(metrics.len(), 25);

        for m in &metrics {
            assert!((m.dropped_call_rate - (100.0 - m.call_success_rate)).abs() < EPS);
            assert_eq!(m.successful_calls + m.dropped_calls, m.total_calls);
            assert!(m.call_success_rate >= 91.2 - EPS && m.call_success_rate < 99.5);
            assert!(m.total_calls >= 5_000 && m.total_calls < 22_500);

            let peak = is_peak_hour(m.timestamp.hour());
            if peak {
                assert!(m.mos_score >= 3.5 * 0.95 - EPS && m.mos_score < 4.8 * 0.95);
                assert!(m.latency_ms >= 20.0 / 0.95 - EPS);
            } else {
                assert!(m.mos_score >= 3.5 && m.mos_score < 4.8);
                assert!(m.jitter_ms >= 5.0 && m.jitter_ms < 30.0);
                assert!(m.avg_setup_time_ms >= 150.0 && m.avg_setup_time_ms < 400.0);
            }
        }

        for pair in metrics.windows(2) {
            assert_eq!(pair[1].timestamp - pair[0].timestamp, Duration::hours(1));
        }
    }
}

#[test]
fn test_unseeded_metrics_hold_invariants() {
    let metrics = generate_call_metrics();
    assert_eq!(metrics.len(), 25);
    assert!(metrics
        .iter()
        .all(|m| m.successful_calls + m.dropped_calls == m.total_calls));
    assert!(metrics.windows(2).all(|p| p[0].timestamp < p[1].timestamp));
}

#[test]
fn test_timeline_invariants() {
    for seed in 0..20 {
        let data = generate_timeline_data_with(&mut RngSource::seeded(seed), at(9, 30));
        assert_eq!(data.len(), 61);
        for pair in data.windows(2) {
            assert_eq!(pair[1].timestamp - pair[0].timestamp, Duration::minutes(1));
        }

        for p in &data {
            let peak = is_peak_hour(p.timestamp.hour());
            let Some(insight) = &p.insight else {
                assert!(p.mos >= 3.5);
                assert!(p.jitter <= 28.0);
                assert!(p.dropped_rate <= 3.0);
                assert!(!(peak && p.timestamp.minute() == 0));
                continue;
            };
            if p.mos < 3.5 {
                assert!(insight.starts_with("MOS dropped to"));
            } else if p.jitter > 28.0 {
                assert!(insight.starts_with("High jitter detected"));
            } else if p.dropped_rate > 3.0 {
                assert!(insight.starts_with("Elevated drop rate"));
            } else {
                assert!(peak && p.timestamp.minute() == 0);
                assert!(insight.starts_with("Peak hour traffic detected"));
            }
        }
    }
}

#[test]
fn test_unseeded_timeline_shape() {
    let data = generate_timeline_data();
    assert_eq!(data.len(), 61);
    assert!(data.windows(2).all(|p| p[0].timestamp < p[1].timestamp));
}

#[test]
fn test_insight_priority_mos_over_jitter() {
    let mut source = ScriptedSource::constant(0.0);
    let insight = detect_insight(&mut source, 3.0, 30.0, 1.0, false, 12);
    assert_eq!(
        insight.as_deref(),
        Some("MOS dropped to 3.0 due to high network congestion")
    );
}

#[test]
fn test_tower_catalog() {
    assert_eq!(TOWER_CATALOG.len(), 8);
    let ids: HashSet<_> = TOWER_CATALOG.iter().map(|t| t.id).collect();
    assert_eq!(ids.len(), 8);
}

#[test]
fn test_tower_performance_shapes() {
    let towers = build_towers(&mut RngSource::seeded(3), at(14, 0));
    assert_eq!(towers.len(), 8);
    for tower in &towers {
        assert_eq!(tower.performance.len(), 13);
        for pair in tower.performance.windows(2) {
            assert_eq!(pair[1].timestamp - pair[0].timestamp, Duration::hours(1));
        }
        for p in &tower.performance {
            assert!(p.mos >= 3.2 && p.mos < 4.9);
            assert!(p.congestion >= 20.0 && p.congestion < 85.0);
            assert!(p.dropped_calls < 15);
            assert!(p.active_calls >= 50 && p.active_calls < 500);
        }
    }
}

#[test]
fn test_tower_performance_standalone() {
    assert_eq!(generate_tower_performance().len(), 13);
    let perf = generate_tower_performance_with(&mut ScriptedSource::constant(0.5), at(6, 0));
    assert_eq!(perf[12].timestamp, at(6, 0));
}

#[test]
fn test_seeded_generators_are_reproducible() {
    let a = generate_call_metrics_with(&mut RngSource::seeded(11), at(1, 0));
    let b = generate_call_metrics_with(&mut RngSource::seeded(11), at(1, 0));
    assert_eq!(a, b);
    let c = generate_call_metrics_with(&mut RngSource::seeded(12), at(1, 0));
    assert_ne!(a, c);
}
