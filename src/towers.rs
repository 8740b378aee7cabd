use chrono::{DateTime, Duration, FixedOffset, Local, TimeZone};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::config::TOWER_HISTORY_HOURS;
use crate::error::DashboardError;
use crate::sampling::{thread_source, UniformSource};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CongestionLevel {
    Low,
    Medium,
    High,
    Critical,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Technology {
    #[serde(rename = "5G")]
    FiveG,
    #[serde(rename = "LTE")]
    Lte,
    #[serde(rename = "VoLTE")]
    VoLte,
}

impl Technology {
    pub fn as_str(&self) -> &'static str {
        match self {
            Technology::FiveG => "5G",
            Technology::Lte => "LTE",
            Technology::VoLte => "VoLTE",
        }
    }
}

impl fmt::Display for Technology {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Technology {
    type Err = DashboardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "5G" => Ok(Technology::FiveG),
            "LTE" => Ok(Technology::Lte),
            "VoLTE" => Ok(Technology::VoLte),
            other => Err(DashboardError::invalid("technology", other)),
        }
    }
}

/// One hour of a single tower's load and quality.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TowerPerformanceSample {
    pub timestamp: DateTime<FixedOffset>,
    pub mos: f64,
    pub congestion: f64,
    pub dropped_calls: u32,
    pub active_calls: u32,
}

/// Fixed catalog data for a tower; everything except the performance history.
#[derive(Debug, Clone, Copy)]
pub struct TowerSeed {
    pub id: &'static str,
    pub name: &'static str,
    pub lat: f64,
    pub lng: f64,
    pub region: &'static str,
    pub avg_mos: f64,
    pub congestion_level: CongestionLevel,
    pub active_calls: u32,
    pub capacity: u32,
    pub technology: Technology,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Tower {
    pub id: String,
    pub name: String,
    pub lat: f64,
    pub lng: f64,
    pub region: String,
    pub avg_mos: f64,
    pub congestion_level: CongestionLevel,
    pub active_calls: u32,
    pub capacity: u32,
    pub technology: Technology,
    pub performance: Vec<TowerPerformanceSample>,
}

impl Tower {
    /// Active calls as a percentage of capacity. Overloaded towers exceed 100.
    pub fn utilization_percent(&self) -> f64 {
        if self.capacity == 0 {
            return 0.0;
        }
        self.active_calls as f64 / self.capacity as f64 * 100.0
    }
}

// Bell network simulation, cell sites across Canada.
pub const TOWER_CATALOG: &[TowerSeed] = &[
    TowerSeed {
        id: "TOR-001",
        name: "Toronto Downtown",
        lat: 43.6532,
        lng: -79.3832,
        region: "Ontario",
        avg_mos: 4.2,
        congestion_level: CongestionLevel::Medium,
        active_calls: 342,
        capacity: 500,
        technology: Technology::FiveG,
    },
    TowerSeed {
        id: "TOR-002",
        name: "Toronto Midtown",
        lat: 43.6896,
        lng: -79.3982,
        region: "Ontario",
        avg_mos: 4.5,
        congestion_level: CongestionLevel::Low,
        active_calls: 189,
        capacity: 400,
        technology: Technology::FiveG,
    },
    TowerSeed {
        id: "MTL-001",
        name: "Montreal Centre",
        lat: 45.5017,
        lng: -73.5673,
        region: "Quebec",
        avg_mos: 4.1,
        congestion_level: CongestionLevel::High,
        active_calls: 456,
        capacity: 500,
        technology: Technology::Lte,
    },
    TowerSeed {
        id: "MTL-002",
        name: "Montreal East",
        lat: 45.5485,
        lng: -73.5493,
        region: "Quebec",
        avg_mos: 3.8,
        congestion_level: CongestionLevel::Critical,
        active_calls: 478,
        capacity: 450,
        technology: Technology::Lte,
    },
    TowerSeed {
        id: "VAN-001",
        name: "Vancouver Downtown",
        lat: 49.2827,
        lng: -123.1207,
        region: "British Columbia",
        avg_mos: 4.4,
        congestion_level: CongestionLevel::Low,
        active_calls: 234,
        capacity: 450,
        technology: Technology::FiveG,
    },
    TowerSeed {
        id: "CAL-001",
        name: "Calgary Central",
        lat: 51.0447,
        lng: -114.0719,
        region: "Alberta",
        avg_mos: 4.3,
        congestion_level: CongestionLevel::Medium,
        active_calls: 267,
        capacity: 400,
        technology: Technology::VoLte,
    },
    TowerSeed {
        id: "OTT-001",
        name: "Ottawa Downtown",
        lat: 45.4215,
        lng: -75.6972,
        region: "Ontario",
        avg_mos: 4.6,
        congestion_level: CongestionLevel::Low,
        active_calls: 156,
        capacity: 350,
        technology: Technology::FiveG,
    },
    TowerSeed {
        id: "HAL-001",
        name: "Halifax Metro",
        lat: 44.6488,
        lng: -63.5752,
        region: "Nova Scotia",
        avg_mos: 3.9,
        congestion_level: CongestionLevel::Medium,
        active_calls: 198,
        capacity: 300,
        technology: Technology::Lte,
    },
];

/// Hourly performance history for one tower (13 samples, oldest first).
pub fn generate_tower_performance() -> Vec<TowerPerformanceSample> {
    generate_tower_performance_with(&mut thread_source(), Local::now())
}

pub fn generate_tower_performance_with<Tz: TimeZone>(
    source: &mut dyn UniformSource,
    now: DateTime<Tz>,
) -> Vec<TowerPerformanceSample> {
    (0..=TOWER_HISTORY_HOURS)
        .rev()
        .map(|hours_ago| TowerPerformanceSample {
            timestamp: (now.clone() - Duration::hours(hours_ago)).fixed_offset(),
            mos: source.uniform(3.2, 4.9),
            congestion: source.uniform(20.0, 85.0),
            dropped_calls: source.uniform(0.0, 15.0).floor() as u32,
            active_calls: source.uniform(50.0, 500.0).floor() as u32,
        })
        .collect()
}

/// Materialize the catalog with a fresh, independent history per tower.
pub fn build_towers<Tz: TimeZone>(source: &mut dyn UniformSource, now: DateTime<Tz>) -> Vec<Tower> {
    TOWER_CATALOG
        .iter()
        .map(|seed| Tower {
            id: seed.id.to_string(),
            name: seed.name.to_string(),
            lat: seed.lat,
            lng: seed.lng,
            region: seed.region.to_string(),
            avg_mos: seed.avg_mos,
            congestion_level: seed.congestion_level,
            active_calls: seed.active_calls,
            capacity: seed.capacity,
            technology: seed.technology,
            performance: generate_tower_performance_with(source, now.clone()),
        })
        .collect()
}

/// Distinct catalog regions in first-seen order.
pub fn regions() -> Vec<&'static str> {
    let mut out: Vec<&'static str> = Vec::new();
    for seed in TOWER_CATALOG {
        if !out.contains(&seed.region) {
            out.push(seed.region);
        }
    }
    out
}
