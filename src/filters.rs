use chrono::Duration;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::DashboardError;
use crate::metrics::MetricSample;
use crate::towers::{Technology, Tower};

pub const ALL: &str = "all";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TimeRange {
    #[serde(rename = "1h")]
    OneHour,
    #[serde(rename = "6h")]
    SixHours,
    #[serde(rename = "12h")]
    TwelveHours,
    #[default]
    #[serde(rename = "24h")]
    DayHours,
    #[serde(rename = "7d")]
    Week,
}

impl TimeRange {
    pub fn duration(&self) -> Duration {
        match self {
            TimeRange::OneHour => Duration::hours(1),
            TimeRange::SixHours => Duration::hours(6),
            TimeRange::TwelveHours => Duration::hours(12),
            TimeRange::DayHours => Duration::hours(24),
            TimeRange::Week => Duration::days(7),
        }
    }
}

impl FromStr for TimeRange {
    type Err = DashboardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "1h" => Ok(TimeRange::OneHour),
            "6h" => Ok(TimeRange::SixHours),
            "12h" => Ok(TimeRange::TwelveHours),
            "24h" => Ok(TimeRange::DayHours),
            "7d" => Ok(TimeRange::Week),
            other => Err(DashboardError::invalid("timeRange", other)),
        }
    }
}

/// Dashboard view filters. `None` region/technology means "all".
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterState {
    pub region: Option<String>,
    pub time_range: TimeRange,
    pub technology: Option<Technology>,
}

/// Filter parameters as they arrive on a query string.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterQuery {
    pub region: Option<String>,
    pub time_range: Option<String>,
    pub technology: Option<String>,
}

impl TryFrom<FilterQuery> for FilterState {
    type Error = DashboardError;

    fn try_from(q: FilterQuery) -> Result<Self, Self::Error> {
        let region = q.region.filter(|r| !r.is_empty() && r != ALL);
        let time_range = match q.time_range.as_deref() {
            None | Some("") => TimeRange::default(),
            Some(raw) => raw.parse()?,
        };
        let technology = match q.technology.as_deref() {
            None | Some("") | Some(ALL) => None,
            Some(raw) => Some(raw.parse()?),
        };
        Ok(FilterState {
            region,
            time_range,
            technology,
        })
    }
}

impl FilterState {
    pub fn matches_tower(&self, tower: &Tower) -> bool {
        if let Some(region) = &self.region {
            if &tower.region != region {
                return false;
            }
        }
        if let Some(technology) = self.technology {
            if tower.technology != technology {
                return false;
            }
        }
        true
    }

    pub fn apply_towers<'a>(&self, towers: &'a [Tower]) -> Vec<&'a Tower> {
        towers.iter().filter(|t| self.matches_tower(t)).collect()
    }

    /// Samples no older than the time range, measured from the newest sample.
    pub fn apply_metrics<'a>(&self, metrics: &'a [MetricSample]) -> &'a [MetricSample] {
        let Some(newest) = metrics.last() else {
            return metrics;
        };
        let cutoff = newest.timestamp - self.time_range.duration();
        let start = metrics
            .iter()
            .position(|m| m.timestamp >= cutoff)
            .unwrap_or(metrics.len());
        &metrics[start..]
    }
}
