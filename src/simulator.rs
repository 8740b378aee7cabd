//! Rule-based call quality prediction for the "what-if" simulator.
//!
//! [`simulate_call`] starts from a fixed baseline, applies additive
//! adjustments in a fixed order, clamps, then classifies risk. It draws no
//! randomness: identical inputs always produce identical results.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::config::URBAN_LOCATIONS;
use crate::error::DashboardError;

pub const PEAK_HOURS_ADVICE: &str = "Consider scheduling calls outside peak hours (8-10 AM, 5-8 PM)";
pub const UPGRADE_CONNECTION_ADVICE: &str = "Upgrade to LTE or 5G for better call quality";
pub const UPGRADE_DEVICE_ADVICE: &str = "Consider upgrading to a newer device with HD Voice support";
pub const RURAL_COVERAGE_ADVICE: &str =
    "Rural areas may experience reduced coverage - consider WiFi calling";
pub const OPTIMAL_ADVICE: &str = "Current configuration is optimal for call quality";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeOfDay {
    Morning,
    Afternoon,
    Evening,
    Night,
    Peak,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeviceType {
    Smartphone,
    Tablet,
    Iot,
    Legacy,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConnectionType {
    #[serde(rename = "5G")]
    FiveG,
    #[serde(rename = "LTE")]
    Lte,
    #[serde(rename = "VoLTE")]
    VoLte,
    #[serde(rename = "3G")]
    ThreeG,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl FromStr for TimeOfDay {
    type Err = DashboardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "morning" => Ok(TimeOfDay::Morning),
            "afternoon" => Ok(TimeOfDay::Afternoon),
            "evening" => Ok(TimeOfDay::Evening),
            "night" => Ok(TimeOfDay::Night),
            "peak" => Ok(TimeOfDay::Peak),
            other => Err(DashboardError::invalid("timeOfDay", other)),
        }
    }
}

impl FromStr for DeviceType {
    type Err = DashboardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "smartphone" => Ok(DeviceType::Smartphone),
            "tablet" => Ok(DeviceType::Tablet),
            "iot" => Ok(DeviceType::Iot),
            "legacy" => Ok(DeviceType::Legacy),
            other => Err(DashboardError::invalid("deviceType", other)),
        }
    }
}

impl FromStr for ConnectionType {
    type Err = DashboardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "5G" => Ok(ConnectionType::FiveG),
            "LTE" => Ok(ConnectionType::Lte),
            "VoLTE" => Ok(ConnectionType::VoLte),
            "3G" => Ok(ConnectionType::ThreeG),
            other => Err(DashboardError::invalid("connectionType", other)),
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            RiskLevel::Low => "low",
            RiskLevel::Medium => "medium",
            RiskLevel::High => "high",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulatorInput {
    pub location: String,
    pub time_of_day: TimeOfDay,
    pub device_type: DeviceType,
    pub connection_type: ConnectionType,
}

/// Raw simulator form as submitted by a client. Every field is required.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulatorRequest {
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub time_of_day: String,
    #[serde(default)]
    pub device_type: String,
    #[serde(default)]
    pub connection_type: String,
}

impl TryFrom<SimulatorRequest> for SimulatorInput {
    type Error = DashboardError;

    fn try_from(req: SimulatorRequest) -> Result<Self, Self::Error> {
        let location = required("location", &req.location)?;
        let time_of_day = required("timeOfDay", &req.time_of_day)?.parse()?;
        let device_type = required("deviceType", &req.device_type)?.parse()?;
        let connection_type = required("connectionType", &req.connection_type)?.parse()?;

        Ok(SimulatorInput {
            location: location.to_string(),
            time_of_day,
            device_type,
            connection_type,
        })
    }
}

fn required<'a>(field: &'static str, value: &'a str) -> Result<&'a str, DashboardError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        Err(DashboardError::MissingField(field))
    } else {
        Ok(trimmed)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulatorResult {
    pub predicted_reliability: f64,
    pub predicted_mos: f64,
    pub predicted_latency: f64,
    pub predicted_jitter: f64,
    pub recommendations: Vec<String>,
    pub risk_level: RiskLevel,
}

/// Running prediction values before they are reported.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PredictedQuality {
    pub reliability: f64,
    pub mos: f64,
    pub latency: f64,
    pub jitter: f64,
}

impl PredictedQuality {
    pub const BASELINE: PredictedQuality = PredictedQuality {
        reliability: 98.0,
        mos: 4.5,
        latency: 30.0,
        jitter: 10.0,
    };

    pub fn clamped(self) -> Self {
        PredictedQuality {
            reliability: self.reliability.clamp(85.0, 99.9),
            mos: self.mos.clamp(2.5, 5.0),
            latency: self.latency.clamp(15.0, 150.0),
            jitter: self.jitter.clamp(3.0, 50.0),
        }
    }
}

/// Whether a location names one of the covered urban centres.
pub fn is_urban(location: &str) -> bool {
    URBAN_LOCATIONS.iter().any(|city| location.contains(city))
}

pub fn simulate_call(input: &SimulatorInput) -> SimulatorResult {
    let mut q = PredictedQuality::BASELINE;
    let mut recommendations: Vec<String> = Vec::new();

    match input.time_of_day {
        TimeOfDay::Peak => {
            q.reliability -= 3.0;
            q.mos -= 0.5;
            q.latency += 25.0;
            q.jitter += 10.0;
            recommendations.push(PEAK_HOURS_ADVICE.to_string());
        }
        TimeOfDay::Evening => {
            q.reliability -= 1.5;
            q.mos -= 0.2;
            q.latency += 10.0;
            q.jitter += 5.0;
        }
        TimeOfDay::Morning | TimeOfDay::Afternoon | TimeOfDay::Night => {}
    }

    match input.connection_type {
        ConnectionType::FiveG => {
            q.mos += 0.3;
            q.latency -= 15.0;
            q.jitter -= 3.0;
        }
        ConnectionType::ThreeG => {
            q.reliability -= 5.0;
            q.mos -= 0.8;
            q.latency += 40.0;
            q.jitter += 15.0;
            recommendations.push(UPGRADE_CONNECTION_ADVICE.to_string());
        }
        ConnectionType::VoLte => {
            q.mos += 0.2;
            q.latency -= 10.0;
        }
        ConnectionType::Lte => {}
    }

    match input.device_type {
        DeviceType::Legacy => {
            q.reliability -= 2.0;
            q.mos -= 0.3;
            recommendations.push(UPGRADE_DEVICE_ADVICE.to_string());
        }
        DeviceType::Iot => {
            q.reliability -= 1.0;
            q.mos -= 0.4;
            q.latency += 20.0;
        }
        DeviceType::Smartphone | DeviceType::Tablet => {}
    }

    if !is_urban(&input.location) {
        q.reliability -= 2.0;
        q.mos -= 0.3;
        q.latency += 15.0;
        recommendations.push(RURAL_COVERAGE_ADVICE.to_string());
    }

    let q = q.clamped();
    let risk_level = classify_risk(q.reliability, q.mos);

    if recommendations.is_empty() {
        recommendations.push(OPTIMAL_ADVICE.to_string());
    }

    SimulatorResult {
        predicted_reliability: q.reliability,
        predicted_mos: q.mos,
        predicted_latency: q.latency,
        predicted_jitter: q.jitter,
        recommendations,
        risk_level,
    }
}

pub fn classify_risk(reliability: f64, mos: f64) -> RiskLevel {
    if reliability < 92.0 || mos < 3.5 {
        RiskLevel::High
    } else if reliability < 96.0 || mos < 4.0 {
        RiskLevel::Medium
    } else {
        RiskLevel::Low
    }
}
