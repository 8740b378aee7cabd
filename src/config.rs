use clap::Parser;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};

/// Call Quality Dashboard: serves simulated network call-quality telemetry.
#[derive(Parser, Debug, Clone)]
#[command(name = "call-quality-dashboard")]
pub struct CliArgs {
    /// Dashboard HTTP port
    #[arg(long = "port", default_value_t = DEFAULT_DASHBOARD_PORT)]
    pub port: u16,

    /// Address to bind the HTTP listener on
    #[arg(long = "bind", default_value_t = IpAddr::V4(Ipv4Addr::UNSPECIFIED))]
    pub bind: IpAddr,

    /// Seconds between automatic data refreshes
    #[arg(short = 'r', long = "refresh-secs", default_value_t = REFRESH_INTERVAL_SECS)]
    pub refresh_secs: u64,

    /// Artificial delay before a simulation result is returned
    #[arg(long = "simulation-delay-ms", default_value_t = SIMULATION_DELAY_MS)]
    pub simulation_delay_ms: u64,

    /// Seed the telemetry generators for reproducible output
    #[arg(short = 's', long = "seed")]
    pub seed: Option<u64>,
}

#[derive(Debug, Clone)]
pub struct DashboardConfig {
    pub bind: IpAddr,
    pub port: u16,
    pub refresh_secs: u64,
    pub simulation_delay_ms: u64,
    pub seed: Option<u64>,
}

// Server constants
pub const DEFAULT_DASHBOARD_PORT: u16 = 9875;

// Refresh constants
pub const REFRESH_INTERVAL_SECS: u64 = 30;
pub const MIN_REFRESH_INTERVAL_SECS: u64 = 1;
pub const REFRESH_SUMMARY_EVERY: u64 = 10;
pub const SNAPSHOT_CHANNEL_CAPACITY: usize = 16;

// Simulator constants
pub const SIMULATION_DELAY_MS: u64 = 800;

// Series shapes
pub const METRICS_HISTORY_HOURS: i64 = 24;
pub const TOWER_HISTORY_HOURS: i64 = 12;
pub const TIMELINE_WINDOW_MINUTES: i64 = 60;
pub const RECENT_INSIGHTS_LIMIT: usize = 5;

// Peak windows, inclusive local hours (8-10 AM, 5-8 PM)
pub const PEAK_HOUR_WINDOWS: &[(u32, u32)] = &[(8, 10), (17, 20)];
pub const METRICS_PEAK_MODIFIER: f64 = 0.95;
pub const TIMELINE_PEAK_MODIFIER: f64 = 0.9;
pub const PEAK_CALL_VOLUME_FACTOR: f64 = 1.5;

// Insight thresholds
pub const INSIGHT_MOS_FLOOR: f64 = 3.5;
pub const INSIGHT_JITTER_CEILING_MS: f64 = 28.0;
pub const INSIGHT_DROP_RATE_CEILING: f64 = 3.0;

// Cities that escape the rural coverage penalty (case-sensitive substrings)
pub const URBAN_LOCATIONS: &[&str] = &["Toronto", "Montreal", "Vancouver", "Calgary", "Ottawa"];

impl DashboardConfig {
    pub fn from_args(args: CliArgs) -> Self {
        DashboardConfig {
            bind: args.bind,
            port: args.port,
            refresh_secs: args.refresh_secs.max(MIN_REFRESH_INTERVAL_SECS),
            simulation_delay_ms: args.simulation_delay_ms,
            seed: args.seed,
        }
    }

    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.bind, self.port)
    }
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            bind: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: DEFAULT_DASHBOARD_PORT,
            refresh_secs: REFRESH_INTERVAL_SECS,
            simulation_delay_ms: SIMULATION_DELAY_MS,
            seed: None,
        }
    }
}
