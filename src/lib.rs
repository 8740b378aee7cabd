// Library crate; main.rs and the integration tests both build on it.

pub mod config;
pub mod error;
pub mod filters;
pub mod metrics;
pub mod overview;
pub mod refresher;
pub mod routes;
pub mod sampling;
pub mod server;
pub mod simulator;
pub mod state;
pub mod timeline;
pub mod towers;

pub use metrics::{generate_call_metrics, MetricSample};
pub use simulator::{simulate_call, SimulatorInput, SimulatorResult};
pub use timeline::{generate_timeline_data, TimelineDataPoint};
pub use towers::{generate_tower_performance, Tower, TowerPerformanceSample, TOWER_CATALOG};
