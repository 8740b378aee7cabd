pub mod dashboard;
pub mod health;
pub mod metrics;
pub mod simulator;
pub mod stream;
pub mod timeline;
pub mod towers;
