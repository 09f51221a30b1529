//! Deal-planning engines behind the Dialogue partner enablement hub.

pub mod config;
pub mod error;
pub mod planning;
pub mod signals;
pub mod telemetry;
