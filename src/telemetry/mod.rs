//! Recorded flight telemetry and its comparison with simulated runs.

pub mod log;
pub mod reference;
pub mod compare;

pub use log::{find_latest, FlightLog, ReferenceSample, FLIGHT_LOG_PREFIX, SEPARATION_ALTITUDE};
pub use reference::{Interpolated, ReferenceSeries};
pub use compare::{compare, default_probe_times, Comparison, ProbeComparison};
