pub mod physics;
pub mod vehicle;
pub mod gnc;
pub mod dynamics;
pub mod sim;
pub mod telemetry;
pub mod io;
pub mod config;
pub mod error;

pub use config::{presets, RunConfig, SimulationConfig};
pub use error::{ConfigError, SimError, TelemetryError};
pub use sim::{simulate, simulate_with, Trajectory};
