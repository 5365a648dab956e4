use std::io::Write;
use std::path::Path;

use serde::Serialize;

use crate::config::SimulationConfig;
use crate::dynamics::TrajectorySample;
use crate::error::SimError;
use crate::sim::{SimEvent, Trajectory};
use crate::telemetry::log::DataSummary;
use crate::telemetry::Comparison;

/// A scalar extreme and when it occurred.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Peak {
    pub time: f64,
    pub value: f64,
}

/// Summary of one run, optionally with its telemetry comparison.
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub config: String,
    pub vehicle: String,
    pub guidance: String,
    pub step_size: f64,
    pub samples: usize,
    pub ideal_delta_v: f64,
    pub max_altitude: Option<Peak>,
    pub max_speed: Option<Peak>,
    pub final_state: Option<TrajectorySample>,
    pub events: Vec<SimEvent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comparison: Option<Comparison>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flight_log: Option<DataSummary>,
}

impl RunSummary {
    pub fn new(config: &SimulationConfig, trajectory: &Trajectory) -> Self {
        Self {
            config: trajectory.config_name.clone(),
            vehicle: config.vehicle.name.clone(),
            guidance: trajectory.guidance.clone(),
            step_size: trajectory.step_size,
            samples: trajectory.len(),
            ideal_delta_v: config.vehicle.total_delta_v(config.environment.g0),
            max_altitude: trajectory
                .max_altitude()
                .map(|s| Peak { time: s.time, value: s.altitude }),
            max_speed: trajectory
                .max_speed()
                .map(|s| Peak { time: s.time, value: s.speed }),
            final_state: trajectory.last().copied(),
            events: trajectory.events.clone(),
            comparison: None,
            flight_log: None,
        }
    }

    pub fn with_comparison(mut self, comparison: Comparison) -> Self {
        self.comparison = Some(comparison);
        self
    }

    pub fn with_flight_log(mut self, summary: DataSummary) -> Self {
        self.flight_log = Some(summary);
        self
    }
}

/// Write run summary as pretty JSON.
pub fn write_summary<W: Write>(writer: W, summary: &RunSummary) -> Result<(), serde_json::Error> {
    serde_json::to_writer_pretty(writer, summary)
}

/// Write run summary JSON to a file.
pub fn write_summary_file<P: AsRef<Path>>(path: P, summary: &RunSummary) -> Result<(), SimError> {
    let file = std::fs::File::create(path)?;
    write_summary(file, summary)?;
    Ok(())
}
