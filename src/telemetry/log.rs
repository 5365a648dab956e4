//! Flight logs written by the live flight software.
//!
//! A full log holds `mission_info`, `flight_data`, `stages_data` and
//! `data_summary`; an error dump holds only `error` and `flight_data`.
//! Only `flight_data` is required here, the per-stage split and summary
//! are recomputed from it.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::TelemetryError;

/// File-name prefix of complete flight logs. Names end in a
/// `YYYYMMDD_HHMMSS` timestamp, so lexicographic order is chronological.
pub const FLIGHT_LOG_PREFIX: &str = "avangard1_full_flight_";

/// Altitude at which the flight software separates the first stage, m.
pub const SEPARATION_ALTITUDE: f64 = 17_000.0;

/// One recorded telemetry point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ReferenceSample {
    pub mission_time: f64,  // s
    pub altitude: f64,      // m
    pub speed: f64,         // m/s
    #[serde(default)]
    pub pitch: f64,         // deg
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MissionInfo {
    pub name: String,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub total_duration: f64,
    #[serde(default)]
    pub data_collection_stopped: bool,
    #[serde(default)]
    pub first_stage_separated: bool,
    #[serde(default)]
    pub second_stage_ignited: bool,
    #[serde(default)]
    pub satellite_deployed: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlightLog {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mission_info: Option<MissionInfo>,
    /// Present in error dumps.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub flight_data: Vec<ReferenceSample>,
}

/// Flight data split at first-stage separation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StageSplit {
    pub separation_time: Option<f64>,
    pub first_stage: Vec<ReferenceSample>,
    pub second_stage: Vec<ReferenceSample>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ValueRange {
    pub min: f64,
    pub max: f64,
}

impl ValueRange {
    fn of(values: impl Iterator<Item = f64>) -> Self {
        values
            .fold(None, |acc: Option<ValueRange>, v| match acc {
                None => Some(ValueRange { min: v, max: v }),
                Some(r) => Some(ValueRange { min: r.min.min(v), max: r.max.max(v) }),
            })
            .unwrap_or(ValueRange { min: 0.0, max: 0.0 })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DataSummary {
    pub total_points: usize,
    pub first_stage_points: usize,
    pub second_stage_points: usize,
    pub first_stage_duration: f64,
    pub second_stage_duration: f64,
    pub altitude_range: ValueRange,
    pub speed_range: ValueRange,
    pub pitch_range: ValueRange,
}

impl FlightLog {
    pub fn from_json_str(s: &str) -> Result<Self, TelemetryError> {
        Ok(serde_json::from_str(s)?)
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, TelemetryError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|source| TelemetryError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&contents)
    }

    /// Samples up to and including the first one above
    /// `separation_altitude` belong to stage 1. Without a crossing the
    /// whole log is stage 1.
    pub fn split_stages(&self, separation_altitude: f64) -> StageSplit {
        let separation_time = self
            .flight_data
            .iter()
            .find(|s| s.altitude > separation_altitude)
            .map(|s| s.mission_time);

        let (first_stage, second_stage) = match separation_time {
            Some(t_sep) => self
                .flight_data
                .iter()
                .copied()
                .partition(|s| s.mission_time <= t_sep),
            None => (self.flight_data.clone(), Vec::new()),
        };

        StageSplit { separation_time, first_stage, second_stage }
    }

    pub fn summary(&self, separation_altitude: f64) -> DataSummary {
        let split = self.split_stages(separation_altitude);
        let first_end = split.first_stage.last().map(|s| s.mission_time);
        let second_end = split.second_stage.last().map(|s| s.mission_time);

        DataSummary {
            total_points: self.flight_data.len(),
            first_stage_points: split.first_stage.len(),
            second_stage_points: split.second_stage.len(),
            first_stage_duration: first_end.unwrap_or(0.0),
            second_stage_duration: match (first_end, second_end) {
                (Some(a), Some(b)) => b - a,
                _ => 0.0,
            },
            altitude_range: ValueRange::of(self.flight_data.iter().map(|s| s.altitude)),
            speed_range: ValueRange::of(self.flight_data.iter().map(|s| s.speed)),
            pitch_range: ValueRange::of(self.flight_data.iter().map(|s| s.pitch)),
        }
    }
}

/// Most recent complete flight log in `dir`, if any.
pub fn find_latest<P: AsRef<Path>>(dir: P) -> Result<Option<PathBuf>, TelemetryError> {
    let dir = dir.as_ref();
    let entries = std::fs::read_dir(dir).map_err(|source| TelemetryError::Io {
        path: dir.to_path_buf(),
        source,
    })?;

    let latest = entries
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| {
            path.file_name()
                .and_then(|n| n.to_str())
                .map(|n| n.starts_with(FLIGHT_LOG_PREFIX) && n.ends_with(".json"))
                .unwrap_or(false)
        })
        .max_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(latest)
}
