use std::path::PathBuf;

use thiserror::Error;

/// Configuration loading and validation failures. A run with an invalid
/// configuration is rejected before the first step.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse TOML: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("unknown preset '{0}'")]
    UnknownPreset(String),
    #[error("vehicle has no stages")]
    NoStages,
    #[error("stage {stage}: burn duration must be positive, got {value}")]
    NonPositiveBurnDuration { stage: usize, value: f64 },
    #[error("stage {stage}: {field} must be positive, got {value}")]
    NonPositiveCutoff { stage: usize, field: &'static str, value: f64 },
    #[error("stage {stage}: {field} must not be negative, got {value}")]
    NegativeMass { stage: usize, field: &'static str, value: f64 },
    #[error("stage {stage}: {field} {value} s runs past the handover to the next stage at {burn_duration} s")]
    CutoffPastHandover { stage: usize, field: &'static str, value: f64, burn_duration: f64 },
    #[error("stage {stage}: dry mass {dry} exceeds wet mass {wet}")]
    DryExceedsWet { stage: usize, dry: f64, wet: f64 },
    #[error("stage {stage}: specific impulse must be positive, got {value}")]
    NonPositiveIsp { stage: usize, value: f64 },
    #[error("turn end {turn_end} s is before turn start {turn_start} s")]
    TurnEndBeforeStart { turn_start: f64, turn_end: f64 },
    #[error("{field} must be within [0, 90] deg, got {value}")]
    PitchOutOfRange { field: &'static str, value: f64 },
    #[error("{field} must be positive, got {value}")]
    NonPositive { field: &'static str, value: f64 },
    #[error("{field} must not be negative, got {value}")]
    Negative { field: &'static str, value: f64 },
    #[error("{field} must be finite, got {value}")]
    NonFinite { field: String, value: f64 },
    #[error("run of {steps:.3e} steps exceeds the limit of {limit}")]
    TooManySteps { steps: f64, limit: usize },
}

/// Reference telemetry failures.
#[derive(Debug, Error)]
pub enum TelemetryError {
    #[error("failed to read flight log {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse flight log: {0}")]
    Json(#[from] serde_json::Error),
    #[error("reference series needs at least 2 samples, got {0}")]
    TooFewSamples(usize),
}

/// Crate-level error.
#[derive(Debug, Error)]
pub enum SimError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Telemetry(#[from] TelemetryError),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
