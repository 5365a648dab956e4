//! Simulation configuration: planet, vehicle, guidance, and run settings.
//!
//! Every option can be given in a TOML file; anything omitted at the top
//! level falls back to the `avangard` preset.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::gnc::GuidanceProfile;
use crate::physics::Environment;
use crate::vehicle::VehicleConfig;

/// Tolerance when converting `total_duration / step_size` to a step count,
/// so that e.g. 135 / 0.1 yields 1350 steps and not 1349.
const STEP_COUNT_EPSILON: f64 = 1e-9;

/// Upper bound on integration steps for a single run.
pub const MAX_STEPS: usize = 100_000_000;

/// Fixed-step run settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunConfig {
    pub total_duration: f64,    // s
    pub step_size: f64,         // s
    /// Altitudes (m) whose ascending crossing is reported as an event.
    #[serde(default = "default_altitude_marks")]
    pub altitude_marks: Vec<f64>,
}

fn default_altitude_marks() -> Vec<f64> {
    vec![17_000.0, 100_000.0]
}

impl RunConfig {
    /// Number of integration steps, `floor(total_duration / step_size)`.
    /// The trajectory holds one more sample than this (the initial state).
    pub fn step_count(&self) -> usize {
        (self.total_duration / self.step_size + STEP_COUNT_EPSILON).floor() as usize
    }

    /// Mission time of step `i`. Computed from the index, never accumulated.
    pub fn time_at(&self, step: usize) -> f64 {
        step as f64 * self.step_size
    }
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            total_duration: 135.0,
            step_size: 0.1,
            altitude_marks: default_altitude_marks(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationConfig {
    #[serde(default = "default_name")]
    pub name: String,
    #[serde(default)]
    pub environment: Environment,
    #[serde(default = "presets::avangard_vehicle")]
    pub vehicle: VehicleConfig,
    #[serde(default)]
    pub guidance: GuidanceProfile,
    #[serde(default)]
    pub run: RunConfig,
}

fn default_name() -> String {
    "custom".into()
}

impl Default for SimulationConfig {
    fn default() -> Self {
        presets::avangard()
    }
}

impl SimulationConfig {
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(s)?)
    }

    /// Load and validate a TOML configuration file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let config = Self::from_toml_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject physically meaningless configurations.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.check_finite()?;

        let env = &self.environment;
        positive("g0", env.g0)?;
        positive("planetary_radius", env.planetary_radius)?;
        positive("scale_height", env.scale_height)?;
        non_negative("surface_density", env.surface_density)?;
        non_negative("drag_coefficient", self.vehicle.drag_coefficient)?;
        non_negative("reference_area", self.vehicle.reference_area)?;

        if self.vehicle.stages.is_empty() {
            return Err(ConfigError::NoStages);
        }
        for (i, stage) in self.vehicle.stages.iter().enumerate() {
            if !(stage.burn_duration > 0.0) {
                return Err(ConfigError::NonPositiveBurnDuration { stage: i, value: stage.burn_duration });
            }
            if stage.wet_mass < 0.0 {
                return Err(ConfigError::NegativeMass { stage: i, field: "wet_mass", value: stage.wet_mass });
            }
            if stage.dry_mass < 0.0 {
                return Err(ConfigError::NegativeMass { stage: i, field: "dry_mass", value: stage.dry_mass });
            }
            if stage.dry_mass > stage.wet_mass {
                return Err(ConfigError::DryExceedsWet { stage: i, dry: stage.dry_mass, wet: stage.wet_mass });
            }
            if !(stage.vacuum_isp > 0.0) {
                return Err(ConfigError::NonPositiveIsp { stage: i, value: stage.vacuum_isp });
            }
            if let Some(isp) = stage.sea_level_isp {
                if !(isp > 0.0) {
                    return Err(ConfigError::NonPositiveIsp { stage: i, value: isp });
                }
            }
            if let Some(v) = stage.thrust_cutoff {
                if !(v > 0.0) {
                    return Err(ConfigError::NonPositiveCutoff { stage: i, field: "thrust_cutoff", value: v });
                }
            }
            if let Some(v) = stage.mass_cutoff {
                if !(v > 0.0) {
                    return Err(ConfigError::NonPositiveCutoff { stage: i, field: "mass_cutoff", value: v });
                }
            }
            // Only the last stage outlives its burn window.
            if i + 1 < self.vehicle.stages.len() {
                for (field, value) in [("thrust_cutoff", stage.thrust_cutoff), ("mass_cutoff", stage.mass_cutoff)] {
                    if let Some(v) = value.filter(|&v| v > stage.burn_duration) {
                        return Err(ConfigError::CutoffPastHandover {
                            stage: i,
                            field,
                            value: v,
                            burn_duration: stage.burn_duration,
                        });
                    }
                }
            }
        }

        let g = &self.guidance;
        pitch("start_pitch", g.start_pitch)?;
        pitch("end_pitch", g.end_pitch)?;
        if g.turn_end < g.turn_start {
            return Err(ConfigError::TurnEndBeforeStart { turn_start: g.turn_start, turn_end: g.turn_end });
        }

        positive("total_duration", self.run.total_duration)?;
        positive("step_size", self.run.step_size)?;
        let steps = self.run.total_duration / self.run.step_size;
        if !(steps <= MAX_STEPS as f64) {
            return Err(ConfigError::TooManySteps { steps, limit: MAX_STEPS });
        }
        Ok(())
    }

    /// Every numeric option must be finite; TOML and the CLI both accept
    /// `inf` and `nan`.
    fn check_finite(&self) -> Result<(), ConfigError> {
        let env = &self.environment;
        let g = &self.guidance;
        let run = &self.run;
        let scalars = [
            ("g0", env.g0),
            ("planetary_radius", env.planetary_radius),
            ("surface_density", env.surface_density),
            ("scale_height", env.scale_height),
            ("drag_coefficient", self.vehicle.drag_coefficient),
            ("reference_area", self.vehicle.reference_area),
            ("start_pitch", g.start_pitch),
            ("end_pitch", g.end_pitch),
            ("turn_start", g.turn_start),
            ("turn_end", g.turn_end),
            ("total_duration", run.total_duration),
            ("step_size", run.step_size),
        ];
        for (field, value) in scalars {
            finite(field.to_string(), value)?;
        }
        for (i, mark) in run.altitude_marks.iter().enumerate() {
            finite(format!("altitude_marks[{i}]"), *mark)?;
        }

        for (i, stage) in self.vehicle.stages.iter().enumerate() {
            let fields = [
                ("wet_mass", Some(stage.wet_mass)),
                ("dry_mass", Some(stage.dry_mass)),
                ("burn_duration", Some(stage.burn_duration)),
                ("vacuum_isp", Some(stage.vacuum_isp)),
                ("sea_level_isp", stage.sea_level_isp),
                ("thrust_cutoff", stage.thrust_cutoff),
                ("mass_cutoff", stage.mass_cutoff),
            ];
            for (field, value) in fields {
                if let Some(v) = value {
                    finite(format!("stage {i}: {field}"), v)?;
                }
            }
        }
        Ok(())
    }
}

fn finite(field: String, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::NonFinite { field, value })
    }
}

fn positive(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::NonPositive { field, value })
    }
}

fn non_negative(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::Negative { field, value })
    }
}

fn pitch(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if (0.0..=90.0).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::PitchOutOfRange { field, value })
    }
}

// ---------------------------------------------------------------------------
// Preset configurations
// ---------------------------------------------------------------------------

pub mod presets {
    use super::*;
    use crate::physics::Aero;
    use crate::vehicle::{StageBuilder, VehicleBuilder};

    pub const NAMES: &[&str] = &["avangard", "avangard_extended"];

    pub fn by_name(name: &str) -> Result<SimulationConfig, ConfigError> {
        match name {
            "avangard" => Ok(avangard()),
            "avangard_extended" => Ok(avangard_extended()),
            other => Err(ConfigError::UnknownPreset(other.to_string())),
        }
    }

    /// Two-stage "Avangard" launcher as flown in the recorded flight logs.
    pub fn avangard_vehicle() -> VehicleConfig {
        VehicleBuilder::new("Avangard")
            .aero(Aero::circular(0.3, 0.625))
            .stage(
                StageBuilder::new("S1-Booster")
                    .wet_mass(59_300.0)
                    .dry_mass(28_100.0)
                    .burn_duration(50.0)
                    .vacuum_isp(195.0)
                    .build(),
            )
            .stage(
                StageBuilder::new("S2-Upper")
                    .wet_mass(12_000.0)
                    .dry_mass(3_500.0)
                    .burn_duration(95.0)
                    .vacuum_isp(300.0)
                    .build(),
            )
            .build()
    }

    /// 135 s ascent, turn 90 -> 0.8 deg between 50 s and 85 s.
    pub fn avangard() -> SimulationConfig {
        SimulationConfig {
            name: "avangard".into(),
            environment: Environment::kerbin(),
            vehicle: avangard_vehicle(),
            guidance: GuidanceProfile::default(),
            run: RunConfig::default(),
        }
    }

    /// Lighter upper stage with a lower vacuum Isp, flown out to the end
    /// of the stage-2 burn at 145 s.
    pub fn avangard_extended() -> SimulationConfig {
        let mut config = avangard();
        config.name = "avangard_extended".into();
        let upper = &mut config.vehicle.stages[1];
        upper.wet_mass = 9_300.0;
        upper.vacuum_isp = 250.0;
        config.run.total_duration = 145.0;
        config
    }
}
