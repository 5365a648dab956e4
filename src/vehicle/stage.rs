use serde::{Deserialize, Serialize};

/// Sea-level Isp as a fraction of vacuum Isp when not given explicitly.
pub const SEA_LEVEL_ISP_FRACTION: f64 = 0.8;

// ---------------------------------------------------------------------------
// Stage definition (one stage of a multi-stage rocket)
// ---------------------------------------------------------------------------

/// One stage. Times are stage-local: zero at that stage's ignition.
///
/// The thrust and mass cutoffs are separate bounds. Both default to
/// `burn_duration`; set them explicitly when a vehicle's thrust window
/// does not coincide with its propellant depletion. Every stage but the
/// last hands over at `burn_duration`, so on those stages a cutoff may
/// only shorten the window; validation rejects a later one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stage {
    pub name: String,
    pub wet_mass: f64,          // kg at ignition
    pub dry_mass: f64,          // kg after depletion
    pub burn_duration: f64,     // s
    pub vacuum_isp: f64,        // s
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sea_level_isp: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thrust_cutoff: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mass_cutoff: Option<f64>,
}

impl Stage {
    pub fn propellant_mass(&self) -> f64 {
        self.wet_mass - self.dry_mass
    }

    /// Constant propellant mass flow, kg/s.
    pub fn mass_flow(&self) -> f64 {
        self.propellant_mass() / self.burn_duration
    }

    pub fn sea_level_isp(&self) -> f64 {
        self.sea_level_isp
            .unwrap_or(self.vacuum_isp * SEA_LEVEL_ISP_FRACTION)
    }

    /// Last stage-local time at which the engine produces thrust.
    pub fn thrust_cutoff(&self) -> f64 {
        self.thrust_cutoff.unwrap_or(self.burn_duration)
    }

    /// Last stage-local time at which propellant is still being drained.
    pub fn mass_cutoff(&self) -> f64 {
        self.mass_cutoff.unwrap_or(self.burn_duration)
    }

    /// Stage mass at stage-local time. Wet before ignition, linear drain
    /// up to the mass cutoff, dry afterwards. Never below dry mass.
    pub fn mass_at(&self, local_time: f64) -> f64 {
        if local_time < 0.0 {
            self.wet_mass
        } else if local_time <= self.mass_cutoff() {
            (self.wet_mass - self.mass_flow() * local_time).max(self.dry_mass)
        } else {
            self.dry_mass
        }
    }

    /// Ideal vacuum delta-v of this stage alone (Tsiolkovsky).
    pub fn delta_v(&self, g0: f64) -> f64 {
        self.vacuum_isp * g0 * (self.wet_mass / self.dry_mass).ln()
    }
}

// ---------------------------------------------------------------------------
// Stage builder
// ---------------------------------------------------------------------------

pub struct StageBuilder {
    name: String,
    wet_mass: f64,
    dry_mass: f64,
    burn_duration: f64,
    vacuum_isp: f64,
    sea_level_isp: Option<f64>,
    thrust_cutoff: Option<f64>,
    mass_cutoff: Option<f64>,
}

impl StageBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            wet_mass: 1_000.0,
            dry_mass: 500.0,
            burn_duration: 30.0,
            vacuum_isp: 250.0,
            sea_level_isp: None,
            thrust_cutoff: None,
            mass_cutoff: None,
        }
    }

    pub fn wet_mass(mut self, v: f64) -> Self { self.wet_mass = v; self }
    pub fn dry_mass(mut self, v: f64) -> Self { self.dry_mass = v; self }
    pub fn burn_duration(mut self, v: f64) -> Self { self.burn_duration = v; self }
    pub fn vacuum_isp(mut self, v: f64) -> Self { self.vacuum_isp = v; self }
    pub fn sea_level_isp(mut self, v: f64) -> Self { self.sea_level_isp = Some(v); self }
    pub fn thrust_cutoff(mut self, v: f64) -> Self { self.thrust_cutoff = Some(v); self }
    pub fn mass_cutoff(mut self, v: f64) -> Self { self.mass_cutoff = Some(v); self }

    pub fn build(self) -> Stage {
        Stage {
            name: self.name,
            wet_mass: self.wet_mass,
            dry_mass: self.dry_mass,
            burn_duration: self.burn_duration,
            vacuum_isp: self.vacuum_isp,
            sea_level_isp: self.sea_level_isp,
            thrust_cutoff: self.thrust_cutoff,
            mass_cutoff: self.mass_cutoff,
        }
    }
}
