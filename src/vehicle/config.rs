use serde::{Deserialize, Serialize};

use crate::physics::Aero;
use super::stage::Stage;

// ---------------------------------------------------------------------------
// Vehicle: ordered sequence of stages + one aerodynamic body
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VehicleConfig {
    pub name: String,
    pub drag_coefficient: f64,
    pub reference_area: f64,    // m^2
    pub stages: Vec<Stage>,
}

impl VehicleConfig {
    pub fn aero(&self) -> Aero {
        Aero {
            drag_coefficient: self.drag_coefficient,
            reference_area: self.reference_area,
        }
    }

    /// Lift-off mass as the integrator sees it: only the first stage.
    pub fn liftoff_mass(&self) -> f64 {
        self.stages.first().map_or(0.0, |s| s.wet_mass)
    }

    /// Sum of the stages' own vacuum delta-v.
    pub fn total_delta_v(&self, g0: f64) -> f64 {
        self.stages.iter().map(|s| s.delta_v(g0)).sum()
    }

    /// Mission time at which the last stage's burn window closes.
    pub fn total_burn_duration(&self) -> f64 {
        self.stages.iter().map(|s| s.burn_duration).sum()
    }
}

// ---------------------------------------------------------------------------
// Vehicle builder
// ---------------------------------------------------------------------------

pub struct VehicleBuilder {
    name: String,
    aero: Aero,
    stages: Vec<Stage>,
}

impl VehicleBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            aero: Aero { drag_coefficient: 0.3, reference_area: 1.0 },
            stages: vec![],
        }
    }

    pub fn aero(mut self, aero: Aero) -> Self {
        self.aero = aero;
        self
    }

    pub fn stage(mut self, stage: Stage) -> Self {
        self.stages.push(stage);
        self
    }

    pub fn build(self) -> VehicleConfig {
        VehicleConfig {
            name: self.name,
            drag_coefficient: self.aero.drag_coefficient,
            reference_area: self.aero.reference_area,
            stages: self.stages,
        }
    }
}
