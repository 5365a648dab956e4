use nalgebra::Vector2;
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// 2-DOF state: downrange + altitude
// ---------------------------------------------------------------------------

/// Live integrator state. Frame: x downrange, y up, origin at the pad.
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationState {
    pub time: f64,                  // s
    pub pos: Vector2<f64>,          // m
    pub vel: Vector2<f64>,          // m/s
    pub stage_idx: usize,           // active stage
}

impl SimulationState {
    /// On the pad at t = 0, at rest.
    pub fn at_rest() -> Self {
        Self {
            time: 0.0,
            pos: Vector2::zeros(),
            vel: Vector2::zeros(),
            stage_idx: 0,
        }
    }

    pub fn altitude(&self) -> f64 {
        self.pos.y
    }

    pub fn speed(&self) -> f64 {
        self.vel.norm()
    }
}

// ---------------------------------------------------------------------------
// Output record
// ---------------------------------------------------------------------------

/// One row of the simulated trajectory.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrajectorySample {
    pub time: f64,          // s
    pub downrange: f64,     // m
    pub altitude: f64,      // m
    pub speed: f64,         // m/s
    pub vx: f64,            // m/s
    pub vy: f64,            // m/s
    pub pitch: f64,         // deg, commanded
    pub mass: f64,          // kg, active stage
    pub stage: usize,
    pub thrust: f64,        // N
}
