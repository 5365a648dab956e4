use nalgebra::Vector2;

use crate::dynamics::state::SimulationState;
use crate::gnc::PitchProgram;
use crate::physics::{drag_force, Aero, Environment};
use crate::vehicle::{StagingSchedule, VehicleConfig};

/// Everything acting on the vehicle at one instant.
#[derive(Debug, Clone, Copy)]
pub struct Forces {
    pub stage_idx: usize,
    pub mass: f64,              // kg
    pub pitch_deg: f64,
    pub thrust: Vector2<f64>,   // N
    pub drag: Vector2<f64>,     // N
    pub weight: f64,            // N, acts along -y
}

impl Forces {
    pub fn net(&self) -> Vector2<f64> {
        Vector2::new(
            self.thrust.x + self.drag.x,
            self.thrust.y - self.weight + self.drag.y,
        )
    }

    /// Net acceleration. Zero when the mass is not positive.
    pub fn acceleration(&self) -> Vector2<f64> {
        if self.mass > 0.0 {
            self.net() / self.mass
        } else {
            Vector2::zeros()
        }
    }

    pub fn thrust_magnitude(&self) -> f64 {
        self.thrust.norm()
    }
}

// ---------------------------------------------------------------------------
// 2-DOF point-mass model
// ---------------------------------------------------------------------------

/// Read-only view of the configuration the integrator queries each step.
pub struct PlanarModel<'a> {
    pub env: &'a Environment,
    pub aero: Aero,
    pub schedule: StagingSchedule<'a>,
    pub guidance: &'a dyn PitchProgram,
}

impl<'a> PlanarModel<'a> {
    pub fn new(
        env: &'a Environment,
        vehicle: &'a VehicleConfig,
        guidance: &'a dyn PitchProgram,
    ) -> Self {
        Self {
            env,
            aero: vehicle.aero(),
            schedule: StagingSchedule::new(vehicle),
            guidance,
        }
    }

    /// Compose forces at `state`:
    ///   1. Active stage + mass (staging schedule)
    ///   2. Commanded pitch (guidance)
    ///   3. Thrust magnitude (Isp at current altitude)
    ///   4. Gravity + density at current altitude
    ///   5. Drag opposing velocity
    ///   6. Thrust split by pitch from horizontal
    pub fn forces(&self, state: &SimulationState) -> Forces {
        let t = state.time;
        let h = state.altitude();

        let (stage_idx, mass) = match self.schedule.active(t) {
            Some(active) => (active.index, active.mass),
            None => (0, 0.0),
        };

        let pitch_deg = self.guidance.pitch_deg(t, h);
        let pitch = pitch_deg.to_radians();
        let thrust_mag = self.schedule.thrust(self.env, t, h);

        let g = self.env.gravity(h);
        let rho = self.env.density(h);

        Forces {
            stage_idx,
            mass,
            pitch_deg,
            thrust: Vector2::new(thrust_mag * pitch.cos(), thrust_mag * pitch.sin()),
            drag: drag_force(&state.vel, rho, &self.aero),
            weight: mass * g,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::presets;
    use approx::assert_relative_eq;

    #[test]
    fn pad_forces() {
        let cfg = presets::avangard();
        let model = PlanarModel::new(&cfg.environment, &cfg.vehicle, &cfg.guidance);
        let f = model.forces(&SimulationState::at_rest());

        assert_eq!(f.stage_idx, 0);
        assert_eq!(f.mass, 59_300.0);
        assert_eq!(f.pitch_deg, 90.0);
        // Zero velocity: exactly zero drag
        assert_eq!(f.drag.x, 0.0);
        assert_eq!(f.drag.y, 0.0);
        assert_relative_eq!(f.weight, 59_300.0 * 9.81, epsilon = 1e-6);
        assert_relative_eq!(f.thrust_magnitude(), 156.0 * 624.0 * 9.81, epsilon = 1e-6);
        // Vertical thrust beats weight at lift-off
        assert!(f.acceleration().y > 0.0);
        assert!(f.thrust.x.abs() < 1e-6 * f.thrust.y);
    }

    #[test]
    fn zero_mass_gives_zero_acceleration() {
        let f = Forces {
            stage_idx: 0,
            mass: 0.0,
            pitch_deg: 90.0,
            thrust: Vector2::new(0.0, 1_000.0),
            drag: Vector2::zeros(),
            weight: 0.0,
        };
        assert_eq!(f.acceleration(), Vector2::zeros());
    }

    #[test]
    fn net_force_composition() {
        let f = Forces {
            stage_idx: 1,
            mass: 10.0,
            pitch_deg: 45.0,
            thrust: Vector2::new(100.0, 200.0),
            drag: Vector2::new(-10.0, -20.0),
            weight: 50.0,
        };
        assert_eq!(f.net(), Vector2::new(90.0, 130.0));
        assert_eq!(f.acceleration(), Vector2::new(9.0, 13.0));
    }
}
