use crate::dynamics::{Forces, SimulationState};

// ---------------------------------------------------------------------------
// Semi-implicit (symplectic) Euler step
// ---------------------------------------------------------------------------

/// Advance one fixed step with forces held constant over it.
/// Velocity is updated first; position uses the updated velocity.
/// `next_time` comes from the step index so time never accumulates drift.
pub fn euler_step(state: &SimulationState, forces: &Forces, dt: f64, next_time: f64) -> SimulationState {
    let vel = state.vel + forces.acceleration() * dt;
    SimulationState {
        time: next_time,
        pos: state.pos + vel * dt,
        vel,
        stage_idx: forces.stage_idx,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use nalgebra::Vector2;

    fn lift(accel_y: f64) -> Forces {
        Forces {
            stage_idx: 0,
            mass: 1.0,
            pitch_deg: 90.0,
            thrust: Vector2::new(0.0, accel_y),
            drag: Vector2::zeros(),
            weight: 0.0,
        }
    }

    #[test]
    fn position_uses_updated_velocity() {
        let s0 = SimulationState::at_rest();
        let s1 = euler_step(&s0, &lift(10.0), 0.1, 0.1);
        assert_relative_eq!(s1.vel.y, 1.0);
        // Explicit Euler would leave the position at zero here
        assert_relative_eq!(s1.pos.y, 0.1);
        assert_eq!(s1.time, 0.1);
    }

    #[test]
    fn free_coast_keeps_velocity() {
        let mut s = SimulationState::at_rest();
        s.vel = Vector2::new(3.0, 4.0);
        let coast = Forces { thrust: Vector2::zeros(), ..lift(0.0) };
        let s1 = euler_step(&s, &coast, 0.5, 0.5);
        assert_eq!(s1.vel, Vector2::new(3.0, 4.0));
        assert_eq!(s1.pos, Vector2::new(1.5, 2.0));
    }
}
