use crate::physics::Environment;
use super::config::VehicleConfig;
use super::propulsion;
use super::stage::Stage;

/// Active stage at a given mission time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ActiveStage {
    pub index: usize,
    pub local_time: f64,  // s since this stage's ignition
    pub mass: f64,        // kg, this stage only
}

// ---------------------------------------------------------------------------
// Time-triggered staging schedule
// ---------------------------------------------------------------------------

/// Stage `k` ignites when stage `k - 1`'s burn window closes and stays
/// active through the end of its own window (inclusive). The last stage
/// remains active for the rest of the flight.
///
/// Each stage's mass is evaluated on its own local clock; spent stages are
/// not carried as payload.
#[derive(Debug, Clone)]
pub struct StagingSchedule<'a> {
    stages: &'a [Stage],
    ignitions: Vec<f64>,
}

impl<'a> StagingSchedule<'a> {
    pub fn new(vehicle: &'a VehicleConfig) -> Self {
        let mut ignitions = Vec::with_capacity(vehicle.stages.len());
        let mut t = 0.0;
        for stage in &vehicle.stages {
            ignitions.push(t);
            t += stage.burn_duration;
        }
        Self { stages: &vehicle.stages, ignitions }
    }

    pub fn ignition_time(&self, index: usize) -> Option<f64> {
        self.ignitions.get(index).copied()
    }

    /// Mission time at which the stage's burn window closes.
    pub fn burnout_time(&self, index: usize) -> Option<f64> {
        Some(self.ignitions.get(index)? + self.stages.get(index)?.burn_duration)
    }

    pub fn len(&self) -> usize {
        self.stages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }

    /// Active stage index and its instantaneous mass. `None` only for a
    /// vehicle without stages, which configuration validation rejects.
    pub fn active(&self, t: f64) -> Option<ActiveStage> {
        let last = self.stages.len().checked_sub(1)?;
        let index = (0..last)
            .find(|&i| t <= self.ignitions[i] + self.stages[i].burn_duration)
            .unwrap_or(last);
        let local_time = t - self.ignitions[index];
        Some(ActiveStage {
            index,
            local_time,
            mass: self.stages[index].mass_at(local_time),
        })
    }

    /// Thrust of the active stage, N.
    pub fn thrust(&self, env: &Environment, t: f64, altitude: f64) -> f64 {
        match self.active(t) {
            Some(active) => propulsion::thrust(
                &self.stages[active.index],
                env,
                active.local_time,
                altitude,
            ),
            None => 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::presets;
    use approx::assert_relative_eq;

    #[test]
    fn stage_one_active_through_its_burnout() {
        let cfg = presets::avangard();
        let sched = StagingSchedule::new(&cfg.vehicle);
        assert_eq!(sched.active(0.0).map(|a| a.index), Some(0));
        assert_eq!(sched.active(50.0).map(|a| a.index), Some(0));
        assert_eq!(sched.active(50.1).map(|a| a.index), Some(1));
        assert_eq!(sched.active(500.0).map(|a| a.index), Some(1));
    }

    #[test]
    fn stage_two_uses_local_clock() {
        let cfg = presets::avangard();
        let sched = StagingSchedule::new(&cfg.vehicle);
        let a = sched.active(60.0).unwrap();
        assert_relative_eq!(a.local_time, 10.0, epsilon = 1e-12);
        let s2 = &cfg.vehicle.stages[1];
        assert_relative_eq!(a.mass, 12_000.0 - s2.mass_flow() * 10.0, epsilon = 1e-9);
    }

    #[test]
    fn mass_and_thrust_reach_terminal_values_at_cutoff() {
        let cfg = presets::avangard();
        let env = cfg.environment;
        let sched = StagingSchedule::new(&cfg.vehicle);
        assert_eq!(sched.ignition_time(1), Some(50.0));
        assert_eq!(sched.burnout_time(1), Some(145.0));
        assert_eq!(sched.ignition_time(2), None);

        let at_cutoff = sched.active(145.0).unwrap();
        assert_relative_eq!(at_cutoff.mass, 3_500.0, epsilon = 1e-9);
        assert!(sched.thrust(&env, 145.0, 80_000.0) > 0.0);

        let past = sched.active(145.1).unwrap();
        assert_eq!(past.mass, 3_500.0);
        assert_eq!(sched.thrust(&env, 145.1, 80_000.0), 0.0);
    }

    #[test]
    fn stage_one_thrust_ends_exactly_at_burnout() {
        let cfg = presets::avangard();
        let env = cfg.environment;
        let stage1 = &cfg.vehicle.stages[0];
        assert!(propulsion::thrust(stage1, &env, 50.0, 10_000.0) > 0.0);
        assert_eq!(propulsion::thrust(stage1, &env, 50.1, 10_000.0), 0.0);
    }

    #[test]
    fn single_stage_stays_active() {
        let mut cfg = presets::avangard();
        cfg.vehicle.stages.truncate(1);
        let sched = StagingSchedule::new(&cfg.vehicle);
        assert_eq!(sched.active(80.0).map(|a| a.index), Some(0));
        assert_eq!(sched.active(80.0).map(|a| a.mass), Some(28_100.0));
    }
}
