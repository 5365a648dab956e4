use serde::Serialize;
use tracing::{debug, info};

use crate::config::SimulationConfig;
use crate::dynamics::{Forces, PlanarModel, SimulationState, TrajectorySample};
use crate::error::ConfigError;
use crate::gnc::PitchProgram;
use super::event::{ascent_detectors, EventKind, SimEvent};
use super::integrator::euler_step;

/// Slack for times that land on the run's ends up to float rounding, s.
const GRID_TOLERANCE: f64 = 1e-9;

// ---------------------------------------------------------------------------
// Simulation output
// ---------------------------------------------------------------------------

/// Result of one run: the sampled trajectory plus the events seen in it.
#[derive(Debug, Clone, Serialize)]
pub struct Trajectory {
    pub config_name: String,
    /// Name of the pitch program that steered this run.
    pub guidance: String,
    pub step_size: f64,
    pub samples: Vec<TrajectorySample>,
    pub events: Vec<SimEvent>,
}

impl Trajectory {
    /// Sample at step `round(t / dt)`, if inside the run.
    pub fn sample_at(&self, t: f64) -> Option<&TrajectorySample> {
        if t < 0.0 {
            return None;
        }
        let idx = (t / self.step_size).round() as usize;
        self.samples.get(idx)
    }

    /// Altitude and speed at `t`, linear between neighbouring samples and
    /// exact on the step grid. `None` outside the run.
    pub fn interpolate(&self, t: f64) -> Option<(f64, f64)> {
        let first = self.samples.first()?;
        let last = self.samples.last()?;
        if t < first.time - GRID_TOLERANCE || t > last.time + GRID_TOLERANCE {
            return None;
        }
        let t = t.clamp(first.time, last.time);

        let hi = self.samples.partition_point(|s| s.time < t);
        let b = &self.samples[hi.min(self.samples.len() - 1)];
        if hi == 0 || b.time == t {
            return Some((b.altitude, b.speed));
        }
        let a = &self.samples[hi - 1];
        let frac = (t - a.time) / (b.time - a.time);
        Some((
            a.altitude + (b.altitude - a.altitude) * frac,
            a.speed + (b.speed - a.speed) * frac,
        ))
    }

    pub fn first_event(&self, kind: &EventKind) -> Option<&SimEvent> {
        self.events.iter().find(|e| &e.kind == kind)
    }

    pub fn max_altitude(&self) -> Option<&TrajectorySample> {
        self.samples
            .iter()
            .max_by(|a, b| a.altitude.total_cmp(&b.altitude))
    }

    pub fn max_speed(&self) -> Option<&TrajectorySample> {
        self.samples.iter().max_by(|a, b| a.speed.total_cmp(&b.speed))
    }

    pub fn last(&self) -> Option<&TrajectorySample> {
        self.samples.last()
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}

fn record(state: &SimulationState, forces: &Forces) -> TrajectorySample {
    TrajectorySample {
        time: state.time,
        downrange: state.pos.x,
        altitude: state.pos.y,
        speed: state.speed(),
        vx: state.vel.x,
        vy: state.vel.y,
        pitch: forces.pitch_deg,
        mass: forces.mass,
        stage: forces.stage_idx,
        thrust: forces.thrust_magnitude(),
    }
}

// ---------------------------------------------------------------------------
// Full ascent simulation
// ---------------------------------------------------------------------------

/// Simulate the configured ascent with a custom pitch program.
///
/// The configuration is validated first; nothing is produced for an invalid
/// one. The run always covers `floor(total_duration / step_size)` steps and
/// returns one sample per step plus the initial state.
pub fn simulate_with(
    config: &SimulationConfig,
    guidance: &dyn PitchProgram,
) -> Result<Trajectory, ConfigError> {
    config.validate()?;

    let run = &config.run;
    let dt = run.step_size;
    let steps = run.step_count();
    let model = PlanarModel::new(&config.environment, &config.vehicle, guidance);

    info!(
        config = %config.name,
        guidance = guidance.name(),
        steps,
        dt,
        "starting ascent simulation"
    );

    let mut detectors = ascent_detectors(&run.altitude_marks);
    let mut samples = Vec::with_capacity(steps + 1);
    let mut events = Vec::new();

    let mut state = SimulationState::at_rest();
    let mut forces = model.forces(&state);
    samples.push(record(&state, &forces));

    for i in 1..=steps {
        state = euler_step(&state, &forces, dt, run.time_at(i));
        forces = model.forces(&state);
        let sample = record(&state, &forces);

        let prev = &samples[samples.len() - 1];
        for detector in detectors.iter_mut() {
            if let Some(kind) = detector.check(prev, &sample) {
                debug!(t = sample.time, alt = sample.altitude, "{}", kind);
                events.push(SimEvent { time: sample.time, kind, sample });
            }
        }
        samples.push(sample);
    }

    if let Some(&last) = samples.last() {
        events.push(SimEvent { time: last.time, kind: EventKind::RunEnd, sample: last });
        info!(
            t = last.time,
            altitude = last.altitude,
            speed = last.speed,
            samples = samples.len(),
            "ascent simulation complete"
        );
    }

    Ok(Trajectory {
        config_name: config.name.clone(),
        guidance: guidance.name().to_string(),
        step_size: dt,
        samples,
        events,
    })
}

/// Simulate with the configuration's own time-scheduled turn.
pub fn simulate(config: &SimulationConfig) -> Result<Trajectory, ConfigError> {
    simulate_with(config, &config.guidance)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::presets;
    use crate::gnc::AltitudeTurn;

    fn short_run() -> SimulationConfig {
        let mut cfg = presets::avangard();
        cfg.run.total_duration = 10.0;
        cfg
    }

    #[test]
    fn initial_sample_is_pad_state() {
        let traj = simulate(&short_run()).unwrap();
        let first = traj.samples[0];
        assert_eq!(first.time, 0.0);
        assert_eq!(first.altitude, 0.0);
        assert_eq!(first.speed, 0.0);
        assert_eq!(first.pitch, 90.0);
        assert_eq!(traj.len(), 101);
    }

    #[test]
    fn times_come_from_step_index() {
        let traj = simulate(&short_run()).unwrap();
        for (i, s) in traj.samples.iter().enumerate() {
            assert_eq!(s.time, i as f64 * 0.1);
        }
    }

    #[test]
    fn vertical_phase_has_no_downrange() {
        let traj = simulate(&short_run()).unwrap();
        let last = traj.last().unwrap();
        assert!(last.altitude > 0.0);
        assert!(last.downrange.abs() < 1e-6 * last.altitude);
    }

    #[test]
    fn invalid_config_produces_nothing() {
        let mut cfg = short_run();
        cfg.vehicle.stages[0].burn_duration = -5.0;
        assert!(simulate(&cfg).is_err());
    }

    #[test]
    fn records_guidance_model() {
        let cfg = short_run();
        let timed = simulate(&cfg).unwrap();
        let alt = simulate_with(&cfg, &AltitudeTurn::default()).unwrap();
        assert_eq!(timed.guidance, "time-scheduled turn");
        assert_eq!(alt.guidance, "altitude-triggered turn");
    }

    #[test]
    fn staging_event_at_stage_one_burnout() {
        let mut cfg = presets::avangard();
        cfg.run.total_duration = 60.0;
        let traj = simulate(&cfg).unwrap();
        let staging = traj
            .first_event(&EventKind::Staging { from: 0, to: 1 })
            .expect("staging event");
        assert!((staging.time - 50.1).abs() < 1e-9);
        assert!(traj.first_event(&EventKind::Burnout { stage: 0 }).is_some());
        assert!(traj.first_event(&EventKind::TurnStart).is_some());
        assert_eq!(traj.events.last().map(|e| &e.kind), Some(&EventKind::RunEnd));
    }

    #[test]
    fn sample_lookup_by_time() {
        let traj = simulate(&short_run()).unwrap();
        assert_eq!(traj.sample_at(5.0).map(|s| s.time), Some(5.0));
        assert_eq!(traj.sample_at(10.0).map(|s| s.time), Some(10.0));
        assert!(traj.sample_at(11.0).is_none());
        assert!(traj.sample_at(-1.0).is_none());
    }

    #[test]
    fn interpolates_between_steps() {
        let traj = simulate(&short_run()).unwrap();
        let (a, b) = (&traj.samples[50], &traj.samples[51]);
        let (alt, speed) = traj.interpolate(5.025).unwrap();
        assert!((alt - (a.altitude + 0.25 * (b.altitude - a.altitude))).abs() < 1e-9);
        assert!((speed - (a.speed + 0.25 * (b.speed - a.speed))).abs() < 1e-9);

        assert_eq!(traj.interpolate(5.0), Some((a.altitude, a.speed)));
        let last = traj.last().unwrap();
        assert_eq!(traj.interpolate(10.0), Some((last.altitude, last.speed)));
        assert!(traj.interpolate(10.01).is_none());
        assert!(traj.interpolate(-0.01).is_none());
    }
}
