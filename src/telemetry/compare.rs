use serde::Serialize;
use tracing::warn;

use crate::config::SimulationConfig;
use crate::sim::Trajectory;
use crate::vehicle::StagingSchedule;
use super::log::ReferenceSample;
use super::reference::ReferenceSeries;

/// Simulated and reference values side by side at one probe time.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ProbeComparison {
    pub time: f64,
    pub sim_altitude: f64,
    pub ref_altitude: f64,
    pub sim_speed: f64,
    pub ref_speed: f64,
    /// The reference value was extrapolated past the recorded range.
    pub extrapolated: bool,
}

impl ProbeComparison {
    pub fn altitude_error(&self) -> f64 {
        self.sim_altitude - self.ref_altitude
    }

    pub fn speed_error(&self) -> f64 {
        self.sim_speed - self.ref_speed
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Comparison {
    pub probes: Vec<ProbeComparison>,
    /// Probe times that fell outside the simulated run.
    pub skipped: Vec<f64>,
    /// Reference samples within the simulated duration, for overlays.
    pub reference: Vec<ReferenceSample>,
    pub reference_truncated: bool,
}

impl Comparison {
    pub fn any_extrapolated(&self) -> bool {
        self.probes.iter().any(|p| p.extrapolated)
    }
}

/// Stage burnouts, end of the pitch turn, and end of run, restricted to
/// those inside the configured duration, in ascending order.
pub fn default_probe_times(config: &SimulationConfig) -> Vec<f64> {
    let end = config.run.total_duration;
    let schedule = StagingSchedule::new(&config.vehicle);

    let mut times: Vec<f64> = (0..schedule.len())
        .filter_map(|i| schedule.burnout_time(i))
        .chain([config.guidance.turn_end, end])
        .filter(|&t| (0.0..=end).contains(&t))
        .collect();
    times.sort_by(f64::total_cmp);
    times.dedup();
    times
}

// ---------------------------------------------------------------------------
// Simulated vs. recorded
// ---------------------------------------------------------------------------

/// Compare a simulated trajectory to recorded telemetry at `probe_times`.
///
/// The reference is interpolated over its full recorded range; the
/// returned overlay series is cut at `total_duration`. Neither input is
/// modified.
pub fn compare(
    trajectory: &Trajectory,
    reference: &ReferenceSeries,
    probe_times: &[f64],
    total_duration: f64,
) -> Comparison {
    let mut probes = Vec::with_capacity(probe_times.len());
    let mut skipped = Vec::new();

    for &t in probe_times {
        let Some((sim_altitude, sim_speed)) = trajectory.interpolate(t) else {
            skipped.push(t);
            continue;
        };
        let r = reference.interpolate(t);
        if r.extrapolated {
            warn!(t, "reference telemetry extrapolated at probe time");
        }
        probes.push(ProbeComparison {
            time: t,
            sim_altitude,
            ref_altitude: r.altitude,
            sim_speed,
            ref_speed: r.speed,
            extrapolated: r.extrapolated,
        });
    }

    let reference_truncated = reference.max_time() > total_duration;
    let overlay = if reference_truncated {
        warn!(
            recorded = reference.max_time(),
            simulated = total_duration,
            "reference telemetry runs past the simulated duration, truncating"
        );
        reference.truncated(total_duration)
    } else {
        reference.samples().to_vec()
    };

    Comparison {
        probes,
        skipped,
        reference: overlay,
        reference_truncated,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::presets;
    use crate::sim::simulate;
    use approx::assert_abs_diff_eq;

    fn point(t: f64, alt: f64, speed: f64) -> ReferenceSample {
        ReferenceSample { mission_time: t, altitude: alt, speed, pitch: 0.0 }
    }

    #[test]
    fn default_probes_for_presets() {
        assert_eq!(default_probe_times(&presets::avangard()), vec![50.0, 85.0, 135.0]);
        assert_eq!(default_probe_times(&presets::avangard_extended()), vec![50.0, 85.0, 145.0]);
    }

    #[test]
    fn compares_and_flags() {
        let mut cfg = presets::avangard();
        cfg.run.total_duration = 20.0;
        let traj = simulate(&cfg).unwrap();
        let reference = ReferenceSeries::new(vec![
            point(0.0, 0.0, 0.0),
            point(10.0, 500.0, 100.0),
            point(15.0, 1_200.0, 180.0),
            point(30.0, 5_000.0, 400.0),
        ])
        .unwrap();

        let cmp = compare(&traj, &reference, &[10.0, 20.0, 40.0], 20.0);
        assert_eq!(cmp.probes.len(), 2);
        assert_eq!(cmp.skipped, vec![40.0]);
        assert_eq!(cmp.probes[0].ref_altitude, 500.0);
        assert_eq!(cmp.probes[0].sim_altitude, traj.sample_at(10.0).unwrap().altitude);
        assert_eq!(cmp.probes[0].altitude_error(), cmp.probes[0].sim_altitude - 500.0);
        assert!(!cmp.any_extrapolated());

        assert!(cmp.reference_truncated);
        assert_eq!(cmp.reference.len(), 3);
        assert!(cmp.reference.iter().all(|p| p.mission_time <= 20.0));
        // Input series untouched
        assert_eq!(reference.samples().len(), 4);
    }

    #[test]
    fn short_reference_is_extrapolated() {
        let mut cfg = presets::avangard();
        cfg.run.total_duration = 20.0;
        let traj = simulate(&cfg).unwrap();
        let reference = ReferenceSeries::new(vec![point(0.0, 0.0, 0.0), point(5.0, 100.0, 40.0)]).unwrap();
        let cmp = compare(&traj, &reference, &[5.0, 20.0], 20.0);
        assert!(!cmp.probes[0].extrapolated);
        assert!(cmp.probes[1].extrapolated);
        assert!(cmp.any_extrapolated());
        assert!(!cmp.reference_truncated);
    }

    #[test]
    fn off_grid_self_comparison_has_no_error() {
        let mut cfg = presets::avangard();
        cfg.run.total_duration = 20.0;
        let traj = simulate(&cfg).unwrap();
        let own = traj
            .samples
            .iter()
            .map(|s| point(s.time, s.altitude, s.speed))
            .collect();
        let reference = ReferenceSeries::new(own).unwrap();

        let cmp = compare(&traj, &reference, &[10.05, 12.37, 19.99], 20.0);
        assert_eq!(cmp.probes.len(), 3);
        for p in &cmp.probes {
            assert_abs_diff_eq!(p.altitude_error(), 0.0, epsilon = 1e-9);
            assert_abs_diff_eq!(p.speed_error(), 0.0, epsilon = 1e-9);
        }
        // Off-grid values lie strictly between the neighbouring samples.
        let (lo, hi) = (traj.samples[100].altitude, traj.samples[101].altitude);
        assert!(cmp.probes[0].sim_altitude > lo && cmp.probes[0].sim_altitude < hi);
    }
}
