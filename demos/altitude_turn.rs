use ascent_sim::config::presets;
use ascent_sim::gnc::{AltitudeTurn, PitchProgram};
use ascent_sim::sim::{self, Trajectory};

/// Holds vertical, then snaps to a fixed pitch once past a time mark.
struct PitchKick {
    kick_time: f64,
    kick_pitch: f64,
}

impl PitchProgram for PitchKick {
    fn pitch_deg(&self, time: f64, _altitude: f64) -> f64 {
        if time < self.kick_time { 90.0 } else { self.kick_pitch }
    }

    fn name(&self) -> &str {
        "pitch kick"
    }
}

fn report(traj: &Trajectory) {
    let Some(last) = traj.last() else { return };
    println!(
        "{:<24} alt {:>8.0} m   range {:>8.0} m   speed {:>7.1} m/s",
        traj.guidance, last.altitude, last.downrange, last.speed
    );
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = presets::avangard();

    let timed = sim::simulate(&config)?;
    let by_altitude = sim::simulate_with(&config, &AltitudeTurn::default())?;
    let kick = sim::simulate_with(&config, &PitchKick { kick_time: 50.0, kick_pitch: 45.0 })?;

    println!("State at t={:.0} s:", config.run.total_duration);
    report(&timed);
    report(&by_altitude);
    report(&kick);
    Ok(())
}
