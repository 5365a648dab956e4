use crate::physics::Environment;
use super::stage::Stage;

// ---------------------------------------------------------------------------
// Propulsion: altitude-corrected Isp and thrust
// ---------------------------------------------------------------------------

/// Isp blended from sea level toward vacuum with the same scale height as
/// the density model.
pub fn specific_impulse(stage: &Stage, env: &Environment, altitude: f64) -> f64 {
    let sea_level = stage.sea_level_isp();
    sea_level + (stage.vacuum_isp - sea_level) * env.vacuum_fraction(altitude)
}

/// Thrust magnitude, N. Non-zero only while the stage-local clock is in
/// `[0, thrust_cutoff]`.
pub fn thrust(stage: &Stage, env: &Environment, local_time: f64, altitude: f64) -> f64 {
    if (0.0..=stage.thrust_cutoff()).contains(&local_time) {
        specific_impulse(stage, env, altitude) * stage.mass_flow() * env.g0
    } else {
        0.0
    }
}
