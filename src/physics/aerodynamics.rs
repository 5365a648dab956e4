use nalgebra::Vector2;
use serde::{Deserialize, Serialize};

/// Vehicle aerodynamic properties (one set for the whole stack).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aero {
    pub drag_coefficient: f64,
    pub reference_area: f64,    // m^2
}

impl Aero {
    /// Circular cross-section of the given radius.
    pub fn circular(drag_coefficient: f64, radius: f64) -> Self {
        Self {
            drag_coefficient,
            reference_area: std::f64::consts::PI * radius * radius,
        }
    }
}

/// Aerodynamic drag force (downrange, up), opposing velocity.
/// Zero when the vehicle is at rest.
pub fn drag_force(vel: &Vector2<f64>, density: f64, aero: &Aero) -> Vector2<f64> {
    let speed = vel.norm();
    if speed > 0.0 {
        let drag_mag = 0.5 * density * speed * speed * aero.drag_coefficient * aero.reference_area;
        -(vel / speed) * drag_mag
    } else {
        Vector2::zeros()
    }
}
