use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Planetary environment: inverse-square gravity + exponential atmosphere
// ---------------------------------------------------------------------------

/// Planet constants shared by gravity, density, and Isp altitude correction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Environment {
    pub g0: f64,                // surface gravity, m/s^2
    pub planetary_radius: f64,  // effective radius, m
    pub surface_density: f64,   // kg/m^3
    pub scale_height: f64,      // m
}

impl Environment {
    /// Kerbin-like body the flight logs were recorded on.
    pub fn kerbin() -> Self {
        Self {
            g0: 9.81,
            planetary_radius: 600_000.0,
            surface_density: 1.223,
            scale_height: 5_600.0,
        }
    }

    /// `g0 * (R / (R + h))^2`
    pub fn gravity(&self, altitude: f64) -> f64 {
        let r = self.planetary_radius;
        self.g0 * (r / (r + altitude)).powi(2)
    }

    /// `rho0 * exp(-h / H)`
    pub fn density(&self, altitude: f64) -> f64 {
        self.surface_density * (-altitude / self.scale_height).exp()
    }

    /// Fraction of the way from sea level to vacuum, `1 - exp(-h / H)`.
    /// Zero at the surface, approaching one as the atmosphere thins.
    pub fn vacuum_fraction(&self, altitude: f64) -> f64 {
        1.0 - (-altitude / self.scale_height).exp()
    }
}

impl Default for Environment {
    fn default() -> Self {
        Self::kerbin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn surface_values() {
        let env = Environment::kerbin();
        assert_relative_eq!(env.gravity(0.0), 9.81);
        assert_relative_eq!(env.density(0.0), 1.223);
        assert_eq!(env.vacuum_fraction(0.0), 0.0);
    }

    #[test]
    fn gravity_inverse_square() {
        let env = Environment::kerbin();
        // One planetary radius up: a quarter of surface gravity
        assert_relative_eq!(env.gravity(600_000.0), 9.81 / 4.0, epsilon = 1e-12);
        assert!(env.gravity(10_000.0) < env.gravity(0.0));
    }

    #[test]
    fn density_drops_by_e_per_scale_height() {
        let env = Environment::kerbin();
        assert_relative_eq!(env.density(5_600.0), 1.223 / std::f64::consts::E, epsilon = 1e-12);
    }

    #[test]
    fn negative_altitude_is_defined() {
        let env = Environment::kerbin();
        assert!(env.gravity(-100.0) > env.g0);
        assert!(env.density(-100.0) > env.surface_density);
    }
}
