use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Guidance: commanded pitch angle (deg from horizontal)
// ---------------------------------------------------------------------------

/// Trait for pitch programs.
///
/// Implement this to plug a different steering law into the simulation
/// loop. Pitch is in degrees from the local horizontal.
pub trait PitchProgram {
    fn pitch_deg(&self, time: f64, altitude: f64) -> f64;

    /// Human-readable name, recorded with every trajectory.
    fn name(&self) -> &str {
        "unnamed"
    }
}

/// Time-scheduled gravity turn: hold `start_pitch` until `turn_start`,
/// ramp linearly to `end_pitch` by `turn_end`, then hold `end_pitch`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GuidanceProfile {
    pub start_pitch: f64,   // deg
    pub end_pitch: f64,     // deg
    pub turn_start: f64,    // s
    pub turn_end: f64,      // s
}

impl GuidanceProfile {
    /// Pitch rate during the turn, deg/s. Zero for an instantaneous turn.
    pub fn rate(&self) -> f64 {
        let span = self.turn_end - self.turn_start;
        if span > 0.0 {
            (self.start_pitch - self.end_pitch) / span
        } else {
            0.0
        }
    }

    pub fn pitch_at(&self, t: f64) -> f64 {
        if t <= self.turn_start {
            self.start_pitch
        } else if t <= self.turn_end {
            (self.start_pitch - self.rate() * (t - self.turn_start)).max(0.0)
        } else {
            self.end_pitch
        }
    }
}

impl Default for GuidanceProfile {
    fn default() -> Self {
        Self {
            start_pitch: 90.0,
            end_pitch: 0.8,
            turn_start: 50.0,
            turn_end: 85.0,
        }
    }
}

impl PitchProgram for GuidanceProfile {
    fn pitch_deg(&self, time: f64, _altitude: f64) -> f64 {
        self.pitch_at(time)
    }

    fn name(&self) -> &str {
        "time-scheduled turn"
    }
}

/// Altitude-triggered turn flown by the live flight software:
/// `start_pitch * (1 - p^exponent)` where `p` is the fraction of the way
/// from `start_altitude` to `end_altitude`. Vertical below the band,
/// horizontal above it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AltitudeTurn {
    pub start_pitch: f64,       // deg
    pub start_altitude: f64,    // m
    pub end_altitude: f64,      // m
    pub exponent: f64,
}

impl Default for AltitudeTurn {
    fn default() -> Self {
        Self {
            start_pitch: 90.0,
            start_altitude: 12_000.0,
            end_altitude: 45_000.0,
            exponent: 1.5,
        }
    }
}

impl PitchProgram for AltitudeTurn {
    fn pitch_deg(&self, _time: f64, altitude: f64) -> f64 {
        if altitude <= self.start_altitude {
            self.start_pitch
        } else if altitude < self.end_altitude {
            let progress = ((altitude - self.start_altitude)
                / (self.end_altitude - self.start_altitude))
                .min(1.0);
            self.start_pitch * (1.0 - progress.powf(self.exponent))
        } else {
            0.0
        }
    }

    fn name(&self) -> &str {
        "altitude-triggered turn"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn vertical_before_turn() {
        let g = GuidanceProfile::default();
        assert_eq!(g.pitch_at(0.0), 90.0);
        assert_eq!(g.pitch_at(50.0), 90.0);
    }

    #[test]
    fn turn_boundaries() {
        let g = GuidanceProfile::default();
        assert_eq!(g.pitch_at(g.turn_start), g.start_pitch);
        assert_relative_eq!(g.pitch_at(g.turn_end), g.end_pitch, epsilon = 1e-9);
        assert_eq!(g.pitch_at(85.1), 0.8);
        assert_eq!(g.pitch_at(1_000.0), 0.8);
    }

    #[test]
    fn turn_midpoint_and_rate() {
        let g = GuidanceProfile::default();
        assert_relative_eq!(g.rate(), 89.2 / 35.0, epsilon = 1e-12);
        assert_relative_eq!(g.pitch_at(67.5), (90.0 + 0.8) / 2.0, epsilon = 1e-9);
    }

    #[test]
    fn non_increasing_through_turn() {
        let g = GuidanceProfile::default();
        let mut prev = g.pitch_at(g.turn_start);
        for i in 1..=350 {
            let p = g.pitch_at(g.turn_start + i as f64 * 0.1);
            assert!(p <= prev);
            prev = p;
        }
    }

    #[test]
    fn clamped_at_zero() {
        // Unvalidated profile whose ramp dips below the horizon
        let g = GuidanceProfile { start_pitch: 10.0, end_pitch: -10.0, turn_start: 0.0, turn_end: 2.0 };
        assert_eq!(g.pitch_at(1.5), 0.0);
        assert_eq!(g.pitch_at(2.5), -10.0);
        let steep = GuidanceProfile { start_pitch: 90.0, end_pitch: 0.0, turn_start: 0.0, turn_end: 0.0 };
        assert_eq!(steep.pitch_at(0.0), 90.0);
        assert_eq!(steep.pitch_at(0.1), 0.0);
    }

    #[test]
    fn altitude_turn_profile() {
        let a = AltitudeTurn::default();
        assert_eq!(a.pitch_deg(100.0, 5_000.0), 90.0);
        assert_eq!(a.pitch_deg(0.0, 12_000.0), 90.0);
        let mid = a.pitch_deg(0.0, 28_500.0);
        assert_relative_eq!(mid, 90.0 * (1.0 - 0.5_f64.powf(1.5)), epsilon = 1e-9);
        assert_eq!(a.pitch_deg(0.0, 50_000.0), 0.0);
    }

    #[test]
    fn programs_are_named() {
        assert_ne!(GuidanceProfile::default().name(), AltitudeTurn::default().name());
    }
}
