use serde::Serialize;

use crate::dynamics::TrajectorySample;

// ---------------------------------------------------------------------------
// Simulation events
// ---------------------------------------------------------------------------

/// Kinds of simulation events.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EventKind {
    Burnout { stage: usize },
    Staging { from: usize, to: usize },
    TurnStart,
    TurnEnd,
    Apogee,
    AltitudeCrossing { altitude: f64 },
    RunEnd,
}

impl std::fmt::Display for EventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EventKind::Burnout { stage } => write!(f, "BURNOUT S{}", stage + 1),
            EventKind::Staging { from, to } => write!(f, "STAGING S{} -> S{}", from + 1, to + 1),
            EventKind::TurnStart => write!(f, "TURN START"),
            EventKind::TurnEnd => write!(f, "TURN END"),
            EventKind::Apogee => write!(f, "APOGEE"),
            EventKind::AltitudeCrossing { altitude } => write!(f, "ALT {:.0} m", altitude),
            EventKind::RunEnd => write!(f, "RUN END"),
        }
    }
}

/// A discrete event, stamped with the first sample at which it was seen.
#[derive(Debug, Clone, Serialize)]
pub struct SimEvent {
    pub time: f64,
    #[serde(flatten)]
    pub kind: EventKind,
    pub sample: TrajectorySample,
}

/// Trait for passive event detectors.
/// Implementations inspect consecutive samples and report events.
pub trait EventDetector {
    fn check(&mut self, prev: &TrajectorySample, current: &TrajectorySample) -> Option<EventKind>;
}

/// Detects an active-stage change.
pub struct StagingDetector;

impl EventDetector for StagingDetector {
    fn check(&mut self, prev: &TrajectorySample, current: &TrajectorySample) -> Option<EventKind> {
        (prev.stage != current.stage).then_some(EventKind::Staging {
            from: prev.stage,
            to: current.stage,
        })
    }
}

/// Detects the end of a stage's thrust, either by cutoff or by staging.
pub struct BurnoutDetector;

impl EventDetector for BurnoutDetector {
    fn check(&mut self, prev: &TrajectorySample, current: &TrajectorySample) -> Option<EventKind> {
        let cut = current.thrust == 0.0 || current.stage != prev.stage;
        (prev.thrust > 0.0 && cut).then_some(EventKind::Burnout { stage: prev.stage })
    }
}

/// Detects when the commanded pitch starts and stops changing.
#[derive(Default)]
pub struct TurnDetector {
    turning: bool,
    done: bool,
}

impl EventDetector for TurnDetector {
    fn check(&mut self, prev: &TrajectorySample, current: &TrajectorySample) -> Option<EventKind> {
        if self.done {
            return None;
        }
        let changing = current.pitch != prev.pitch;
        if !self.turning && changing {
            self.turning = true;
            Some(EventKind::TurnStart)
        } else if self.turning && !changing {
            self.done = true;
            Some(EventKind::TurnEnd)
        } else {
            None
        }
    }
}

/// Detects apogee (vertical velocity going from positive to non-positive).
pub struct ApogeeDetector;

impl EventDetector for ApogeeDetector {
    fn check(&mut self, prev: &TrajectorySample, current: &TrajectorySample) -> Option<EventKind> {
        if prev.vy > 0.0 && current.vy <= 0.0 && current.altitude > 100.0 {
            Some(EventKind::Apogee)
        } else {
            None
        }
    }
}

/// Detects the first ascending crossing of an altitude.
pub struct AltitudeDetector {
    pub altitude: f64,
    fired: bool,
}

impl AltitudeDetector {
    pub fn new(altitude: f64) -> Self {
        Self { altitude, fired: false }
    }
}

impl EventDetector for AltitudeDetector {
    fn check(&mut self, prev: &TrajectorySample, current: &TrajectorySample) -> Option<EventKind> {
        if self.fired {
            return None;
        }
        if prev.altitude < self.altitude && current.altitude >= self.altitude {
            self.fired = true;
            Some(EventKind::AltitudeCrossing { altitude: self.altitude })
        } else {
            None
        }
    }
}

/// Standard detector set for an ascent run.
pub fn ascent_detectors(altitude_marks: &[f64]) -> Vec<Box<dyn EventDetector>> {
    let mut detectors: Vec<Box<dyn EventDetector>> = vec![
        Box::new(BurnoutDetector),
        Box::new(StagingDetector),
        Box::new(TurnDetector::default()),
        Box::new(ApogeeDetector),
    ];
    for &alt in altitude_marks {
        detectors.push(Box::new(AltitudeDetector::new(alt)));
    }
    detectors
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(time: f64, altitude: f64, vy: f64) -> TrajectorySample {
        TrajectorySample {
            time,
            downrange: 0.0,
            altitude,
            speed: vy.abs(),
            vx: 0.0,
            vy,
            pitch: 90.0,
            mass: 100.0,
            stage: 0,
            thrust: 1_000.0,
        }
    }

    #[test]
    fn apogee_detected() {
        let mut det = ApogeeDetector;
        let prev = sample(10.0, 5_000.0, 10.0);
        let curr = sample(10.1, 5_005.0, -1.0);
        assert_eq!(det.check(&prev, &curr), Some(EventKind::Apogee));
    }

    #[test]
    fn altitude_detector_fires_once() {
        let mut det = AltitudeDetector::new(17_000.0);
        let prev = sample(40.0, 16_950.0, 500.0);
        let curr = sample(40.1, 17_010.0, 500.0);
        assert!(det.check(&prev, &curr).is_some());
        assert!(det.check(&prev, &curr).is_none());
    }

    #[test]
    fn staging_and_burnout() {
        let prev = sample(50.0, 10_000.0, 500.0);
        let curr = TrajectorySample { stage: 1, ..sample(50.1, 10_050.0, 500.0) };
        assert_eq!(StagingDetector.check(&prev, &curr), Some(EventKind::Staging { from: 0, to: 1 }));
        assert_eq!(BurnoutDetector.check(&prev, &curr), Some(EventKind::Burnout { stage: 0 }));

        let flameout = TrajectorySample { thrust: 0.0, ..sample(50.1, 10_050.0, 500.0) };
        assert_eq!(BurnoutDetector.check(&prev, &flameout), Some(EventKind::Burnout { stage: 0 }));
        assert_eq!(BurnoutDetector.check(&flameout, &flameout), None);
    }

    #[test]
    fn turn_start_then_end() {
        let mut det = TurnDetector::default();
        let a = sample(50.0, 0.0, 1.0);
        let b = TrajectorySample { pitch: 89.7, ..a };
        let c = TrajectorySample { pitch: 0.8, ..a };
        assert_eq!(det.check(&a, &a), None);
        assert_eq!(det.check(&a, &b), Some(EventKind::TurnStart));
        assert_eq!(det.check(&b, &c), None);
        assert_eq!(det.check(&c, &c), Some(EventKind::TurnEnd));
        assert_eq!(det.check(&c, &c), None);
    }
}
