use tracing::warn;

use crate::error::TelemetryError;
use super::log::ReferenceSample;

/// Interpolated reference value at one time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Interpolated {
    pub altitude: f64,
    pub speed: f64,
    /// Outside the recorded time range: the value is a linear extrapolation
    /// of the edge segment and carries no accuracy guarantee.
    pub extrapolated: bool,
}

// ---------------------------------------------------------------------------
// Reference series
// ---------------------------------------------------------------------------

/// Recorded telemetry as a continuous function of time.
///
/// Samples are kept in recorded order; interpolation runs over a copy
/// sorted by time, so an out-of-order log still interpolates.
#[derive(Debug, Clone)]
pub struct ReferenceSeries {
    samples: Vec<ReferenceSample>,
    sorted: Vec<ReferenceSample>,
}

impl ReferenceSeries {
    pub fn new(samples: Vec<ReferenceSample>) -> Result<Self, TelemetryError> {
        if samples.len() < 2 {
            return Err(TelemetryError::TooFewSamples(samples.len()));
        }
        let mut sorted = samples.clone();
        sorted.sort_by(|a, b| a.mission_time.total_cmp(&b.mission_time));
        let series = Self { samples, sorted };
        if !series.is_monotonic() {
            warn!("reference series is not ordered by mission time");
        }
        Ok(series)
    }

    pub fn samples(&self) -> &[ReferenceSample] {
        &self.samples
    }

    /// Times are non-decreasing in recorded order.
    pub fn is_monotonic(&self) -> bool {
        self.samples
            .windows(2)
            .all(|w| w[0].mission_time <= w[1].mission_time)
    }

    /// Earliest and latest recorded times.
    pub fn time_range(&self) -> (f64, f64) {
        let first = self.sorted[0].mission_time;
        let last = self.sorted[self.sorted.len() - 1].mission_time;
        (first, last)
    }

    pub fn max_time(&self) -> f64 {
        self.time_range().1
    }

    /// Recorded samples cut at the first one later than `max_time`
    /// (exclusive). Returned unchanged when nothing exceeds `max_time`.
    pub fn truncated(&self, max_time: f64) -> Vec<ReferenceSample> {
        match self.samples.iter().position(|s| s.mission_time > max_time) {
            Some(idx) => self.samples[..idx].to_vec(),
            None => self.samples.clone(),
        }
    }

    /// Piecewise-linear altitude and speed at `t`. Exact at recorded times.
    pub fn interpolate(&self, t: f64) -> Interpolated {
        let s = &self.sorted;
        let n = s.len();
        let (t_min, t_max) = self.time_range();
        let extrapolated = t < t_min || t > t_max;

        let idx = s.partition_point(|p| p.mission_time < t);
        if idx < n && s[idx].mission_time == t {
            return Interpolated {
                altitude: s[idx].altitude,
                speed: s[idx].speed,
                extrapolated,
            };
        }

        let hi = idx.clamp(1, n - 1);
        let (a, b) = (&s[hi - 1], &s[hi]);
        let span = b.mission_time - a.mission_time;
        let frac = if span > 0.0 { (t - a.mission_time) / span } else { 0.0 };

        Interpolated {
            altitude: a.altitude + (b.altitude - a.altitude) * frac,
            speed: a.speed + (b.speed - a.speed) * frac,
            extrapolated,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn point(t: f64, alt: f64, speed: f64) -> ReferenceSample {
        ReferenceSample { mission_time: t, altitude: alt, speed, pitch: 90.0 }
    }

    fn series() -> ReferenceSeries {
        ReferenceSeries::new(vec![
            point(0.0, 75.0, 0.0),
            point(10.0, 1_000.0, 200.0),
            point(20.0, 4_000.0, 400.0),
            point(30.0, 9_000.0, 700.0),
        ])
        .unwrap()
    }

    #[test]
    fn needs_two_samples() {
        assert!(matches!(
            ReferenceSeries::new(vec![point(0.0, 0.0, 0.0)]),
            Err(TelemetryError::TooFewSamples(1))
        ));
    }

    #[test]
    fn identity_at_recorded_times() {
        let s = series();
        for p in s.samples().to_vec() {
            let v = s.interpolate(p.mission_time);
            assert_eq!(v.altitude, p.altitude);
            assert_eq!(v.speed, p.speed);
            assert!(!v.extrapolated);
        }
    }

    #[test]
    fn linear_between_samples() {
        let v = series().interpolate(15.0);
        assert_relative_eq!(v.altitude, 2_500.0);
        assert_relative_eq!(v.speed, 300.0);
        assert!(!v.extrapolated);
    }

    #[test]
    fn extrapolation_is_flagged() {
        let s = series();
        let after = s.interpolate(40.0);
        assert!(after.extrapolated);
        assert_relative_eq!(after.altitude, 14_000.0);
        let before = s.interpolate(-10.0);
        assert!(before.extrapolated);
        assert_relative_eq!(before.speed, -200.0);
    }

    #[test]
    fn truncation_is_exclusive() {
        let s = series();
        let cut = s.truncated(20.0);
        assert_eq!(cut.len(), 3);
        assert!(cut.iter().all(|p| p.mission_time <= 20.0));
        assert_eq!(s.truncated(100.0).len(), 4);
    }

    #[test]
    fn out_of_order_samples_still_interpolate() {
        let s = ReferenceSeries::new(vec![
            point(10.0, 1_000.0, 200.0),
            point(0.0, 0.0, 0.0),
            point(20.0, 3_000.0, 400.0),
        ])
        .unwrap();
        assert!(!s.is_monotonic());
        assert_eq!(s.time_range(), (0.0, 20.0));
        assert_relative_eq!(s.interpolate(5.0).altitude, 500.0);
    }
}
