//! Runner athletic profile.

/// Pace and heart-rate characteristics of a simulated runner.
///
/// Based on typical recreational to competitive runner performance:
/// - Base pace: ~5:30/km
/// - Heart rate climbs from ~135 bpm toward ~165 bpm over a hard run
#[derive(Debug, Clone)]
pub struct RunnerProfile {
    /// Base pace in minutes per kilometre on flat terrain.
    base_pace: f64,
    /// Performance variance (coefficient of variation) per kilometre.
    variance: f64,
    /// Heart rate in the first kilometre.
    starting_heart_rate: f64,
    /// Heart rate gained by the end of the run.
    heart_rate_drift: f64,
}

impl Default for RunnerProfile {
    fn default() -> Self {
        Self {
            base_pace: 5.5,
            variance: 0.03,
            starting_heart_rate: 135.0,
            heart_rate_drift: 30.0,
        }
    }
}

impl RunnerProfile {
    /// Creates a new runner profile with specified base pace.
    ///
    /// # Arguments
    /// * `pace_min_per_km` - Base pace in minutes per kilometer (e.g., 5.0 for 5:00/km)
    pub fn with_pace(pace_min_per_km: f64) -> Self {
        Self {
            base_pace: pace_min_per_km,
            ..Default::default()
        }
    }

    /// Creates an elite runner profile (~3:30/km base pace).
    pub fn elite() -> Self {
        Self {
            variance: 0.015,
            starting_heart_rate: 145.0,
            ..Self::with_pace(3.5)
        }
    }

    /// Creates a recreational runner profile (~6:30/km base pace).
    pub fn recreational() -> Self {
        Self {
            variance: 0.05,
            ..Self::with_pace(6.5)
        }
    }

    /// Same profile without per-kilometre noise.
    pub fn steady(mut self) -> Self {
        self.variance = 0.0;
        self
    }

    pub fn base_pace(&self) -> f64 {
        self.base_pace
    }

    pub fn variance(&self) -> f64 {
        self.variance
    }

    /// Heart rate at `progress` through the run (0.0 - 1.0).
    pub fn heart_rate_at(&self, progress: f64) -> u32 {
        let bpm = self.starting_heart_rate + self.heart_rate_drift * progress.clamp(0.0, 1.0);
        bpm.round() as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_profile() {
        let profile = RunnerProfile::default();
        assert!((profile.base_pace() - 5.5).abs() < 0.01);
    }

    #[test]
    fn test_presets_are_ordered() {
        assert!(RunnerProfile::elite().base_pace() < RunnerProfile::default().base_pace());
        assert!(RunnerProfile::recreational().base_pace() > RunnerProfile::default().base_pace());
    }

    #[test]
    fn test_heart_rate_drifts_upward() {
        let profile = RunnerProfile::default();
        assert_eq!(profile.heart_rate_at(0.0), 135);
        assert_eq!(profile.heart_rate_at(1.0), 165);
        assert_eq!(profile.heart_rate_at(2.0), 165);
        assert!(profile.heart_rate_at(0.5) > profile.heart_rate_at(0.25));
    }
}
