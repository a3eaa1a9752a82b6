//! Configuration types for run simulation.

use serde::{Deserialize, Serialize};

/// How pace develops over the course of a run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PacingPattern {
    /// Every kilometre at base pace.
    #[default]
    Even,
    /// Gradually slowing, ending about 12% slower than the first kilometre.
    Fade,
    /// Gradually speeding up, ending about 12% faster than the first kilometre.
    NegativeSplit,
}

impl PacingPattern {
    /// Pace multiplier at `progress` (0.0 = first kilometre, 1.0 = last).
    pub fn multiplier(self, progress: f64) -> f64 {
        let progress = progress.clamp(0.0, 1.0);
        match self {
            PacingPattern::Even => 1.0,
            PacingPattern::Fade => 1.0 + 0.12 * progress,
            PacingPattern::NegativeSplit => 1.0 - 0.12 * progress,
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "even" => Some(PacingPattern::Even),
            "fade" => Some(PacingPattern::Fade),
            "negative_split" | "negative" => Some(PacingPattern::NegativeSplit),
            _ => None,
        }
    }
}

/// Configuration for one simulated run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Planned distance in kilometres.
    pub distance_km: f64,

    /// Seconds between real-time snapshots.
    pub sample_interval_secs: f64,

    /// Target pace in minutes per kilometre, if the runner set one.
    pub target_pace: Option<f64>,

    /// Style name sent with every snapshot.
    pub coach_style: String,

    pub pattern: PacingPattern,

    /// Seed for reproducible runs.
    pub seed: Option<u64>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            distance_km: 5.0,
            sample_interval_secs: 300.0,
            target_pace: None,
            coach_style: "encouraging".to_string(),
            pattern: PacingPattern::Even,
            seed: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pattern_multipliers() {
        assert_eq!(PacingPattern::Even.multiplier(0.7), 1.0);
        assert!((PacingPattern::Fade.multiplier(1.0) - 1.12).abs() < 1e-9);
        assert!((PacingPattern::NegativeSplit.multiplier(1.0) - 0.88).abs() < 1e-9);
        assert_eq!(PacingPattern::Fade.multiplier(-1.0), 1.0);
    }

    #[test]
    fn test_pattern_names() {
        assert_eq!(PacingPattern::from_name("fade"), Some(PacingPattern::Fade));
        assert_eq!(
            PacingPattern::from_name("Negative-Split"),
            Some(PacingPattern::NegativeSplit)
        );
        assert_eq!(PacingPattern::from_name("sprint"), None);
    }
}
