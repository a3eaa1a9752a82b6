//! Athletic performance profiles.
//!
//! Profiles define realistic paces and heart rates. They are used by the run
//! generator to produce believable telemetry.

mod runner;

pub use runner::RunnerProfile;

/// Samples a variance factor from normal distribution.
/// Returns a multiplier around 1.0.
pub fn sample_variance(profile: &RunnerProfile, rng: &mut impl rand::Rng) -> f64 {
    use rand_distr::{Distribution, Normal};

    match Normal::new(1.0, profile.variance()) {
        Ok(normal) if profile.variance() > 0.0 => {
            let sample: f64 = normal.sample(rng);
            sample.clamp(0.85, 1.15)
        }
        _ => 1.0,
    }
}

#[cfg(test)]
mod tests {
    use rand::{SeedableRng, rngs::StdRng};

    use super::*;

    #[test]
    fn test_steady_profile_has_no_variance() {
        let mut rng = StdRng::seed_from_u64(7);
        let profile = RunnerProfile::default().steady();
        for _ in 0..10 {
            assert_eq!(sample_variance(&profile, &mut rng), 1.0);
        }
    }

    #[test]
    fn test_variance_is_clamped() {
        let mut rng = StdRng::seed_from_u64(7);
        let profile = RunnerProfile::recreational();
        for _ in 0..1000 {
            let factor = sample_variance(&profile, &mut rng);
            assert!((0.85..=1.15).contains(&factor));
        }
    }
}
