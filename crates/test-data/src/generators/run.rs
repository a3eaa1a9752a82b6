//! Run generation: splits, real-time samples and a closing summary.

use coach::models::{CoachStyle, TelemetrySnapshot};
use rand::Rng;

use crate::config::SimulationConfig;
use crate::profiles::{RunnerProfile, sample_variance};

/// A simulated run, ready to be replayed against the coach.
#[derive(Debug, Clone)]
pub struct GeneratedRun {
    /// Seconds per completed kilometre.
    pub splits: Vec<f64>,
    /// Snapshots taken every `sample_interval_secs` while running.
    pub samples: Vec<TelemetrySnapshot>,
    /// Snapshot sent once the run is over. Carries the splits when at least
    /// one kilometre was completed.
    pub summary: TelemetrySnapshot,
}

impl GeneratedRun {
    pub fn total_duration(&self) -> f64 {
        self.summary.duration_sec
    }
}

/// One stretch of at most a kilometre run at a constant pace.
#[derive(Debug, Clone, Copy)]
struct Segment {
    start_km: f64,
    length_km: f64,
    /// Minutes per kilometre.
    pace: f64,
    start_sec: f64,
}

impl Segment {
    fn seconds(&self) -> f64 {
        self.pace * 60.0 * self.length_km
    }
}

/// Generates runs for one runner under one configuration.
pub struct RunGenerator {
    profile: RunnerProfile,
    config: SimulationConfig,
}

impl RunGenerator {
    pub fn new(profile: RunnerProfile, config: SimulationConfig) -> Self {
        Self { profile, config }
    }

    pub fn generate(&self, rng: &mut impl Rng) -> GeneratedRun {
        let segments = self.segments(rng);
        let total_sec = segments.last().map_or(0.0, |s| s.start_sec + s.seconds());

        let splits: Vec<f64> = segments
            .iter()
            .filter(|s| s.length_km >= 1.0 - f64::EPSILON)
            .map(|s| round_to(s.seconds(), 1))
            .collect();

        let samples = self.samples(&segments, total_sec);

        let distance = self.config.distance_km.max(0.0);
        let average_pace = if distance > 0.0 {
            total_sec / 60.0 / distance
        } else {
            self.profile.base_pace()
        };

        let mut summary = self.snapshot(round_to(average_pace, 2), distance, total_sec);
        summary.heart_rate_bpm = Some(f64::from(self.profile.heart_rate_at(1.0)));
        summary.km_splits = (!splits.is_empty()).then(|| splits.clone());

        GeneratedRun {
            splits,
            samples,
            summary,
        }
    }

    fn segments(&self, rng: &mut impl Rng) -> Vec<Segment> {
        let distance = self.config.distance_km;
        if !distance.is_finite() || distance <= 0.0 {
            return Vec::new();
        }

        let count = distance.ceil() as usize;
        let mut segments = Vec::with_capacity(count);
        let mut start_sec = 0.0;

        for k in 0..count {
            let start_km = k as f64;
            let progress = if count > 1 {
                k as f64 / (count - 1) as f64
            } else {
                0.0
            };
            let pace = self.profile.base_pace()
                * self.config.pattern.multiplier(progress)
                * sample_variance(&self.profile, rng);

            let segment = Segment {
                start_km,
                length_km: (distance - start_km).min(1.0),
                pace,
                start_sec,
            };
            start_sec += segment.seconds();
            segments.push(segment);
        }

        segments
    }

    fn samples(&self, segments: &[Segment], total_sec: f64) -> Vec<TelemetrySnapshot> {
        let interval = self.config.sample_interval_secs;
        if !interval.is_finite() || interval <= 0.0 {
            return Vec::new();
        }

        let mut samples = Vec::new();
        let mut t = interval;
        while t < total_sec {
            let Some(segment) = segments
                .iter()
                .find(|s| t < s.start_sec + s.seconds())
            else {
                break;
            };

            let distance = segment.start_km + (t - segment.start_sec) / (segment.pace * 60.0);
            let mut snapshot = self.snapshot(round_to(segment.pace, 2), round_to(distance, 3), t);
            snapshot.heart_rate_bpm = Some(f64::from(
                self.profile.heart_rate_at(distance / self.config.distance_km),
            ));
            samples.push(snapshot);

            t += interval;
        }

        samples
    }

    fn snapshot(&self, pace: f64, distance_km: f64, duration_sec: f64) -> TelemetrySnapshot {
        let mut snapshot = TelemetrySnapshot::new(pace, distance_km, duration_sec.round());
        snapshot.target_pace = self.config.target_pace;
        snapshot.total_distance_km = Some(self.config.distance_km);
        snapshot.coach_style = CoachStyle::from_name(Some(&self.config.coach_style));
        snapshot
    }
}

fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}
