//! Replay a simulated run against a running coach service
//!
//! Run with:
//! ```
//! cargo run -p test-data --bin replay
//! ```
//!
//! Environment:
//! - `COACH_URL` (default `http://localhost:3001`)
//! - `RUN_DISTANCE_KM` (default 5)
//! - `RUN_PACE` base pace in minutes per kilometre (default 5.5)
//! - `RUN_PATTERN` `even`, `fade` or `negative_split` (default even)
//! - `COACH_STYLE` (default encouraging)
//! - `SAMPLE_INTERVAL_SECS` (default 300)
//! - `RUN_SEED` for a reproducible run

use std::env;

use rand::{SeedableRng, rngs::StdRng};
use test_data::prelude::*;
use tracing_subscriber::EnvFilter;

fn env_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let base_url = env::var("COACH_URL").unwrap_or_else(|_| "http://localhost:3001".to_string());
    let pattern = env::var("RUN_PATTERN")
        .ok()
        .and_then(|name| PacingPattern::from_name(&name))
        .unwrap_or_default();

    let config = SimulationConfig {
        distance_km: env_or("RUN_DISTANCE_KM", 5.0),
        sample_interval_secs: env_or("SAMPLE_INTERVAL_SECS", 300.0),
        target_pace: env::var("TARGET_PACE").ok().and_then(|v| v.parse().ok()),
        coach_style: env::var("COACH_STYLE").unwrap_or_else(|_| "encouraging".to_string()),
        pattern,
        seed: env::var("RUN_SEED").ok().and_then(|v| v.parse().ok()),
    };

    let client = CoachClient::new(&base_url);
    client.check_health().await?;
    tracing::info!("Connected to coach at {base_url}");

    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let profile = RunnerProfile::with_pace(env_or("RUN_PACE", 5.5));
    let run = RunGenerator::new(profile, config.clone()).generate(&mut rng);

    tracing::info!(
        "Replaying {:.1} km {:?} run: {} samples, {} splits",
        config.distance_km,
        config.pattern,
        run.samples.len(),
        run.splits.len()
    );

    for snapshot in &run.samples {
        let reply = client.post_feedback(snapshot).await?;
        tracing::info!(
            "[{:>5.0}s {:>5.2} km {:.2} min/km] {}",
            snapshot.duration_sec,
            snapshot.distance_km,
            snapshot.current_pace,
            reply.feedback
        );
    }

    let reply = client.post_feedback(&run.summary).await?;
    tracing::info!("Summary: {}", reply.feedback);

    Ok(())
}
