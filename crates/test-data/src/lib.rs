//! Test data generation for the coach service.
//!
//! This crate simulates runs as the app would report them and replays them
//! against a running service to check the coach's responses end to end.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use test_data::prelude::*;
//!
//! let config = SimulationConfig {
//!     distance_km: 5.0,
//!     pattern: PacingPattern::Fade,
//!     ..Default::default()
//! };
//! let run = RunGenerator::new(RunnerProfile::with_pace(5.5), config)
//!     .generate(&mut rand::thread_rng());
//!
//! let client = CoachClient::new("http://localhost:3001");
//! for snapshot in &run.samples {
//!     let reply = client.post_feedback(snapshot).await?;
//!     println!("{}", reply.feedback);
//! }
//! ```

pub mod api;
pub mod config;
pub mod generators;
pub mod profiles;

// Re-export core types from coach crate
pub use coach::models::{CoachStyle, TelemetrySnapshot};

pub mod prelude {
    //! Convenient re-exports for common usage.

    pub use crate::api::{ApiError, CoachClient, CoachReply};
    pub use crate::config::{PacingPattern, SimulationConfig};
    pub use crate::generators::{GeneratedRun, RunGenerator};
    pub use crate::profiles::{RunnerProfile, sample_variance};
    pub use crate::{CoachStyle, TelemetrySnapshot};
}
