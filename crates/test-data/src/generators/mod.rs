//! Telemetry generators for test data.
//!
//! - [`RunGenerator`]: Simulate a run as real-time snapshots plus a summary

pub mod run;

pub use run::{GeneratedRun, RunGenerator};
