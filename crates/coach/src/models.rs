use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use utoipa::ToSchema;

use crate::feedback::FeedbackError;

/// Tone the coach speaks in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum CoachStyle {
    #[default]
    Encouraging,
    Strict,
    Calm,
}

impl CoachStyle {
    /// Resolve a style from its wire name. Missing or unknown names fall back
    /// to [`CoachStyle::Encouraging`].
    pub fn from_name(name: Option<&str>) -> Self {
        match name.map(|n| n.trim().to_ascii_lowercase()).as_deref() {
            Some("strict") => CoachStyle::Strict,
            Some("calm") => CoachStyle::Calm,
            Some("encouraging") => CoachStyle::Encouraging,
            Some(other) => {
                tracing::debug!("Unknown coach style {other:?}, using encouraging");
                CoachStyle::Encouraging
            }
            None => CoachStyle::Encouraging,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            CoachStyle::Encouraging => "encouraging",
            CoachStyle::Strict => "strict",
            CoachStyle::Calm => "calm",
        }
    }
}

/// Which prompt template a snapshot is answered with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedbackMode {
    /// Short nudge spoken while the run is in progress.
    RealTime,
    /// Longer recap once per-kilometre splits are available.
    Summary,
}

/// Run telemetry captured at one moment of a run.
#[derive(Debug, Clone, PartialEq)]
pub struct TelemetrySnapshot {
    /// Minutes per kilometre.
    pub current_pace: f64,
    pub target_pace: Option<f64>,
    pub distance_km: f64,
    pub total_distance_km: Option<f64>,
    pub duration_sec: f64,
    /// As reported; rounded to whole beats by [`TelemetrySnapshot::heart_rate`].
    pub heart_rate_bpm: Option<f64>,
    pub coach_style: CoachStyle,
    /// Seconds per completed kilometre, in kilometre order.
    pub km_splits: Option<Vec<f64>>,
}

impl TelemetrySnapshot {
    /// A real-time snapshot with only the required fields set.
    pub fn new(current_pace: f64, distance_km: f64, duration_sec: f64) -> Self {
        Self {
            current_pace,
            target_pace: None,
            distance_km,
            total_distance_km: None,
            duration_sec,
            heart_rate_bpm: None,
            coach_style: CoachStyle::default(),
            km_splits: None,
        }
    }

    /// Non-empty splits switch the pipeline to summary mode; nothing else does.
    pub fn mode(&self) -> FeedbackMode {
        match &self.km_splits {
            Some(splits) if !splits.is_empty() => FeedbackMode::Summary,
            _ => FeedbackMode::RealTime,
        }
    }

    /// Heart rate in whole beats per minute.
    pub fn heart_rate(&self) -> Option<u32> {
        self.heart_rate_bpm
            .filter(|bpm| bpm.is_finite() && *bpm >= 0.0)
            .map(|bpm| bpm.round() as u32)
    }

    /// The splits, if any were recorded.
    pub fn splits(&self) -> &[f64] {
        self.km_splits.as_deref().unwrap_or_default()
    }

    pub fn validate(&self) -> Result<(), FeedbackError> {
        let invalid = |msg: &str| Err(FeedbackError::InvalidTelemetry(msg.to_string()));

        if !self.current_pace.is_finite() || self.current_pace <= 0.0 {
            return invalid("current pace must be a positive number");
        }
        if !self.distance_km.is_finite() || self.distance_km < 0.0 {
            return invalid("distance must be a non-negative number");
        }
        if !self.duration_sec.is_finite() || self.duration_sec < 0.0 {
            return invalid("duration must be a non-negative number");
        }
        if let Some(target) = self.target_pace
            && (!target.is_finite() || target <= 0.0)
        {
            return invalid("target pace must be a positive number");
        }
        if let Some(total) = self.total_distance_km
            && (!total.is_finite() || total <= 0.0)
        {
            return invalid("total distance must be a positive number");
        }
        if let Some(bpm) = self.heart_rate_bpm
            && (!bpm.is_finite() || bpm.round() < 1.0)
        {
            return invalid("heart rate must be at least one beat per minute");
        }
        if self
            .splits()
            .iter()
            .any(|split| !split.is_finite() || *split <= 0.0)
        {
            return invalid("splits must be positive numbers");
        }
        Ok(())
    }
}

/// Where a piece of feedback text came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedbackSource {
    Generated,
    Fallback,
}

/// Response envelope for the feedback endpoint.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct FeedbackResult {
    /// Always true: the coaching voice never reports an error mid-run.
    pub success: bool,
    pub feedback: String,
    #[serde(with = "time::serde::rfc3339")]
    pub timestamp: OffsetDateTime,
    #[serde(skip)]
    pub source: FeedbackSource,
}

impl FeedbackResult {
    pub fn new(feedback: String, source: FeedbackSource) -> Self {
        Self {
            success: true,
            feedback,
            timestamp: OffsetDateTime::now_utc(),
            source,
        }
    }
}
