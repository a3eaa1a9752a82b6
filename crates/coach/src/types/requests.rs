//! Request body types for API endpoints.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

use crate::models::{CoachStyle, TelemetrySnapshot};

/// Telemetry posted by the app while (or after) running.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackRequest {
    /// Minutes per kilometre.
    pub current_pace: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_pace: Option<f64>,
    /// Kilometres covered so far.
    pub distance: f64,
    /// Planned distance in kilometres.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_distance: Option<f64>,
    /// Elapsed seconds.
    pub duration: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub heart_rate: Option<f64>,
    /// "encouraging", "strict" or "calm"; anything else means encouraging.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub coach_style: Option<String>,
    /// Seconds per completed kilometre. Non-empty switches to a post-run summary.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub km_splits: Option<Vec<f64>>,
}

impl From<&TelemetrySnapshot> for FeedbackRequest {
    fn from(snapshot: &TelemetrySnapshot) -> Self {
        Self {
            current_pace: snapshot.current_pace,
            target_pace: snapshot.target_pace,
            distance: snapshot.distance_km,
            total_distance: snapshot.total_distance_km,
            duration: snapshot.duration_sec,
            heart_rate: snapshot.heart_rate_bpm,
            coach_style: Some(snapshot.coach_style.as_str().to_string()),
            km_splits: snapshot.km_splits.clone(),
        }
    }
}

impl From<FeedbackRequest> for TelemetrySnapshot {
    fn from(req: FeedbackRequest) -> Self {
        Self {
            current_pace: req.current_pace,
            target_pace: req.target_pace,
            distance_km: req.distance,
            total_distance_km: req.total_distance,
            duration_sec: req.duration,
            heart_rate_bpm: req.heart_rate,
            coach_style: CoachStyle::from_name(req.coach_style.as_deref()),
            km_splits: req.km_splits,
        }
    }
}

/// Text-to-speech request.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct SpeechRequest {
    #[serde(default)]
    #[validate(custom(function = "not_blank"))]
    pub text: String,
    /// "female", "male", "gentle" or "lively"; defaults to female.
    pub voice: Option<String>,
}

fn not_blank(text: &str) -> Result<(), ValidationError> {
    if text.trim().is_empty() {
        let mut err = ValidationError::new("blank");
        err.message = Some("Text is required".into());
        return Err(err);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_feedback_request_from_camel_case() {
        let req: FeedbackRequest = serde_json::from_str(
            r#"{"currentPace":5.5,"targetPace":5.0,"distance":3.2,"totalDistance":10,
                "duration":1200,"heartRate":152.6,"coachStyle":"calm","kmSplits":[330,325]}"#,
        )
        .unwrap();
        let snapshot = TelemetrySnapshot::from(req);
        assert_eq!(snapshot.current_pace, 5.5);
        assert_eq!(snapshot.target_pace, Some(5.0));
        assert_eq!(snapshot.total_distance_km, Some(10.0));
        assert_eq!(snapshot.heart_rate(), Some(153));
        assert_eq!(snapshot.coach_style, CoachStyle::Calm);
        assert_eq!(snapshot.km_splits, Some(vec![330.0, 325.0]));
    }

    #[test]
    fn test_feedback_request_minimal() {
        let req: FeedbackRequest =
            serde_json::from_str(r#"{"currentPace":6,"distance":0,"duration":0}"#).unwrap();
        let snapshot = TelemetrySnapshot::from(req);
        assert_eq!(snapshot.coach_style, CoachStyle::Encouraging);
        assert_eq!(snapshot.heart_rate_bpm, None);
        assert_eq!(snapshot.km_splits, None);
    }

    #[test]
    fn test_feedback_request_requires_pace() {
        assert!(serde_json::from_str::<FeedbackRequest>(r#"{"distance":1,"duration":60}"#).is_err());
    }

    #[test]
    fn test_bad_heart_rate_reaches_validation() {
        for bpm in ["-5", "0", "0.3"] {
            let req: FeedbackRequest = serde_json::from_str(&format!(
                r#"{{"currentPace":5.5,"distance":1.0,"duration":330,"heartRate":{bpm}}}"#
            ))
            .unwrap();
            let snapshot = TelemetrySnapshot::from(req);
            assert!(snapshot.heart_rate_bpm.is_some());
            assert!(snapshot.validate().is_err(), "heartRate {bpm} should be rejected");
        }
    }

    #[test]
    fn test_snapshot_survives_the_wire() {
        let mut snapshot = TelemetrySnapshot::new(5.2, 4.0, 1250.0);
        snapshot.heart_rate_bpm = Some(158.0);
        snapshot.coach_style = CoachStyle::Strict;
        snapshot.km_splits = Some(vec![310.0, 312.0, 318.0, 310.0]);

        let json = serde_json::to_value(FeedbackRequest::from(&snapshot)).unwrap();
        assert_eq!(json["currentPace"], 5.2);
        assert_eq!(json["coachStyle"], "strict");
        assert!(json.get("targetPace").is_none());

        let req: FeedbackRequest = serde_json::from_value(json).unwrap();
        assert_eq!(TelemetrySnapshot::from(req), snapshot);
    }

    #[test]
    fn test_speech_request_validation() {
        let req: SpeechRequest = serde_json::from_str(r#"{"voice":"male"}"#).unwrap();
        assert!(req.validate().is_err());

        let req: SpeechRequest = serde_json::from_str(r#"{"text":"  \n"}"#).unwrap();
        assert!(req.validate().is_err());

        let req: SpeechRequest = serde_json::from_str(r#"{"text":"加油"}"#).unwrap();
        assert!(req.validate().is_ok());
    }
}
