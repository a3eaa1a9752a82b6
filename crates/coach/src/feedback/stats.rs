//! Renders a telemetry snapshot into the statistics block fed to the prompt.
//!
//! The block is plain text, one fact per line, written in the language the
//! coach speaks. Every classification is also available as a typed value so
//! that callers can inspect it without parsing text.

use std::fmt::Write as _;

use crate::models::TelemetrySnapshot;

/// Pace gap (min/km) beyond which the runner is considered off target.
const PACE_TOLERANCE: f64 = 0.5;

/// Ratio between half-run averages that counts as a real change of pace.
const HALF_SPLIT_RATIO: f64 = 1.05;

/// How the current pace relates to the target pace.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaceComparison {
    Slower,
    Faster,
    OnTarget,
}

impl PaceComparison {
    pub fn classify(current: f64, target: f64) -> Self {
        let gap = current - target;
        if gap.abs() > PACE_TOLERANCE {
            if gap > 0.0 {
                PaceComparison::Slower
            } else {
                PaceComparison::Faster
            }
        } else {
            PaceComparison::OnTarget
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            PaceComparison::Slower => "当前偏慢",
            PaceComparison::Faster => "当前偏快",
            PaceComparison::OnTarget => "配速合适",
        }
    }
}

/// Heart-rate bucket. Thresholds are fixed product constants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeartRateZone {
    High,
    ModerateHigh,
    Normal,
    Low,
}

impl HeartRateZone {
    pub fn classify(bpm: u32) -> Self {
        if bpm > 170 {
            HeartRateZone::High
        } else if bpm > 150 {
            HeartRateZone::ModerateHigh
        } else if bpm > 130 {
            HeartRateZone::Normal
        } else {
            HeartRateZone::Low
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            HeartRateZone::High => "偏高",
            HeartRateZone::ModerateHigh => "中高",
            HeartRateZone::Normal => "正常",
            HeartRateZone::Low => "偏低",
        }
    }
}

/// Shape of the run when comparing the first and second half.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PacingTrend {
    Fade,
    NegativeSplit,
    Even,
}

impl PacingTrend {
    pub fn classify(first_half_mean: f64, second_half_mean: f64) -> Self {
        if second_half_mean > first_half_mean * HALF_SPLIT_RATIO {
            PacingTrend::Fade
        } else if first_half_mean > second_half_mean * HALF_SPLIT_RATIO {
            PacingTrend::NegativeSplit
        } else {
            PacingTrend::Even
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            PacingTrend::Fade => "后半程掉速",
            PacingTrend::NegativeSplit => "负分段（后程加速）",
            PacingTrend::Even => "配速均匀",
        }
    }
}

/// Aggregates over the per-kilometre splits.
#[derive(Debug, Clone, PartialEq)]
pub struct SplitAnalysis {
    pub average: f64,
    /// 1-indexed kilometre of the fastest split.
    pub fastest_km: usize,
    pub fastest: f64,
    /// 1-indexed kilometre of the slowest split.
    pub slowest_km: usize,
    pub slowest: f64,
    pub variation_pct: f64,
    pub first_half_mean: Option<f64>,
    pub second_half_mean: Option<f64>,
    /// Only present with two or more splits.
    pub trend: Option<PacingTrend>,
}

impl SplitAnalysis {
    /// Returns `None` for an empty slice.
    pub fn analyze(splits: &[f64]) -> Option<Self> {
        let (&first, _) = splits.split_first()?;
        let average = mean(splits);

        let (mut fastest_km, mut fastest) = (1, first);
        let (mut slowest_km, mut slowest) = (1, first);
        for (i, &split) in splits.iter().enumerate().skip(1) {
            // strict comparisons keep the first occurrence on ties
            if split < fastest {
                fastest = split;
                fastest_km = i + 1;
            }
            if split > slowest {
                slowest = split;
                slowest_km = i + 1;
            }
        }

        let variation_pct = (slowest - fastest) / average * 100.0;

        let (first_half_mean, second_half_mean, trend) = if splits.len() >= 2 {
            let (first_half, second_half) = splits.split_at(splits.len() / 2);
            let (a, b) = (mean(first_half), mean(second_half));
            (Some(a), Some(b), Some(PacingTrend::classify(a, b)))
        } else {
            (None, None, None)
        };

        Some(Self {
            average,
            fastest_km,
            fastest,
            slowest_km,
            slowest,
            variation_pct,
            first_half_mean,
            second_half_mean,
            trend,
        })
    }
}

fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

/// `5.5` → `5分30秒/公里`.
pub fn format_pace(pace: f64) -> String {
    let minutes = pace.floor();
    let seconds = ((pace - minutes) * 60.0).floor();
    format!("{}分{}秒/公里", minutes as i64, seconds as i64)
}

/// `1200.0` → `20分0秒`.
pub fn format_duration(seconds: f64) -> String {
    let minutes = (seconds / 60.0).floor();
    let rest = (seconds % 60.0).floor();
    format!("{}分{}秒", minutes as i64, rest as i64)
}

/// `305.0` → `5:05`.
pub fn format_split(seconds: f64) -> String {
    let minutes = (seconds / 60.0).floor();
    let rest = (seconds % 60.0).floor();
    format!("{}:{:02}", minutes as i64, rest as i64)
}

/// Build the statistics block for a snapshot.
pub fn describe(snapshot: &TelemetrySnapshot) -> String {
    let mut lines: Vec<String> = Vec::new();

    lines.push(format!("当前配速: {}", format_pace(snapshot.current_pace)));

    if let Some(target) = snapshot.target_pace {
        let comparison = PaceComparison::classify(snapshot.current_pace, target);
        lines.push(format!(
            "目标配速: {}（{}）",
            format_pace(target),
            comparison.label()
        ));
    }

    lines.push(format!("已跑距离: {:.2}公里", snapshot.distance_km));

    if let Some(total) = snapshot.total_distance_km {
        let remaining = total - snapshot.distance_km;
        let progress = (snapshot.distance_km / total * 100.0).round();
        lines.push(format!("剩余距离: {remaining:.2}公里"));
        lines.push(format!("完成进度: {}%", progress as i64));
    }

    lines.push(format!("已跑时间: {}", format_duration(snapshot.duration_sec)));

    if let Some(bpm) = snapshot.heart_rate() {
        let zone = HeartRateZone::classify(bpm);
        lines.push(format!("心率: {bpm} bpm（{}）", zone.label()));
    }

    let splits = snapshot.splits();
    if let Some(analysis) = SplitAnalysis::analyze(splits) {
        lines.push(describe_splits(splits, &analysis));
    }

    lines.join("\n")
}

fn describe_splits(splits: &[f64], analysis: &SplitAnalysis) -> String {
    let mut block = String::from("每公里用时:");
    for (i, &split) in splits.iter().enumerate() {
        let _ = write!(block, "\n第{}公里: {}", i + 1, format_split(split));
    }
    let _ = write!(
        block,
        "\n平均每公里: {}\n最快: 第{}公里 ({})\n最慢: 第{}公里 ({})\n配速波动: {:.1}%",
        format_split(analysis.average),
        analysis.fastest_km,
        format_split(analysis.fastest),
        analysis.slowest_km,
        format_split(analysis.slowest),
        analysis.variation_pct,
    );
    if let Some(trend) = analysis.trend {
        let _ = write!(block, "\n节奏: {}", trend.label());
    }
    block
}
