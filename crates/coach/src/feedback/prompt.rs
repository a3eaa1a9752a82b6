//! Prompt construction for the two feedback modes.

use crate::models::{CoachStyle, FeedbackMode, TelemetrySnapshot};

use super::stats;

/// Output bound for a spoken nudge.
pub const REAL_TIME_MAX_TOKENS: u32 = 100;
/// Output bound for a post-run summary.
pub const SUMMARY_MAX_TOKENS: u32 = 300;

const REAL_TIME_PERSONA: &str = "你是一位专业的跑步教练，正在通过耳机为跑者提供实时语音指导。";
const SUMMARY_PERSONA: &str = "你是一位专业的跑步教练，正在为刚完成训练的跑者做跑后总结。";

const REAL_TIME_DIRECTIVES: [&str; 5] = [
    "反馈必须简短，控制在25个字以内",
    "使用口语化的表达，像面对面说话一样",
    "针对跑者当前的状态给出即时建议",
    "不要使用专业术语",
    "语气自然，适合语音播报",
];

const SUMMARY_DIRECTIVES: [&str; 5] = [
    "总结控制在50到80个字之间",
    "先肯定跑者本次的表现，再分析配速节奏",
    "给出1到2条具体可执行的改进建议",
    "语气要符合你的教练风格",
    "用连贯的口语段落表达，不要分点列举",
];

/// A ready-to-send pair of messages.
#[derive(Debug, Clone, PartialEq)]
pub struct Prompt {
    pub mode: FeedbackMode,
    pub system: String,
    pub user: String,
    pub max_tokens: u32,
}

/// Short label injected into the user prompt.
pub fn style_label(style: CoachStyle) -> &'static str {
    match style {
        CoachStyle::Encouraging => "鼓励型",
        CoachStyle::Strict => "严格型",
        CoachStyle::Calm => "平和型",
    }
}

/// Sentence elaborating on the persona for a style.
pub fn style_elaboration(style: CoachStyle) -> &'static str {
    match style {
        CoachStyle::Encouraging => "你的风格热情积极，善于发现跑者的进步并及时给予肯定和鼓励。",
        CoachStyle::Strict => "你的风格严格专业，直接指出问题，对跑者提出明确的要求。",
        CoachStyle::Calm => "你的风格沉稳平和，用舒缓的语气帮助跑者保持节奏和专注。",
    }
}

pub fn system_prompt(mode: FeedbackMode, style: CoachStyle) -> String {
    let (persona, directives) = match mode {
        FeedbackMode::RealTime => (REAL_TIME_PERSONA, &REAL_TIME_DIRECTIVES),
        FeedbackMode::Summary => (SUMMARY_PERSONA, &SUMMARY_DIRECTIVES),
    };

    let mut prompt = format!("{persona}{}\n\n要求：", style_elaboration(style));
    for (i, directive) in directives.iter().enumerate() {
        prompt.push_str(&format!("\n{}. {directive}", i + 1));
    }
    prompt
}

pub fn user_prompt(mode: FeedbackMode, style: CoachStyle, statistics: &str) -> String {
    let label = style_label(style);
    match mode {
        FeedbackMode::RealTime => format!(
            "请以{label}教练的口吻，根据以下实时跑步数据，给出一句简短的语音反馈：\n\n{statistics}"
        ),
        FeedbackMode::Summary => format!(
            "请以{label}教练的口吻，根据以下本次跑步的完整数据，给出跑后总结：\n\n{statistics}"
        ),
    }
}

/// Build the prompt for a snapshot, choosing the template by its mode.
pub fn build(snapshot: &TelemetrySnapshot) -> Prompt {
    let mode = snapshot.mode();
    let statistics = stats::describe(snapshot);
    let max_tokens = match mode {
        FeedbackMode::RealTime => REAL_TIME_MAX_TOKENS,
        FeedbackMode::Summary => SUMMARY_MAX_TOKENS,
    };

    Prompt {
        mode,
        system: system_prompt(mode, snapshot.coach_style),
        user: user_prompt(mode, snapshot.coach_style, &statistics),
        max_tokens,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_real_time_strict_prompt() {
        let mut snapshot = TelemetrySnapshot::new(5.5, 3.2, 1200.0);
        snapshot.coach_style = CoachStyle::Strict;

        let prompt = build(&snapshot);
        assert_eq!(prompt.mode, FeedbackMode::RealTime);
        assert_eq!(prompt.max_tokens, REAL_TIME_MAX_TOKENS);
        assert!(prompt.system.starts_with(REAL_TIME_PERSONA));
        assert!(prompt.system.contains(style_elaboration(CoachStyle::Strict)));
        assert!(prompt.system.contains("25个字以内"));
        assert!(prompt.user.contains("严格型"));
        assert!(prompt.user.contains("当前配速: 5分30秒/公里"));
        assert!(prompt.user.contains("已跑距离: 3.20公里"));
        assert!(prompt.user.contains("已跑时间: 20分0秒"));
        assert!(!prompt.user.contains("目标配速"));
        assert!(!prompt.user.contains("心率"));
        assert!(!prompt.user.contains("每公里用时"));
    }

    #[test]
    fn test_summary_prompt() {
        let mut snapshot = TelemetrySnapshot::new(5.0, 4.0, 1210.0);
        snapshot.coach_style = CoachStyle::Calm;
        snapshot.km_splits = Some(vec![300.0, 300.0, 305.0, 305.0]);

        let prompt = build(&snapshot);
        assert_eq!(prompt.mode, FeedbackMode::Summary);
        assert_eq!(prompt.max_tokens, SUMMARY_MAX_TOKENS);
        assert!(prompt.system.starts_with(SUMMARY_PERSONA));
        assert!(prompt.system.contains("50到80个字"));
        assert!(prompt.system.contains(style_elaboration(CoachStyle::Calm)));
        assert!(prompt.user.contains("平和型"));
        assert!(prompt.user.contains("跑后总结"));
        assert!(prompt.user.contains("节奏: 配速均匀"));
    }

    #[test]
    fn test_system_prompt_lists_five_directives() {
        let prompt = system_prompt(FeedbackMode::RealTime, CoachStyle::Encouraging);
        assert!(prompt.contains("\n5. "));
        assert!(!prompt.contains("\n6. "));
    }
}
