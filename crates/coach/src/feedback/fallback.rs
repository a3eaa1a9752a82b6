//! Pre-written lines used when live generation is unavailable.

use rand::seq::SliceRandom;

/// Spoken when the model cannot be reached. The coach style is not taken
/// into account here.
pub const FALLBACK_FEEDBACK: [&str; 8] = [
    "保持节奏，你做得很好！",
    "继续加油，每一步都算数！",
    "调整呼吸，稳住步伐！",
    "你比想象中更强大，坚持住！",
    "状态不错，继续保持！",
    "放松肩膀，享受奔跑！",
    "每一公里都是进步，继续前进！",
    "相信自己，你一定能完成！",
];

/// Pick one fallback line uniformly at random.
pub fn pick(rng: &mut impl rand::Rng) -> &'static str {
    FALLBACK_FEEDBACK
        .choose(rng)
        .copied()
        .unwrap_or(FALLBACK_FEEDBACK[0])
}

pub fn is_fallback(text: &str) -> bool {
    FALLBACK_FEEDBACK.contains(&text)
}
