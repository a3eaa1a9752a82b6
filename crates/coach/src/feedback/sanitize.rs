//! Cleanup of generated text before it is spoken.

/// Longest feedback text returned to the app, in characters.
pub const MAX_FEEDBACK_CHARS: usize = 300;

const QUOTES: [char; 8] = ['"', '\'', '“', '”', '‘', '’', '「', '」'];

/// Clean up model output for speech.
///
/// Trims, drops one layer of surrounding quotes, folds all whitespace
/// (newlines included) into single spaces and truncates to
/// [`MAX_FEEDBACK_CHARS`] characters. A space left at the cut is dropped, so
/// the output is a fixed point.
pub fn sanitize(raw: &str) -> String {
    let mut text = raw.trim();
    if let Some(rest) = text.strip_prefix(QUOTES) {
        text = rest;
    }
    if let Some(rest) = text.strip_suffix(QUOTES) {
        text = rest;
    }

    let collapsed = text.split_whitespace().collect::<Vec<_>>().join(" ");

    match collapsed.char_indices().nth(MAX_FEEDBACK_CHARS) {
        Some((cut, _)) => collapsed[..cut].trim_end().to_string(),
        None => collapsed,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trims_and_strips_quotes() {
        assert_eq!(sanitize("  \"保持节奏！\"  "), "保持节奏！");
        assert_eq!(sanitize("“调整呼吸”"), "调整呼吸");
        assert_eq!(sanitize("'keep going'"), "keep going");
    }

    #[test]
    fn test_strips_only_one_layer() {
        assert_eq!(sanitize("\"\"nested\"\""), "\"nested\"");
    }

    #[test]
    fn test_collapses_whitespace() {
        assert_eq!(sanitize("前半程不错。\n\n后半程\t再稳一点。"), "前半程不错。 后半程 再稳一点。");
        assert_eq!(sanitize("a\r\nb   c"), "a b c");
    }

    #[test]
    fn test_truncates_by_characters() {
        let input = "跑".repeat(400);
        let output = sanitize(&input);
        assert_eq!(output.chars().count(), MAX_FEEDBACK_CHARS);

        let ascii = "x".repeat(400);
        assert_eq!(sanitize(&ascii).len(), 300);
    }

    #[test]
    fn test_cut_at_a_space() {
        let input = format!("{} tail", "x".repeat(299));
        let once = sanitize(&input);
        assert_eq!(once, "x".repeat(299));
        assert_eq!(sanitize(&once), once);
    }

    #[test]
    fn test_idempotent() {
        let once = sanitize("  \"配速很稳，\n继续保持！\" ");
        assert_eq!(sanitize(&once), once);
    }

    #[test]
    fn test_blank_input() {
        assert_eq!(sanitize("   \n "), "");
        assert_eq!(sanitize("\"\""), "");
    }
}
