//! Keyword heuristic suggesting a mode from free-form user text.
//!
//! Best-effort UX sugar: the caller falls back to the currently selected
//! mode when nothing matches. Kept behind a pure function so it can be
//! swapped or disabled without touching request construction.

use redpen_core::Mode;

const SUMMARIZE_KEYWORDS: [&str; 4] = ["суммар", "резюме", "кратко", "итог"];
const REWRITE_KEYWORDS: [&str; 4] = ["переформул", "перепиши", "переписать", "иначе"];
const COMPRESS_KEYWORDS: [&str; 4] = ["сократи", "сжать", "короче", "уменьши"];
const EXPAND_KEYWORDS: [&str; 4] = ["расширь", "подробн", "добавь", "дополни"];
const GENERATE_KEYWORDS: [&str; 4] = ["сгенерир", "создай", "напиши раздел", "добавь раздел"];

/// Suggest a mode for a free-text prompt, or `None` when nothing matches.
///
/// Categories are checked in a fixed precedence order and the first match
/// wins: summarize → rewrite → compress → expand → generate_section.
/// Matching is case-insensitive substring containment.
pub fn detect_mode(prompt: &str) -> Option<Mode> {
    let p = prompt.to_lowercase();
    let matches_any = |keywords: &[&str]| keywords.iter().any(|k| p.contains(k));

    if matches_any(&SUMMARIZE_KEYWORDS) {
        return Some(Mode::Summarize);
    }
    if matches_any(&REWRITE_KEYWORDS) {
        return Some(Mode::Rewrite);
    }
    if matches_any(&COMPRESS_KEYWORDS) {
        return Some(Mode::Compress);
    }
    if matches_any(&EXPAND_KEYWORDS) {
        return Some(Mode::Expand);
    }
    if matches_any(&GENERATE_KEYWORDS) {
        return Some(Mode::GenerateSection);
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summarize_keyword_detected() {
        assert_eq!(detect_mode("Сделай резюме этого пункта"), Some(Mode::Summarize));
        assert_eq!(detect_mode("итоги по договору"), Some(Mode::Summarize));
    }

    #[test]
    fn each_category_reachable() {
        assert_eq!(detect_mode("перепиши абзац"), Some(Mode::Rewrite));
        assert_eq!(detect_mode("сократи пункт 3"), Some(Mode::Compress));
        assert_eq!(detect_mode("распиши подробнее"), Some(Mode::Expand));
        assert_eq!(detect_mode("напиши раздел об оплате"), Some(Mode::GenerateSection));
    }

    #[test]
    fn matching_is_case_insensitive() {
        assert_eq!(detect_mode("СОКРАТИ этот текст"), Some(Mode::Compress));
    }

    #[test]
    fn higher_precedence_category_wins() {
        // Contains both a summarize and a rewrite keyword.
        assert_eq!(
            detect_mode("сделай резюме, а потом перепиши"),
            Some(Mode::Summarize)
        );
        // "добавь раздел" also matches the expand list, which is checked first.
        assert_eq!(detect_mode("добавь раздел о штрафах"), Some(Mode::Expand));
    }

    #[test]
    fn unrecognized_input_yields_no_suggestion() {
        assert_eq!(detect_mode("что написано в пункте 4?"), None);
        assert_eq!(detect_mode(""), None);
        assert_eq!(detect_mode("summarize this"), None);
    }
}
