//! Fixed heuristic vocabulary: keyword lists, token patterns, and the
//! action-to-phrase table. Pure data; every scan over carved text goes
//! through these tables so the pipeline stages stay in agreement about
//! what counts as workflow evidence.

use std::sync::LazyLock;

use regex::Regex;

/// Domain keywords that mark a cleaned string as plausibly log-related.
/// Matched as case-insensitive substrings.
pub const RELEVANCE_KEYWORDS: &[&str] = &[
    // Workflow action nouns
    "trigger", "click", "type", "typing", "navigate", "wait", "scroll", "tab", "element",
    // Status nouns
    "success", "failed", "error", "started", "completed",
    // Field names from the extension's log schema
    "logid", "workflowid", "status", "message",
];

/// Keywords that qualify a parsed JSON object as workflow-related.
pub const JSON_KEYWORDS: &[&str] = &["workflow", "trigger", "typing", "logid", "workflowid"];

/// Action vocabulary in priority order; the first list entry found anywhere
/// in a text wins, regardless of position.
pub const ACTION_WORDS: &[&str] = &[
    "trigger", "click", "type", "navigate", "wait", "scroll", "tab", "element",
];

/// Status vocabulary, same priority-scan semantics as [`ACTION_WORDS`].
/// Ordering matters: "Workflow started ... - success" must report `success`
/// even though `started` appears earlier in the text.
pub const STATUS_WORDS: &[&str] = &["success", "failed", "error", "completed", "started"];

/// Raw action token to reader-facing phrase.
const ACTION_PHRASES: &[(&str, &str)] = &[
    ("trigger", "Started workflow"),
    ("click", "Clicked element"),
    ("type", "Typed text"),
    ("typing", "Typed text"),
    ("navigate", "Navigated to page"),
    ("wait", "Waited"),
    ("scroll", "Scrolled page"),
    ("tab", "Opened tab"),
    ("element", "Interacted with element"),
];

/// `H:MM:SS` / `HH:MM:SS` wall-clock times.
pub static TIME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d{1,2}:\d{2}:\d{2}").expect("invalid time pattern"));

/// Log-level words as whole words.
pub static LOG_LEVEL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:success|failed|error|warning|info|debug)\b")
        .expect("invalid log-level pattern")
});

/// Single-level brace-delimited substrings. Deliberately not a JSON parser:
/// nested braces produce partial fragments that fail to parse and get dropped.
pub static BRACE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{[^{}]*\}").expect("invalid brace pattern"));

/// Workflow-name tokens as the extension writes them (`typing_five`,
/// `workflowId`, plain `Workflow`, ...).
pub static WORKFLOW_TOKEN_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)typing[_\w]*|workflow[_\w]*").expect("invalid workflow token pattern")
});

/// At least one alphabetic run of length 3. Suppresses pure symbol noise.
pub static ALPHA_RUN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[A-Za-z]{3,}").expect("invalid alphabetic-run pattern"));

/// First action word (in list priority order) found anywhere in `text`.
pub fn find_action_word(text: &str) -> Option<&'static str> {
    let lower = text.to_lowercase();
    ACTION_WORDS.iter().copied().find(|word| lower.contains(word))
}

/// First status word (in list priority order) found anywhere in `text`.
pub fn find_status_word(text: &str) -> Option<&'static str> {
    let lower = text.to_lowercase();
    STATUS_WORDS.iter().copied().find(|word| lower.contains(word))
}

pub fn contains_relevance_keyword(text: &str) -> bool {
    let lower = text.to_lowercase();
    RELEVANCE_KEYWORDS.iter().any(|keyword| lower.contains(keyword))
}

pub fn contains_json_keyword(text: &str) -> bool {
    let lower = text.to_lowercase();
    JSON_KEYWORDS.iter().any(|keyword| lower.contains(keyword))
}

/// Reader-facing phrase for a raw action token; unknown tokens pass through
/// to the caller unchanged.
pub fn action_phrase(token: &str) -> Option<&'static str> {
    let lower = token.to_lowercase();
    ACTION_PHRASES
        .iter()
        .find(|(word, _)| *word == lower)
        .map(|(_, phrase)| *phrase)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_scan_prefers_list_order_over_text_position() {
        // "started" appears first in the text but "success" outranks it.
        let text = "Workflow started at 10:15:42 - success";
        assert_eq!(find_status_word(text), Some("success"));
    }

    #[test]
    fn action_scan_is_case_insensitive() {
        assert_eq!(find_action_word("CLICKED the button"), Some("click"));
        assert_eq!(find_action_word("no verbs here"), None);
    }

    #[test]
    fn action_phrases_cover_type_and_typing() {
        assert_eq!(action_phrase("type"), Some("Typed text"));
        assert_eq!(action_phrase("typing"), Some("Typed text"));
        assert_eq!(action_phrase("TAB"), Some("Opened tab"));
        assert_eq!(action_phrase("hover"), None);
    }

    #[test]
    fn time_pattern_accepts_single_digit_hour() {
        assert!(TIME_RE.is_match("9:05:00"));
        assert!(TIME_RE.is_match("23:59:59"));
        assert!(!TIME_RE.is_match("9:05"));
    }

    #[test]
    fn log_level_requires_whole_word() {
        assert!(LOG_LEVEL_RE.is_match("finished with ERROR today"));
        assert!(!LOG_LEVEL_RE.is_match("terrorform"));
    }

    #[test]
    fn brace_pattern_is_single_level() {
        let matches: Vec<_> = BRACE_RE
            .find_iter(r#"x{"a":1}y{"b":{"c":2}}"#)
            .map(|m| m.as_str())
            .collect();
        // A nested object only surfaces its innermost span.
        assert_eq!(matches, vec![r#"{"a":1}"#, r#"{"c":2}"#]);
    }
}
