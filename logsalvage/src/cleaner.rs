//! Cleans carved candidates and decides whether they are worth keeping.
//! Table dumps are dominated by non-log noise; the relevance gate keeps
//! recall high while throwing away pure key material and symbol garbage.

use crate::vocab;

/// Normalizes one carved candidate.
///
/// Null bytes become spaces, remaining control or non-ASCII characters are
/// dropped, whitespace runs collapse to a single space, and leading/trailing
/// non-alphanumeric characters are stripped. Braces and double quotes are
/// exempt from the edge strip: table files store values flush against binary
/// framing bytes, so a carved JSON object often starts and ends the run, and
/// recovery needs its delimiters intact. Candidates shorter than three
/// characters after all that are rejected.
pub fn clean(candidate: &str) -> Option<String> {
    let without_nulls = candidate.replace('\0', " ");
    let printable: String = without_nulls
        .chars()
        .filter(|&c| (' '..='~').contains(&c) || c == '\t' || c == '\n' || c == '\r')
        .collect();
    let collapsed = printable.split_whitespace().collect::<Vec<_>>().join(" ");
    let stripped = collapsed
        .trim_matches(|c: char| !c.is_ascii_alphanumeric() && !matches!(c, '{' | '}' | '"'));

    if stripped.len() <= 2 {
        None
    } else {
        Some(stripped.to_string())
    }
}

/// Relevance gate over a cleaned string.
///
/// Requires an alphabetic run of length 3 plus at least one of: a domain
/// keyword, a wall-clock time, a whole-word log level, or JSON-ish
/// punctuation.
pub fn is_relevant(text: &str) -> bool {
    if !vocab::ALPHA_RUN_RE.is_match(text) {
        return false;
    }

    vocab::contains_relevance_keyword(text)
        || vocab::TIME_RE.is_match(text)
        || vocab::LOG_LEVEL_RE.is_match(text)
        || text.contains(|c| matches!(c, '{' | '"' | ':'))
}

/// Cleaning plus the relevance gate in one step.
pub fn validate(candidate: &str) -> Option<String> {
    let cleaned = clean(candidate)?;
    if is_relevant(&cleaned) {
        Some(cleaned)
    } else {
        None
    }
}
