//! Recovers structured evidence from validated strings: embedded JSON
//! objects on one hand, token-level field matches on the other. A single
//! string may contribute both kinds of entry.

use serde_json::{Map, Value};
use tracing::debug;

use crate::vocab;

/// A syntactically valid JSON object carved out of a validated string,
/// kept only when its serialized form mentions the workflow domain.
#[derive(Debug, Clone, PartialEq)]
pub struct JsonFragment {
    pub object: Map<String, Value>,
    pub raw: String,
}

/// Free text annotated with whichever semantic tokens matched. Tokens that
/// did not match stay `None`; at least one is always present.
#[derive(Debug, Clone, PartialEq)]
pub struct LogFragment {
    pub workflow: Option<String>,
    pub action: Option<String>,
    pub status: Option<String>,
    pub time: Option<String>,
    pub raw: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum StructuredEntry {
    Json(JsonFragment),
    Log(LogFragment),
}

/// Runs recovery over every validated string, preserving input order.
pub fn recover(validated: &[String]) -> Vec<StructuredEntry> {
    let mut entries = Vec::new();
    for text in validated {
        entries.extend(recover_string(text));
    }
    entries
}

/// Recovers all structured entries from one validated string.
///
/// Brace-delimited substrings are parsed as JSON objects; parse failures are
/// expected (the brace scan is single-level and binary noise fakes braces
/// freely) and skip to the next candidate. Independently, the string is
/// scanned for workflow/action/status/time tokens and yields a [`LogFragment`]
/// when any of them matched.
pub fn recover_string(text: &str) -> Vec<StructuredEntry> {
    let mut entries = Vec::new();

    if text.contains('{') && text.contains('}') {
        for candidate in vocab::BRACE_RE.find_iter(text) {
            match serde_json::from_str::<Value>(candidate.as_str()) {
                Ok(value) => {
                    let serialized = value.to_string();
                    if let Value::Object(object) = value {
                        if vocab::contains_json_keyword(&serialized) {
                            entries.push(StructuredEntry::Json(JsonFragment {
                                object,
                                raw: candidate.as_str().to_string(),
                            }));
                        }
                    }
                }
                Err(e) => {
                    debug!("Discarding brace-delimited fragment that is not JSON: {e}");
                }
            }
        }
    }

    let workflow = vocab::WORKFLOW_TOKEN_RE
        .find(text)
        .map(|m| m.as_str().to_string());
    let action = vocab::find_action_word(text).map(String::from);
    let status = vocab::find_status_word(text).map(String::from);
    let time = vocab::TIME_RE.find(text).map(|m| m.as_str().to_string());

    if workflow.is_some() || action.is_some() || status.is_some() || time.is_some() {
        entries.push(StructuredEntry::Log(LogFragment {
            workflow,
            action,
            status,
            time,
            raw: text.to_string(),
        }));
    }

    entries
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn json_entries(entries: &[StructuredEntry]) -> Vec<&JsonFragment> {
        entries
            .iter()
            .filter_map(|e| match e {
                StructuredEntry::Json(f) => Some(f),
                StructuredEntry::Log(_) => None,
            })
            .collect()
    }

    fn log_entries(entries: &[StructuredEntry]) -> Vec<&LogFragment> {
        entries
            .iter()
            .filter_map(|e| match e {
                StructuredEntry::Log(f) => Some(f),
                StructuredEntry::Json(_) => None,
            })
            .collect()
    }

    #[test]
    fn json_object_embedded_in_noise_is_recovered() {
        let entries = recover_string(r#"x9q{"name":"Typing Five","status":"done"}zz"#);
        let jsons = json_entries(&entries);
        assert_eq!(jsons.len(), 1);
        assert_eq!(jsons[0].object.get("name"), Some(&json!("Typing Five")));
        assert_eq!(jsons[0].raw, r#"{"name":"Typing Five","status":"done"}"#);
    }

    #[test]
    fn json_without_domain_keyword_is_dropped() {
        let entries = recover_string(r#"pad{"color":"red","size":4}pad"#);
        assert!(json_entries(&entries).is_empty());
    }

    #[test]
    fn malformed_fragment_does_not_abort_the_string() {
        let entries = recover_string(r#"a{not json}b{"workflowId":7}c"#);
        let jsons = json_entries(&entries);
        assert_eq!(jsons.len(), 1);
        assert_eq!(jsons[0].object.get("workflowId"), Some(&json!(7)));
    }

    #[test]
    fn each_json_substring_becomes_its_own_fragment() {
        let entries = recover_string(r#"{"trigger":1} and {"typing":2}"#);
        assert_eq!(json_entries(&entries).len(), 2);
    }

    #[test]
    fn token_scan_captures_status_by_priority_and_time() {
        let entries = recover_string("Workflow started at 10:15:42 - success");
        let logs = log_entries(&entries);
        assert_eq!(logs.len(), 1);
        assert_eq!(logs[0].workflow.as_deref(), Some("Workflow"));
        assert_eq!(logs[0].action, None);
        assert_eq!(logs[0].status.as_deref(), Some("success"));
        assert_eq!(logs[0].time.as_deref(), Some("10:15:42"));
    }

    #[test]
    fn workflow_token_extends_over_word_characters() {
        let entries = recover_string("saw typing_five finish");
        let logs = log_entries(&entries);
        assert_eq!(logs[0].workflow.as_deref(), Some("typing_five"));
    }

    #[test]
    fn string_without_any_token_yields_no_log_fragment() {
        assert!(recover_string("plain prose, no verbs of interest").is_empty());
    }

    #[test]
    fn string_can_yield_both_kinds_of_entry() {
        let entries = recover_string(r#"run{"workflowId":"w1"}ok trigger fired"#);
        assert_eq!(json_entries(&entries).len(), 1);
        assert_eq!(log_entries(&entries).len(), 1);
        assert_eq!(log_entries(&entries)[0].action.as_deref(), Some("trigger"));
    }
}
