//! Turns recovered fragments into reader-facing records: fixed phrase table
//! for action tokens, workflow-name normalization, and log-text cleanup.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::recover::{JsonFragment, LogFragment, StructuredEntry};
use crate::vocab;

/// Group label used whenever no workflow name survived recovery.
pub const UNKNOWN_WORKFLOW: &str = "Unknown Workflow";

/// Flattened, human-phrased projection of a structured entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReadableRecord {
    pub workflow: String,
    pub log: String,
}

/// Projects one structured entry into a readable record.
///
/// JSON fragments with neither a `message` nor a `status` field carry nothing
/// worth printing and are dropped. Log fragments always produce a record.
pub fn humanize(entry: &StructuredEntry) -> Option<ReadableRecord> {
    match entry {
        StructuredEntry::Json(fragment) => humanize_json(fragment),
        StructuredEntry::Log(fragment) => Some(humanize_log(fragment)),
    }
}

fn humanize_json(fragment: &JsonFragment) -> Option<ReadableRecord> {
    let object = &fragment.object;

    // A human-facing name beats the opaque id when both are present.
    let name = object
        .get("name")
        .and_then(Value::as_str)
        .or_else(|| object.get("workflowId").and_then(Value::as_str));
    let message = object.get("message").and_then(Value::as_str);
    let status = object.get("status").and_then(Value::as_str);

    let log = match (message, status) {
        (Some(message), Some(status)) => format!("{message} ({status})"),
        (Some(message), None) => message.to_string(),
        (None, Some(status)) => status.to_string(),
        (None, None) => return None,
    };

    let workflow = match name {
        Some(name) => normalize_workflow_name(name),
        None => UNKNOWN_WORKFLOW.to_string(),
    };

    Some(ReadableRecord {
        workflow,
        log: clean_log_text(&log),
    })
}

fn humanize_log(fragment: &LogFragment) -> ReadableRecord {
    let workflow = match &fragment.workflow {
        Some(token) => normalize_workflow_name(token),
        None => UNKNOWN_WORKFLOW.to_string(),
    };

    let mut parts: Vec<String> = Vec::new();
    if let Some(time) = &fragment.time {
        parts.push(format!("at {time}"));
    }
    if let Some(action) = &fragment.action {
        // Unknown action tokens pass through unchanged.
        let phrase = vocab::action_phrase(action)
            .map(String::from)
            .unwrap_or_else(|| action.clone());
        parts.push(phrase);
    }
    if let Some(status) = &fragment.status {
        parts.push(format!("- {status}"));
    }

    let log = if parts.is_empty() {
        fragment.raw.clone()
    } else {
        parts.join(" ")
    };

    ReadableRecord {
        workflow,
        log: clean_log_text(&log),
    }
}

/// Replaces `_`/`-` with spaces and title-cases each word.
pub fn normalize_workflow_name(raw: &str) -> String {
    let spaced = raw.replace(['_', '-'], " ");
    let titled = spaced
        .split_whitespace()
        .map(title_case_word)
        .collect::<Vec<_>>()
        .join(" ");

    if titled.is_empty() {
        UNKNOWN_WORKFLOW.to_string()
    } else {
        titled
    }
}

fn title_case_word(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

/// Strips a leading digit run, collapses whitespace, and uppercases the
/// first character.
pub fn clean_log_text(raw: &str) -> String {
    let without_digits = raw.trim_start_matches(|c: char| c.is_ascii_digit());
    let collapsed = without_digits
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");

    let mut chars = collapsed.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => collapsed,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Map};

    fn json_fragment(value: serde_json::Value) -> StructuredEntry {
        let object = match value {
            Value::Object(map) => map,
            _ => Map::new(),
        };
        StructuredEntry::Json(JsonFragment {
            raw: Value::Object(object.clone()).to_string(),
            object,
        })
    }

    #[test]
    fn status_only_json_keeps_the_status_as_log_body() {
        let entry = json_fragment(json!({"name": "Typing Five", "status": "done"}));
        let record = humanize(&entry).unwrap();
        assert_eq!(record.workflow, "Typing Five");
        assert_eq!(record.log, "Done");
    }

    #[test]
    fn message_and_status_combine_with_parenthesized_status() {
        let entry = json_fragment(json!({
            "name": "orders",
            "message": "saved the form",
            "status": "success"
        }));
        let record = humanize(&entry).unwrap();
        assert_eq!(record.workflow, "Orders");
        assert_eq!(record.log, "Saved the form (success)");
    }

    #[test]
    fn json_without_message_or_status_is_dropped() {
        let entry = json_fragment(json!({"name": "quiet flow", "workflowId": "w2"}));
        assert_eq!(humanize(&entry), None);
    }

    #[test]
    fn name_takes_precedence_over_workflow_id() {
        let entry = json_fragment(json!({
            "name": "visible name",
            "workflowId": "w-123",
            "message": "ran"
        }));
        assert_eq!(humanize(&entry).unwrap().workflow, "Visible Name");
    }

    #[test]
    fn workflow_id_is_the_fallback_name() {
        let entry = json_fragment(json!({"workflowId": "wf-9", "message": "ran"}));
        assert_eq!(humanize(&entry).unwrap().workflow, "Wf 9");
    }

    #[test]
    fn log_fragment_parts_join_in_fixed_order() {
        let entry = StructuredEntry::Log(LogFragment {
            workflow: Some("typing_five".to_string()),
            action: Some("click".to_string()),
            status: Some("success".to_string()),
            time: Some("10:15:42".to_string()),
            raw: "ignored".to_string(),
        });
        let record = humanize(&entry).unwrap();
        assert_eq!(record.workflow, "Typing Five");
        assert_eq!(record.log, "At 10:15:42 Clicked element - success");
    }

    #[test]
    fn log_fragment_without_text_parts_falls_back_to_raw() {
        let entry = StructuredEntry::Log(LogFragment {
            workflow: Some("workflow".to_string()),
            action: None,
            status: None,
            time: None,
            raw: "workflow heartbeat marker".to_string(),
        });
        let record = humanize(&entry).unwrap();
        assert_eq!(record.workflow, "Workflow");
        assert_eq!(record.log, "Workflow heartbeat marker");
    }

    #[test]
    fn unknown_action_token_passes_through() {
        let entry = StructuredEntry::Log(LogFragment {
            workflow: None,
            action: Some("hover".to_string()),
            status: None,
            time: None,
            raw: "hover happened".to_string(),
        });
        let record = humanize(&entry).unwrap();
        assert_eq!(record.workflow, UNKNOWN_WORKFLOW);
        assert_eq!(record.log, "Hover");
    }

    #[test]
    fn workflow_names_are_normalized() {
        assert_eq!(normalize_workflow_name("typing_five"), "Typing Five");
        assert_eq!(normalize_workflow_name("my-flow"), "My Flow");
        assert_eq!(normalize_workflow_name("  SHOUTY NAME "), "Shouty Name");
        assert_eq!(normalize_workflow_name(""), UNKNOWN_WORKFLOW);
    }

    #[test]
    fn log_text_cleaning_strips_leading_digits_and_uppercases() {
        assert_eq!(clean_log_text("123 started the run"), "Started the run");
        assert_eq!(clean_log_text("done"), "Done");
        assert_eq!(clean_log_text("at  10:15:42   - success"), "At 10:15:42 - success");
    }
}
