//! Groups readable records by workflow while preserving the order in which
//! workflows and their entries were first recovered.

use std::collections::HashMap;

use crate::humanize::ReadableRecord;

/// Records grouped by workflow name.
///
/// Group order is first-encounter order and entries within a group keep
/// recovery order. Identical log lines within one group are kept once;
/// the same line under two different workflows is kept in both.
#[derive(Debug, Clone, Default)]
pub struct WorkflowGroups {
    order: Vec<String>,
    entries: HashMap<String, Vec<String>>,
}

impl WorkflowGroups {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_records(records: impl IntoIterator<Item = ReadableRecord>) -> Self {
        let mut groups = Self::new();
        for record in records {
            groups.insert(record);
        }
        groups
    }

    pub fn insert(&mut self, record: ReadableRecord) {
        let ReadableRecord { workflow, log } = record;
        if !self.entries.contains_key(&workflow) {
            self.order.push(workflow.clone());
        }
        let group = self.entries.entry(workflow).or_default();
        if !group.contains(&log) {
            group.push(log);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn workflow_count(&self) -> usize {
        self.order.len()
    }

    /// Total stored log lines across every group.
    pub fn record_count(&self) -> usize {
        self.entries.values().map(Vec::len).sum()
    }

    pub fn group(&self, workflow: &str) -> Option<&[String]> {
        self.entries.get(workflow).map(Vec::as_slice)
    }

    /// Iterates groups in first-encounter order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.order.iter().filter_map(|name| {
            self.entries
                .get(name)
                .map(|logs| (name.as_str(), logs.as_slice()))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(workflow: &str, log: &str) -> ReadableRecord {
        ReadableRecord {
            workflow: workflow.to_string(),
            log: log.to_string(),
        }
    }

    #[test]
    fn groups_appear_in_first_encounter_order() {
        let groups = WorkflowGroups::from_records([
            record("Beta", "one"),
            record("Alpha", "two"),
            record("Beta", "three"),
        ]);
        let names: Vec<_> = groups.iter().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["Beta", "Alpha"]);
    }

    #[test]
    fn entries_keep_recovery_order_within_a_group() {
        let groups = WorkflowGroups::from_records([
            record("Flow", "first"),
            record("Flow", "second"),
            record("Flow", "third"),
        ]);
        assert_eq!(
            groups.group("Flow"),
            Some(&["first".to_string(), "second".to_string(), "third".to_string()][..])
        );
    }

    #[test]
    fn identical_lines_are_deduplicated_per_group_only() {
        let groups = WorkflowGroups::from_records([
            record("Flow", "same line"),
            record("Flow", "same line"),
            record("Other", "same line"),
        ]);
        assert_eq!(groups.group("Flow").map(<[String]>::len), Some(1));
        assert_eq!(groups.group("Other").map(<[String]>::len), Some(1));
        assert_eq!(groups.record_count(), 2);
    }

    #[test]
    fn unknown_workflow_is_an_ordinary_group() {
        let groups = WorkflowGroups::from_records([record("Unknown Workflow", "orphan line")]);
        assert_eq!(groups.workflow_count(), 1);
        assert_eq!(groups.group("Unknown Workflow").map(<[String]>::len), Some(1));
    }

    #[test]
    fn empty_groups_report_empty() {
        let groups = WorkflowGroups::new();
        assert!(groups.is_empty());
        assert_eq!(groups.workflow_count(), 0);
        assert_eq!(groups.record_count(), 0);
    }
}
