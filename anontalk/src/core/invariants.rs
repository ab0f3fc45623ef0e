//! Semantic invariants of stored thread documents not expressible via JSON Schema.

use std::collections::HashSet;

use crate::model::Thread;

/// Check a loaded thread document:
/// - No duplicate thread ids
/// - No duplicate reply ids within a thread
/// - Every thread belongs to `expected_group` when one is given
pub fn validate_threads(threads: &[Thread], expected_group: Option<&str>) -> Vec<String> {
    let mut errors = Vec::new();
    let mut seen = HashSet::new();
    for thread in threads {
        if !seen.insert(thread.id.as_str()) {
            errors.push(format!("duplicate thread id '{}'", thread.id));
        }
        if let Some(group_id) = expected_group {
            if thread.group_id != group_id {
                errors.push(format!(
                    "thread '{}' has groupId '{}' but is stored under group '{}'",
                    thread.id, thread.group_id, group_id
                ));
            }
        }
        let mut reply_ids = HashSet::new();
        for reply in &thread.replies {
            if !reply_ids.insert(reply.id.as_str()) {
                errors.push(format!(
                    "thread '{}': duplicate reply id '{}'",
                    thread.id, reply.id
                ));
            }
        }
    }
    errors
}
