//! Ordered thread collection operations.
//!
//! Every function preserves insertion order of the threads and replies it
//! does not touch. Missing ids are never errors; callers learn from the
//! return value whether anything changed.

use crate::model::{Reply, Thread};

/// Threads belonging to `group_id`, in insertion order.
pub fn filter_by_group<'a>(threads: &'a [Thread], group_id: &str) -> Vec<&'a Thread> {
    threads
        .iter()
        .filter(|thread| thread.group_id == group_id)
        .collect()
}

pub fn find<'a>(threads: &'a [Thread], thread_id: &str) -> Option<&'a Thread> {
    threads.iter().find(|thread| thread.id == thread_id)
}

/// Remove the thread with `thread_id`. Returns the removed thread.
pub fn remove_thread(threads: &mut Vec<Thread>, thread_id: &str) -> Option<Thread> {
    let index = threads.iter().position(|thread| thread.id == thread_id)?;
    Some(threads.remove(index))
}

/// Append `reply` to the thread with `thread_id`.
///
/// Returns false and drops the reply if the thread is absent.
pub fn push_reply(threads: &mut [Thread], thread_id: &str, reply: Reply) -> bool {
    match threads.iter_mut().find(|thread| thread.id == thread_id) {
        Some(thread) => {
            thread.replies.push(reply);
            true
        }
        None => false,
    }
}

/// Remove a reply from the named thread. Returns the removed reply.
pub fn remove_reply(threads: &mut [Thread], thread_id: &str, reply_id: &str) -> Option<Reply> {
    let thread = threads.iter_mut().find(|thread| thread.id == thread_id)?;
    let index = thread.replies.iter().position(|reply| reply.id == reply_id)?;
    Some(thread.replies.remove(index))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{reply, thread, thread_with_replies};

    fn ids(threads: &[&Thread]) -> Vec<String> {
        threads.iter().map(|thread| thread.id.clone()).collect()
    }

    #[test]
    fn filter_keeps_insertion_order_within_group() {
        let threads = vec![
            thread("t1", "1"),
            thread("t2", "2"),
            thread("t3", "1"),
        ];
        assert_eq!(ids(&filter_by_group(&threads, "1")), ["t1", "t3"]);
        assert!(filter_by_group(&threads, "9").is_empty());
    }

    #[test]
    fn remove_thread_leaves_others_untouched() {
        let mut threads = vec![
            thread_with_replies("t1", "1", vec![reply("r1", "a")]),
            thread("t2", "1"),
            thread_with_replies("t3", "1", vec![reply("r2", "b")]),
        ];
        let before = threads.clone();

        let removed = remove_thread(&mut threads, "t2").expect("removed");
        assert_eq!(removed.id, "t2");
        assert_eq!(threads, vec![before[0].clone(), before[2].clone()]);
        assert!(remove_thread(&mut threads, "t2").is_none());
        assert_eq!(threads.len(), 2);
    }

    #[test]
    fn push_reply_appends_to_named_thread_only() {
        let mut threads = vec![thread("t1", "1"), thread("t2", "1")];
        assert!(push_reply(&mut threads, "t2", reply("r1", "hello")));
        assert!(threads[0].replies.is_empty());
        assert_eq!(threads[1].replies, vec![reply("r1", "hello")]);
        assert!(!push_reply(&mut threads, "missing", reply("r2", "x")));
    }

    #[test]
    fn remove_reply_is_noop_for_missing_ids() {
        let mut threads = vec![thread_with_replies(
            "t1",
            "1",
            vec![reply("r1", "a"), reply("r2", "b")],
        )];
        assert!(remove_reply(&mut threads, "t1", "nope").is_none());
        assert!(remove_reply(&mut threads, "nope", "r1").is_none());
        assert_eq!(remove_reply(&mut threads, "t1", "r1"), Some(reply("r1", "a")));
        assert_eq!(threads[0].replies, vec![reply("r2", "b")]);
    }
}
