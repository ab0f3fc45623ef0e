//! Thread store: threads scoped to groups, each owning its replies.
//!
//! Every mutation is applied to a copy of the collection, written as a full
//! rewrite of the affected stored document, and adopted only once the write
//! succeeded. The [`ThreadLayout`] decides which key that document lives under.

use anyhow::Result;
use tracing::debug;

use crate::core::ids::{IdSource, UuidIds};
use crate::core::thread_list::{filter_by_group, find, push_reply, remove_reply, remove_thread};
use crate::io::config::{CorruptPolicy, ThreadLayout};
use crate::io::documents::{
    THREADS_KEY, group_threads_key, load_threads, parse_group_threads_key, write_threads,
};
use crate::io::storage::KeyValueStore;
use crate::model::{NewThread, Reply, Thread};

/// Ordered thread collection mirrored into a key-value store.
#[derive(Debug)]
pub struct ThreadStore<S, I = UuidIds> {
    store: S,
    ids: I,
    layout: ThreadLayout,
    threads: Vec<Thread>,
}

impl<S: KeyValueStore> ThreadStore<S> {
    /// Load stored threads, assigning random ids to new threads and replies.
    pub fn load(store: S, layout: ThreadLayout, policy: CorruptPolicy) -> Result<Self> {
        Self::load_with_ids(store, UuidIds, layout, policy)
    }
}

impl<S: KeyValueStore, I: IdSource> ThreadStore<S, I> {
    /// Load stored threads with an explicit id source.
    ///
    /// In the per-group layout, groups are loaded in key order; insertion
    /// order is kept within each group.
    pub fn load_with_ids(
        store: S,
        ids: I,
        layout: ThreadLayout,
        policy: CorruptPolicy,
    ) -> Result<Self> {
        let threads = match layout {
            ThreadLayout::Global => load_threads(&store, THREADS_KEY, None, policy)?,
            ThreadLayout::PerGroup => {
                let mut threads = Vec::new();
                for key in store.keys()? {
                    let Some(group_id) = parse_group_threads_key(&key) else {
                        continue;
                    };
                    threads.extend(load_threads(&store, &key, Some(group_id), policy)?);
                }
                threads
            }
        };
        debug!(?layout, threads = threads.len(), "thread store loaded");
        Ok(Self {
            store,
            ids,
            layout,
            threads,
        })
    }

    /// Append a thread built from `new`.
    ///
    /// Returns `None` without touching state when the title or content is empty.
    pub fn create(&mut self, new: NewThread) -> Result<Option<Thread>> {
        if !new.is_submittable() {
            debug!(group_id = %new.group_id, "thread rejected: empty title or content");
            return Ok(None);
        }
        let thread = new.into_thread(self.ids.next_id());
        let mut next = self.threads.clone();
        next.push(thread.clone());
        self.commit(next, &thread.group_id)?;
        debug!(thread_id = %thread.id, group_id = %thread.group_id, "thread created");
        Ok(Some(thread))
    }

    /// Threads of `group_id` in insertion order.
    pub fn list_by_group(&self, group_id: &str) -> Vec<&Thread> {
        filter_by_group(&self.threads, group_id)
    }

    pub fn get(&self, thread_id: &str) -> Option<&Thread> {
        find(&self.threads, thread_id)
    }

    pub fn all(&self) -> &[Thread] {
        &self.threads
    }

    /// Remove a thread and its replies. Returns false if no thread matched.
    pub fn delete(&mut self, thread_id: &str) -> Result<bool> {
        let mut next = self.threads.clone();
        let Some(removed) = remove_thread(&mut next, thread_id) else {
            debug!(thread_id, "delete: no such thread");
            return Ok(false);
        };
        self.commit(next, &removed.group_id)?;
        debug!(thread_id, replies = removed.replies.len(), "thread deleted");
        Ok(true)
    }

    /// Append a reply to a thread.
    ///
    /// Returns `None` when `content` is empty or the thread does not exist.
    pub fn add_reply(&mut self, thread_id: &str, content: &str) -> Result<Option<Reply>> {
        if content.is_empty() {
            debug!(thread_id, "reply rejected: empty content");
            return Ok(None);
        }
        let Some(group_id) = self.get(thread_id).map(|thread| thread.group_id.clone()) else {
            debug!(thread_id, "reply rejected: no such thread");
            return Ok(None);
        };
        let reply = Reply {
            id: self.ids.next_id(),
            content: content.to_string(),
        };
        let mut next = self.threads.clone();
        push_reply(&mut next, thread_id, reply.clone());
        self.commit(next, &group_id)?;
        debug!(thread_id, reply_id = %reply.id, "reply added");
        Ok(Some(reply))
    }

    /// Remove a reply. Returns false if the thread or reply did not exist.
    pub fn delete_reply(&mut self, thread_id: &str, reply_id: &str) -> Result<bool> {
        let Some(group_id) = self.get(thread_id).map(|thread| thread.group_id.clone()) else {
            debug!(thread_id, reply_id, "delete reply: no such thread");
            return Ok(false);
        };
        let mut next = self.threads.clone();
        if remove_reply(&mut next, thread_id, reply_id).is_none() {
            debug!(thread_id, reply_id, "delete reply: no such reply");
            return Ok(false);
        }
        self.commit(next, &group_id)?;
        debug!(thread_id, reply_id, "reply deleted");
        Ok(true)
    }

    /// Rewrite the document holding `group_id`'s threads from `next`, then
    /// adopt `next`. A failed write keeps the current collection.
    fn commit(&mut self, next: Vec<Thread>, group_id: &str) -> Result<()> {
        match self.layout {
            ThreadLayout::Global => write_threads(&mut self.store, THREADS_KEY, &next)?,
            ThreadLayout::PerGroup => {
                let threads = filter_by_group(&next, group_id);
                write_threads(&mut self.store, &group_threads_key(group_id), &threads)?;
            }
        }
        self.threads = next;
        Ok(())
    }
}
