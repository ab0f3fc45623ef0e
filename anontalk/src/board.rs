//! Board facade: catalog, membership and threads over one storage port.
//!
//! Front ends read snapshots ([`GroupEntry`], [`GroupPage`]) and send user
//! intents back through the forwarding methods.

use anyhow::Result;
use serde::Serialize;

use crate::core::catalog::GroupCatalog;
use crate::core::ids::{IdSource, UuidIds};
use crate::io::config::BoardConfig;
use crate::io::storage::{KeyValueStore, SharedStore};
use crate::membership::MembershipTracker;
use crate::model::{Group, NewThread, Reply, Thread};
use crate::threads::ThreadStore;

/// A catalog group with the current user's membership flag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GroupEntry {
    pub group: Group,
    pub joined: bool,
}

/// Everything shown on a group's page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GroupPage<'a> {
    pub group: Group,
    pub joined: bool,
    pub threads: Vec<&'a Thread>,
}

pub struct Board<S, I = UuidIds> {
    catalog: GroupCatalog,
    membership: MembershipTracker<SharedStore<S>>,
    threads: ThreadStore<SharedStore<S>, I>,
    store: SharedStore<S>,
}

impl<S: KeyValueStore> Board<S> {
    pub fn open(store: S, config: &BoardConfig) -> Result<Self> {
        Self::open_with_ids(store, config, UuidIds)
    }
}

impl<S: KeyValueStore, I: IdSource> Board<S, I> {
    pub fn open_with_ids(store: S, config: &BoardConfig, ids: I) -> Result<Self> {
        let store = SharedStore::new(store);
        let membership = MembershipTracker::load(store.clone(), config.on_corrupt)?;
        let threads = ThreadStore::load_with_ids(
            store.clone(),
            ids,
            config.thread_layout,
            config.on_corrupt,
        )?;
        Ok(Self {
            catalog: config.catalog(),
            membership,
            threads,
            store,
        })
    }

    /// Catalog groups in display order with membership flags.
    pub fn groups(&self) -> Vec<GroupEntry> {
        let joined = self.membership.joined();
        self.catalog
            .groups()
            .iter()
            .map(|group| GroupEntry {
                group: group.clone(),
                joined: joined.contains(&group.id),
            })
            .collect()
    }

    /// Snapshot of one group. Unknown ids resolve to mock group data.
    pub fn group_page(&self, group_id: &str) -> GroupPage<'_> {
        GroupPage {
            group: self.catalog.resolve(group_id),
            joined: self.membership.is_joined(group_id),
            threads: self.threads.list_by_group(group_id),
        }
    }

    pub fn threads(&self) -> &ThreadStore<SharedStore<S>, I> {
        &self.threads
    }

    /// Read access to the underlying storage.
    pub fn with_store<R>(&self, f: impl FnOnce(&S) -> R) -> R {
        self.store.with(f)
    }

    pub fn join(&mut self, group_id: &str) -> Result<()> {
        self.membership.join(group_id)
    }

    pub fn leave(&mut self, group_id: &str) -> Result<()> {
        self.membership.leave(group_id)
    }

    pub fn is_joined(&self, group_id: &str) -> bool {
        self.membership.is_joined(group_id)
    }

    pub fn create_thread(&mut self, new: NewThread) -> Result<Option<Thread>> {
        self.threads.create(new)
    }

    pub fn delete_thread(&mut self, thread_id: &str) -> Result<bool> {
        self.threads.delete(thread_id)
    }

    pub fn add_reply(&mut self, thread_id: &str, content: &str) -> Result<Option<Reply>> {
        self.threads.add_reply(thread_id, content)
    }

    pub fn delete_reply(&mut self, thread_id: &str, reply_id: &str) -> Result<bool> {
        self.threads.delete_reply(thread_id, reply_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::storage::MemoryStore;
    use crate::test_support::{ReadOnlyStore, memory_board};

    #[test]
    fn groups_report_membership() {
        let mut board = memory_board(&BoardConfig::default());
        board.join("2").expect("join");
        let groups = board.groups();
        let joined: Vec<(&str, bool)> = groups
            .iter()
            .map(|entry| (entry.group.id.as_str(), entry.joined))
            .collect();
        assert_eq!(joined, [("1", false), ("2", true), ("3", false)]);
    }

    #[test]
    fn group_page_resolves_unknown_group_and_lists_threads() {
        let mut board = memory_board(&BoardConfig::default());
        board
            .create_thread(NewThread::new("42", "Hi", "World"))
            .expect("create");
        let page = board.group_page("42");
        assert_eq!(page.group.name, "Group 42");
        assert!(!page.joined);
        assert_eq!(page.threads.len(), 1);
        assert_eq!(page.threads[0].title, "Hi");
    }

    #[test]
    fn membership_and_threads_share_storage() {
        let mut board = Board::open(MemoryStore::new(), &BoardConfig::default()).expect("open");
        board.join("1").expect("join");
        board
            .create_thread(NewThread::new("1", "a", "b"))
            .expect("create");
        let keys = board.with_store(|store| store.keys().expect("keys"));
        assert_eq!(keys, ["joinedGroups", "threads"]);
    }

    #[test]
    fn failed_writes_leave_board_unchanged() {
        let mut seed = memory_board(&BoardConfig::default());
        seed.join("1").expect("join");
        let thread = seed
            .create_thread(NewThread::new("1", "kept", "body"))
            .expect("create")
            .expect("created");
        let snapshot = seed.with_store(MemoryStore::clone);

        let mut board =
            Board::open(ReadOnlyStore::new(snapshot), &BoardConfig::default()).expect("open");
        board.join("2").expect_err("join should fail");
        board.leave("1").expect_err("leave should fail");
        board
            .create_thread(NewThread::new("1", "Hi", "World"))
            .expect_err("create should fail");
        board
            .add_reply(&thread.id, "hello")
            .expect_err("reply should fail");
        board.delete_thread(&thread.id).expect_err("delete should fail");

        assert!(board.is_joined("1"));
        assert!(!board.is_joined("2"));
        let page = board.group_page("1");
        assert_eq!(page.threads.len(), 1);
        assert!(page.threads[0].replies.is_empty());
    }
}
