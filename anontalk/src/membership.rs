//! Membership tracker: the persisted set of joined groups.

use anyhow::Result;
use tracing::debug;

use crate::core::membership::Membership;
use crate::io::config::CorruptPolicy;
use crate::io::documents::{load_membership, write_membership};
use crate::io::storage::KeyValueStore;

/// Joined-group set mirrored into the `joinedGroups` key.
///
/// Accepts any group id, including ids with no catalog entry.
#[derive(Debug)]
pub struct MembershipTracker<S> {
    store: S,
    membership: Membership,
}

impl<S: KeyValueStore> MembershipTracker<S> {
    /// Load the stored set (empty when nothing is stored).
    pub fn load(store: S, policy: CorruptPolicy) -> Result<Self> {
        let membership = load_membership(&store, policy)?;
        Ok(Self { store, membership })
    }

    /// Add `group_id`. Idempotent.
    pub fn join(&mut self, group_id: &str) -> Result<()> {
        let mut next = self.membership.clone();
        if !next.join(group_id) {
            debug!(group_id, "already joined");
            return Ok(());
        }
        self.commit(next)?;
        debug!(group_id, "joined group");
        Ok(())
    }

    /// Remove `group_id`. Idempotent.
    pub fn leave(&mut self, group_id: &str) -> Result<()> {
        let mut next = self.membership.clone();
        if !next.leave(group_id) {
            debug!(group_id, "not a member");
            return Ok(());
        }
        self.commit(next)?;
        debug!(group_id, "left group");
        Ok(())
    }

    pub fn is_joined(&self, group_id: &str) -> bool {
        self.membership.contains(group_id)
    }

    /// Joined ids in join order.
    pub fn joined(&self) -> &[String] {
        self.membership.ids()
    }

    /// Store `next`, then adopt it. A failed write keeps the current set.
    fn commit(&mut self, next: Membership) -> Result<()> {
        write_membership(&mut self.store, &next)?;
        self.membership = next;
        Ok(())
    }
}
