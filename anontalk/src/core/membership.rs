//! Set of joined group ids.

/// Joined group ids in join order, without duplicates.
///
/// Serialized as a plain JSON array so the stored value stays compatible with
/// the `joinedGroups` key.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Membership {
    ids: Vec<String>,
}

impl Membership {
    /// Build from stored ids, dropping repeats after the first occurrence.
    pub fn from_ids(ids: impl IntoIterator<Item = String>) -> Self {
        let mut membership = Self::default();
        for id in ids {
            membership.join(&id);
        }
        membership
    }

    /// Returns true if the set changed.
    pub fn join(&mut self, group_id: &str) -> bool {
        if self.contains(group_id) {
            return false;
        }
        self.ids.push(group_id.to_string());
        true
    }

    /// Returns true if the set changed.
    pub fn leave(&mut self, group_id: &str) -> bool {
        let before = self.ids.len();
        self.ids.retain(|id| id != group_id);
        self.ids.len() != before
    }

    pub fn contains(&self, group_id: &str) -> bool {
        self.ids.iter().any(|id| id == group_id)
    }

    pub fn ids(&self) -> &[String] {
        &self.ids
    }
}
