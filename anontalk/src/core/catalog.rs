//! Static group catalog.

use crate::model::Group;

/// Ids of the groups listed when no catalog is configured.
pub const MOCK_GROUP_IDS: [&str; 3] = ["1", "2", "3"];

/// Listed groups in display order.
///
/// Groups are never added or removed at runtime. Lookups for ids outside the
/// catalog fall back to [`Group::mock`], so any group id can still be browsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupCatalog {
    groups: Vec<Group>,
}

impl GroupCatalog {
    pub fn new(groups: Vec<Group>) -> Self {
        Self { groups }
    }

    pub fn groups(&self) -> &[Group] {
        &self.groups
    }

    pub fn get(&self, group_id: &str) -> Option<&Group> {
        self.groups.iter().find(|group| group.id == group_id)
    }

    /// Catalog entry for `group_id`, or mock data for unknown ids.
    pub fn resolve(&self, group_id: &str) -> Group {
        self.get(group_id)
            .cloned()
            .unwrap_or_else(|| Group::mock(group_id))
    }
}

impl Default for GroupCatalog {
    fn default() -> Self {
        Self::new(MOCK_GROUP_IDS.iter().map(|id| Group::mock(id)).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_catalog_lists_mock_groups_in_order() {
        let catalog = GroupCatalog::default();
        let names: Vec<&str> = catalog
            .groups()
            .iter()
            .map(|group| group.name.as_str())
            .collect();
        assert_eq!(names, ["Group 1", "Group 2", "Group 3"]);
    }

    #[test]
    fn resolve_prefers_catalog_entry() {
        let catalog = GroupCatalog::new(vec![Group {
            id: "rust".to_string(),
            name: "Rustaceans".to_string(),
            description: "Crabs only".to_string(),
        }]);
        assert_eq!(catalog.resolve("rust").name, "Rustaceans");
        assert_eq!(catalog.resolve("go").name, "Group go");
        assert!(catalog.get("go").is_none());
    }
}
