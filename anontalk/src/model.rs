use serde::{Deserialize, Serialize};

/// A named discussion category users can join or leave.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Group {
    pub id: String,
    pub name: String,
    pub description: String,
}

impl Group {
    /// Mock group data for an id with no catalog entry.
    pub fn mock(id: &str) -> Self {
        Self {
            id: id.to_string(),
            name: format!("Group {id}"),
            description: format!("Description for Group {id}"),
        }
    }
}

/// A top-level post within a group.
///
/// Field names serialize in camelCase so stored documents keep the
/// `groupId` spelling of the browser storage layout.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Thread {
    pub id: String,
    pub group_id: String,
    pub title: String,
    pub content: String,
    /// Opaque data URL; never inspected.
    #[serde(default)]
    pub image: Option<String>,
    pub replies: Vec<Reply>,
}

impl Thread {
    pub fn reply(&self, reply_id: &str) -> Option<&Reply> {
        self.replies.iter().find(|reply| reply.id == reply_id)
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Reply {
    pub id: String,
    pub content: String,
}

/// User input for a thread that has not been assigned an id yet.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NewThread {
    pub group_id: String,
    pub title: String,
    pub content: String,
    pub image: Option<String>,
}

impl NewThread {
    pub fn new(
        group_id: impl Into<String>,
        title: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        Self {
            group_id: group_id.into(),
            title: title.into(),
            content: content.into(),
            image: None,
        }
    }

    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = Some(image.into());
        self
    }

    /// Title and content must both be non-empty. Whitespace counts as content.
    pub fn is_submittable(&self) -> bool {
        !self.title.is_empty() && !self.content.is_empty()
    }

    pub fn into_thread(self, id: String) -> Thread {
        Thread {
            id,
            group_id: self.group_id,
            title: self.title,
            content: self.content,
            image: self.image,
            replies: Vec::new(),
        }
    }
}
