//! Pet Entity

use serde::{Deserialize, Serialize};
use super::entity::Entity;

/// A pet that reminders are assigned to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pet {
    pub id: String,
    pub name: String,
    /// Emoji or image reference shown next to the name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
}

impl Pet {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            avatar: None,
        }
    }

    pub fn with_avatar(mut self, avatar: impl Into<String>) -> Self {
        self.avatar = Some(avatar.into());
        self
    }
}

impl Entity for Pet {
    fn id(&self) -> &str {
        &self.id
    }
}
