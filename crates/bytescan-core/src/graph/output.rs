use serde::{Deserialize, Serialize};

use super::ids::OutputId;

/// A match record: opaque content and an optional link to the next record.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Output {
    content: Vec<u8>,
    #[serde(default)]
    next: Option<OutputId>,
}

impl Output {
    pub fn new(content: impl Into<Vec<u8>>, next: Option<OutputId>) -> Self {
        Self {
            content: content.into(),
            next,
        }
    }

    pub fn content(&self) -> &[u8] {
        &self.content
    }

    pub fn set_content(&mut self, content: impl Into<Vec<u8>>) {
        self.content = content.into();
    }

    pub fn next(&self) -> Option<OutputId> {
        self.next
    }

    pub fn set_next(&mut self, next: Option<OutputId>) {
        self.next = next;
    }
}
