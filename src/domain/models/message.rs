#[cfg(test)]
#[path = "message_test.rs"]
mod tests;

use serde_derive::Deserialize;
use serde_derive::Serialize;

use super::Role;

/// A single chat turn. Fields are read-only once constructed; edits produce
/// a new message.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    role: Role,
    content: String,
}

impl Message {
    pub fn new(role: Role, content: &str) -> Message {
        return Message {
            role,
            content: content.to_string(),
        };
    }

    pub fn role(&self) -> Role {
        return self.role;
    }

    pub fn content(&self) -> &str {
        return &self.content;
    }

    /// Whether the message is complete enough to be sent to the backend.
    pub fn is_sendable(&self) -> bool {
        return !self.role.to_string().is_empty() && !self.content.trim().is_empty();
    }
}
