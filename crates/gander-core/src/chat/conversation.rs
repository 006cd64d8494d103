//! Ordered chat history

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Bot,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// Sequential, starting at 1
    pub id: u64,
    pub role: Role,
    pub message: String,
}

#[derive(Debug, Clone, Default)]
pub struct Conversation {
    messages: Vec<Message>,
}

impl Conversation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_user(&mut self, text: impl Into<String>) -> &Message {
        self.push(Role::User, text.into())
    }

    pub fn push_bot(&mut self, text: impl Into<String>) -> &Message {
        self.push(Role::Bot, text.into())
    }

    fn push(&mut self, role: Role, message: String) -> &Message {
        let id = self.messages.len() as u64 + 1;
        self.messages.push(Message { id, role, message });
        &self.messages[self.messages.len() - 1]
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn last(&self) -> Option<&Message> {
        self.messages.last()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}
