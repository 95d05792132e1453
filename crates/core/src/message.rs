//! Conversation message types.
//!
//! A message is a value object: once appended to the session log it is never
//! mutated. The log itself lives in `redpen-session`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The role of a message sender.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// The end user
    User,
    /// The model's reply, relayed back
    Assistant,
}

/// A single entry in the session's conversation log.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    /// Unique message ID
    pub id: String,

    /// Who sent this message
    pub role: Role,

    /// The text content
    pub content: String,

    /// When the message was created
    pub timestamp: DateTime<Utc>,

    /// Annotation describing the document context attached to this message
    /// (source and size, plus a short preview). Only set on user entries.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context_info: Option<String>,
}

impl Message {
    /// Create a new user message.
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            role: Role::User,
            content: content.into(),
            timestamp: Utc::now(),
            context_info: None,
        }
    }

    /// Create a new assistant message.
    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            role: Role::Assistant,
            content: content.into(),
            timestamp: Utc::now(),
            context_info: None,
        }
    }

    /// Attach a context annotation to this message.
    pub fn with_context_info(mut self, info: impl Into<String>) -> Self {
        self.context_info = Some(info.into());
        self
    }
}
