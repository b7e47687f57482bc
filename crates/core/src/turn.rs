//! Dialogue turn value objects.
//!
//! A `ChatTurn` is one (role, text) pair in the rolling conversation:
//! the user asks → the assembler records the turn → the model answers →
//! the answer is recorded too. Turns are owned values; the dialogue log
//! stores its own copy and never aliases caller memory.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The role of a turn's author, in the wire vocabulary of the model API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// The end user (also used for injected system/scan context turns).
    User,
    /// The remote language model.
    Model,
}

impl Role {
    /// The wire string for this role.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Model => "model",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single turn in a conversation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatTurn {
    /// Who authored this turn
    pub role: Role,

    /// The text content
    pub text: String,

    /// When the turn was recorded
    pub timestamp: DateTime<Utc>,
}

impl ChatTurn {
    /// Create a new user turn.
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            text: text.into(),
            timestamp: Utc::now(),
        }
    }

    /// Create a new model turn.
    pub fn model(text: impl Into<String>) -> Self {
        Self {
            role: Role::Model,
            text: text.into(),
            timestamp: Utc::now(),
        }
    }
}

impl std::fmt::Display for ChatTurn {
    /// Renders as the bare text — the dialogue log's snapshot view.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.text)
    }
}
