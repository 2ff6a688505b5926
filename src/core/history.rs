use std::collections::{HashMap, VecDeque};

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// Number of turns a conversation keeps before evicting the oldest.
pub const HISTORY_CAPACITY: usize = 20;

/// Key used when a chat request carries no session identifier.
pub const DEFAULT_SESSION: &str = "default";

/// Author of a conversation turn. The internal `Ai` tag maps to the
/// completion API's `assistant` role on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Ai,
}

impl Role {
    pub fn as_api_role(self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Ai => "assistant",
        }
    }
}

/// One message in a conversation history.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversationTurn {
    pub role: Role,
    pub content: String,
}

/// Bounded, ordered history of conversation turns. Appending past capacity
/// evicts the oldest turn.
#[derive(Debug, Clone)]
pub struct ConversationHistory {
    turns: VecDeque<ConversationTurn>,
    capacity: usize,
}

impl ConversationHistory {
    pub fn new() -> Self {
        Self::with_capacity(HISTORY_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            turns: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Append a turn, evicting the oldest when the history is full.
    pub fn push(&mut self, role: Role, content: impl Into<String>) {
        if self.turns.len() >= self.capacity {
            self.turns.pop_front();
        }
        self.turns.push_back(ConversationTurn {
            role,
            content: content.into(),
        });
    }

    pub fn turns(&self) -> impl Iterator<Item = &ConversationTurn> {
        self.turns.iter()
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    /// Convert the history to completion API message format.
    pub fn as_messages(&self) -> Vec<Value> {
        self.turns
            .iter()
            .map(|turn| {
                json!({
                    "role": turn.role.as_api_role(),
                    "content": turn.content,
                })
            })
            .collect()
    }
}

impl Default for ConversationHistory {
    fn default() -> Self {
        Self::new()
    }
}

/// Histories keyed by caller-supplied session identifier. The capacity bound
/// applies independently to each session.
#[derive(Debug, Default)]
pub struct SessionStore {
    sessions: HashMap<String, ConversationHistory>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fetch the history for a session, creating it on first use. A missing
    /// identifier resolves to the shared default session.
    pub fn history_mut(&mut self, session_id: Option<&str>) -> &mut ConversationHistory {
        let key = session_id
            .filter(|id| !id.trim().is_empty())
            .unwrap_or(DEFAULT_SESSION);
        self.sessions
            .entry(key.to_string())
            .or_insert_with(ConversationHistory::new)
    }

    pub fn session_count(&self) -> usize {
        self.sessions.len()
    }
}
