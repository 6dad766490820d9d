//! Bounded chat transcript for the interactive console.
//!
//! Entries are display-only; nothing here is sent back to the model.
//! Once `cap` entries are held, each push evicts the oldest one.

use std::collections::VecDeque;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    User,
    Assistant,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::User => f.write_str("user"),
            Role::Assistant => f.write_str("assistant"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatEntry {
    pub role: Role,
    pub content: String,
}

#[derive(Debug)]
pub struct ChatHistory {
    entries: VecDeque<ChatEntry>,
    cap: usize,
    evicted: usize,
}

impl ChatHistory {
    /// `cap` is clamped to at least one entry.
    pub fn new(cap: usize) -> Self {
        let cap = cap.max(1);
        Self { entries: VecDeque::with_capacity(cap.min(1024)), cap, evicted: 0 }
    }

    pub fn push(&mut self, role: Role, content: impl Into<String>) {
        if self.entries.len() == self.cap {
            self.entries.pop_front();
            self.evicted += 1;
        }
        self.entries.push_back(ChatEntry { role, content: content.into() });
    }

    pub fn entries(&self) -> impl Iterator<Item = &ChatEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries dropped by eviction since creation or the last `clear`.
    pub fn evicted(&self) -> usize {
        self.evicted
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.evicted = 0;
    }
}
