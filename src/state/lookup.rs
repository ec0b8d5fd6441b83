//! Autocomplete and answer-list queries over a session's answer pool.

use crate::state::game::{GameSession, normalize};

/// Upper bound on autocomplete suggestions.
pub const MAX_SUGGESTIONS: usize = 10;

/// One answer-pool entry in the searchable answer list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PoolEntry {
    /// Answer text as authored.
    pub answer: String,
    /// Whether it matches an already revealed answer.
    pub guessed: bool,
}

impl GameSession {
    /// Pool entries containing `input` that have not been revealed yet, in
    /// pool order. Blank input yields nothing.
    pub fn suggestions(&self, input: &str) -> Vec<String> {
        let needle = normalize(input);
        if needle.is_empty() {
            return Vec::new();
        }

        self.prompt()
            .answer_pool()
            .iter()
            .filter(|answer| {
                let normalized = normalize(answer);
                normalized.contains(&needle) && !self.is_revealed(&normalized)
            })
            .take(MAX_SUGGESTIONS)
            .cloned()
            .collect()
    }

    /// Every pool entry containing `term` (all of them for a blank term),
    /// flagged when already revealed.
    pub fn search_answers(&self, term: &str) -> Vec<PoolEntry> {
        let needle = normalize(term);
        self.prompt()
            .answer_pool()
            .iter()
            .filter_map(|answer| {
                let normalized = normalize(answer);
                normalized.contains(&needle).then(|| PoolEntry {
                    answer: answer.clone(),
                    guessed: self.is_revealed(&normalized),
                })
            })
            .collect()
    }
}
