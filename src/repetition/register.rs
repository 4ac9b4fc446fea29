use std::collections::{BTreeMap, HashSet};

use crate::models::{NGram, Speaker};

/// Per-conversation memory of each speaker's most recent turn.
///
/// Holds at most one n-gram set per speaker; an update replaces it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Register {
    entries: BTreeMap<Speaker, HashSet<NGram>>,
}

impl Register {
    pub fn new() -> Self {
        Self::default()
    }

    /// Forget every speaker (conversation boundary)
    pub fn reset(&mut self) {
        self.entries.clear();
    }

    /// Replace the speaker's stored set with the distinct n-grams of a turn
    pub fn update(&mut self, speaker: Speaker, ngrams: &[NGram]) {
        self.entries
            .insert(speaker, ngrams.iter().cloned().collect());
    }

    /// Stored sets in speaker order
    pub fn iter(&self) -> impl Iterator<Item = (Speaker, &HashSet<NGram>)> {
        self.entries.iter().map(|(speaker, set)| (*speaker, set))
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
