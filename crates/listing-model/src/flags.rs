//! Flagged-key tracking for first-match-wins deduplication.

use std::collections::HashSet;

/// Record keys already claimed by an earlier rule in the catalog.
///
/// Grows monotonically over one evaluation run and is discarded afterwards.
/// Rows without a key are never inserted here; they stay visible to every
/// rule that matches them.
#[derive(Debug, Clone, Default)]
pub struct FlaggedKeys {
    keys: HashSet<String>,
}

impl FlaggedKeys {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.keys.contains(key)
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

impl Extend<String> for FlaggedKeys {
    fn extend<I: IntoIterator<Item = String>>(&mut self, iter: I) {
        self.keys.extend(iter);
    }
}
