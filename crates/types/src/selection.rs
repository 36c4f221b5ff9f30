use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Row indices the operator flagged for highlighting. Indices are positions in
/// the loaded row array, before any total rows are filtered out.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HighlightedRows(BTreeSet<usize>);

impl HighlightedRows {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds the index if absent, removes it otherwise. Returns whether the row
    /// is highlighted afterwards.
    pub fn toggle(&mut self, index: usize) -> bool {
        if self.0.remove(&index) {
            false
        } else {
            self.0.insert(index);
            true
        }
    }

    pub fn contains(&self, index: usize) -> bool {
        self.0.contains(&index)
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.0.iter().copied()
    }
}

impl FromIterator<usize> for HighlightedRows {
    fn from_iter<I: IntoIterator<Item = usize>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggle_adds_then_removes() {
        let mut rows = HighlightedRows::new();
        assert!(rows.toggle(2));
        assert!(rows.contains(2));
        assert!(!rows.toggle(2));
        assert!(rows.is_empty());
    }

    #[test]
    fn iterates_in_ascending_order() {
        let rows: HighlightedRows = [5, 1, 3].into_iter().collect();
        assert_eq!(rows.iter().collect::<Vec<_>>(), vec![1, 3, 5]);
        assert_eq!(rows.len(), 3);
    }
}
