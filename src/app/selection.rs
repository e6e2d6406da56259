//! Pending deletion selection.

use std::collections::HashSet;

/// Set of image ids marked for deletion.
///
/// Membership is unique; iteration order is unspecified. Any string is accepted
/// as an id.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PendingSelection {
    ids: HashSet<String>,
}

impl PendingSelection {
    /// Adds `id` if absent, removes it if present.
    ///
    /// Returns `true` if `id` is selected afterwards.
    pub fn toggle(&mut self, id: &str) -> bool {
        if self.ids.remove(id) {
            false
        } else {
            self.ids.insert(id.to_string());
            true
        }
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }

    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.ids.contains(id)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Copies the current ids.
    #[must_use]
    pub fn snapshot(&self) -> HashSet<String> {
        self.ids.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn toggle_adds_then_removes() {
        let mut selection = PendingSelection::default();
        assert!(selection.toggle("a"));
        assert!(selection.contains("a"));
        assert!(!selection.toggle("a"));
        assert!(selection.is_empty());
    }

    #[test]
    fn odd_toggle_counts_remain_selected() {
        let sequence = ["a", "b", "a", "c", "b", "b", "a", "d", "d", "", ""];
        let mut selection = PendingSelection::default();
        let mut counts: HashMap<&str, usize> = HashMap::new();

        for id in sequence {
            selection.toggle(id);
            *counts.entry(id).or_default() += 1;
        }

        for (id, count) in counts {
            assert_eq!(selection.contains(id), count % 2 == 1, "id {id:?}");
        }
        assert_eq!(selection.len(), 3);
    }

    #[test]
    fn clear_empties_the_set() {
        let mut selection = PendingSelection::default();
        selection.toggle("a");
        selection.toggle("b");
        selection.clear();
        assert!(selection.is_empty());
        assert!(selection.snapshot().is_empty());
    }
}
