//! Bulk-selection state
//!
//! Session-only set of task ids checked for bulk deletion. Never persisted.

use std::collections::HashSet;

#[derive(Debug, Clone, Default)]
pub struct Selection {
    ids: HashSet<u32>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Flip one id, returns whether it is now selected
    pub fn toggle(&mut self, id: u32) -> bool {
        if self.ids.remove(&id) {
            false
        } else {
            self.ids.insert(id);
            true
        }
    }

    /// Select every visible id, or deselect them all if they already are
    pub fn toggle_all(&mut self, visible: &[u32]) {
        let all_selected = visible.iter().all(|id| self.ids.contains(id));
        if all_selected {
            for id in visible {
                self.ids.remove(id);
            }
        } else {
            self.ids.extend(visible.iter().copied());
        }
    }

    pub fn contains(&self, id: u32) -> bool {
        self.ids.contains(&id)
    }

    /// Drop ids of tasks that no longer exist
    pub fn prune<'a>(&mut self, removed: impl IntoIterator<Item = &'a u32>) {
        for id in removed {
            self.ids.remove(id);
        }
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }

    pub fn ids(&self) -> &HashSet<u32> {
        &self.ids
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}
