//! Capped marker-set lifecycle for the map view.
//!
//! The map never places one marker per record: it shows at most
//! [`MARKER_CAP`] markers, the nearest records to the current viewport
//! center. On every recenter or refresh only the delta is applied —
//! markers that left the top-N set are removed, new entrants are added,
//! and survivors are left alone. That bounds the per-update cost to the
//! set difference instead of a full teardown and rebuild.

use std::collections::HashSet;

/// Maximum number of concurrently placed markers.
pub const MARKER_CAP: usize = 30;

/// The ids entering and leaving the placed set for one update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkerDiff {
    pub added: Vec<i64>,
    pub removed: Vec<i64>,
}

impl MarkerDiff {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty()
    }
}

/// The set of record ids currently placed on the map.
#[derive(Debug, Default)]
pub struct MarkerSet {
    placed: HashSet<i64>,
}

impl MarkerSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the placed set with `top` (the proximity-sorted head,
    /// truncated to [`MARKER_CAP`] here as a hard cap) and returns the
    /// delta. `added` preserves the order of `top`; ids present both
    /// before and after appear in neither list.
    pub fn update(&mut self, top: &[i64]) -> MarkerDiff {
        let top = &top[..top.len().min(MARKER_CAP)];
        let next: HashSet<i64> = top.iter().copied().collect();

        let mut removed: Vec<i64> = self.placed.difference(&next).copied().collect();
        removed.sort_unstable();
        let added: Vec<i64> = top
            .iter()
            .copied()
            .filter(|id| !self.placed.contains(id))
            .collect();

        self.placed = next;
        MarkerDiff { added, removed }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.placed.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.placed.is_empty()
    }

    #[must_use]
    pub fn contains(&self, id: i64) -> bool {
        self.placed.contains(&id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_update_adds_everything() {
        let mut set = MarkerSet::new();
        let diff = set.update(&[3, 1, 2]);
        assert_eq!(diff.added, vec![3, 1, 2], "added keeps proximity order");
        assert!(diff.removed.is_empty());
        assert_eq!(set.len(), 3);
    }

    #[test]
    fn shifting_the_window_diffs_only_the_edges() {
        let mut set = MarkerSet::new();
        set.update(&[1, 2, 3, 4]);

        // 1 left the top-N, 5 entered; 2..4 survive untouched.
        let diff = set.update(&[2, 3, 4, 5]);
        assert_eq!(diff.added, vec![5]);
        assert_eq!(diff.removed, vec![1]);
        assert!(set.contains(5));
        assert!(!set.contains(1));
    }

    #[test]
    fn identical_update_is_an_empty_diff() {
        let mut set = MarkerSet::new();
        set.update(&[7, 8, 9]);
        let diff = set.update(&[7, 8, 9]);
        assert!(diff.is_empty());
    }

    #[test]
    fn update_enforces_the_marker_cap() {
        let mut set = MarkerSet::new();
        let ids: Vec<i64> = (0..50).collect();
        let diff = set.update(&ids);
        assert_eq!(diff.added.len(), MARKER_CAP);
        assert_eq!(set.len(), MARKER_CAP);
        assert!(set.contains(29));
        assert!(!set.contains(30));
    }

    #[test]
    fn emptying_the_set_removes_all_placed_markers() {
        let mut set = MarkerSet::new();
        set.update(&[4, 5]);
        let diff = set.update(&[]);
        assert!(diff.added.is_empty());
        assert_eq!(diff.removed, vec![4, 5]);
        assert!(set.is_empty());
    }
}
