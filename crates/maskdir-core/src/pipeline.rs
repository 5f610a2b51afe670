//! Filter / paginate / sort pipeline over one record snapshot.
//!
//! All session state lives in an explicit [`DirectoryState`] value so the
//! pipeline can be driven headlessly — no rendering context, no shared
//! globals. Every operation updates the display list and its derived
//! pagination fields together, so a reader never observes a fresh display
//! list paired with a stale page count.

use crate::filter::FilterCondition;
use crate::geo::Point;
use crate::position::PositionProvider;
use crate::record::{Pharmacy, Snapshot};
use crate::sort::sort_indices_by_distance;

/// Page sizes the directory offers, mirroring the upstream UI choices.
pub const PAGE_SIZE_CHOICES: [usize; 3] = [15, 25, 50];

/// Default page size when none has been chosen.
pub const DEFAULT_PAGE_SIZE: usize = PAGE_SIZE_CHOICES[0];

/// Session state for one directory view: the current snapshot, the active
/// filter condition, the display index list derived from them, and the
/// pagination window.
///
/// The display list holds indices into the snapshot, in snapshot order
/// after a filter or in ascending-distance order after a proximity sort.
/// Replacing the snapshot invalidates and rebuilds it — indices are never
/// carried across snapshots.
#[derive(Debug, Clone)]
pub struct DirectoryState {
    snapshot: Snapshot,
    condition: FilterCondition,
    display: Vec<usize>,
    page: usize,
    page_size: usize,
    total_pages: usize,
}

impl DirectoryState {
    /// Builds a state over `snapshot` with no filter applied: every record
    /// is displayed in feed order, starting on page 1.
    #[must_use]
    pub fn new(snapshot: Snapshot) -> Self {
        let mut state = Self {
            snapshot,
            condition: FilterCondition::default(),
            display: Vec::new(),
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
            total_pages: 0,
        };
        state.rebuild_display();
        state
    }

    /// Applies a new filter condition: one stable pass over the snapshot,
    /// keeping matching indices in feed order. Resets to page 1.
    pub fn apply_filter(&mut self, condition: FilterCondition) {
        self.condition = condition;
        self.rebuild_display();
    }

    /// Wholesale-replaces the snapshot (every poll produces a new one) and
    /// reapplies the last-used condition against it. Resets to page 1.
    pub fn replace_snapshot(&mut self, snapshot: Snapshot) {
        self.snapshot = snapshot;
        self.rebuild_display();
    }

    /// Reorders the display list ascending by distance from `reference`.
    ///
    /// Only the ordering changes; the condition, counts, and current page
    /// are left as they are.
    pub fn sort_by_distance(&mut self, reference: Point) {
        self.display = sort_indices_by_distance(&self.snapshot, &self.display, reference);
    }

    /// Distance-sorts using the platform position capability.
    ///
    /// Geolocation is best-effort: any provider failure leaves the current
    /// ordering untouched and surfaces nothing.
    pub fn sort_by_position(&mut self, provider: &dyn PositionProvider) {
        if let Ok(reference) = provider.current_position() {
            self.sort_by_distance(reference);
        }
    }

    /// Navigates to a 1-based page. Out-of-range pages are allowed; they
    /// simply yield an empty [`page_slice`](Self::page_slice).
    pub fn set_page(&mut self, page: usize) {
        self.page = page.max(1);
    }

    /// Changes the page size and resets to page 1. Sizes outside
    /// [`PAGE_SIZE_CHOICES`] fall back to the default.
    pub fn set_page_size(&mut self, size: usize) {
        self.page_size = if PAGE_SIZE_CHOICES.contains(&size) {
            size
        } else {
            DEFAULT_PAGE_SIZE
        };
        self.page = 1;
        self.total_pages = total_pages(self.display.len(), self.page_size);
    }

    /// The current page's window into the display list.
    #[must_use]
    pub fn page_slice(&self) -> &[usize] {
        paginate(&self.display, self.page, self.page_size)
    }

    /// Resolves the current page to records, in display order.
    pub fn page_records(&self) -> impl Iterator<Item = (usize, &Pharmacy)> {
        self.page_slice()
            .iter()
            .filter_map(|&idx| self.snapshot.get(idx).map(|ph| (idx, ph)))
    }

    #[must_use]
    pub fn snapshot(&self) -> &Snapshot {
        &self.snapshot
    }

    #[must_use]
    pub fn condition(&self) -> &FilterCondition {
        &self.condition
    }

    #[must_use]
    pub fn display(&self) -> &[usize] {
        &self.display
    }

    /// Number of records passing the active condition.
    #[must_use]
    pub fn matching_count(&self) -> usize {
        self.display.len()
    }

    #[must_use]
    pub fn page(&self) -> usize {
        self.page
    }

    #[must_use]
    pub fn page_size(&self) -> usize {
        self.page_size
    }

    #[must_use]
    pub fn total_pages(&self) -> usize {
        self.total_pages
    }

    /// One pass over the snapshot; display order equals snapshot order.
    /// Display list, match count, page counter, and page number move
    /// together here — this is the atomic per-event state transition.
    fn rebuild_display(&mut self) {
        self.display = filter_indices(&self.snapshot, &self.condition);
        self.page = 1;
        self.total_pages = total_pages(self.display.len(), self.page_size);
    }
}

/// Collects the indices of records passing `condition`, in snapshot order
/// (stable, never re-sorted).
#[must_use]
pub fn filter_indices(snapshot: &Snapshot, condition: &FilterCondition) -> Vec<usize> {
    snapshot
        .iter()
        .enumerate()
        .filter(|(_, ph)| condition.matches(ph))
        .map(|(idx, _)| idx)
        .collect()
}

/// Half-open pagination window `[(page-1)*size, min(page*size, len))` into
/// `display`. A page past the end yields an empty slice; never panics.
#[must_use]
pub fn paginate(display: &[usize], page: usize, page_size: usize) -> &[usize] {
    let page = page.max(1);
    let start = (page - 1).saturating_mul(page_size);
    if start >= display.len() {
        return &[];
    }
    let end = start.saturating_add(page_size).min(display.len());
    &display[start..end]
}

/// `ceil(count / page_size)`, with zero records yielding zero pages.
#[must_use]
pub fn total_pages(count: usize, page_size: usize) -> usize {
    if page_size == 0 {
        return 0;
    }
    count.div_ceil(page_size)
}
