//! Plain-text rendering for the directory commands.

use maskdir_core::{haversine_km, DirectoryState, Pharmacy, Point};

/// Placeholder shown when a record's update timestamp is unknown.
pub const UNKNOWN_UPDATED: &str = "unknown";

/// The update timestamp for display: the raw feed string, or a
/// placeholder when the feed never refreshed the entry.
#[must_use]
pub fn updated_label(updated: Option<&str>) -> &str {
    match updated {
        Some(s) if !s.trim().is_empty() => s,
        _ => UNKNOWN_UPDATED,
    }
}

/// One list row: name, address, phone, stock counts, update time.
#[must_use]
pub fn list_row(ph: &Pharmacy) -> String {
    format!(
        "{}\t{}\t{}\tadult: {}\tchild: {}\tupdated: {}",
        ph.properties.name,
        ph.properties.address,
        ph.properties.phone,
        ph.properties.mask_adult,
        ph.properties.mask_child,
        updated_label(ph.properties.updated.as_deref()),
    )
}

/// One nearby row: list row prefixed with the distance in km.
#[must_use]
pub fn nearby_row(ph: &Pharmacy, reference: Point) -> String {
    let distance = ph
        .point()
        .map_or_else(|| "?".to_string(), |p| format!("{:.2}", haversine_km(reference, p)));
    format!("{distance} km\t{}", list_row(ph))
}

/// The pagination footer, e.g. `page 2/3 (40 matching)`.
#[must_use]
pub fn page_footer(state: &DirectoryState) -> String {
    format!(
        "page {}/{} ({} matching)",
        state.page(),
        state.total_pages(),
        state.matching_count()
    )
}
