//! Command implementations: one-shot directory queries and the nearby
//! watch loop.

use std::time::Duration;

use maskdir_core::{
    sort_indices_by_distance, DirectoryState, FilterCondition, FixedPosition, MarkerSet,
    NoPosition, Point, Snapshot, MARKER_CAP,
};
use maskdir_feed::FeedClient;

use crate::render::{list_row, nearby_row, page_footer};

/// Query options for the `list` command.
pub struct ListOptions {
    pub search: Option<String>,
    pub adult: bool,
    pub child: bool,
    pub page: usize,
    pub page_size: usize,
    pub position: Option<Point>,
}

/// `maskdir list` — fetch once, filter, optionally distance-sort, print a page.
pub async fn run_list(
    client: &FeedClient,
    feed_url: &str,
    options: &ListOptions,
) -> anyhow::Result<()> {
    let snapshot = client.fetch_snapshot(feed_url).await?;
    let mut state = DirectoryState::new(snapshot);
    state.apply_filter(FilterCondition::new(
        options.search.as_deref(),
        options.adult,
        options.child,
    ));
    state.set_page_size(options.page_size);

    // Flags stand in for the platform geolocation prompt: both present is
    // a granted fix, anything else is an unavailable provider and the
    // sort silently does not happen.
    match options.position {
        Some(point) => state.sort_by_position(&FixedPosition(point)),
        None => state.sort_by_position(&NoPosition),
    }
    state.set_page(options.page);

    for (_, ph) in state.page_records() {
        println!("{}", list_row(ph));
    }
    println!("{}", page_footer(&state));
    Ok(())
}

/// `maskdir nearby` — the map view's pin query, headless.
pub async fn run_nearby(
    client: &FeedClient,
    feed_url: &str,
    reference: Point,
    limit: usize,
) -> anyhow::Result<()> {
    let snapshot = client.fetch_snapshot(feed_url).await?;
    for &idx in &nearest_indices(&snapshot, reference, limit) {
        println!("{}", nearby_row(&snapshot[idx], reference));
    }
    Ok(())
}

/// `maskdir watch` — poll the feed and print only the pharmacies entering
/// or leaving the nearest-N set, the way the map view adds and removes
/// markers. Runs until interrupted.
pub async fn run_watch(
    client: &FeedClient,
    feed_url: &str,
    reference: Point,
    interval: Duration,
) -> anyhow::Result<()> {
    let mut markers = MarkerSet::new();
    let mut ticker = tokio::time::interval(interval);
    ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);

    loop {
        ticker.tick().await;
        match client.fetch_snapshot(feed_url).await {
            Ok(snapshot) => {
                let top: Vec<i64> = nearest_indices(&snapshot, reference, MARKER_CAP)
                    .into_iter()
                    .map(|idx| snapshot[idx].properties.id)
                    .collect();
                let diff = markers.update(&top);
                if diff.is_empty() {
                    tracing::debug!(placed = markers.len(), "nearest set unchanged");
                    continue;
                }
                for id in &diff.removed {
                    println!("- {id}");
                }
                for id in &diff.added {
                    if let Some(ph) = snapshot.iter().find(|ph| ph.properties.id == *id) {
                        println!("+ {}", nearby_row(ph, reference));
                    }
                }
            }
            // Keep the prior marker set; the next tick retries.
            Err(e) => tracing::warn!(error = %e, "watch tick failed"),
        }
    }
}

/// Indices of the `limit` nearest located records, ascending by distance.
fn nearest_indices(snapshot: &Snapshot, reference: Point, limit: usize) -> Vec<usize> {
    let all: Vec<usize> = (0..snapshot.len()).collect();
    sort_indices_by_distance(snapshot, &all, reference)
        .into_iter()
        .filter(|&idx| snapshot[idx].point().is_some())
        .take(limit.clamp(1, MARKER_CAP))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use maskdir_core::record::{Geometry, Pharmacy, PharmacyProps};

    fn pharmacy_at(id: i64, lng: f64) -> Pharmacy {
        Pharmacy {
            kind: "Feature".to_string(),
            properties: PharmacyProps {
                id,
                name: format!("ph-{id}"),
                phone: String::new(),
                address: String::new(),
                mask_adult: 1,
                mask_child: 1,
                updated: None,
            },
            geometry: Geometry {
                kind: "Point".to_string(),
                coordinates: vec![lng, 25.0],
            },
        }
    }

    #[test]
    fn nearest_indices_orders_and_limits() {
        let reference = Point {
            lat: 25.0,
            lng: 121.5,
        };
        let snapshot = vec![
            pharmacy_at(1, 121.53),
            pharmacy_at(2, 121.51),
            pharmacy_at(3, 121.52),
        ];
        assert_eq!(nearest_indices(&snapshot, reference, 2), vec![1, 2]);
    }

    #[test]
    fn nearest_indices_skips_unlocated_records() {
        let reference = Point {
            lat: 25.0,
            lng: 121.5,
        };
        let mut snapshot = vec![pharmacy_at(1, 121.51)];
        snapshot.push(Pharmacy {
            geometry: Geometry {
                kind: "Point".to_string(),
                coordinates: vec![],
            },
            ..pharmacy_at(2, 0.0)
        });
        assert_eq!(nearest_indices(&snapshot, reference, 30), vec![0]);
    }

    #[test]
    fn nearest_indices_caps_at_the_marker_limit() {
        let reference = Point {
            lat: 25.0,
            lng: 121.5,
        };
        let snapshot: Snapshot = (0..60)
            .map(|i| pharmacy_at(i, 121.5 + f64::from(i as i32) * 0.001))
            .collect();
        assert_eq!(nearest_indices(&snapshot, reference, 100).len(), MARKER_CAP);
    }
}
