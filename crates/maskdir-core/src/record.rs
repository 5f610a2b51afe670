//! Upstream feed types for the public pharmacy mask-inventory dataset.
//!
//! ## Observed shape from the live feed (`points.json`)
//!
//! The document is GeoJSON-flavored: a top-level `FeatureCollection` with a
//! `features` array. Each feature carries the pharmacy profile under
//! `properties` and a `Point` geometry with coordinates in
//! **`[longitude, latitude]` order** (GeoJSON convention — note the reversal
//! relative to the lat/lng order used everywhere else in this crate).
//!
//! ### `updated`
//! A local-time string like `"2020/02/21 14:42:02"`. Absent or empty on
//! entries the upstream has never refreshed; we model it as
//! `Option<String>` and pass it through as-is — no parsing, since the feed
//! gives no timezone and the UI only echoes it.
//!
//! ### Mask counts
//! `mask_adult` / `mask_child` are non-negative integers in practice, but
//! the feed is third-party data so we keep them as `i64` and treat any
//! value `> 0` as "in stock" during filtering.
//!
//! ### Extra properties
//! The feed carries additional fields (`available`, `note`, `custom_note`,
//! service period markers) that this system never reads; serde ignores
//! unknown fields by default.

use serde::{Deserialize, Serialize};

use crate::geo::Point;

/// Top-level feed document: `{ "type": "FeatureCollection", "features": [...] }`.
#[derive(Debug, Clone, Deserialize)]
pub struct FeedDocument {
    /// GeoJSON type tag; `"FeatureCollection"` in every observed response.
    #[serde(rename = "type", default)]
    pub kind: String,
    pub features: Vec<Pharmacy>,
}

/// One pharmacy feature from the feed.
#[derive(Debug, Clone, Deserialize)]
pub struct Pharmacy {
    /// GeoJSON type tag; `"Feature"` in every observed response.
    #[serde(rename = "type", default)]
    pub kind: String,
    pub properties: PharmacyProps,
    pub geometry: Geometry,
}

/// Pharmacy profile fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PharmacyProps {
    /// Upstream numeric identifier; unique within one snapshot.
    pub id: i64,
    pub name: String,
    pub phone: String,
    pub address: String,
    /// Adult mask count as reported by the feed.
    pub mask_adult: i64,
    /// Child mask count as reported by the feed.
    pub mask_child: i64,
    /// Last-refresh timestamp string, or `None`/empty when unknown.
    #[serde(default)]
    pub updated: Option<String>,
}

/// GeoJSON point geometry. Coordinates are `[longitude, latitude]`.
#[derive(Debug, Clone, Deserialize)]
pub struct Geometry {
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub coordinates: Vec<f64>,
}

impl Pharmacy {
    /// The pharmacy's location as a lat/lng point, or `None` when the feed
    /// entry's coordinate array is malformed (fewer than two numbers).
    #[must_use]
    pub fn point(&self) -> Option<Point> {
        match self.geometry.coordinates.as_slice() {
            [lng, lat, ..] => Some(Point {
                lat: *lat,
                lng: *lng,
            }),
            _ => None,
        }
    }
}

/// A full record snapshot as of one successful fetch.
///
/// Snapshots are wholesale-replaced on every poll — there is no incremental
/// merge, so index lists derived from one snapshot must never be applied to
/// another.
pub type Snapshot = Vec<Pharmacy>;
