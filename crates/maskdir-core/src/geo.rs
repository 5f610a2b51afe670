//! Great-circle distance between geographic points.

/// Mean Earth radius in kilometers, as used by the haversine formula.
const EARTH_RADIUS_KM: f64 = 6371.0;

/// A geographic point in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub lat: f64,
    pub lng: f64,
}

/// Great-circle distance between two points in kilometers (haversine).
///
/// Pure and symmetric: `haversine_km(a, b) == haversine_km(b, a)` within
/// floating-point tolerance, and identical points yield `0.0`.
#[must_use]
pub fn haversine_km(a: Point, b: Point) -> f64 {
    let d_lat = (b.lat - a.lat).to_radians();
    let d_lng = (b.lng - a.lng).to_radians();
    let lat_a = a.lat.to_radians();
    let lat_b = b.lat.to_radians();

    let h = (d_lat / 2.0).sin().powi(2) + (d_lng / 2.0).sin().powi(2) * lat_a.cos() * lat_b.cos();
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());
    EARTH_RADIUS_KM * c
}
