//! Proximity ordering of display indices.

use crate::geo::{haversine_km, Point};
use crate::record::Snapshot;

/// Returns the given indices reordered ascending by great-circle distance
/// from `reference`. The input is not mutated.
///
/// The sort is stable: records at equal distance keep their relative input
/// order. Records whose feed geometry is malformed (no usable point) sort
/// after every located record, also in stable order.
#[must_use]
pub fn sort_indices_by_distance(snapshot: &Snapshot, indices: &[usize], reference: Point) -> Vec<usize> {
    let mut ordered: Vec<usize> = indices.to_vec();
    ordered.sort_by(|&a, &b| {
        let da = snapshot.get(a).and_then(|p| p.point()).map(|p| haversine_km(reference, p));
        let db = snapshot.get(b).and_then(|p| p.point()).map(|p| haversine_km(reference, p));
        match (da, db) {
            (Some(da), Some(db)) => da.partial_cmp(&db).unwrap_or(std::cmp::Ordering::Equal),
            (Some(_), None) => std::cmp::Ordering::Less,
            (None, Some(_)) => std::cmp::Ordering::Greater,
            (None, None) => std::cmp::Ordering::Equal,
        }
    });
    ordered
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::{Geometry, Pharmacy, PharmacyProps};

    fn pharmacy_at(id: i64, coordinates: Vec<f64>) -> Pharmacy {
        Pharmacy {
            kind: "Feature".to_string(),
            properties: PharmacyProps {
                id,
                name: format!("pharmacy-{id}"),
                phone: String::new(),
                address: String::new(),
                mask_adult: 0,
                mask_child: 0,
                updated: None,
            },
            geometry: Geometry {
                kind: "Point".to_string(),
                coordinates,
            },
        }
    }

    #[test]
    fn nearer_record_sorts_first() {
        // Reference (25.0, 121.5); one record ~1.1 km north, one ~1.0 km east.
        let reference = Point {
            lat: 25.0,
            lng: 121.5,
        };
        let snapshot = vec![
            pharmacy_at(1, vec![121.5, 25.01]),
            pharmacy_at(2, vec![121.51, 25.0]),
        ];
        let north = haversine_km(reference, snapshot[0].point().unwrap());
        let east = haversine_km(reference, snapshot[1].point().unwrap());
        assert!(east < north, "east {east} should beat north {north}");

        let ordered = sort_indices_by_distance(&snapshot, &[0, 1], reference);
        assert_eq!(ordered, vec![1, 0]);
    }

    #[test]
    fn equal_distances_keep_input_order() {
        let reference = Point {
            lat: 25.0,
            lng: 121.5,
        };
        // Two records at the exact same location, plus a farther third.
        let snapshot = vec![
            pharmacy_at(1, vec![121.6, 25.0]),
            pharmacy_at(2, vec![121.6, 25.0]),
            pharmacy_at(3, vec![121.501, 25.0]),
        ];
        let ordered = sort_indices_by_distance(&snapshot, &[0, 1, 2], reference);
        assert_eq!(ordered, vec![2, 0, 1]);
    }

    #[test]
    fn pointless_records_sort_last_in_stable_order() {
        let reference = Point {
            lat: 25.0,
            lng: 121.5,
        };
        let snapshot = vec![
            pharmacy_at(1, vec![]),
            pharmacy_at(2, vec![121.51, 25.0]),
            pharmacy_at(3, vec![]),
        ];
        let ordered = sort_indices_by_distance(&snapshot, &[0, 1, 2], reference);
        assert_eq!(ordered, vec![1, 0, 2]);
    }

    #[test]
    fn input_is_not_mutated() {
        let reference = Point {
            lat: 25.0,
            lng: 121.5,
        };
        let snapshot = vec![
            pharmacy_at(1, vec![121.9, 25.0]),
            pharmacy_at(2, vec![121.51, 25.0]),
        ];
        let input = [0, 1];
        let ordered = sort_indices_by_distance(&snapshot, &input, reference);
        assert_eq!(input, [0, 1]);
        assert_eq!(ordered, vec![1, 0]);
    }
}
