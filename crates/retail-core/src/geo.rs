//! # Geo Module
//!
//! Distance between users and stores.
//!
//! ## Flat Coordinates
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     How "Near Me" Works                                 │
//! │                                                                         │
//! │  longitude                                                              │
//! │     ▲                                                                   │
//! │     │        ● Store B (40, 45)   distance 46.1  ✗                      │
//! │     │                                                                   │
//! │     │   ● Store A (20, 25)        distance 18.0  ✓                      │
//! │     │                                                                   │
//! │     │ ★ User (10, 10)                                                   │
//! │     └──────────────────────────────────────────► latitude               │
//! │                                                                         │
//! │  d = √((lat₁ - lat₂)² + (lon₁ - lon₂)²)      listed when d < radius     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Latitude and longitude are treated as plain Cartesian coordinates. No
//! great-circle math: the stored values are grid positions in `[0, 100]`.

use serde::{Deserialize, Serialize};

use crate::types::Store;

// =============================================================================
// Point
// =============================================================================

/// A (latitude, longitude) pair.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub latitude: f64,
    pub longitude: f64,
}

impl Point {
    /// Creates a point.
    #[inline]
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Point {
            latitude,
            longitude,
        }
    }

    /// Distance to another point. See [`calculate_distance`].
    #[inline]
    pub fn distance_to(&self, other: Point) -> f64 {
        calculate_distance(*self, other)
    }
}

/// Euclidean distance between two points.
///
/// ## Example
/// ```rust
/// use retail_core::geo::{calculate_distance, Point};
///
/// let d = calculate_distance(Point::new(0.0, 0.0), Point::new(3.0, 4.0));
/// assert_eq!(d, 5.0);
/// ```
pub fn calculate_distance(a: Point, b: Point) -> f64 {
    let dlat = a.latitude - b.latitude;
    let dlon = a.longitude - b.longitude;
    (dlat * dlat + dlon * dlon).sqrt()
}

// =============================================================================
// Nearby Stores
// =============================================================================

/// A store together with its distance from the user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NearbyStore {
    pub store: Store,
    pub distance: f64,
}

/// Filters `stores` down to those strictly closer than `radius` to `origin`.
///
/// ## Ordering
/// Closest first; equal distances keep store id order so listings are
/// stable between calls.
///
/// ## Example
/// ```rust
/// use retail_core::geo::{stores_within, Point};
/// use retail_core::Store;
///
/// let stores = vec![
///     Store { id: 1, name: "Near".into(), location: Point::new(12.0, 10.0), manager_id: None },
///     Store { id: 2, name: "Far".into(), location: Point::new(90.0, 90.0), manager_id: None },
/// ];
///
/// let nearby = stores_within(Point::new(10.0, 10.0), stores, 30.0);
/// assert_eq!(nearby.len(), 1);
/// assert_eq!(nearby[0].store.name, "Near");
/// ```
pub fn stores_within(
    origin: Point,
    stores: impl IntoIterator<Item = Store>,
    radius: f64,
) -> Vec<NearbyStore> {
    let mut nearby: Vec<NearbyStore> = stores
        .into_iter()
        .map(|store| {
            let distance = calculate_distance(origin, store.location);
            NearbyStore { store, distance }
        })
        .filter(|candidate| candidate.distance < radius)
        .collect();

    nearby.sort_by(|a, b| {
        a.distance
            .total_cmp(&b.distance)
            .then_with(|| a.store.id.cmp(&b.store.id))
    });

    nearby
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use quickcheck_macros::quickcheck;

    fn store(id: i32, latitude: f64, longitude: f64) -> Store {
        Store {
            id,
            name: format!("Store {id}"),
            location: Point::new(latitude, longitude),
            manager_id: None,
        }
    }

    /// Keeps generated coordinates finite and in a realistic range.
    fn clamp(v: f64) -> f64 {
        if v.is_finite() {
            v % 1000.0
        } else {
            0.0
        }
    }

    #[test]
    fn test_known_distances() {
        assert_eq!(calculate_distance(Point::new(0.0, 0.0), Point::new(3.0, 4.0)), 5.0);
        assert_eq!(Point::new(10.0, 10.0).distance_to(Point::new(10.0, 40.0)), 30.0);
    }

    #[quickcheck]
    fn prop_distance_to_self_is_zero(lat: f64, lon: f64) -> bool {
        let p = Point::new(clamp(lat), clamp(lon));
        calculate_distance(p, p) == 0.0
    }

    #[quickcheck]
    fn prop_distance_is_symmetric(a: (f64, f64), b: (f64, f64)) -> bool {
        let a = Point::new(clamp(a.0), clamp(a.1));
        let b = Point::new(clamp(b.0), clamp(b.1));
        calculate_distance(a, b) == calculate_distance(b, a)
    }

    #[quickcheck]
    fn prop_filter_keeps_exactly_the_close_stores(coords: Vec<(u8, u8)>) -> bool {
        let origin = Point::new(50.0, 50.0);
        let stores: Vec<Store> = coords
            .iter()
            .enumerate()
            .map(|(i, (lat, lon))| store(i as i32, f64::from(*lat), f64::from(*lon)))
            .collect();

        let kept: Vec<i32> = stores_within(origin, stores.clone(), 30.0)
            .into_iter()
            .map(|n| n.store.id)
            .collect();

        stores.iter().all(|s| {
            let close = calculate_distance(origin, s.location) < 30.0;
            close == kept.contains(&s.id)
        })
    }

    #[test]
    fn test_radius_is_strict() {
        // (10, 40) is exactly 30 away from (10, 10)
        let stores = vec![store(1, 10.0, 40.0), store(2, 10.0, 39.99)];
        let nearby = stores_within(Point::new(10.0, 10.0), stores, 30.0);

        assert_eq!(nearby.len(), 1);
        assert_eq!(nearby[0].store.id, 2);
    }

    #[test]
    fn test_nearby_sorted_by_distance_then_id() {
        let stores = vec![
            store(3, 20.0, 10.0),
            store(1, 15.0, 10.0),
            store(2, 10.0, 15.0),
        ];
        let ids: Vec<i32> = stores_within(Point::new(10.0, 10.0), stores, 30.0)
            .into_iter()
            .map(|n| n.store.id)
            .collect();

        assert_eq!(ids, vec![1, 2, 3]);
    }
}
