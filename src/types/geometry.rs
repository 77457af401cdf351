//! Planar geometry on the catalog map
//!
//! The map is a square grid from `(0, 0)` to `(1000, 1000)` inclusive. All
//! proximity queries use plain Euclidean distance.

/// Lowest valid coordinate on either axis
pub const MAP_MIN: f64 = 0.0;

/// Highest valid coordinate on either axis
pub const MAP_MAX: f64 = 1000.0;

/// Default tolerance for distance comparisons
pub const DEFAULT_EPSILON: f64 = 1e-9;

/// Check whether a single coordinate lies within the map bounds
pub fn in_bounds(value: f64) -> bool {
    (MAP_MIN..=MAP_MAX).contains(&value)
}

/// Check whether a point lies within the map bounds
pub fn point_in_bounds(x: f64, y: f64) -> bool {
    in_bounds(x) && in_bounds(y)
}

/// Euclidean distance between `(x1, y1)` and `(x2, y2)`.
///
/// Returns `None` when any input is NaN or infinite, since no meaningful
/// distance exists for those.
pub fn euclidean_distance(x1: f64, y1: f64, x2: f64, y2: f64) -> Option<f64> {
    if ![x1, y1, x2, y2].iter().all(|c| c.is_finite()) {
        tracing::warn!("Provide correct numbers: ({}, {}) -> ({}, {})", x1, y1, x2, y2);
        return None;
    }
    let dx = x2 - x1;
    let dy = y2 - y1;
    Some((dx * dx + dy * dy).sqrt())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distance_pythagorean_triple() {
        assert_eq!(euclidean_distance(0.0, 0.0, 3.0, 4.0), Some(5.0));
        assert_eq!(euclidean_distance(100.0, 100.0, 103.0, 104.0), Some(5.0));
    }

    #[test]
    fn test_distance_is_symmetric_and_zero_on_self() {
        let a = euclidean_distance(10.0, 20.0, 300.0, 400.0).unwrap();
        let b = euclidean_distance(300.0, 400.0, 10.0, 20.0).unwrap();
        assert_eq!(a, b);
        assert_eq!(euclidean_distance(7.5, 7.5, 7.5, 7.5), Some(0.0));
    }

    #[test]
    fn test_distance_rejects_non_finite_input() {
        assert_eq!(euclidean_distance(f64::NAN, 0.0, 1.0, 1.0), None);
        assert_eq!(euclidean_distance(0.0, 0.0, f64::INFINITY, 1.0), None);
    }

    #[test]
    fn test_bounds() {
        assert!(point_in_bounds(0.0, 1000.0));
        assert!(point_in_bounds(500.5, 0.0));
        assert!(!point_in_bounds(-0.1, 10.0));
        assert!(!point_in_bounds(10.0, 1000.1));
        assert!(!in_bounds(f64::NAN));
    }
}
