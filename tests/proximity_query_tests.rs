//! Tests for nearest-pair, radius, k-closest and boundary queries

use poims::system::{PoiManagementSystem, ValidationError};
use poims::types::DEFAULT_EPSILON;

fn city() -> PoiManagementSystem {
    let mut system = PoiManagementSystem::new();
    system.add_poi("Origin", "landmark", 0.0, 0.0, None).unwrap();
    system.add_poi("Five East", "park", 5.0, 0.0, None).unwrap();
    system.add_poi("Five North", "park", 0.0, 5.0, None).unwrap();
    system.add_poi("Diagonal", "museum", 3.0, 4.0, None).unwrap();
    system.add_poi("Far Away", "beach", 900.0, 900.0, None).unwrap();
    system
}

#[test]
fn test_nearest_pair() {
    let system = city();
    let (first, second) = system.get_nearest_pois().unwrap();
    assert_eq!(first.name, "Five North");
    assert_eq!(second.name, "Diagonal");
    assert_eq!(second.coordinates, (3.0, 4.0));
}

#[test]
fn test_nearest_pair_keeps_earliest_on_ties() {
    let mut system = PoiManagementSystem::new();
    system.add_poi("A", "landmark", 0.0, 0.0, None).unwrap();
    system.add_poi("B", "landmark", 1.0, 0.0, None).unwrap();
    system.add_poi("C", "landmark", 2.0, 0.0, None).unwrap();

    let (first, second) = system.get_nearest_pois().unwrap();
    assert_eq!((first.name.as_str(), second.name.as_str()), ("A", "B"));
}

#[test]
fn test_nearest_pair_needs_two_pois() {
    let mut system = PoiManagementSystem::new();
    assert!(system.get_nearest_pois().is_none());
    system.add_poi("Lonely", "landmark", 1.0, 1.0, None).unwrap();
    assert!(system.get_nearest_pois().is_none());
}

#[test]
fn test_within_distance_includes_radius() {
    let system = city();
    let hits = system.get_pois_within_distance(0.0, 0.0, 5.0, None).unwrap();
    let names: Vec<&str> = hits.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, vec!["Origin", "Five East", "Five North", "Diagonal"]);
    assert_eq!(hits[3].poi_type, "museum");
    assert_eq!(hits[3].distance, 5.0);
}

#[test]
fn test_within_distance_soft_failures() {
    let system = city();
    assert!(system.get_pois_within_distance(-1.0, 0.0, 5.0, None).unwrap().is_empty());
    assert!(system.get_pois_within_distance(0.0, 1001.0, 5.0, None).unwrap().is_empty());
    assert!(system.get_pois_within_distance(0.0, 0.0, -5.0, None).unwrap().is_empty());
    assert_eq!(system.get_pois_within_distance(0.0, 0.0, 0.0, None).unwrap().len(), 1);
}

#[test]
fn test_queries_reject_non_finite_arguments() {
    let system = city();
    assert!(matches!(
        system.get_pois_within_distance(0.0, 0.0, f64::NAN, None),
        Err(ValidationError::NonFiniteNumber { .. })
    ));
    assert!(system.get_k_closest_pois(f64::INFINITY, 0.0, 1).is_err());
    assert!(system.get_pois_in_boundary(0.0, 0.0, 5.0, Some(f64::NAN)).is_err());
}

#[test]
fn test_k_closest_sorted_by_distance_then_id() {
    let system = city();
    let closest = system.get_k_closest_pois(0.0, 0.0, 4).unwrap();
    assert_eq!(closest.len(), 4);
    assert_eq!(closest[0].name, "Origin");
    assert!(closest.windows(2).all(|w| w[0].distance <= w[1].distance));

    // Three POIs tie at distance 5, ordered by id which follows creation order
    let tied: Vec<&str> = closest[1..].iter().map(|p| p.name.as_str()).collect();
    assert_eq!(tied, vec!["Five East", "Five North", "Diagonal"]);
}

#[test]
fn test_k_closest_clamps_to_population() {
    let system = city();
    assert_eq!(system.get_k_closest_pois(500.0, 500.0, 50).unwrap().len(), 5);
    assert!(system.get_k_closest_pois(500.0, 500.0, 0).unwrap().is_empty());
    assert!(PoiManagementSystem::new().get_k_closest_pois(1.0, 1.0, 3).unwrap().is_empty());
}

#[test]
fn test_boundary_uses_epsilon() {
    let mut system = PoiManagementSystem::new();
    system.add_poi("Exact", "landmark", 5.0, 0.0, None).unwrap();
    system.add_poi("Slightly Out", "landmark", 5.0000001, 0.0, None).unwrap();
    system.add_poi("Inside", "landmark", 1.0, 1.0, None).unwrap();

    let default: Vec<String> =
        system.get_pois_in_boundary(0.0, 0.0, 5.0, None).unwrap().into_iter().map(|p| p.name).collect();
    assert_eq!(default, vec!["Exact"]);

    let explicit = system.get_pois_in_boundary(0.0, 0.0, 5.0, Some(DEFAULT_EPSILON)).unwrap();
    assert_eq!(explicit.len(), 1);

    let relaxed: Vec<String> =
        system.get_pois_in_boundary(0.0, 0.0, 5.0, Some(1e-6)).unwrap().into_iter().map(|p| p.name).collect();
    assert_eq!(relaxed, vec!["Exact", "Slightly Out"]);
}

#[test]
fn test_boundary_requires_positive_epsilon() {
    let system = city();
    assert!(system.get_pois_in_boundary(0.0, 0.0, 5.0, Some(0.0)).unwrap().is_empty());
    assert!(system.get_pois_in_boundary(0.0, 0.0, 5.0, Some(-1e-3)).unwrap().is_empty());
}

#[test]
fn test_pois_by_type_and_counts() {
    let system = city();
    let parks: Vec<String> =
        system.get_pois_by_poi_type("park").iter().map(|p| p.name().to_string()).collect();
    assert_eq!(parks, vec!["Five East", "Five North"]);
    assert!(system.get_pois_by_poi_type("zoo").is_empty());

    let counts = system.get_num_pois_per_poi_type();
    assert_eq!(counts["park"], 2);
    assert_eq!(counts["beach"], 1);
    assert_eq!(counts.len(), 4);
}
