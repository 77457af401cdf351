//! Tests for statistics, the consistency report and rendered output

use poims::system::{PoiManagementSystem, SystemReport};

const CATALOG: &str = r#"
poi_types:
  museum:
    attributes: [opening_hours]
  landmark:
    attributes: [dress_code]
  beach:
    attributes: []
pois:
  - {name: Louvre Abu Dhabi, type: museum, x: 120, y: 340}
  - {name: Grand Mosque, type: landmark, x: 610, y: 480}
  - {name: Corniche Beach, type: beach, x: 300, y: 150}
  - {name: Qasr Al Watan, type: landmark, x: 450, y: 390}
visitors:
  - name: Alice Johnson
    nationality: American
    visits:
      - {poi_name: Louvre Abu Dhabi, date: 19/09/2024, rating: 9}
      - {poi_name: Grand Mosque, date: 20/09/2024, rating: 10}
      - {poi_name: Grand Mosque, date: 21/09/2024}
  - name: Omar Haddad
    nationality: Emirati
    visits:
      - {poi_name: Qasr Al Watan, date: 02/10/2024, rating: 8}
  - name: Priya Nair
    nationality: Indian
"#;

fn report() -> SystemReport {
    PoiManagementSystem::from_yaml_str(CATALOG).report(2, 2, 2)
}

#[test]
fn test_statistics_totals() {
    let stats = report().statistics;
    assert_eq!(stats.total_poi_types, 3);
    assert_eq!(stats.total_pois, 4);
    assert_eq!(stats.total_visitors, 3);
    assert_eq!(stats.total_visits, 4);
    assert_eq!(stats.visited_pois, 3);
    assert!((stats.average_visits_per_visitor() - 4.0 / 3.0).abs() < 1e-12);
    assert_eq!(stats.coverage_percentage(), 75.0);

    let text = stats.to_string();
    assert!(text.contains("Average visits per visitor: 1.3"));
    assert!(text.contains("POI Coverage: 3/4 (75.0%)"));
}

#[test]
fn test_report_sections() {
    let report = report();

    let crowded: Vec<&str> = report.crowded_pois.iter().map(|(_, name)| name.as_str()).collect();
    assert_eq!(crowded, vec!["Grand Mosque", "Louvre Abu Dhabi"]);

    let top: Vec<&str> = report.top_visitors.iter().map(|(_, name)| name.as_str()).collect();
    assert_eq!(top, vec!["Alice Johnson", "Omar Haddad"]);

    assert_eq!(report.special_visitors.len(), 1);
    assert_eq!(report.special_visitors[0].name, "Alice Johnson");
    assert_eq!(report.special_visitors[0].distinct_poi_types, 2);

    let extent = report.map_extent.as_ref().unwrap();
    assert_eq!(extent.x_range, (120.0, 610.0));
    assert_eq!(extent.y_range, (150.0, 480.0));
    assert_eq!(extent.center_of_mass, (370.0, 340.0));

    assert!(report.validation.is_consistent());
}

#[test]
fn test_text_rendering() {
    let text = report().render_text();

    assert!(text.contains("=== SYSTEM STATISTICS ==="));
    assert!(text.contains("Total POIs: 4"));
    assert!(text.contains("landmark:\n  POI Count: 2\n  Attributes: dress_code"));
    assert!(text.contains("beach:\n  POI Count: 1\n  Attributes: None"));
    assert!(text.contains("Map Size: 1000 x 1000 grid"));
    assert!(text.contains("Center of mass: (370.0, 340.0)"));
    assert!(text.contains("=== TOP 2 MOST VISITED POIS ==="));
    assert!(text.contains("1. Grand Mosque"));
    assert!(text.contains("- Alice Johnson (American): 3 visits across 2 POI types"));
    assert!(text.contains("[ok] All visitor visits reference valid POIs"));
}

#[test]
fn test_json_rendering() {
    let json: serde_json::Value = serde_json::from_str(&report().to_json().unwrap()).unwrap();

    assert_eq!(json["statistics"]["total_visits"], 4);
    assert_eq!(json["poi_types"]["landmark"]["num_pois"], 2);
    assert_eq!(json["crowded_pois"][0][1], "Grand Mosque");
    assert_eq!(json["special_visitors"][0]["nationality"], "American");
    assert_eq!(json["min_visits"], 2);
    assert!(json["validation"]["orphaned_pois"].as_array().unwrap().is_empty());
}

#[test]
fn test_empty_system_report() {
    let report = PoiManagementSystem::new().report(3, 2, 2);
    assert!(report.map_extent.is_none());
    assert!(report.crowded_pois.is_empty());
    assert!(report.top_visitors.is_empty());

    let text = report.render_text();
    assert!(text.contains("No POI types available."));
    assert!(text.contains("No POIs to analyze."));
    assert!(text.contains("POI Coverage: 0/0 (0.0%)"));
}

#[test]
fn test_validation_report_lists_orphans() {
    let mut system = PoiManagementSystem::from_yaml_str(CATALOG);
    system.add_poi_type("beach", ["lifeguard"]);
    assert_eq!(system.validation_report().count_mismatches[0].poi_type, "beach");

    assert!(system.delete_poi_type("beach"));
    let validation = system.validation_report();
    assert_eq!(validation.orphaned_pois, vec!["Corniche Beach"]);
    assert_eq!(validation.issue_count(), 1);

    let text = validation.to_string();
    assert!(text.contains("[warn] Orphaned POIs (missing POI type): 1"));
    assert!(text.contains("    - Corniche Beach"));
}
