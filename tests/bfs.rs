//! Tests for the single-path breadth-first search.
mod common;
use alkahest::prelude::*;
use common::*;
use std::sync::Arc;

#[test]
fn test_base_target_returns_trivial_path() {
    let catalog = brick_catalog();
    let tiers = TierMap::assign(&catalog);
    let solver = Solver::new(&catalog, &tiers);

    let result = solver.shortest_path("Water");
    assert!(result.found);
    assert_eq!(result.path, vec!["Water".to_string()]);
    assert!(result.steps.is_empty());
    assert_eq!(result.depth, 0);
    assert_eq!(result.visited, 0);
}

#[test]
fn test_single_step_target() {
    let catalog = brick_catalog();
    let tiers = TierMap::assign(&catalog);
    let solver = Solver::new(&catalog, &tiers);

    let result = solver.shortest_path("Steam");
    assert!(result.found);
    assert_eq!(result.depth, 1);
    assert_eq!(result.steps.len(), 1);
    assert_eq!(result.steps[0].result, "Steam");
    assert!(result.steps[0].first == "Water" || result.steps[0].second == "Water");
}

#[test]
fn test_brick_needs_two_steps() {
    let catalog = brick_catalog();
    let tiers = TierMap::assign(&catalog);
    let solver = Solver::new(&catalog, &tiers);

    let result = solver.shortest_path("Brick");
    assert!(result.found);
    assert_eq!(result.depth, 2);
    assert_eq!(result.steps.len(), 2);
    assert_eq!(result.path.last().map(String::as_str), Some("Brick"));
    assert!(result.path.contains(&"Mud".to_string()));
    assert_eq!(result.steps[0].result, "Mud");
    assert_eq!(result.steps[1].result, "Brick");
    assert!(result.visited > 0);

    println!("Path: {:?}", result.path);
    for step in &result.steps {
        println!("  {step}");
    }
}

#[test]
fn test_shorter_of_two_routes_wins() {
    // The three-step route is registered first; breadth-first expansion must
    // still surface the two-step one.
    let catalog = two_route_catalog();
    let tiers = TierMap::assign(&catalog);
    let solver = Solver::new(&catalog, &tiers);

    let result = solver.shortest_path("Alloy");
    assert!(result.found);
    assert_eq!(result.depth, 2);
    let last = result.steps.last().expect("No steps recorded");
    assert_eq!(last.result, "Alloy");
    assert!(
        (last.first == "Mud" && last.second == "Fire")
            || (last.first == "Fire" && last.second == "Mud"),
        "Unexpected final step: {last}"
    );
}

#[test]
fn test_unreachable_target_is_a_miss() {
    let catalog = catalog_with_unreachable();
    let tiers = TierMap::assign(&catalog);
    let solver = Solver::new(&catalog, &tiers);

    let result = solver.shortest_path("Mystery");
    assert!(!result.found);
    assert!(result.path.is_empty());
    assert!(result.steps.is_empty());
    assert_eq!(result.depth, 0);
}

#[test]
fn test_unknown_element_is_a_miss() {
    let catalog = brick_catalog();
    let tiers = TierMap::assign(&catalog);
    let solver = Solver::new(&catalog, &tiers);

    let result = solver.shortest_path("Philosopher Stone");
    assert!(!result.found);
    assert!(result.path.is_empty());
}

#[test]
fn test_observer_sees_intermediate_discoveries() {
    let catalog = brick_catalog();
    let tiers = TierMap::assign(&catalog);
    let observer = Arc::new(RecordingObserver::default());
    let solver = Solver::new(&catalog, &tiers).with_observer(observer.clone());

    let result = solver.shortest_path("Brick");
    assert!(result.found);

    let elements = observer.elements.lock().expect("Observer mutex poisoned");
    assert!(!elements.is_empty());
    assert!(elements.iter().any(|element| element == "Brick"));
    for element in elements.iter() {
        assert!(!catalog.is_base(element), "Base '{element}' reported");
    }
}
