//! Tests for the multi-solution search and its timeout behavior.
mod common;
use alkahest::prelude::*;
use common::*;
use std::sync::Arc;
use std::time::Duration;

fn options(max_solutions: usize, workers: usize) -> MultiOptions {
    MultiOptions {
        max_solutions,
        workers,
        timeout: Duration::from_secs(10),
    }
}

#[test]
fn test_base_target_yields_single_leaf() {
    let catalog = brick_catalog();
    let tiers = TierMap::assign(&catalog);
    let solver = Solver::new(&catalog, &tiers);

    let result = solver.multiple("Fire", &options(3, 1));
    assert!(!result.timed_out);
    assert_eq!(result.solutions.len(), 1);
    assert_eq!(result.solutions[0], RecipeTree::leaf("Fire"));
}

#[test]
fn test_finds_complete_tree_sequentially() {
    let catalog = brick_catalog();
    let tiers = TierMap::assign(&catalog);
    let solver = Solver::new(&catalog, &tiers);

    let result = solver.multiple("Brick", &options(3, 1));
    assert!(!result.timed_out);
    assert_eq!(result.solutions.len(), 1);
    assert!(result.visited > 0);

    let tree = &result.solutions[0];
    assert_eq!(tree.element, "Brick");
    assert_eq!(tree.depth(), 3);
    assert_grounded(tree, &catalog);
    println!("{tree}");
}

#[test]
fn test_finds_complete_tree_with_worker_pool() {
    let catalog = two_route_catalog();
    let tiers = TierMap::assign(&catalog);
    let solver = Solver::new(&catalog, &tiers);

    let result = solver.multiple("Alloy", &options(5, 4));
    assert!(!result.timed_out);
    assert_eq!(result.solutions.len(), 2);
    for tree in &result.solutions {
        assert_eq!(tree.element, "Alloy");
        assert_grounded(tree, &catalog);
    }
}

#[test]
fn test_swapped_ingredient_order_is_deduplicated() {
    let catalog = swapped_pair_catalog();
    let tiers = TierMap::assign(&catalog);
    let solver = Solver::new(&catalog, &tiers);

    let result = solver.multiple("Steam", &options(5, 1));
    assert!(!result.timed_out);
    assert_eq!(result.solutions.len(), 1, "Swapped pair not collapsed");
}

#[test]
fn test_max_solutions_bounds_the_result() {
    let catalog = two_route_catalog();
    let tiers = TierMap::assign(&catalog);
    let solver = Solver::new(&catalog, &tiers);

    let result = solver.multiple("Alloy", &options(1, 1));
    assert!(!result.timed_out);
    assert_eq!(result.solutions.len(), 1);
}

#[test]
fn test_unreachable_target_yields_nothing() {
    let catalog = catalog_with_unreachable();
    let tiers = TierMap::assign(&catalog);
    let solver = Solver::new(&catalog, &tiers);

    let result = solver.multiple("Mystery", &options(3, 2));
    assert!(!result.timed_out);
    assert!(result.solutions.is_empty());
    assert_eq!(result.visited, 0);
}

#[test]
fn test_timeout_returns_partial_snapshot() {
    // A long chain with an observer that stalls every discovery keeps the
    // worker busy far beyond the deadline.
    let length = 500;
    let catalog = deep_chain_catalog(length);
    let tiers = TierMap::assign(&catalog);
    let observer = Arc::new(SlowObserver {
        delay: Duration::from_millis(2),
    });
    let solver = Solver::new(&catalog, &tiers).with_observer(observer);

    let opts = MultiOptions {
        max_solutions: 1,
        workers: 1,
        timeout: Duration::from_millis(50),
    };
    let result = solver.multiple(&chain_tip(length), &opts);
    assert!(result.timed_out);
    assert!(result.solutions.is_empty());
}

#[test]
fn test_generous_timeout_is_not_flagged() {
    let catalog = brick_catalog();
    let tiers = TierMap::assign(&catalog);
    let solver = Solver::new(&catalog, &tiers);

    let opts = MultiOptions {
        max_solutions: 3,
        workers: 2,
        timeout: Duration::from_secs(30),
    };
    let result = solver.multiple("Steam", &opts);
    assert!(!result.timed_out);
    assert_eq!(result.solutions.len(), 1);
}

#[test]
fn test_observer_runs_on_worker_threads() {
    let catalog = brick_catalog();
    let tiers = TierMap::assign(&catalog);
    let observer = Arc::new(RecordingObserver::default());
    let solver = Solver::new(&catalog, &tiers).with_observer(observer.clone());

    let result = solver.multiple("Brick", &options(3, 2));
    assert!(!result.timed_out);
    assert_eq!(result.solutions.len(), 1);

    let elements = observer.elements.lock().expect("Observer mutex poisoned");
    assert!(elements.iter().any(|element| element == "Mud"));
}
