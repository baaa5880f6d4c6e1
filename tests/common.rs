//! Common test utilities for building recipe catalogs and observers.
use alkahest::prelude::*;
use std::sync::Mutex;
use std::time::Duration;

/// The classic starter catalog.
///
/// Bases: Water, Fire, Earth, Air.
/// Steam = Water + Fire, Mud = Water + Earth, Brick = Mud + Fire.
#[allow(dead_code)]
pub fn brick_catalog() -> Catalog {
    let mut catalog = Catalog::new(["Water", "Fire", "Earth", "Air"]);
    catalog
        .add_recipe("Steam", "Water", "Fire")
        .expect("Failed to add Steam");
    catalog
        .add_recipe("Mud", "Water", "Earth")
        .expect("Failed to add Mud");
    catalog
        .add_recipe("Brick", "Mud", "Fire")
        .expect("Failed to add Brick");
    catalog
}

/// Brick catalog plus an element whose only recipe depends on an ingredient
/// that is neither a base element nor producible.
#[allow(dead_code)]
pub fn catalog_with_unreachable() -> Catalog {
    let mut catalog = brick_catalog();
    catalog
        .add_recipe("Mystery", "Phantom", "Water")
        .expect("Failed to add Mystery");
    catalog
}

/// A target reachable via two routes of different step counts.
///
/// "Alloy" can be made as Mud + Fire (two combination steps) or as
/// Steam + Mud (three steps: Steam, Mud, then Alloy). The longer route is
/// registered first so shortest-path behavior cannot hide behind insertion
/// order.
#[allow(dead_code)]
pub fn two_route_catalog() -> Catalog {
    let mut catalog = Catalog::new(["Water", "Fire", "Earth", "Air"]);
    catalog
        .add_recipe("Steam", "Water", "Fire")
        .expect("Failed to add Steam");
    catalog
        .add_recipe("Mud", "Water", "Earth")
        .expect("Failed to add Mud");
    catalog
        .add_recipe("Alloy", "Steam", "Mud")
        .expect("Failed to add long Alloy route");
    catalog
        .add_recipe("Alloy", "Mud", "Fire")
        .expect("Failed to add short Alloy route");
    catalog
}

/// Mutually recursive recipes: X = A + B, Y = X + B, and a back-edge
/// X = Y + A that the tier gate must refuse to expand.
#[allow(dead_code)]
pub fn cyclic_catalog() -> Catalog {
    let mut catalog = Catalog::new(["A", "B"]);
    catalog.add_recipe("X", "A", "B").expect("Failed to add X");
    catalog.add_recipe("Y", "X", "B").expect("Failed to add Y");
    catalog
        .add_recipe("X", "Y", "A")
        .expect("Failed to add back-edge");
    catalog
}

/// The same unordered ingredient pair registered twice with swapped
/// operand order. Every multi-solution strategy must collapse the two.
#[allow(dead_code)]
pub fn swapped_pair_catalog() -> Catalog {
    let mut catalog = Catalog::new(["Water", "Fire"]);
    catalog
        .add_recipe("Steam", "Water", "Fire")
        .expect("Failed to add Steam");
    catalog
        .add_recipe("Steam", "Fire", "Water")
        .expect("Failed to add swapped Steam");
    catalog
}

/// A target with several genuinely distinct derivations.
///
/// T = P + Q where P has two recipes and Q has one, so exhaustive
/// enumeration yields exactly two distinct trees for T.
#[allow(dead_code)]
pub fn branching_catalog() -> Catalog {
    let mut catalog = Catalog::new(["A", "B", "C"]);
    catalog.add_recipe("P", "A", "B").expect("Failed to add P");
    catalog
        .add_recipe("P", "B", "C")
        .expect("Failed to add alternate P");
    catalog.add_recipe("Q", "A", "C").expect("Failed to add Q");
    catalog.add_recipe("T", "P", "Q").expect("Failed to add T");
    catalog
}

/// A linear chain of `length` elements: E1 = Seed + Sun, Ei = E(i-1) + Sun.
/// The last element sits at tier `length + 1`.
#[allow(dead_code)]
pub fn deep_chain_catalog(length: usize) -> Catalog {
    let mut catalog = Catalog::new(["Seed", "Sun"]);
    let mut previous = "Seed".to_string();
    for index in 1..=length {
        let element = format!("E{index}");
        catalog
            .add_recipe(&element, &previous, "Sun")
            .expect("Failed to add chain link");
        previous = element;
    }
    catalog
}

#[allow(dead_code)]
pub fn chain_tip(length: usize) -> String {
    format!("E{length}")
}

/// Observer that records every discovered element.
#[derive(Default)]
#[allow(dead_code)]
pub struct RecordingObserver {
    pub elements: Mutex<Vec<String>>,
}

impl ProgressObserver for RecordingObserver {
    fn on_discover(&self, discovery: &Discovery<'_>) {
        self.elements
            .lock()
            .expect("Observer mutex poisoned")
            .push(discovery.element.to_string());
    }
}

/// Observer that keeps a full copy of every delivered discovery, element
/// and found-map snapshot included.
#[derive(Default)]
#[allow(dead_code)]
pub struct SnapshotObserver {
    pub discoveries: Mutex<Vec<(String, FoundMap)>>,
}

impl ProgressObserver for SnapshotObserver {
    fn on_discover(&self, discovery: &Discovery<'_>) {
        self.discoveries
            .lock()
            .expect("Observer mutex poisoned")
            .push((discovery.element.to_string(), discovery.found.clone()));
    }
}

/// Observer that sleeps on every event, stalling the worker that produced
/// it. Used to force searches over a wall-clock deadline.
#[allow(dead_code)]
pub struct SlowObserver {
    pub delay: Duration,
}

impl ProgressObserver for SlowObserver {
    fn on_discover(&self, _discovery: &Discovery<'_>) {
        std::thread::sleep(self.delay);
    }
}

/// Asserts that every leaf of the tree is a base element of the catalog.
#[allow(dead_code)]
pub fn assert_grounded(tree: &RecipeTree, catalog: &Catalog) {
    if tree.ingredients.is_empty() {
        assert!(
            catalog.is_base(&tree.element),
            "Leaf '{}' is not a base element",
            tree.element
        );
    } else {
        assert_eq!(
            tree.ingredients.len(),
            2,
            "Node '{}' does not have exactly two ingredients",
            tree.element
        );
        for child in &tree.ingredients {
            assert_grounded(child, catalog);
        }
    }
}
