use crate::catalog::{Catalog, Recipe};
use crate::progress::SerializedObserver;
use crate::search::{BidirectionalOptions, TreeSearchResult};
use crate::tier::TierMap;
use crate::tree::{FoundMap, RecipeTree};
use ahash::{AHashMap, AHashSet};
use rayon::prelude::*;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, PoisonError};

/// Per-direction discovery record: element -> every ingredient pair that
/// justified discovering it in that direction.
type DiscoveryMap = AHashMap<String, Vec<Recipe>>;

/// Meet-in-the-middle search.
///
/// The forward frontier starts at the target and decomposes elements into
/// their ingredients; the backward frontier starts at the base elements and
/// composes upward into whatever they can produce. The two directions expand
/// in alternating generations; as soon as an element emitted by one side is
/// already known to the other, the discovery records of both sides are
/// stitched into one complete found-map.
///
/// Elements inside one generation expand in parallel, so all discovery-map
/// writes go through a mutex-guarded load-or-store; two ingredient pairs
/// resolving the same element in the same generation both end up recorded.
pub(crate) fn search(
    catalog: &Catalog,
    tiers: &TierMap,
    observer: &SerializedObserver,
    target: &str,
    options: &BidirectionalOptions,
) -> TreeSearchResult {
    if catalog.is_base(target) {
        return TreeSearchResult::single(RecipeTree::leaf(target));
    }
    if !catalog.is_producible(target) || !tiers.is_tiered(target) {
        return TreeSearchResult::empty();
    }

    let forward_map: Mutex<DiscoveryMap> = Mutex::new(AHashMap::new());
    let backward_map: Mutex<DiscoveryMap> = Mutex::new(AHashMap::new());
    let solutions: Mutex<Vec<RecipeTree>> = Mutex::new(Vec::new());
    let visited = AtomicUsize::new(0);

    let mut forward_frontier: Vec<String> = vec![target.to_string()];
    let mut forward_seen: AHashSet<String> = forward_frontier.iter().cloned().collect();
    let mut backward_frontier: Vec<String> = catalog.base_elements().to_vec();
    let mut backward_seen: AHashSet<String> = backward_frontier.iter().cloned().collect();

    for _generation in 0..options.max_depth {
        if forward_frontier.is_empty() || backward_frontier.is_empty() {
            break;
        }
        if collected(&solutions) >= options.max_solutions {
            break;
        }

        forward_frontier = expand_forward(
            catalog,
            tiers,
            observer,
            target,
            &forward_frontier,
            &mut forward_seen,
            &forward_map,
            &backward_map,
            &solutions,
            options.max_solutions,
            &visited,
        );

        if collected(&solutions) >= options.max_solutions {
            break;
        }

        backward_frontier = expand_backward(
            catalog,
            tiers,
            observer,
            target,
            &mut backward_seen,
            &forward_map,
            &backward_map,
            &solutions,
            options.max_solutions,
            &visited,
        );
    }

    TreeSearchResult {
        solutions: solutions
            .into_inner()
            .unwrap_or_else(PoisonError::into_inner),
        visited: visited.load(Ordering::Relaxed),
    }
}

/// Expands one forward generation: every frontier element is decomposed into
/// the ingredient pairs of its tier-valid recipes. Returns the next frontier.
#[allow(clippy::too_many_arguments)]
fn expand_forward(
    catalog: &Catalog,
    tiers: &TierMap,
    observer: &SerializedObserver,
    target: &str,
    frontier: &[String],
    seen: &mut AHashSet<String>,
    forward_map: &Mutex<DiscoveryMap>,
    backward_map: &Mutex<DiscoveryMap>,
    solutions: &Mutex<Vec<RecipeTree>>,
    max_solutions: usize,
    visited: &AtomicUsize,
) -> Vec<String> {
    let discovered: Mutex<Vec<String>> = Mutex::new(Vec::new());

    frontier.par_iter().for_each(|element| {
        if collected(solutions) >= max_solutions {
            return;
        }
        visited.fetch_add(1, Ordering::Relaxed);

        for recipe in catalog.recipes_for(element) {
            if !tiers.permits(element, recipe) {
                continue;
            }
            record(forward_map, element, recipe);
            {
                let mut snapshot = FoundMap::new();
                snapshot.insert(
                    element.clone(),
                    (recipe.first.clone(), recipe.second.clone()),
                );
                let path = vec![element.clone()];
                observer.notify(element, &path, &snapshot);
            }

            // Connection: both ingredients already producible on the
            // backward side (base elements count as producible).
            let connected = {
                let backward = backward_map.lock().unwrap_or_else(PoisonError::into_inner);
                [&recipe.first, &recipe.second]
                    .into_iter()
                    .all(|ing| catalog.is_base(ing) || backward.contains_key(ing.as_str()))
            };
            if connected {
                stitch(
                    catalog,
                    target,
                    forward_map,
                    backward_map,
                    solutions,
                    max_solutions,
                );
            }

            let mut next = discovered.lock().unwrap_or_else(PoisonError::into_inner);
            for ingredient in [&recipe.first, &recipe.second] {
                if !catalog.is_base(ingredient) {
                    next.push(ingredient.clone());
                }
            }
        }
    });

    let mut next_frontier = Vec::new();
    for element in discovered
        .into_inner()
        .unwrap_or_else(PoisonError::into_inner)
    {
        if seen.insert(element.clone()) {
            next_frontier.push(element);
        }
    }
    next_frontier
}

/// Expands one backward generation: scans the catalog for elements not yet
/// produced whose recipe ingredients are all available to the backward side,
/// and records them as produced. Returns the newly produced elements.
#[allow(clippy::too_many_arguments)]
fn expand_backward(
    catalog: &Catalog,
    tiers: &TierMap,
    observer: &SerializedObserver,
    target: &str,
    seen: &mut AHashSet<String>,
    forward_map: &Mutex<DiscoveryMap>,
    backward_map: &Mutex<DiscoveryMap>,
    solutions: &Mutex<Vec<RecipeTree>>,
    max_solutions: usize,
    visited: &AtomicUsize,
) -> Vec<String> {
    let discovered: Mutex<Vec<String>> = Mutex::new(Vec::new());

    // Availability is frozen at the generation boundary so every worker sees
    // the same backward horizon.
    let available: AHashSet<String> = seen.iter().cloned().collect();

    let entries: Vec<(&str, &[Recipe])> = catalog.iter().collect();
    entries.par_iter().for_each(|&(result, recipes)| {
        if collected(solutions) >= max_solutions {
            return;
        }
        if available.contains(result) {
            return;
        }

        for recipe in recipes {
            if !tiers.permits(result, recipe) {
                continue;
            }
            if !available.contains(&recipe.first) || !available.contains(&recipe.second) {
                continue;
            }

            visited.fetch_add(1, Ordering::Relaxed);
            record(backward_map, result, recipe);
            {
                let mut snapshot = FoundMap::new();
                snapshot.insert(
                    result.to_string(),
                    (recipe.first.clone(), recipe.second.clone()),
                );
                let path = vec![result.to_string()];
                observer.notify(result, &path, &snapshot);
            }

            let connected = result == target || {
                let forward = forward_map.lock().unwrap_or_else(PoisonError::into_inner);
                forward.contains_key(result)
            };
            if connected {
                stitch(
                    catalog,
                    target,
                    forward_map,
                    backward_map,
                    solutions,
                    max_solutions,
                );
            }

            discovered
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .push(result.to_string());
        }
    });

    let mut next_frontier = Vec::new();
    for element in discovered
        .into_inner()
        .unwrap_or_else(PoisonError::into_inner)
    {
        if seen.insert(element.clone()) {
            next_frontier.push(element);
        }
    }
    next_frontier
}

/// Load-or-store into a discovery map: appends the recipe unless the same
/// unordered ingredient pair is already recorded for the element.
fn record(map: &Mutex<DiscoveryMap>, element: &str, recipe: &Recipe) {
    let mut guard = map.lock().unwrap_or_else(PoisonError::into_inner);
    let pairs = guard.entry(element.to_string()).or_default();
    if !pairs
        .iter()
        .any(|known| known.same_pair(&recipe.first, &recipe.second))
    {
        pairs.push(recipe.clone());
    }
}

/// Merges both discovery records into complete found-maps rooted at the
/// target, one per ingredient pair recorded for the target, and collects
/// every candidate that validates down to base elements.
fn stitch(
    catalog: &Catalog,
    target: &str,
    forward_map: &Mutex<DiscoveryMap>,
    backward_map: &Mutex<DiscoveryMap>,
    solutions: &Mutex<Vec<RecipeTree>>,
    max_solutions: usize,
) {
    let forward = forward_map.lock().unwrap_or_else(PoisonError::into_inner);
    let backward = backward_map.lock().unwrap_or_else(PoisonError::into_inner);

    let mut target_recipes: Vec<Recipe> = Vec::new();
    if let Some(recipes) = forward.get(target) {
        target_recipes.extend(recipes.iter().cloned());
    }
    if let Some(recipes) = backward.get(target) {
        for recipe in recipes {
            if !target_recipes
                .iter()
                .any(|known| known.same_pair(&recipe.first, &recipe.second))
            {
                target_recipes.push(recipe.clone());
            }
        }
    }

    for recipe in target_recipes {
        let mut found = FoundMap::new();
        found.insert(
            target.to_string(),
            (recipe.first.clone(), recipe.second.clone()),
        );
        let mut queue = VecDeque::from([recipe.first, recipe.second]);
        let mut complete = true;

        while let Some(element) = queue.pop_front() {
            if catalog.is_base(&element) || found.contains_key(&element) {
                continue;
            }
            let recorded = backward
                .get(&element)
                .and_then(|recipes| recipes.first())
                .or_else(|| forward.get(&element).and_then(|recipes| recipes.first()));
            match recorded {
                Some(known) => {
                    found.insert(element, (known.first.clone(), known.second.clone()));
                    queue.push_back(known.first.clone());
                    queue.push_back(known.second.clone());
                }
                None => {
                    complete = false;
                    break;
                }
            }
        }
        if !complete {
            continue;
        }

        let Ok(tree) = RecipeTree::from_found_map(target, &found, catalog) else {
            continue;
        };
        let mut guard = solutions.lock().unwrap_or_else(PoisonError::into_inner);
        if guard.len() < max_solutions && !tree.is_duplicate_in(&guard) {
            guard.push(tree);
        }
    }
}

fn collected(solutions: &Mutex<Vec<RecipeTree>>) -> usize {
    solutions.lock().unwrap_or_else(PoisonError::into_inner).len()
}
