use crate::catalog::{Catalog, Recipe};
use crate::progress::SerializedObserver;
use crate::search::{DfsOptions, TreeSearchResult};
use crate::tier::TierMap;
use crate::tree::{FoundMap, RecipeTree};
use ahash::AHashSet;
use itertools::Itertools;
use rayon::prelude::*;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, PoisonError};

/// Depth-first backtracking solver.
///
/// For each of the target's direct recipes the solver seeds a found-map with
/// that recipe and resolves both ingredients recursively, undoing tentative
/// entries whenever a branch cannot be completed. The exhaustive mode instead
/// enumerates every valid completion of both ingredient subtrees and combines
/// them pairwise.
pub(crate) fn search(
    catalog: &Catalog,
    tiers: &TierMap,
    observer: &SerializedObserver,
    target: &str,
    options: &DfsOptions,
) -> TreeSearchResult {
    if catalog.is_base(target) {
        return TreeSearchResult::single(RecipeTree::leaf(target));
    }
    if !catalog.is_producible(target) || !tiers.is_tiered(target) {
        return TreeSearchResult::empty();
    }

    if options.exhaustive {
        exhaustive_search(catalog, tiers, observer, target, options.max_solutions)
    } else {
        first_fit_search(catalog, tiers, observer, target, options.max_solutions)
    }
}

fn first_fit_search(
    catalog: &Catalog,
    tiers: &TierMap,
    observer: &SerializedObserver,
    target: &str,
    max_solutions: usize,
) -> TreeSearchResult {
    let mut solutions: Vec<RecipeTree> = Vec::new();
    let mut visited = 0usize;

    for recipe in catalog.recipes_for(target) {
        if solutions.len() >= max_solutions {
            break;
        }
        if !tiers.permits(target, recipe) {
            continue;
        }

        let mut found = FoundMap::new();
        found.insert(
            target.to_string(),
            (recipe.first.clone(), recipe.second.clone()),
        );
        let mut path = vec![target.to_string()];
        let mut in_progress = AHashSet::new();
        in_progress.insert(target.to_string());

        let complete = resolve(
            catalog,
            tiers,
            observer,
            &recipe.first,
            &mut found,
            &mut path,
            &mut in_progress,
            &mut visited,
        ) && resolve(
            catalog,
            tiers,
            observer,
            &recipe.second,
            &mut found,
            &mut path,
            &mut in_progress,
            &mut visited,
        );
        if !complete {
            continue;
        }

        let Ok(tree) = RecipeTree::from_found_map(target, &found, catalog) else {
            continue;
        };
        if !tree.is_duplicate_in(&solutions) {
            solutions.push(tree);
        }
    }

    TreeSearchResult { solutions, visited }
}

/// Resolves `element` down to base elements, recording the first recipe whose
/// both ingredients resolve. Tentative entries are removed again when a
/// branch fails, classic backtracking with undo.
#[allow(clippy::too_many_arguments)]
fn resolve(
    catalog: &Catalog,
    tiers: &TierMap,
    observer: &SerializedObserver,
    element: &str,
    found: &mut FoundMap,
    path: &mut Vec<String>,
    in_progress: &mut AHashSet<String>,
    visited: &mut usize,
) -> bool {
    *visited += 1;

    if catalog.is_base(element) || found.contains_key(element) {
        return true;
    }

    for recipe in catalog.recipes_for(element) {
        if !tiers.permits(element, recipe) {
            continue;
        }
        // Never fall back into an element this branch is still resolving.
        if in_progress.contains(&recipe.first) || in_progress.contains(&recipe.second) {
            continue;
        }

        found.insert(
            element.to_string(),
            (recipe.first.clone(), recipe.second.clone()),
        );
        in_progress.insert(element.to_string());
        let complete = resolve(
            catalog,
            tiers,
            observer,
            &recipe.first,
            found,
            path,
            in_progress,
            visited,
        ) && resolve(
            catalog,
            tiers,
            observer,
            &recipe.second,
            found,
            path,
            in_progress,
            visited,
        );
        in_progress.remove(element);

        if complete {
            path.push(element.to_string());
            observer.notify(element, path, found);
            return true;
        }
        found.remove(element);
    }

    false
}

/// Enumerates all combinatorial completions per top-level recipe. Each recipe
/// explores on its own worker with a private found-map copy; accepted trees
/// are merged into one deduplicated collection under a lock.
fn exhaustive_search(
    catalog: &Catalog,
    tiers: &TierMap,
    observer: &SerializedObserver,
    target: &str,
    max_solutions: usize,
) -> TreeSearchResult {
    let solutions: Mutex<Vec<RecipeTree>> = Mutex::new(Vec::new());
    let visited = AtomicUsize::new(0);

    let candidates: Vec<&Recipe> = catalog
        .recipes_for(target)
        .iter()
        .filter(|recipe| tiers.permits(target, recipe))
        .collect();

    candidates.par_iter().for_each(|recipe| {
        if collected(&solutions) >= max_solutions {
            return;
        }

        let mut seed = FoundMap::new();
        seed.insert(
            target.to_string(),
            (recipe.first.clone(), recipe.second.clone()),
        );

        let lefts = completions(catalog, tiers, observer, &recipe.first, &seed, &visited);
        let rights = completions(catalog, tiers, observer, &recipe.second, &seed, &visited);

        for (left, right) in lefts.iter().cartesian_product(rights.iter()) {
            if collected(&solutions) >= max_solutions {
                return;
            }
            let Some(merged) = merge_found_maps(left, right) else {
                continue;
            };
            let Ok(tree) = RecipeTree::from_found_map(target, &merged, catalog) else {
                continue;
            };
            let accepted = {
                let mut guard = solutions.lock().unwrap_or_else(PoisonError::into_inner);
                if guard.len() < max_solutions && !tree.is_duplicate_in(&guard) {
                    guard.push(tree);
                    true
                } else {
                    false
                }
            };
            if accepted {
                let path = vec![target.to_string()];
                observer.notify(target, &path, &merged);
            }
        }
    });

    TreeSearchResult {
        solutions: solutions
            .into_inner()
            .unwrap_or_else(PoisonError::into_inner),
        visited: visited.load(Ordering::Relaxed),
    }
}

fn collected(solutions: &Mutex<Vec<RecipeTree>>) -> usize {
    solutions.lock().unwrap_or_else(PoisonError::into_inner).len()
}

/// All found-map extensions that fully resolve `element` starting from
/// `seed`. Each returned map contains everything in `seed` plus a complete
/// derivation of `element` down to base elements. Every element/recipe
/// combination with at least one completion is reported to the observer.
fn completions(
    catalog: &Catalog,
    tiers: &TierMap,
    observer: &SerializedObserver,
    element: &str,
    seed: &FoundMap,
    visited: &AtomicUsize,
) -> Vec<FoundMap> {
    visited.fetch_add(1, Ordering::Relaxed);

    if catalog.is_base(element) || seed.contains_key(element) {
        return vec![seed.clone()];
    }

    let mut out = Vec::new();
    for recipe in catalog.recipes_for(element) {
        if !tiers.permits(element, recipe) {
            continue;
        }
        let mut extended = seed.clone();
        extended.insert(
            element.to_string(),
            (recipe.first.clone(), recipe.second.clone()),
        );
        let mut resolved = Vec::new();
        for left in completions(catalog, tiers, observer, &recipe.first, &extended, visited) {
            resolved.extend(completions(
                catalog,
                tiers,
                observer,
                &recipe.second,
                &left,
                visited,
            ));
        }
        if !resolved.is_empty() {
            let path = vec![element.to_string()];
            observer.notify(element, &path, &extended);
        }
        out.append(&mut resolved);
    }
    out
}

/// Merges two completions of sibling subtrees. Fails when the subtrees chose
/// conflicting recipes for a shared element.
fn merge_found_maps(left: &FoundMap, right: &FoundMap) -> Option<FoundMap> {
    let mut merged = left.clone();
    for (element, pair) in right {
        match merged.get(element) {
            Some(existing) if existing != pair => return None,
            Some(_) => {}
            None => {
                merged.insert(element.clone(), pair.clone());
            }
        }
    }
    Some(merged)
}
