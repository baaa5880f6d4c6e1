use crate::catalog::{Catalog, Recipe};
use crate::progress::{ProgressObserver, SerializedObserver};
use crate::search::{MultiOptions, MultiResult};
use crate::tier::TierMap;
use crate::tree::{FoundMap, RecipeTree};
use rayon::prelude::*;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::mpsc::{self, RecvTimeoutError};
use std::sync::{Arc, Mutex, PoisonError};
use std::thread;

/// Multi-solution search with an overall wall-clock deadline.
///
/// The actual expansion runs on a detached thread so the caller can race its
/// completion against the timeout. On expiry the snapshot collected so far is
/// returned with `timed_out` set; the detached workers keep running but their
/// further output is never awaited.
pub(crate) fn search(
    catalog: &Catalog,
    tiers: &TierMap,
    observer: Arc<dyn ProgressObserver>,
    target: &str,
    options: &MultiOptions,
) -> MultiResult {
    if catalog.is_base(target) {
        return MultiResult {
            solutions: vec![RecipeTree::leaf(target)],
            visited: 0,
            timed_out: false,
        };
    }
    if !catalog.is_producible(target) || !tiers.is_tiered(target) {
        return MultiResult {
            solutions: Vec::new(),
            visited: 0,
            timed_out: false,
        };
    }

    let solutions = Arc::new(Mutex::new(Vec::new()));
    let visited = Arc::new(AtomicUsize::new(0));
    let (done_tx, done_rx) = mpsc::channel::<()>();

    {
        let catalog = catalog.clone();
        let tiers = tiers.clone();
        let solutions = Arc::clone(&solutions);
        let visited = Arc::clone(&visited);
        let target = target.to_string();
        let max_solutions = options.max_solutions;
        let workers = options.workers;
        thread::spawn(move || {
            let observer = SerializedObserver::new(observer);
            run_workers(
                &catalog,
                &tiers,
                &observer,
                &target,
                max_solutions,
                workers,
                &solutions,
                &visited,
            );
            let _ = done_tx.send(());
        });
    }

    let timed_out = match done_rx.recv_timeout(options.timeout) {
        Ok(()) => false,
        Err(RecvTimeoutError::Timeout) => true,
        // The worker thread can only vanish without sending after a panic;
        // report whatever made it into the collector.
        Err(RecvTimeoutError::Disconnected) => false,
    };

    let solutions = solutions
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .clone();
    MultiResult {
        solutions,
        visited: visited.load(Ordering::Relaxed),
        timed_out,
    }
}

#[allow(clippy::too_many_arguments)]
fn run_workers(
    catalog: &Catalog,
    tiers: &TierMap,
    observer: &SerializedObserver,
    target: &str,
    max_solutions: usize,
    workers: usize,
    solutions: &Mutex<Vec<RecipeTree>>,
    visited: &AtomicUsize,
) {
    let candidates: Vec<Recipe> = catalog
        .recipes_for(target)
        .iter()
        .filter(|recipe| tiers.permits(target, recipe))
        .cloned()
        .collect();

    if workers <= 1 {
        for recipe in &candidates {
            if collected(solutions) >= max_solutions {
                break;
            }
            expand_candidate(
                catalog,
                tiers,
                observer,
                target,
                recipe,
                max_solutions,
                solutions,
                visited,
            );
        }
        return;
    }

    match rayon::ThreadPoolBuilder::new().num_threads(workers).build() {
        Ok(pool) => pool.install(|| {
            candidates.par_iter().for_each(|recipe| {
                if collected(solutions) >= max_solutions {
                    return;
                }
                expand_candidate(
                    catalog,
                    tiers,
                    observer,
                    target,
                    recipe,
                    max_solutions,
                    solutions,
                    visited,
                );
            });
        }),
        // Pool construction only fails on resource exhaustion; degrade to
        // the sequential path instead of dropping the search.
        Err(_) => {
            for recipe in &candidates {
                if collected(solutions) >= max_solutions {
                    break;
                }
                expand_candidate(
                    catalog,
                    tiers,
                    observer,
                    target,
                    recipe,
                    max_solutions,
                    solutions,
                    visited,
                );
            }
        }
    }
}

fn collected(solutions: &Mutex<Vec<RecipeTree>>) -> usize {
    solutions.lock().unwrap_or_else(PoisonError::into_inner).len()
}

/// Completes one top-level ingredient pair down to base elements via frontier
/// expansion restricted to the two ingredient subtrees, then validates and
/// collects the resulting tree.
#[allow(clippy::too_many_arguments)]
fn expand_candidate(
    catalog: &Catalog,
    tiers: &TierMap,
    observer: &SerializedObserver,
    target: &str,
    recipe: &Recipe,
    max_solutions: usize,
    solutions: &Mutex<Vec<RecipeTree>>,
    visited: &AtomicUsize,
) {
    let mut found = FoundMap::new();
    found.insert(
        target.to_string(),
        (recipe.first.clone(), recipe.second.clone()),
    );
    let mut path = vec![target.to_string()];
    let mut frontier: VecDeque<String> =
        VecDeque::from([recipe.first.clone(), recipe.second.clone()]);

    while let Some(element) = frontier.pop_front() {
        visited.fetch_add(1, Ordering::Relaxed);
        if catalog.is_base(&element) || found.contains_key(&element) {
            continue;
        }
        let Some(chosen) = catalog
            .recipes_for(&element)
            .iter()
            .find(|candidate| tiers.permits(&element, candidate))
        else {
            // This branch cannot bottom out at base elements.
            return;
        };
        found.insert(
            element.clone(),
            (chosen.first.clone(), chosen.second.clone()),
        );
        path.push(element.clone());
        observer.notify(&element, &path, &found);
        frontier.push_back(chosen.first.clone());
        frontier.push_back(chosen.second.clone());
    }

    let Ok(tree) = RecipeTree::from_found_map(target, &found, catalog) else {
        return;
    };
    let mut guard = solutions.lock().unwrap_or_else(PoisonError::into_inner);
    if guard.len() < max_solutions && !tree.is_duplicate_in(&guard) {
        guard.push(tree);
    }
}
