use crate::catalog::Catalog;
use crate::progress::SerializedObserver;
use crate::search::{CombinationStep, PathResult};
use crate::tier::TierMap;
use crate::tree::FoundMap;
use ahash::{AHashMap, AHashSet};
use std::collections::VecDeque;

/// A partial state on the breadth-first frontier.
struct State {
    element: String,
    path: Vec<String>,
    steps: Vec<CombinationStep>,
    available: AHashSet<String>,
    depth: usize,
}

/// Breadth-first frontier search from the base elements toward `target`.
///
/// States are expanded strictly by increasing depth, so the first state to
/// reach the target carries a shortest path. An element is marked visited per
/// `(element, depth)` pair rather than globally: it may legitimately first
/// become available at different depths along different paths, but only the
/// shallowest discovery gets expanded.
pub(crate) fn search(
    catalog: &Catalog,
    tiers: &TierMap,
    observer: &SerializedObserver,
    target: &str,
) -> PathResult {
    if catalog.is_base(target) {
        return PathResult {
            path: vec![target.to_string()],
            steps: Vec::new(),
            depth: 0,
            found: true,
            visited: 0,
        };
    }
    if !tiers.is_tiered(target) {
        return PathResult::miss(0);
    }

    let initial_available: AHashSet<String> = catalog.base_elements().iter().cloned().collect();
    let mut queue: VecDeque<State> = VecDeque::new();
    let mut visited_at_depth: AHashMap<String, AHashSet<usize>> = AHashMap::new();
    let mut visited = 0usize;

    for base in catalog.base_elements() {
        queue.push_back(State {
            element: base.clone(),
            path: vec![base.clone()],
            steps: Vec::new(),
            available: initial_available.clone(),
            depth: 0,
        });
        visited_at_depth.entry(base.clone()).or_default().insert(0);
    }

    while let Some(current) = queue.pop_front() {
        visited += 1;

        if current.element == target {
            return PathResult {
                path: current.path,
                steps: current.steps,
                depth: current.depth,
                found: true,
                visited,
            };
        }

        let next_depth = current.depth + 1;
        for (result, recipes) in catalog.iter() {
            for recipe in recipes {
                if !tiers.permits(result, recipe) {
                    continue;
                }
                if !current.available.contains(&recipe.first)
                    || !current.available.contains(&recipe.second)
                {
                    continue;
                }
                if visited_at_depth
                    .get(result)
                    .is_some_and(|depths| depths.contains(&next_depth))
                {
                    continue;
                }

                let mut path = current.path.clone();
                path.push(result.to_string());
                let mut steps = current.steps.clone();
                steps.push(CombinationStep {
                    first: recipe.first.clone(),
                    second: recipe.second.clone(),
                    result: result.to_string(),
                });
                let mut available = current.available.clone();
                available.insert(result.to_string());

                let snapshot: FoundMap = steps
                    .iter()
                    .map(|step| {
                        (
                            step.result.clone(),
                            (step.first.clone(), step.second.clone()),
                        )
                    })
                    .collect();
                observer.notify(result, &path, &snapshot);

                if result == target {
                    return PathResult {
                        path,
                        steps,
                        depth: next_depth,
                        found: true,
                        visited: visited + 1,
                    };
                }

                visited_at_depth
                    .entry(result.to_string())
                    .or_default()
                    .insert(next_depth);
                queue.push_back(State {
                    element: result.to_string(),
                    path,
                    steps,
                    available,
                    depth: next_depth,
                });
            }
        }
    }

    PathResult::miss(visited)
}
