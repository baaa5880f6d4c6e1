use crate::catalog::Catalog;
use crate::progress::{NoopObserver, ProgressObserver, SerializedObserver};
use crate::tier::TierMap;
use crate::tree::RecipeTree;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

pub mod bfs;
pub mod bidirectional;
pub mod dfs;
pub mod multi;

/// One applied combination step along a search path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CombinationStep {
    pub first: String,
    pub second: String,
    pub result: String,
}

impl fmt::Display for CombinationStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} + {} => {}", self.first, self.second, self.result)
    }
}

/// Outcome of the single-path shortest search.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathResult {
    /// Ordered elements from a base element up to the target. Empty when the
    /// target was not reached.
    pub path: Vec<String>,
    /// The combination steps applied along `path`.
    pub steps: Vec<CombinationStep>,
    /// Number of combination steps to the target.
    pub depth: usize,
    pub found: bool,
    /// Expansion states dequeued while searching.
    pub visited: usize,
}

impl PathResult {
    pub(crate) fn miss(visited: usize) -> Self {
        Self {
            path: Vec::new(),
            steps: Vec::new(),
            depth: 0,
            found: false,
            visited,
        }
    }
}

/// Outcome of the multi-solution search.
#[derive(Debug, Clone)]
pub struct MultiResult {
    pub solutions: Vec<RecipeTree>,
    pub visited: usize,
    /// True when the deadline elapsed before `max_solutions` were collected.
    /// The returned solutions are the partial set gathered so far.
    pub timed_out: bool,
}

/// Outcome of the DFS and bidirectional strategies.
#[derive(Debug, Clone)]
pub struct TreeSearchResult {
    pub solutions: Vec<RecipeTree>,
    pub visited: usize,
}

impl TreeSearchResult {
    pub(crate) fn empty() -> Self {
        Self {
            solutions: Vec::new(),
            visited: 0,
        }
    }

    pub(crate) fn single(tree: RecipeTree) -> Self {
        Self {
            solutions: vec![tree],
            visited: 0,
        }
    }
}

/// Tuning for [`Solver::multiple`].
#[derive(Debug, Clone)]
pub struct MultiOptions {
    pub max_solutions: usize,
    /// Size of the worker pool; `<= 1` runs sequentially.
    pub workers: usize,
    /// Wall-clock budget for the whole operation. On expiry the partial
    /// result set is returned and `timed_out` is flagged; in-flight workers
    /// are not forcibly terminated, their output is simply no longer awaited.
    pub timeout: Duration,
}

impl Default for MultiOptions {
    fn default() -> Self {
        Self {
            max_solutions: 3,
            workers: std::thread::available_parallelism()
                .map(std::num::NonZero::get)
                .unwrap_or(4),
            timeout: Duration::from_secs(30),
        }
    }
}

/// Tuning for [`Solver::dfs`].
#[derive(Debug, Clone)]
pub struct DfsOptions {
    pub max_solutions: usize,
    /// When set, enumerates every valid completion of both ingredient
    /// subtrees per top-level recipe instead of stopping at the first one.
    pub exhaustive: bool,
}

impl Default for DfsOptions {
    fn default() -> Self {
        Self {
            max_solutions: 1,
            exhaustive: false,
        }
    }
}

/// Tuning for [`Solver::bidirectional`].
#[derive(Debug, Clone)]
pub struct BidirectionalOptions {
    pub max_solutions: usize,
    /// Upper bound on frontier generations per direction.
    pub max_depth: usize,
}

impl Default for BidirectionalOptions {
    fn default() -> Self {
        Self {
            max_solutions: 1,
            max_depth: 32,
        }
    }
}

/// Entry point for every search strategy.
///
/// A `Solver` borrows an immutable catalog and tier map; both may be shared
/// by any number of concurrent solvers without locking. Construct one per
/// catalog and reuse it across searches.
pub struct Solver<'a> {
    catalog: &'a Catalog,
    tiers: &'a TierMap,
    observer: Arc<dyn ProgressObserver>,
}

impl<'a> Solver<'a> {
    pub fn new(catalog: &'a Catalog, tiers: &'a TierMap) -> Self {
        Self {
            catalog,
            tiers,
            observer: Arc::new(NoopObserver),
        }
    }

    /// Registers a progress observer. Delivery is serialized across workers;
    /// a blocking observer stalls the worker that produced the event.
    pub fn with_observer(mut self, observer: Arc<dyn ProgressObserver>) -> Self {
        self.observer = observer;
        self
    }

    /// Breadth-first frontier search returning the first, and therefore
    /// shortest by combination-step count, path to `target`.
    pub fn shortest_path(&self, target: &str) -> PathResult {
        let observer = SerializedObserver::new(Arc::clone(&self.observer));
        bfs::search(self.catalog, self.tiers, &observer, target)
    }

    /// Collects up to `max_solutions` distinct recipe trees for `target`,
    /// sequentially or over a bounded worker pool, under a wall-clock
    /// timeout.
    pub fn multiple(&self, target: &str, options: &MultiOptions) -> MultiResult {
        multi::search(
            self.catalog,
            self.tiers,
            Arc::clone(&self.observer),
            target,
            options,
        )
    }

    /// Depth-first backtracking over the target's recipes, optionally
    /// enumerating all combinatorial completions per recipe.
    pub fn dfs(&self, target: &str, options: &DfsOptions) -> TreeSearchResult {
        let observer = SerializedObserver::new(Arc::clone(&self.observer));
        dfs::search(self.catalog, self.tiers, &observer, target, options)
    }

    /// Meet-in-the-middle search growing a decomposing frontier from the
    /// target and a composing frontier from the base elements.
    pub fn bidirectional(&self, target: &str, options: &BidirectionalOptions) -> TreeSearchResult {
        let observer = SerializedObserver::new(Arc::clone(&self.observer));
        bidirectional::search(self.catalog, self.tiers, &observer, target, options)
    }
}
