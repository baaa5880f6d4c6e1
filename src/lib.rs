//! # Alkahest - Recipe Combination Search Engine
//!
//! **Alkahest** answers one question: how can an element be produced from a
//! small set of base elements via binary combination rules? Given a catalog
//! of `A + B -> C` recipes and a fixed base-element set, it finds valid
//! *production trees* deriving a target exclusively from base elements, under
//! a no-cycle, monotonic-tier ordering.
//!
//! ## Core Workflow
//!
//! The engine is format-agnostic. It operates on a canonical in-memory
//! [`Catalog`](catalog::Catalog); how that catalog is acquired (scraper,
//! JSON file, database) is the caller's concern. The primary workflow is:
//!
//! 1. **Load Your Data**: Parse your recipe source into your own Rust
//!    structs, or into the flat [`CombinationRecord`](catalog::CombinationRecord)
//!    shape.
//! 2. **Convert to a Catalog**: Use `Catalog::from_combinations`, or
//!    implement the [`IntoCatalog`](catalog::IntoCatalog) trait for your own
//!    types.
//! 3. **Assign Tiers**: Compute the [`TierMap`](tier::TierMap) once per
//!    catalog. Tiers prune cyclic and unreachable expansions in every search.
//! 4. **Search**: Create a [`Solver`](search::Solver) and run any of the
//!    strategies; results come back as paths or validated
//!    [`RecipeTree`](tree::RecipeTree)s.
//!
//! ## Quick Start
//!
//! ```rust
//! use alkahest::prelude::*;
//!
//! fn main() -> Result<()> {
//!     let mut catalog = Catalog::new(["Water", "Fire", "Earth", "Air"]);
//!     catalog.add_recipe("Steam", "Water", "Fire")?;
//!     catalog.add_recipe("Mud", "Water", "Earth")?;
//!     catalog.add_recipe("Brick", "Mud", "Fire")?;
//!
//!     let tiers = TierMap::assign(&catalog);
//!     let solver = Solver::new(&catalog, &tiers);
//!
//!     // Shortest path by combination-step count.
//!     let shortest = solver.shortest_path("Brick");
//!     assert!(shortest.found);
//!     assert_eq!(shortest.depth, 2);
//!
//!     // A full production tree via depth-first backtracking.
//!     let result = solver.dfs("Brick", &DfsOptions::default());
//!     for tree in &result.solutions {
//!         println!("{}", tree);
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Concurrency
//!
//! The catalog and tier map are read-only and may be shared by any number of
//! concurrent searches without locking. Search-local state (found-maps,
//! frontier records) is copied per branch or per worker; shared collectors
//! are lock-protected. Only [`Solver::multiple`](search::Solver::multiple)
//! enforces a wall-clock timeout, returning partial results with a
//! `timed_out` flag rather than an error.

pub mod catalog;
pub mod error;
pub mod prelude;
pub mod progress;
pub mod search;
pub mod tier;
pub mod tree;
