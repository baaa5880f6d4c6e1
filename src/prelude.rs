//! Prelude module for convenient imports
//!
//! Re-exports the most commonly used types from the alkahest crate. Import
//! this module to get access to the core functionality without having to
//! import each type individually.
//!
//! # Example
//!
//! ```rust,no_run
//! use alkahest::prelude::*;
//!
//! # fn run_example() -> Result<()> {
//! let records: Vec<CombinationRecord> =
//!     serde_json::from_str(&std::fs::read_to_string("recipes.json")?)?;
//! let catalog = Catalog::from_combinations(["Water", "Fire", "Earth", "Air"], &records)?;
//! let tiers = TierMap::assign(&catalog);
//!
//! let solver = Solver::new(&catalog, &tiers);
//! let result = solver.multiple("Brick", &MultiOptions::default());
//! println!("{} solutions, visited {}", result.solutions.len(), result.visited);
//! # Ok(())
//! # }
//! ```

// Catalog and tiers
pub use crate::catalog::{Catalog, CombinationRecord, IntoCatalog, Recipe};
pub use crate::tier::TierMap;

// Search strategies and their knobs
pub use crate::search::{
    BidirectionalOptions, CombinationStep, DfsOptions, MultiOptions, MultiResult, PathResult,
    Solver, TreeSearchResult,
};

// Output structures
pub use crate::tree::{FoundMap, RecipeTree};

// Progress reporting
pub use crate::progress::{Discovery, NoopObserver, ProgressObserver};

// Error types
pub use crate::error::{CatalogError, TreeError};

// Result type alias for convenience
pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;
