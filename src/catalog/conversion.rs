use super::definition::Catalog;
use crate::error::CatalogError;

/// A trait for custom data models that can be converted into an alkahest
/// [`Catalog`].
///
/// This is the primary extension point for keeping the engine format-agnostic.
/// A scraper result, a database dump or a hand-written config struct can all
/// implement `IntoCatalog` and feed the search strategies directly.
///
/// # Example
///
/// ```rust,no_run
/// use alkahest::prelude::*;
/// use alkahest::error::CatalogError;
///
/// // 1. Define your custom structs for parsing your format.
/// struct MyRule { left: String, right: String, makes: String }
/// struct MyRuleSet { bases: Vec<String>, rules: Vec<MyRule> }
///
/// // 2. Implement `IntoCatalog` for your top-level struct.
/// impl IntoCatalog for MyRuleSet {
///     fn into_catalog(self) -> std::result::Result<Catalog, CatalogError> {
///         let mut catalog = Catalog::new(self.bases);
///         for rule in self.rules {
///             catalog.add_recipe(&rule.makes, &rule.left, &rule.right)?;
///         }
///         Ok(catalog)
///     }
/// }
/// ```
pub trait IntoCatalog {
    /// Consumes the object and converts it into a search-ready catalog.
    fn into_catalog(self) -> Result<Catalog, CatalogError>;
}
