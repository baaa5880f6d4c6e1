use crate::error::CatalogError;
use ahash::{AHashMap, AHashSet};
use serde::{Deserialize, Serialize};

/// An unordered pair of ingredient elements. `(A, B)` and `(B, A)` denote
/// the same recipe.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Recipe {
    pub first: String,
    pub second: String,
}

impl Recipe {
    pub fn new(first: impl Into<String>, second: impl Into<String>) -> Self {
        Self {
            first: first.into(),
            second: second.into(),
        }
    }

    /// Given one ingredient, returns the other. `None` if `element` is not
    /// part of this recipe.
    pub fn other_ingredient(&self, element: &str) -> Option<&str> {
        if self.first == element {
            Some(&self.second)
        } else if self.second == element {
            Some(&self.first)
        } else {
            None
        }
    }

    /// Order-insensitive comparison against another ingredient pair.
    pub fn same_pair(&self, first: &str, second: &str) -> bool {
        (self.first == first && self.second == second)
            || (self.first == second && self.second == first)
    }
}

/// A flat `A + B -> C` record, the shape external loaders (scrapers, JSON
/// files) typically produce.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CombinationRecord {
    #[serde(rename = "element1")]
    pub first: String,
    #[serde(rename = "element2")]
    pub second: String,
    pub result: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon_filename: Option<String>,
}

/// Immutable mapping from every producible element to its ingredient pairs,
/// plus the fixed ordered list of base elements.
///
/// Recipes for one element keep their insertion order, which every search
/// strategy uses as its deterministic exploration order. The set of producible
/// elements is likewise iterated in insertion order via [`Catalog::iter`].
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    recipes: AHashMap<String, Vec<Recipe>>,
    order: Vec<String>,
    base_elements: Vec<String>,
    base_set: AHashSet<String>,
}

impl Catalog {
    /// Creates an empty catalog over the given base elements.
    pub fn new<I, S>(base_elements: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let base_elements: Vec<String> = base_elements.into_iter().map(Into::into).collect();
        let base_set = base_elements.iter().cloned().collect();
        Self {
            recipes: AHashMap::new(),
            order: Vec::new(),
            base_elements,
            base_set,
        }
    }

    /// Builds a catalog from a flat combination list, grouping recipes under
    /// their result element in input order.
    pub fn from_combinations<I, S>(
        base_elements: I,
        records: &[CombinationRecord],
    ) -> Result<Self, CatalogError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut catalog = Self::new(base_elements);
        for record in records {
            catalog.add_recipe(&record.result, &record.first, &record.second)?;
        }
        Ok(catalog)
    }

    /// Registers `first + second -> result`. Duplicate pairs for the same
    /// result are kept; deduplication happens at search time on whole trees.
    pub fn add_recipe(
        &mut self,
        result: &str,
        first: &str,
        second: &str,
    ) -> Result<(), CatalogError> {
        if result.is_empty() || first.is_empty() || second.is_empty() {
            return Err(CatalogError::EmptyElementName {
                first: first.to_string(),
                second: second.to_string(),
                result: result.to_string(),
            });
        }
        if first == result || second == result {
            return Err(CatalogError::SelfReferential {
                first: first.to_string(),
                second: second.to_string(),
                result: result.to_string(),
            });
        }
        if self.base_set.contains(result) {
            return Err(CatalogError::BaseElementWithRecipe(result.to_string()));
        }

        let entry = self.recipes.entry(result.to_string()).or_default();
        if entry.is_empty() {
            self.order.push(result.to_string());
        }
        entry.push(Recipe::new(first, second));
        Ok(())
    }

    /// All recipes producing `element`, in insertion order. Empty for base
    /// elements and unknown names.
    pub fn recipes_for(&self, element: &str) -> &[Recipe] {
        self.recipes.get(element).map(Vec::as_slice).unwrap_or(&[])
    }

    /// The fixed, ordered base-element list.
    pub fn base_elements(&self) -> &[String] {
        &self.base_elements
    }

    pub fn is_base(&self, element: &str) -> bool {
        self.base_set.contains(element)
    }

    /// Whether the element is producible (has at least one recipe).
    pub fn is_producible(&self, element: &str) -> bool {
        self.recipes.contains_key(element)
    }

    /// Iterates `(result, recipes)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[Recipe])> {
        self.order
            .iter()
            .map(|result| (result.as_str(), self.recipes_for(result)))
    }

    /// Number of distinct producible elements.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}
