use crate::catalog::Catalog;
use crate::error::TreeError;
use ahash::AHashMap;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A search-local record mapping an element to the ingredient pair chosen to
/// produce it during one search attempt. Owned exclusively by that attempt;
/// cloned, never shared, across backtracking branches or concurrent workers.
pub type FoundMap = AHashMap<String, (String, String)>;

/// The realized production hierarchy for one element, down to base-element
/// leaves. A node holds either zero children (a base element) or exactly two
/// (its ingredients). Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecipeTree {
    pub element: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub ingredients: Vec<RecipeTree>,
}

impl RecipeTree {
    pub fn leaf(element: impl Into<String>) -> Self {
        Self {
            element: element.into(),
            ingredients: Vec::new(),
        }
    }

    /// Realizes the tree for `element` from a completed found-map.
    ///
    /// Fails if any reachable non-base element lacks a found-map entry, which
    /// is exactly the validation rule searches apply before accepting a
    /// candidate solution.
    pub fn from_found_map(
        element: &str,
        found: &FoundMap,
        catalog: &Catalog,
    ) -> Result<Self, TreeError> {
        if let Some((first, second)) = found.get(element) {
            Ok(Self {
                element: element.to_string(),
                ingredients: vec![
                    Self::from_found_map(first, found, catalog)?,
                    Self::from_found_map(second, found, catalog)?,
                ],
            })
        } else if catalog.is_base(element) {
            Ok(Self::leaf(element))
        } else {
            Err(TreeError::UnresolvedElement(element.to_string()))
        }
    }

    /// Structural equality that treats ingredient pairs as unordered:
    /// `X(A, B)` and `X(B, A)` are the same production tree.
    pub fn structurally_equal(&self, other: &RecipeTree) -> bool {
        if self.element != other.element {
            return false;
        }
        match (self.ingredients.as_slice(), other.ingredients.as_slice()) {
            ([], []) => true,
            ([a, b], [c, d]) => {
                (a.structurally_equal(c) && b.structurally_equal(d))
                    || (a.structurally_equal(d) && b.structurally_equal(c))
            }
            _ => false,
        }
    }

    /// Whether a structurally equal tree is already in `collection`.
    pub fn is_duplicate_in(&self, collection: &[RecipeTree]) -> bool {
        collection.iter().any(|tree| self.structurally_equal(tree))
    }

    /// Height of the tree; a lone leaf has depth 1.
    pub fn depth(&self) -> usize {
        1 + self
            .ingredients
            .iter()
            .map(RecipeTree::depth)
            .max()
            .unwrap_or(0)
    }

    fn fmt_as_tree(&self, f: &mut fmt::Formatter<'_>, prefix: &str, is_last: bool) -> fmt::Result {
        let marker = if is_last { "└── " } else { "├── " };
        writeln!(f, "{}{}{}", prefix, marker, self.element)?;
        let child_prefix = format!("{}{}", prefix, if is_last { "    " } else { "│   " });
        for (index, child) in self.ingredients.iter().enumerate() {
            child.fmt_as_tree(f, &child_prefix, index == self.ingredients.len() - 1)?;
        }
        Ok(())
    }
}

impl fmt::Display for RecipeTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.fmt_as_tree(f, "", true)
    }
}
