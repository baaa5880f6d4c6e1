use crate::catalog::{Catalog, Recipe};
use ahash::{AHashMap, AHashSet};
use std::collections::VecDeque;

/// Minimum production depth per element, propagated outward from the base
/// elements.
///
/// Base elements sit at tier 1; a produced element sits one level above the
/// deeper of its two ingredients, minimized over its recipes. Elements with no
/// recipe chain back to the base elements receive no tier and are treated as
/// unreachable by every search strategy.
///
/// The tier map doubles as the cycle breaker: a recipe is only ever expanded
/// when both ingredient tiers are strictly below the result's tier, so
/// self-referential and mutually recursive recipes are skipped by
/// construction.
#[derive(Debug, Clone, Default)]
pub struct TierMap {
    tiers: AHashMap<String, u32>,
}

impl TierMap {
    /// Computes tiers for every element reachable from the catalog's base
    /// elements via layered frontier propagation.
    pub fn assign(catalog: &Catalog) -> Self {
        let mut tiers: AHashMap<String, u32> = AHashMap::new();
        let mut processed: AHashSet<String> = AHashSet::new();
        let mut queue: VecDeque<String> = VecDeque::new();

        for base in catalog.base_elements() {
            tiers.insert(base.clone(), 1);
            processed.insert(base.clone());
            queue.push_back(base.clone());
        }

        while let Some(current) = queue.pop_front() {
            let Some(current_tier) = tiers.get(&current).copied() else {
                continue;
            };
            for (result, recipes) in catalog.iter() {
                if processed.contains(result) {
                    continue;
                }
                let mut reached = false;
                for recipe in recipes {
                    let Some(other) = recipe.other_ingredient(&current) else {
                        continue;
                    };
                    let Some(other_tier) = tiers.get(other).copied() else {
                        continue;
                    };
                    let candidate = current_tier.max(other_tier) + 1;
                    if tiers.get(result).is_none_or(|&existing| candidate < existing) {
                        tiers.insert(result.to_string(), candidate);
                        queue.push_back(result.to_string());
                    }
                    reached = true;
                }
                if reached {
                    processed.insert(result.to_string());
                }
            }
        }

        Self { tiers }
    }

    pub fn get(&self, element: &str) -> Option<u32> {
        self.tiers.get(element).copied()
    }

    /// Whether the element is reachable from the base elements.
    pub fn is_tiered(&self, element: &str) -> bool {
        self.tiers.contains_key(element)
    }

    /// The tier gate: true when both ingredients are tiered strictly below
    /// the element the recipe is being expanded for. Recipes failing the gate
    /// are skipped for the remainder of a search.
    pub fn permits(&self, result: &str, recipe: &Recipe) -> bool {
        let Some(result_tier) = self.get(result) else {
            return false;
        };
        match (self.get(&recipe.first), self.get(&recipe.second)) {
            (Some(first), Some(second)) => first < result_tier && second < result_tier,
            _ => false,
        }
    }

    pub fn len(&self) -> usize {
        self.tiers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiers.is_empty()
    }
}
