use thiserror::Error;

/// Errors that can occur while assembling or converting a recipe catalog.
#[derive(Error, Debug, Clone)]
pub enum CatalogError {
    #[error("Recipe '{first} + {second} => {result}' contains an empty element name")]
    EmptyElementName {
        first: String,
        second: String,
        result: String,
    },

    #[error("Recipe '{first} + {second} => {result}' lists its own result as an ingredient")]
    SelfReferential {
        first: String,
        second: String,
        result: String,
    },

    #[error("Base element '{0}' cannot have recipes of its own")]
    BaseElementWithRecipe(String),

    #[error("Invalid custom data: {0}")]
    ValidationError(String),
}

/// Errors that can occur when realizing a recipe tree from a found-map.
#[derive(Error, Debug, Clone)]
pub enum TreeError {
    #[error("Element '{0}' is neither a base element nor resolved in the found-map")]
    UnresolvedElement(String),
}
