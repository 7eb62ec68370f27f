//! Persistence boundary for recipe documents.
//!
//! The service talks to a [`RecipeStore`]; production uses PostgreSQL, tests
//! swap in an in-memory store.

#[cfg(test)]
mod memory;
mod postgres;

#[cfg(test)]
pub use memory::MemoryRecipeStore;
pub use postgres::PgRecipeStore;

use async_trait::async_trait;
use cookbook_core::{Category, Difficulty, Ingredient, Recipe, Step};
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Database connection failed: {0}")]
    Pool(#[from] diesel::r2d2::PoolError),

    #[error("Query failed: {0}")]
    Query(#[from] diesel::result::Error),

    #[error("Stored document could not be decoded: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Stored document is inconsistent: {0}")]
    Corrupt(String),
}

/// A validated recipe with its derived and defaulted fields filled in.
#[derive(Debug, Clone, PartialEq)]
pub struct NewRecipe {
    pub title: String,
    pub description: String,
    pub ingredients: Vec<Ingredient>,
    pub steps: Vec<Step>,
    pub servings: u32,
    pub prep_time: f64,
    pub cook_time: f64,
    pub difficulty: Option<Difficulty>,
    pub category: Option<Category>,
}

/// Fields to overwrite on an existing recipe. `None` leaves the stored value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecipePatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub ingredients: Option<Vec<Ingredient>>,
    pub steps: Option<Vec<Step>>,
    pub servings: Option<u32>,
    pub prep_time: Option<f64>,
    pub cook_time: Option<f64>,
    pub difficulty: Option<Difficulty>,
    pub category: Option<Category>,
}

/// Document-store operations needed by the recipes service.
///
/// Lookups by id return `Ok(None)` when nothing matches; errors are reserved
/// for storage failures.
#[async_trait]
pub trait RecipeStore: Send + Sync {
    async fn create(&self, recipe: NewRecipe) -> Result<Recipe, StoreError>;

    /// Newest first, optionally restricted to one category.
    async fn find_all(&self, category: Option<Category>) -> Result<Vec<Recipe>, StoreError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Recipe>, StoreError>;

    /// Applies the patch and returns the updated document.
    async fn update_by_id(&self, id: Uuid, patch: RecipePatch)
        -> Result<Option<Recipe>, StoreError>;

    /// Removes the document (with its ingredients and steps) and returns it.
    async fn delete_by_id(&self, id: Uuid) -> Result<Option<Recipe>, StoreError>;
}
