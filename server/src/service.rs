//! Recipe use cases: validate -> derive -> persist.
//!
//! Request bodies arrive as raw JSON and are checked against the shared
//! schema before they are turned into typed contracts, so every rule
//! violation is reported with its field path.

use cookbook_core::derived::cook_time;
use cookbook_core::schema::{self, RECIPE};
use cookbook_core::{
    Category, CreateRecipeContract, Recipe, UpdateRecipeContract, ValidationErrors,
    DEFAULT_SERVINGS,
};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::Arc;
use thiserror::Error;
use uuid::Uuid;

use crate::store::{NewRecipe, RecipePatch, RecipeStore, StoreError};

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error(transparent)]
    Validation(#[from] ValidationErrors),

    #[error("Invalid recipe ID format")]
    MalformedId,

    #[error("Recipe not found")]
    NotFound,

    #[error(transparent)]
    Store(#[from] StoreError),
}

pub struct RecipesService {
    store: Arc<dyn RecipeStore>,
}

impl RecipesService {
    pub fn new(store: Arc<dyn RecipeStore>) -> Self {
        Self { store }
    }

    pub async fn create(&self, body: Value) -> Result<Recipe, ServiceError> {
        schema::validate(&RECIPE, &body)?;
        let contract: CreateRecipeContract = decode(body)?;
        let recipe = prepare_new(contract);
        let created = self.store.create(recipe).await?;
        tracing::info!(recipe_id = %created.id, "Created recipe");
        Ok(created)
    }

    /// All recipes, or only those in `category` when one is given.
    pub async fn find_all(&self, category: Option<&str>) -> Result<Vec<Recipe>, ServiceError> {
        let category = match category {
            None => None,
            Some(code) => Some(Category::from_code(code).ok_or_else(|| {
                ValidationErrors::single(
                    "category",
                    format!("must be one of: {}", Category::CODES.join(", ")),
                )
            })?),
        };
        Ok(self.store.find_all(category).await?)
    }

    pub async fn find_one(&self, id: &str) -> Result<Recipe, ServiceError> {
        let id = parse_id(id)?;
        self.store
            .find_by_id(id)
            .await?
            .ok_or(ServiceError::NotFound)
    }

    pub async fn update(&self, id: &str, body: Value) -> Result<Recipe, ServiceError> {
        let id = parse_id(id)?;
        schema::validate_partial(&RECIPE, &body)?;
        let contract: UpdateRecipeContract = decode(body)?;
        let patch = prepare_patch(contract);
        let updated = self
            .store
            .update_by_id(id, patch)
            .await?
            .ok_or(ServiceError::NotFound)?;
        tracing::info!(recipe_id = %updated.id, "Updated recipe");
        Ok(updated)
    }

    pub async fn remove(&self, id: &str) -> Result<Recipe, ServiceError> {
        let id = parse_id(id)?;
        let removed = self
            .store
            .delete_by_id(id)
            .await?
            .ok_or(ServiceError::NotFound)?;
        tracing::info!(recipe_id = %removed.id, "Deleted recipe");
        Ok(removed)
    }
}

/// Rejects identifiers the store could never match, before any lookup.
fn parse_id(id: &str) -> Result<Uuid, ServiceError> {
    Uuid::parse_str(id).map_err(|_| ServiceError::MalformedId)
}

/// The schema already vouched for the shape; this only fails on values serde
/// is stricter about (e.g. an `order` beyond `u32`).
fn decode<T: DeserializeOwned>(body: Value) -> Result<T, ValidationErrors> {
    serde_json::from_value(body).map_err(|e| ValidationErrors::single("body", e.to_string()))
}

fn prepare_new(contract: CreateRecipeContract) -> NewRecipe {
    let mut steps = contract.steps;
    steps.sort_by_key(|s| s.order);
    NewRecipe {
        title: contract.title.trim().to_string(),
        description: contract.description.trim().to_string(),
        cook_time: cook_time(&steps),
        ingredients: contract.ingredients,
        steps,
        servings: contract.servings.unwrap_or(DEFAULT_SERVINGS),
        prep_time: contract.prep_time.unwrap_or(0.0),
        difficulty: contract.difficulty,
        category: contract.category,
    }
}

/// New steps bring a new cook time; without them the stored one still holds.
fn prepare_patch(contract: UpdateRecipeContract) -> RecipePatch {
    let steps = contract.steps.map(|mut steps| {
        steps.sort_by_key(|s| s.order);
        steps
    });
    RecipePatch {
        title: contract.title.map(|t| t.trim().to_string()),
        description: contract.description.map(|d| d.trim().to_string()),
        ingredients: contract.ingredients,
        cook_time: steps.as_deref().map(cook_time),
        steps,
        servings: contract.servings,
        prep_time: contract.prep_time,
        difficulty: contract.difficulty,
        category: contract.category,
    }
}
