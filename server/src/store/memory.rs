//! In-memory recipe store for tests.
//!
//! Keeps documents in a map and counts every call so tests can assert that a
//! request was rejected before reaching storage. [`MemoryRecipeStore::fail`]
//! makes every later call return a storage error.

use async_trait::async_trait;
use chrono::Utc;
use cookbook_core::{Category, Recipe};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::RwLock;
use uuid::Uuid;

use super::{NewRecipe, RecipePatch, RecipeStore, StoreError};

#[derive(Debug, Default)]
pub struct MemoryRecipeStore {
    recipes: RwLock<HashMap<Uuid, Recipe>>,
    calls: AtomicUsize,
    failing: AtomicBool,
}

impl MemoryRecipeStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of store operations attempted so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn len(&self) -> usize {
        self.recipes.read().unwrap().len()
    }

    pub fn fail(&self) {
        self.failing.store(true, Ordering::SeqCst);
    }

    fn record_call(&self) -> Result<(), StoreError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.failing.load(Ordering::SeqCst) {
            return Err(StoreError::Corrupt(
                "recipe 42 has category \"brunch\"".to_string(),
            ));
        }
        Ok(())
    }
}

#[async_trait]
impl RecipeStore for MemoryRecipeStore {
    async fn create(&self, recipe: NewRecipe) -> Result<Recipe, StoreError> {
        self.record_call()?;
        let now = Utc::now();
        let stored = Recipe {
            id: Uuid::new_v4(),
            title: recipe.title,
            description: recipe.description,
            ingredients: recipe.ingredients,
            steps: recipe.steps,
            servings: recipe.servings,
            prep_time: recipe.prep_time,
            cook_time: recipe.cook_time,
            difficulty: recipe.difficulty,
            category: recipe.category,
            created_at: now,
            updated_at: now,
        };
        self.recipes
            .write()
            .unwrap()
            .insert(stored.id, stored.clone());
        Ok(stored)
    }

    async fn find_all(&self, category: Option<Category>) -> Result<Vec<Recipe>, StoreError> {
        self.record_call()?;
        let mut recipes: Vec<Recipe> = self
            .recipes
            .read()
            .unwrap()
            .values()
            .filter(|r| category.is_none() || r.category == category)
            .cloned()
            .collect();
        recipes.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(recipes)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Recipe>, StoreError> {
        self.record_call()?;
        Ok(self.recipes.read().unwrap().get(&id).cloned())
    }

    async fn update_by_id(
        &self,
        id: Uuid,
        patch: RecipePatch,
    ) -> Result<Option<Recipe>, StoreError> {
        self.record_call()?;
        let mut recipes = self.recipes.write().unwrap();
        let Some(recipe) = recipes.get_mut(&id) else {
            return Ok(None);
        };
        if let Some(title) = patch.title {
            recipe.title = title;
        }
        if let Some(description) = patch.description {
            recipe.description = description;
        }
        if let Some(ingredients) = patch.ingredients {
            recipe.ingredients = ingredients;
        }
        if let Some(steps) = patch.steps {
            recipe.steps = steps;
        }
        if let Some(servings) = patch.servings {
            recipe.servings = servings;
        }
        if let Some(prep_time) = patch.prep_time {
            recipe.prep_time = prep_time;
        }
        if let Some(cook_time) = patch.cook_time {
            recipe.cook_time = cook_time;
        }
        if patch.difficulty.is_some() {
            recipe.difficulty = patch.difficulty;
        }
        if patch.category.is_some() {
            recipe.category = patch.category;
        }
        recipe.updated_at = Utc::now();
        Ok(Some(recipe.clone()))
    }

    async fn delete_by_id(&self, id: Uuid) -> Result<Option<Recipe>, StoreError> {
        self.record_call()?;
        Ok(self.recipes.write().unwrap().remove(&id))
    }
}
