use chrono::{DateTime, Utc};
use cookbook_core::{Category, Difficulty, Recipe};
use diesel::prelude::*;
use uuid::Uuid;

use crate::store::{NewRecipe, RecipePatch, StoreError};

/// A recipe document as stored: embedded lists live in JSONB columns.
#[derive(Queryable, Selectable, Debug)]
#[diesel(table_name = crate::schema::recipes)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct RecipeRow {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub ingredients: serde_json::Value,
    pub steps: serde_json::Value,
    pub servings: i32,
    pub prep_time: f64,
    pub cook_time: f64,
    pub difficulty: Option<String>,
    pub category: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TryFrom<RecipeRow> for Recipe {
    type Error = StoreError;

    fn try_from(row: RecipeRow) -> Result<Self, Self::Error> {
        let difficulty = row
            .difficulty
            .map(|code| {
                Difficulty::from_code(&code)
                    .ok_or_else(|| StoreError::Corrupt(format!("unknown difficulty {:?}", code)))
            })
            .transpose()?;
        let category = row
            .category
            .map(|code| {
                Category::from_code(&code)
                    .ok_or_else(|| StoreError::Corrupt(format!("unknown category {:?}", code)))
            })
            .transpose()?;
        let servings = u32::try_from(row.servings)
            .map_err(|_| StoreError::Corrupt(format!("negative servings {}", row.servings)))?;

        Ok(Recipe {
            id: row.id,
            title: row.title,
            description: row.description,
            ingredients: serde_json::from_value(row.ingredients)?,
            steps: serde_json::from_value(row.steps)?,
            servings,
            prep_time: row.prep_time,
            cook_time: row.cook_time,
            difficulty,
            category,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::recipes)]
pub struct NewRecipeRow<'a> {
    pub title: &'a str,
    pub description: &'a str,
    pub ingredients: serde_json::Value,
    pub steps: serde_json::Value,
    pub servings: i32,
    pub prep_time: f64,
    pub cook_time: f64,
    pub difficulty: Option<&'static str>,
    pub category: Option<&'static str>,
}

impl<'a> NewRecipeRow<'a> {
    pub fn from_new(recipe: &'a NewRecipe) -> Result<Self, StoreError> {
        Ok(Self {
            title: &recipe.title,
            description: &recipe.description,
            ingredients: serde_json::to_value(&recipe.ingredients)?,
            steps: serde_json::to_value(&recipe.steps)?,
            servings: to_column(recipe.servings)?,
            prep_time: recipe.prep_time,
            cook_time: recipe.cook_time,
            difficulty: recipe.difficulty.map(|d| d.as_str()),
            category: recipe.category.map(|c| c.as_str()),
        })
    }
}

/// Partial update. `None` columns are left as they are; `updated_at` is always
/// bumped so the changeset is never empty.
#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::recipes)]
pub struct RecipeChanges<'a> {
    pub title: Option<&'a str>,
    pub description: Option<&'a str>,
    pub ingredients: Option<serde_json::Value>,
    pub steps: Option<serde_json::Value>,
    pub servings: Option<i32>,
    pub prep_time: Option<f64>,
    pub cook_time: Option<f64>,
    pub difficulty: Option<&'static str>,
    pub category: Option<&'static str>,
    pub updated_at: DateTime<Utc>,
}

impl<'a> RecipeChanges<'a> {
    pub fn from_patch(patch: &'a RecipePatch, now: DateTime<Utc>) -> Result<Self, StoreError> {
        Ok(Self {
            title: patch.title.as_deref(),
            description: patch.description.as_deref(),
            ingredients: patch
                .ingredients
                .as_ref()
                .map(serde_json::to_value)
                .transpose()?,
            steps: patch.steps.as_ref().map(serde_json::to_value).transpose()?,
            servings: patch.servings.map(to_column).transpose()?,
            prep_time: patch.prep_time,
            cook_time: patch.cook_time,
            difficulty: patch.difficulty.map(|d| d.as_str()),
            category: patch.category.map(|c| c.as_str()),
            updated_at: now,
        })
    }
}

fn to_column(servings: u32) -> Result<i32, StoreError> {
    i32::try_from(servings)
        .map_err(|_| StoreError::Corrupt(format!("servings {} out of range", servings)))
}
