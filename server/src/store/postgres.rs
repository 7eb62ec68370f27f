use async_trait::async_trait;
use chrono::Utc;
use cookbook_core::{Category, Recipe};
use diesel::prelude::*;
use uuid::Uuid;

use super::{NewRecipe, RecipePatch, RecipeStore, StoreError};
use crate::db::DbPool;
use crate::models::{NewRecipeRow, RecipeChanges, RecipeRow};
use crate::schema::recipes;

/// Recipe documents in the `recipes` table, one row per recipe.
#[derive(Clone)]
pub struct PgRecipeStore {
    pool: DbPool,
}

impl PgRecipeStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Runs one query inside a `db.query` span so it is counted per request.
    fn run<T>(
        &self,
        operation: &'static str,
        query: impl FnOnce(&mut PgConnection) -> QueryResult<T>,
    ) -> Result<T, StoreError> {
        let mut conn = self.pool.get()?;
        let span = tracing::info_span!("db.query", operation);
        let result = span.in_scope(|| query(&mut conn))?;
        Ok(result)
    }
}

#[async_trait]
impl RecipeStore for PgRecipeStore {
    async fn create(&self, recipe: NewRecipe) -> Result<Recipe, StoreError> {
        let row = NewRecipeRow::from_new(&recipe)?;
        let inserted = self.run("insert_recipe", |conn| {
            diesel::insert_into(recipes::table)
                .values(&row)
                .returning(RecipeRow::as_returning())
                .get_result(conn)
        })?;
        inserted.try_into()
    }

    async fn find_all(&self, category: Option<Category>) -> Result<Vec<Recipe>, StoreError> {
        let rows = self.run("list_recipes", |conn| {
            let mut query = recipes::table
                .select(RecipeRow::as_select())
                .order(recipes::created_at.desc())
                .into_boxed();
            if let Some(category) = category {
                query = query.filter(recipes::category.eq(category.as_str()));
            }
            query.load(conn)
        })?;
        rows.into_iter().map(Recipe::try_from).collect()
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Recipe>, StoreError> {
        let row = self.run("get_recipe", |conn| {
            recipes::table
                .find(id)
                .select(RecipeRow::as_select())
                .first(conn)
                .optional()
        })?;
        row.map(Recipe::try_from).transpose()
    }

    async fn update_by_id(
        &self,
        id: Uuid,
        patch: RecipePatch,
    ) -> Result<Option<Recipe>, StoreError> {
        let changes = RecipeChanges::from_patch(&patch, Utc::now())?;
        let row = self.run("update_recipe", |conn| {
            diesel::update(recipes::table.find(id))
                .set(&changes)
                .returning(RecipeRow::as_returning())
                .get_result(conn)
                .optional()
        })?;
        row.map(Recipe::try_from).transpose()
    }

    async fn delete_by_id(&self, id: Uuid) -> Result<Option<Recipe>, StoreError> {
        let row = self.run("delete_recipe", |conn| {
            diesel::delete(recipes::table.find(id))
                .returning(RecipeRow::as_returning())
                .get_result(conn)
                .optional()
        })?;
        row.map(Recipe::try_from).transpose()
    }
}
