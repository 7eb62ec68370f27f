use crate::api::ErrorResponse;
use crate::service::ServiceError;
use crate::AppState;
use axum::{
    extract::{Query, State},
    Json,
};
use cookbook_core::Recipe;
use serde::Deserialize;
use utoipa::IntoParams;

#[derive(Debug, Deserialize, IntoParams)]
pub struct ListRecipesParams {
    /// Only return recipes in this category (e.g. `dessert`)
    pub category: Option<String>,
}

#[utoipa::path(
    get,
    path = "/recipes",
    tag = "recipes",
    params(ListRecipesParams),
    responses(
        (status = 200, description = "Recipes, newest first", body = Vec<Recipe>),
        (status = 400, description = "Unknown category", body = ErrorResponse)
    )
)]
pub async fn list_recipes(
    State(service): State<AppState>,
    Query(params): Query<ListRecipesParams>,
) -> Result<Json<Vec<Recipe>>, ServiceError> {
    let recipes = service.find_all(params.category.as_deref()).await?;
    Ok(Json(recipes))
}
