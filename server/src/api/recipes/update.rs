use crate::api::ErrorResponse;
use crate::service::ServiceError;
use crate::AppState;
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    Json,
};
use cookbook_core::{Recipe, UpdateRecipeContract};
use serde_json::Value;

#[utoipa::path(
    patch,
    path = "/recipes/{id}",
    tag = "recipes",
    params(
        ("id" = String, Path, description = "Recipe ID (UUID)")
    ),
    request_body = UpdateRecipeContract,
    responses(
        (status = 200, description = "Recipe updated successfully", body = Recipe),
        (status = 400, description = "Invalid update or malformed recipe ID", body = ErrorResponse),
        (status = 404, description = "Recipe not found", body = ErrorResponse)
    )
)]
pub async fn update_recipe(
    State(service): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<Recipe>, ServiceError> {
    let Json(body) = payload?;
    Ok(Json(service.update(&id, body).await?))
}
