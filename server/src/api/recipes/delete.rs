use crate::api::ErrorResponse;
use crate::service::ServiceError;
use crate::AppState;
use axum::{
    extract::{Path, State},
    Json,
};
use cookbook_core::Recipe;

#[utoipa::path(
    delete,
    path = "/recipes/{id}",
    tag = "recipes",
    params(
        ("id" = String, Path, description = "Recipe ID (UUID)")
    ),
    responses(
        (status = 200, description = "Deleted recipe", body = Recipe),
        (status = 400, description = "Malformed recipe ID", body = ErrorResponse),
        (status = 404, description = "Recipe not found", body = ErrorResponse)
    )
)]
pub async fn delete_recipe(
    State(service): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Recipe>, ServiceError> {
    Ok(Json(service.remove(&id).await?))
}
