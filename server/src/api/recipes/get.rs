use crate::api::ErrorResponse;
use crate::service::ServiceError;
use crate::AppState;
use axum::{
    extract::{Path, State},
    Json,
};
use cookbook_core::Recipe;

#[utoipa::path(
    get,
    path = "/recipes/{id}",
    tag = "recipes",
    params(
        ("id" = String, Path, description = "Recipe ID (UUID)")
    ),
    responses(
        (status = 200, description = "Recipe details", body = Recipe),
        (status = 400, description = "Malformed recipe ID", body = ErrorResponse),
        (status = 404, description = "Recipe not found", body = ErrorResponse)
    )
)]
pub async fn get_recipe(
    State(service): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Recipe>, ServiceError> {
    Ok(Json(service.find_one(&id).await?))
}
