use crate::api::ErrorResponse;
use crate::service::ServiceError;
use crate::AppState;
use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use cookbook_core::{CreateRecipeContract, Recipe};
use serde_json::Value;

#[utoipa::path(
    post,
    path = "/recipes",
    tag = "recipes",
    request_body = CreateRecipeContract,
    responses(
        (status = 201, description = "Recipe created successfully", body = Recipe),
        (status = 400, description = "Invalid recipe", body = ErrorResponse)
    )
)]
pub async fn create_recipe(
    State(service): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<impl IntoResponse, ServiceError> {
    let Json(body) = payload?;
    let recipe = service.create(body).await?;
    Ok((StatusCode::CREATED, Json(recipe)))
}
