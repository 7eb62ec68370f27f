pub mod create;
pub mod delete;
pub mod get;
pub mod list;
pub mod update;

use crate::AppState;
use axum::routing::get;
use axum::Router;
use cookbook_core::{
    Category, CreateRecipeContract, Difficulty, DurationUnit, Ingredient, Recipe, Step,
    TemperatureUnit, UpdateRecipeContract,
};
use utoipa::OpenApi;

/// Returns the router for /recipes endpoints (mounted at /recipes)
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list::list_recipes).post(create::create_recipe))
        .route(
            "/{id}",
            get(get::get_recipe)
                .patch(update::update_recipe)
                .delete(delete::delete_recipe),
        )
}

#[derive(OpenApi)]
#[openapi(
    paths(
        create::create_recipe,
        list::list_recipes,
        get::get_recipe,
        update::update_recipe,
        delete::delete_recipe,
    ),
    components(schemas(
        CreateRecipeContract,
        UpdateRecipeContract,
        Recipe,
        Ingredient,
        Step,
        Category,
        Difficulty,
        DurationUnit,
        TemperatureUnit,
    ))
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use crate::api;
    use crate::service::RecipesService;
    use crate::store::MemoryRecipeStore;
    use axum::body::Body;
    use axum::http::{header, Method, Request, StatusCode};
    use axum::Router;
    use http_body_util::BodyExt;
    use serde_json::{json, Value};
    use std::sync::Arc;
    use tower::ServiceExt;
    use uuid::Uuid;

    fn app() -> (Router, Arc<MemoryRecipeStore>) {
        let store = Arc::new(MemoryRecipeStore::new());
        let service = Arc::new(RecipesService::new(store.clone()));
        (api::router().with_state(service), store)
    }

    async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let mut request = Request::builder().method(method).uri(uri);
        let body = match body {
            Some(body) => {
                request = request.header(header::CONTENT_TYPE, "application/json");
                Body::from(body.to_string())
            }
            None => Body::empty(),
        };
        let response = app
            .clone()
            .oneshot(request.body(body).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, json)
    }

    fn tarte() -> Value {
        json!({
            "title": "Tarte aux pommes",
            "description": "Une tarte classique",
            "ingredients": [{ "name": "Pommes", "quantity": 4, "unit": "pièces" }],
            "steps": [{ "order": 1, "instruction": "Éplucher les pommes" }],
            "category": "dessert"
        })
    }

    #[tokio::test]
    async fn test_create_then_get() {
        let (app, _) = app();
        let (status, created) = send(&app, Method::POST, "/recipes", Some(tarte())).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(created["cookTime"], 0.0);
        assert_eq!(created["servings"], 4);
        assert_eq!(created["steps"][0]["order"], 1);

        let id = created["id"].as_str().unwrap();
        let (status, fetched) = send(&app, Method::GET, &format!("/recipes/{}", id), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(fetched["title"], "Tarte aux pommes");
        assert_eq!(fetched["category"], "dessert");
    }

    #[tokio::test]
    async fn test_create_invalid_returns_field_messages() {
        let (app, store) = app();
        let mut body = tarte();
        body["title"] = json!("");
        body["servings"] = json!(101);
        let (status, error) = send(&app, Method::POST, "/recipes", Some(body)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(error["statusCode"], 400);
        let messages = error["message"].as_array().unwrap();
        assert_eq!(messages[0], "title must not be empty");
        assert_eq!(messages[1], "servings must not be greater than 100");
        assert_eq!(error["errors"][1]["path"], "servings");
        assert_eq!(store.len(), 0);
    }

    #[tokio::test]
    async fn test_create_unparseable_body() {
        let (app, store) = app();
        let request = Request::builder()
            .method(Method::POST)
            .uri("/recipes")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from("{ not json"))
            .unwrap();
        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(store.calls(), 0);
    }

    #[tokio::test]
    async fn test_get_malformed_id() {
        let (app, store) = app();
        let (status, error) = send(&app, Method::GET, "/recipes/not-a-valid-id", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(error["message"], "Invalid recipe ID format");
        assert_eq!(store.calls(), 0);
    }

    #[tokio::test]
    async fn test_get_absent_id() {
        let (app, _) = app();
        let uri = format!("/recipes/{}", Uuid::new_v4());
        let (status, error) = send(&app, Method::GET, &uri, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(error["message"], "Recipe not found");
        assert_eq!(error["statusCode"], 404);
    }

    #[tokio::test]
    async fn test_list_with_category_filter() {
        let (app, _) = app();
        send(&app, Method::POST, "/recipes", Some(tarte())).await;
        let mut soup = tarte();
        soup["title"] = json!("Velouté");
        soup["category"] = json!("starter");
        send(&app, Method::POST, "/recipes", Some(soup)).await;

        let (status, all) = send(&app, Method::GET, "/recipes", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(all.as_array().unwrap().len(), 2);

        let (_, starters) = send(&app, Method::GET, "/recipes?category=starter", None).await;
        let starters = starters.as_array().unwrap();
        assert_eq!(starters.len(), 1);
        assert_eq!(starters[0]["title"], "Velouté");

        let (status, _) = send(&app, Method::GET, "/recipes?category=brunch", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_patch_updates_and_rederives() {
        let (app, _) = app();
        let (_, created) = send(&app, Method::POST, "/recipes", Some(tarte())).await;
        let uri = format!("/recipes/{}", created["id"].as_str().unwrap());

        let patch = json!({
            "servings": 6,
            "steps": [
                { "order": 1, "instruction": "Éplucher", "duration": 10, "durationUnit": "min" },
                { "order": 2, "instruction": "Cuire", "duration": 35, "durationUnit": "min",
                  "temperature": 180, "temperatureUnit": "C" }
            ]
        });
        let (status, updated) = send(&app, Method::PATCH, &uri, Some(patch)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(updated["servings"], 6);
        assert_eq!(updated["cookTime"], 45.0);
        assert_eq!(updated["title"], "Tarte aux pommes");
    }

    #[tokio::test]
    async fn test_patch_absent_id_creates_nothing() {
        let (app, store) = app();
        let uri = format!("/recipes/{}", Uuid::new_v4());
        let (status, _) = send(&app, Method::PATCH, &uri, Some(json!({ "title": "Autre" }))).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(store.len(), 0);
    }

    #[tokio::test]
    async fn test_delete_then_get() {
        let (app, _) = app();
        let (_, created) = send(&app, Method::POST, "/recipes", Some(tarte())).await;
        let uri = format!("/recipes/{}", created["id"].as_str().unwrap());

        let (status, deleted) = send(&app, Method::DELETE, &uri, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(deleted["id"], created["id"]);

        let (status, _) = send(&app, Method::GET, &uri, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_storage_failure_is_opaque_500() {
        let (app, store) = app();
        store.fail();

        let (status, error) = send(&app, Method::GET, "/recipes", None).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(error["message"], "Internal server error");
        assert_eq!(error["statusCode"], 500);
        assert!(error.get("errors").is_none());
        let body = error.to_string();
        assert!(!body.contains("brunch"));
        assert!(!body.contains("inconsistent"));

        let (status, _) = send(&app, Method::POST, "/recipes", Some(tarte())).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_openapi_lists_recipe_paths() {
        let spec = api::openapi();
        assert!(spec.paths.paths.contains_key("/recipes"));
        assert!(spec.paths.paths.contains_key("/recipes/{id}"));
    }
}
