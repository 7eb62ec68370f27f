pub mod recipes;

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::{Json, Router};
use cookbook_core::{FieldError, ValidationErrors};
use serde::Serialize;
use utoipa::{OpenApi, ToSchema};

use crate::service::ServiceError;
use crate::AppState;

/// Either a single message or one message per failed field. The first
/// element of a list is the one to show as a headline.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(untagged)]
pub enum ErrorMessage {
    One(String),
    Many(Vec<String>),
}

/// Shared error response used by all endpoints
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponse {
    pub message: ErrorMessage,
    pub status_code: u16,
    /// Present for validation failures.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<FieldError>>,
}

impl ErrorResponse {
    fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            message: ErrorMessage::One(message.into()),
            status_code: status.as_u16(),
            errors: None,
        }
    }

    fn validation(errors: ValidationErrors) -> Self {
        Self {
            message: ErrorMessage::Many(errors.messages()),
            status_code: StatusCode::BAD_REQUEST.as_u16(),
            errors: Some(errors.into_errors()),
        }
    }
}

impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        let message = self.to_string();
        let (status, body) = match self {
            ServiceError::Validation(errors) => {
                (StatusCode::BAD_REQUEST, ErrorResponse::validation(errors))
            }
            ServiceError::MalformedId => (
                StatusCode::BAD_REQUEST,
                ErrorResponse::new(StatusCode::BAD_REQUEST, message),
            ),
            ServiceError::NotFound => (
                StatusCode::NOT_FOUND,
                ErrorResponse::new(StatusCode::NOT_FOUND, message),
            ),
            ServiceError::Store(e) => {
                tracing::error!(error = %e, "Storage operation failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse::new(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error"),
                )
            }
        };
        (status, Json(body)).into_response()
    }
}

/// Unparseable JSON is reported in the same shape as a rule violation.
impl From<JsonRejection> for ServiceError {
    fn from(rejection: JsonRejection) -> Self {
        ServiceError::Validation(ValidationErrors::single("body", rejection.body_text()))
    }
}

/// All routes, without the outer tracing/CORS layers.
pub fn router() -> Router<AppState> {
    Router::new().nest("/recipes", recipes::router())
}

/// Generate the complete OpenAPI spec by merging all module specs
pub fn openapi() -> utoipa::openapi::OpenApi {
    #[derive(OpenApi)]
    #[openapi(
        info(title = "Cookbook API", description = "Create, browse and edit recipes"),
        components(schemas(ErrorResponse, ErrorMessage, FieldError))
    )]
    struct BaseApi;

    let mut spec = BaseApi::openapi();
    spec.merge(recipes::ApiDoc::openapi());
    spec
}
