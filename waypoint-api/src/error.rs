use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        FromRequest, FromRequestParts,
    },
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use waypoint_core::PlanningError;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Body or query string could not be decoded.
    #[error("{0}")]
    BadRequest(String),

    #[error(transparent)]
    Planning(#[from] PlanningError),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::Planning(err) if err.is_validation() => {
                (StatusCode::UNPROCESSABLE_ENTITY, err.to_string())
            }
            AppError::Planning(err) if err.is_not_found() => (StatusCode::NOT_FOUND, err.to_string()),
            AppError::Planning(err) => {
                tracing::error!(error = ?err, "Internal Server Error: {}", err);
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error".to_string())
            }
        };

        let body = Json(json!({
            "error": error_message,
        }));

        (status, body).into_response()
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::BadRequest(format!("invalid request body: {}", rejection.body_text()))
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError::BadRequest(format!("invalid query parameters: {}", rejection.body_text()))
    }
}

/// `Json` extractor whose rejections use the `{"error": ...}` envelope.
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct ApiJson<T>(pub T);

/// `Query` extractor whose rejections use the `{"error": ...}` envelope.
#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(AppError))]
pub struct ApiQuery<T>(pub T);

pub type ApiResult<T> = Result<T, AppError>;
