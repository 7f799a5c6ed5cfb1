use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use database::error::StoreError;
use serde_json::json;

/// Request-layer error. Store outcomes map onto HTTP statuses here; the
/// handlers only ever bubble these up with `?`.
#[derive(Debug)]
pub enum ApiError {
    Unauthorized,
    Forbidden,
    Store(StoreError),
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        Self::Store(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            Self::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                "authentication required".to_owned(),
            ),
            Self::Forbidden => (StatusCode::FORBIDDEN, "insufficient permissions".to_owned()),
            Self::Store(err) => match err {
                StoreError::NotFound { .. } => (StatusCode::NOT_FOUND, err.to_string()),
                StoreError::DuplicateKey { .. } | StoreError::HasDependents { .. } => {
                    (StatusCode::CONFLICT, err.to_string())
                }
                StoreError::MissingReference { .. } | StoreError::ReferenceMismatch => {
                    (StatusCode::UNPROCESSABLE_ENTITY, err.to_string())
                }
                StoreError::Validation(_) => (StatusCode::BAD_REQUEST, err.to_string()),
                StoreError::Db(db_err) => {
                    log::error!("storage failure: {db_err}");
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "internal server error".to_owned(),
                    )
                }
            },
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}
