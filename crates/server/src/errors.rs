use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use service::errors::ServiceError;
use tracing::error;

/// Uniform error payload: `{ "status": <u16>, "message": <text> }`.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self { status, message: message.into() }
    }

    /// Canonical mapping for CRUD handlers. Uniqueness violations on
    /// create/update land in the Bad Request bucket, with the
    /// constraint detail in the message.
    pub fn from_service(err: ServiceError) -> Self {
        match &err {
            ServiceError::Validation(_) | ServiceError::Conflict(_) => {
                Self::new(StatusCode::BAD_REQUEST, err.to_string())
            }
            ServiceError::NotFound(_) => Self::new(StatusCode::NOT_FOUND, err.to_string()),
            ServiceError::Db(_) => {
                error!(error = %err, "service failure");
                Self::new(StatusCode::INTERNAL_SERVER_ERROR, err.to_string())
            }
        }
    }

    /// Mapping for relation mutators: attaching an already-attached
    /// pair is a 409, not a 400.
    pub fn from_relation(err: ServiceError) -> Self {
        match &err {
            ServiceError::Conflict(_) => Self::new(StatusCode::CONFLICT, err.to_string()),
            _ => Self::from_service(err),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(serde_json::json!({
            "status": self.status.as_u16(),
            "message": self.message,
        }));
        (self.status, body).into_response()
    }
}
