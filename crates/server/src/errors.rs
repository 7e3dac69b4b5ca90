use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;
use tracing::error;

use service::auth::errors::AuthError;
use service::booking::errors::BookingError;
use service::errors::ServiceError;

/// JSON error body: `{"error": <title>, "detail": <message|null>}`
#[derive(Debug)]
pub struct JsonApiError {
    pub status: StatusCode,
    pub title: String,
    pub detail: Option<String>,
}

impl JsonApiError {
    pub fn new(status: StatusCode, title: impl Into<String>, detail: Option<String>) -> Self {
        Self { status, title: title.into(), detail }
    }

    pub fn bad_request(detail: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, "Bad Request", Some(detail.into()))
    }

    pub fn unauthorized(detail: impl Into<String>) -> Self {
        Self::new(StatusCode::UNAUTHORIZED, "Unauthorized", Some(detail.into()))
    }

    pub fn forbidden(detail: impl Into<String>) -> Self {
        Self::new(StatusCode::FORBIDDEN, "Forbidden", Some(detail.into()))
    }

    pub fn internal(detail: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error", Some(detail.into()))
    }
}

impl IntoResponse for JsonApiError {
    fn into_response(self) -> Response {
        // 5xx 只在服务端记录细节，不回传给客户端
        let detail = if self.status.is_server_error() {
            error!(status = %self.status, title = %self.title, detail = ?self.detail, "request failed");
            None
        } else {
            self.detail
        };
        (self.status, Json(serde_json::json!({"error": self.title, "detail": detail}))).into_response()
    }
}

impl From<AuthError> for JsonApiError {
    fn from(e: AuthError) -> Self {
        match e {
            AuthError::Validation(msg) => JsonApiError::new(StatusCode::BAD_REQUEST, "Validation Error", Some(msg)),
            AuthError::Conflict => JsonApiError::new(StatusCode::BAD_REQUEST, "Email already registered", None),
            AuthError::NotFound => JsonApiError::new(StatusCode::NOT_FOUND, "User not found", None),
            AuthError::Unauthorized => JsonApiError::unauthorized("invalid email or password"),
            AuthError::TokenError(msg) => JsonApiError::unauthorized(msg),
            AuthError::HashError(_) | AuthError::Repository(_) => JsonApiError::internal(e.to_string()),
        }
    }
}

impl From<BookingError> for JsonApiError {
    fn from(e: BookingError) -> Self {
        let detail = Some(e.to_string());
        match e {
            BookingError::MissingFields(_) => JsonApiError::new(StatusCode::BAD_REQUEST, "Missing required fields", detail),
            BookingError::Validation(_) => JsonApiError::new(StatusCode::BAD_REQUEST, "Validation Error", detail),
            BookingError::InvalidDateRange => JsonApiError::new(StatusCode::BAD_REQUEST, "Invalid date range", detail),
            BookingError::CarNotFound(_) => JsonApiError::new(StatusCode::NOT_FOUND, "Car not found", detail),
            BookingError::CarUnavailable(_) => JsonApiError::new(StatusCode::BAD_REQUEST, "Car is not available", detail),
            BookingError::Repository(_) => JsonApiError::new(StatusCode::INTERNAL_SERVER_ERROR, "Booking failed", detail),
        }
    }
}

impl From<ServiceError> for JsonApiError {
    fn from(e: ServiceError) -> Self {
        use models::errors::ModelError;
        match e {
            ServiceError::Validation(msg) | ServiceError::Model(ModelError::Validation(msg)) => {
                JsonApiError::new(StatusCode::BAD_REQUEST, "Validation Error", Some(msg))
            }
            ServiceError::NotFound(msg) | ServiceError::Model(ModelError::NotFound(msg)) => {
                JsonApiError::new(StatusCode::NOT_FOUND, "Not Found", Some(msg))
            }
            ServiceError::Db(_) | ServiceError::Model(ModelError::Db(_)) => JsonApiError::internal(e.to_string()),
        }
    }
}

impl From<JsonRejection> for JsonApiError {
    fn from(e: JsonRejection) -> Self {
        JsonApiError::new(StatusCode::BAD_REQUEST, "Invalid JSON body", Some(e.body_text()))
    }
}

impl From<QueryRejection> for JsonApiError {
    fn from(e: QueryRejection) -> Self {
        JsonApiError::new(StatusCode::BAD_REQUEST, "Invalid query parameters", Some(e.body_text()))
    }
}

impl From<PathRejection> for JsonApiError {
    fn from(e: PathRejection) -> Self {
        JsonApiError::new(StatusCode::BAD_REQUEST, "Invalid ID format", Some(e.body_text()))
    }
}

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    async fn body(resp: Response) -> serde_json::Value {
        let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn server_errors_hide_detail() {
        let resp = JsonApiError::internal("connection refused: 10.0.0.5").into_response();
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let v = body(resp).await;
        assert_eq!(v["error"], "Internal Server Error");
        assert!(v["detail"].is_null());
    }

    #[tokio::test]
    async fn booking_errors_map_to_statuses() {
        assert_eq!(JsonApiError::from(BookingError::InvalidDateRange).status, StatusCode::BAD_REQUEST);
        assert_eq!(JsonApiError::from(BookingError::CarUnavailable(1)).status, StatusCode::BAD_REQUEST);
        assert_eq!(JsonApiError::from(BookingError::CarNotFound(1)).status, StatusCode::NOT_FOUND);
        assert_eq!(JsonApiError::from(BookingError::Repository("x".into())).status, StatusCode::INTERNAL_SERVER_ERROR);
        let v = body(JsonApiError::from(BookingError::CarUnavailable(3)).into_response()).await;
        assert_eq!(v["error"], "Car is not available");
    }

    #[test]
    fn auth_and_service_errors_map_to_statuses() {
        assert_eq!(JsonApiError::from(AuthError::Conflict).status, StatusCode::BAD_REQUEST);
        assert_eq!(JsonApiError::from(AuthError::Unauthorized).status, StatusCode::UNAUTHORIZED);
        assert_eq!(JsonApiError::from(AuthError::Repository("db".into())).status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(JsonApiError::from(ServiceError::not_found("car")).status, StatusCode::NOT_FOUND);
        assert_eq!(
            JsonApiError::from(ServiceError::Model(models::errors::ModelError::Validation("bad".into()))).status,
            StatusCode::BAD_REQUEST
        );
    }
}
