//! HTTP error type and the mapping from library errors onto status codes.

use axum::http::{header, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use thiserror::Error;

use crate::error::ForumError;

#[derive(Debug, Error)]
pub enum HttpError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// JSON error response body.
#[derive(Serialize)]
struct ErrorBody {
    error: String,
    status: u16,
}

impl HttpError {
    pub fn status(&self) -> StatusCode {
        match self {
            HttpError::BadRequest(_) => StatusCode::BAD_REQUEST,
            HttpError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            HttpError::Forbidden(_) => StatusCode::FORBIDDEN,
            HttpError::NotFound(_) => StatusCode::NOT_FOUND,
            HttpError::Conflict(_) => StatusCode::CONFLICT,
            HttpError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match self {
            HttpError::BadRequest(msg)
            | HttpError::Unauthorized(msg)
            | HttpError::Forbidden(msg)
            | HttpError::NotFound(msg)
            | HttpError::Conflict(msg)
            | HttpError::Internal(msg) => msg,
        };

        let body = ErrorBody {
            error: message,
            status: status.as_u16(),
        };
        let mut response = (status, axum::Json(body)).into_response();
        if status == StatusCode::UNAUTHORIZED {
            response
                .headers_mut()
                .insert(header::WWW_AUTHENTICATE, HeaderValue::from_static("Bearer"));
        }
        response
    }
}

impl From<ForumError> for HttpError {
    fn from(err: ForumError) -> Self {
        match err {
            ForumError::InvalidInput(msg) => HttpError::BadRequest(msg),
            ForumError::Unauthorized(msg) => HttpError::Unauthorized(msg),
            ForumError::Forbidden(msg) => HttpError::Forbidden(msg),
            ForumError::NotFound(msg) => HttpError::NotFound(msg),
            ForumError::Conflict(msg) => HttpError::Conflict(msg),
            ForumError::Db(e) => {
                tracing::error!("Storage failure: {}", e);
                HttpError::Internal("storage failure".to_string())
            }
            ForumError::Internal(msg) => {
                tracing::error!("Internal failure: {}", msg);
                HttpError::Internal(msg)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;

    #[test]
    fn forum_errors_map_to_statuses() {
        let cases = [
            (ForumError::InvalidInput("x".into()), StatusCode::BAD_REQUEST),
            (ForumError::Unauthorized("x".into()), StatusCode::UNAUTHORIZED),
            (ForumError::Forbidden("x".into()), StatusCode::FORBIDDEN),
            (ForumError::NotFound("x".into()), StatusCode::NOT_FOUND),
            (ForumError::Conflict("x".into()), StatusCode::CONFLICT),
            (
                ForumError::Internal("x".into()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];
        for (err, status) in cases {
            assert_eq!(HttpError::from(err).status(), status);
        }
    }

    #[tokio::test]
    async fn body_carries_message_and_status() {
        let response = HttpError::Conflict("taken".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::CONFLICT);
        let body = response.into_body().collect().await.unwrap().to_bytes();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["error"], "taken");
        assert_eq!(json["status"], 409);
    }

    #[test]
    fn unauthorized_challenges_for_bearer() {
        let response = HttpError::Unauthorized("no".to_string()).into_response();
        assert_eq!(
            response.headers().get(header::WWW_AUTHENTICATE).unwrap(),
            "Bearer"
        );
    }
}
