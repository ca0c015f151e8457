use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use tracing::error;

/// Error taxonomy for the HTTP boundary. Every error converts to a JSON body
/// with a human-readable `message`; unexpected errors additionally carry the
/// underlying `detail`.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    Conflict(String),

    /// Login failure. The message is deliberately identical for unknown email
    /// and wrong password so responses cannot be used to enumerate accounts.
    #[error("invalid credentials")]
    InvalidCredentials,

    /// Guard rejection: missing or bad bearer token.
    #[error("{0}")]
    Unauthorized(&'static str),

    #[error("{0}")]
    NotFound(String),

    #[error(transparent)]
    Unexpected(#[from] anyhow::Error),
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            // This API reports duplicates and bad credentials as 400, not
            // 409/401.
            ApiError::Validation(_) | ApiError::Conflict(_) | ApiError::InvalidCredentials => {
                StatusCode::BAD_REQUEST
            }
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Unexpected(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match &self {
            ApiError::Unexpected(e) => {
                error!(error = %e, "unexpected error");
                json!({ "message": "unexpected error", "detail": e.to_string() })
            }
            other => json!({ "message": other.to_string() }),
        };
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn respond(err: ApiError) -> (StatusCode, serde_json::Value) {
        let response = err.into_response();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn validation_and_conflict_are_bad_request() {
        let (status, body) = respond(ApiError::Validation("all fields are required".into())).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "all fields are required");

        let (status, body) = respond(ApiError::Conflict("user already exists".into())).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "user already exists");
    }

    #[tokio::test]
    async fn invalid_credentials_is_bad_request_with_fixed_message() {
        let (status, body) = respond(ApiError::InvalidCredentials).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "invalid credentials");
    }

    #[tokio::test]
    async fn unauthorized_and_not_found_statuses() {
        let (status, body) = respond(ApiError::Unauthorized("no token")).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["message"], "no token");

        let (status, body) = respond(ApiError::NotFound("product not found".into())).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["message"], "product not found");
    }

    #[tokio::test]
    async fn unexpected_carries_detail() {
        let (status, body) = respond(anyhow::anyhow!("pool timed out").into()).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["message"], "unexpected error");
        assert_eq!(body["detail"], "pool timed out");
    }
}
