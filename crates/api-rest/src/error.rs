use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use tonic::{Code, Status};

use crate::models::ErrorBody;

/// Errors surfaced by gateway handlers.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Todo not found")]
    NotFound,
    #[error("{0}")]
    BadRequest(String),
    #[error("gRPC error: {}", .0.message())]
    Upstream(Status),
    /// The request itself could not be extracted; keeps axum's status code.
    #[error("{detail}")]
    Rejected { status: StatusCode, detail: String },
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::Rejected {
            status: rejection.status(),
            detail: rejection.body_text(),
        }
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        Self::Rejected {
            status: rejection.status(),
            detail: rejection.body_text(),
        }
    }
}

impl From<Status> for ApiError {
    fn from(status: Status) -> Self {
        match status.code() {
            Code::NotFound => Self::NotFound,
            Code::InvalidArgument => Self::BadRequest(status.message().to_string()),
            _ => Self::Upstream(status),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Rejected { status, .. } => *status,
            ApiError::Upstream(upstream) => {
                tracing::error!(
                    code = ?upstream.code(),
                    message = upstream.message(),
                    "gRPC error"
                );
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        (
            status,
            Json(ErrorBody {
                detail: self.to_string(),
            }),
        )
            .into_response()
    }
}

pub type ApiResult<T> = std::result::Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_codes_map_to_api_errors() {
        assert!(matches!(
            ApiError::from(Status::not_found("gone")),
            ApiError::NotFound
        ));
        assert!(matches!(
            ApiError::from(Status::invalid_argument("task cannot be empty")),
            ApiError::BadRequest(msg) if msg == "task cannot be empty"
        ));
        let upstream = ApiError::from(Status::unavailable("connection refused"));
        assert_eq!(upstream.to_string(), "gRPC error: connection refused");
    }

    #[test]
    fn upstream_error_is_internal_server_error() {
        let res = ApiError::Upstream(Status::internal("boom")).into_response();
        assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
