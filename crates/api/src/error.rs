//! API error types with HTTP response mapping.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use domain::DomainError;
use repository::RepositoryError;

/// API-level error type that maps to HTTP responses.
///
/// The listing endpoints take no input, so every failure is a server
/// fault and answers `500`.
#[derive(Debug)]
pub enum ApiError {
    /// The repository failed (connectivity, dangling row, bad stored value).
    Repository(RepositoryError),
    /// An order graph was not fully loaded before mapping.
    Domain(DomainError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let message = match self {
            ApiError::Repository(err) => {
                tracing::error!(error = %err, "repository error");
                err.to_string()
            }
            ApiError::Domain(err) => {
                tracing::error!(error = %err, "domain error");
                err.to_string()
            }
        };

        let body = serde_json::json!({ "error": message });
        (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(body)).into_response()
    }
}

impl From<RepositoryError> for ApiError {
    fn from(err: RepositoryError) -> Self {
        ApiError::Repository(err)
    }
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        ApiError::Domain(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repository_errors_are_server_errors() {
        let err = ApiError::from(RepositoryError::NotFound {
            entity: "Member",
            id: "7".to_string(),
        });
        assert_eq!(
            err.into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn domain_errors_are_server_errors() {
        let err = ApiError::from(DomainError::UnresolvedReference {
            entity: "Delivery",
            id: "3".to_string(),
        });
        assert_eq!(
            err.into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
