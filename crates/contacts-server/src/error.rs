//! Error types for the contacts server.
//!
//! [`AppError`] unifies all failure modes and implements
//! [`axum::response::IntoResponse`] as the application's error boundary, so
//! handlers can return `Result<…, AppError>` directly.

use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use contacts_models::ModelError;

use crate::store::StoreError;
use crate::view;

/// Errors that can occur while serving a route.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// The contact store failed or the contact does not exist.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// A path or form value could not be turned into a model type.
    #[error(transparent)]
    Model(#[from] ModelError),
}

impl AppError {
    /// HTTP status for this error.
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Store(StoreError::NotFound(_)) => StatusCode::NOT_FOUND,
            Self::Model(_) => StatusCode::BAD_REQUEST,
            Self::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = self.to_string();

        if status.is_server_error() {
            tracing::error!(%status, error = %message, "request failed");
        } else {
            tracing::warn!(%status, error = %message, "request rejected");
        }

        (status, Html(view::render_error_page(status, &message))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use contacts_models::ContactId;

    use super::*;

    #[test]
    fn not_found_maps_to_404() {
        let err = AppError::from(StoreError::NotFound(ContactId::generate()));
        assert_eq!(err.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn invalid_id_maps_to_400() {
        let err = AppError::from(ContactId::parse("").unwrap_err());
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn io_failure_maps_to_500() {
        let err = AppError::from(StoreError::Io(std::io::Error::other("disk full")));
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.to_string(), "I/O error: disk full");
    }

    #[test]
    fn response_carries_status() {
        let response = AppError::from(StoreError::NotFound(ContactId::generate())).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
