use axum::{
    response::{Html, IntoResponse, Response, Redirect},
    http::StatusCode,
};
use crate::errors::{AppError, RepositoryError};
use crate::pages;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            // Authentication errors send the caller back to the login form
            AppError::Auth(msg) => {
                return Redirect::to(&format!("/login?error={}", urlencoding::encode(msg)))
                    .into_response();
            }

            AppError::Repository(RepositoryError::NotFound(_)) => StatusCode::NOT_FOUND,
            AppError::Repository(RepositoryError::Conflict(_)) => StatusCode::CONFLICT,
            AppError::Repository(RepositoryError::Timeout(_)) => StatusCode::GATEWAY_TIMEOUT,
            AppError::Form(_) => StatusCode::BAD_REQUEST,

            AppError::Repository(_) | AppError::Session(_) | AppError::Template(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        if status.is_server_error() {
            tracing::error!("Request failed: {}", self);
        } else {
            tracing::debug!("Request rejected: {}", self);
        }

        (status, Html(pages::fail_page(&self.to_string()))).into_response()
    }
}
