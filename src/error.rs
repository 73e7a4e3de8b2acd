use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use tracing::error;

use crate::views;

/// Application-level failures. Expected outcomes (duplicate registration,
/// bad credentials) are usually mapped to redirects inside the handlers;
/// anything that reaches `IntoResponse` here still produces a page, so no
/// request is ever left without a response.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("username already registered")]
    DuplicateUser,

    #[error("invalid credentials")]
    InvalidCredentials,

    #[error("not found")]
    NotFound,

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("session error: {0}")]
    Session(#[from] tower_sessions::session::Error),

    #[error("password hash error")]
    PasswordHash,

    #[error("oauth exchange failed: {0}")]
    OAuthExchange(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::NotFound => {
                (StatusCode::NOT_FOUND, Html(views::error_page("Not found"))).into_response()
            }
            err => {
                error!(error = %err, "request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Html(views::error_page("Something went wrong")),
                )
                    .into_response()
            }
        }
    }
}
