use axum::{routing::get, Router};

use crate::config::AppConfig;
use crate::state::AppState;

mod dto;
pub mod handlers;
pub mod oauth;
pub mod password;
pub mod repo;
pub mod session;
pub mod strategy;

pub fn router(config: &AppConfig) -> Router<AppState> {
    let mut router = Router::new()
        .route("/login", get(handlers::login_form).post(handlers::login))
        .route(
            "/register",
            get(handlers::register_form).post(handlers::register),
        )
        .route("/logout", get(handlers::logout));

    // local-auth-only deployments do not expose the Google routes
    if config.google.is_some() {
        router = router
            .route("/auth/google", get(handlers::google_login))
            .route("/auth/google/callback", get(handlers::google_callback));
    }

    router
}
