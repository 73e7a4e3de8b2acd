use axum::{routing::post, Router};

use crate::state::AppState;

mod dto;
pub mod handlers;
pub mod repo;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/add", post(handlers::add_item))
        .route("/edit", post(handlers::edit_item))
        .route("/delete", post(handlers::delete_item))
}
