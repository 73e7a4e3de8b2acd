use axum::{routing::get, Router};

use crate::config::AppConfig;
use crate::state::AppState;

mod dto;
pub mod handlers;
pub mod repo;

pub fn router(config: &AppConfig) -> Router<AppState> {
    let mut router = Router::new()
        .route("/", get(handlers::home))
        .route("/:slug", get(handlers::show_list));

    if config.multi_list {
        router = router.route(
            "/addlist",
            get(handlers::add_list_form).post(handlers::add_list),
        );
    }

    router
}
