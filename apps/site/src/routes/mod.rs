pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::posts::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/api/health", get(health::health_handler))
        .route(
            "/api/posts",
            get(handlers::handle_list_posts).post(handlers::handle_create_post),
        )
        .route(
            "/api/posts/generate",
            post(handlers::handle_generate_fields),
        )
        .route(
            "/api/posts/:slug",
            get(handlers::handle_get_post)
                .put(handlers::handle_update_post)
                .delete(handlers::handle_delete_post),
        )
        .with_state(state)
}
