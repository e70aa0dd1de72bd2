//! REST transport for the user registry.

pub mod dto;
pub mod error;
pub mod handlers;

use application::UserApp;
use axum::{routing::get, Router};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

#[derive(Clone)]
pub struct AppState {
    pub user_app: Arc<UserApp>,
}

pub fn router(user_app: Arc<UserApp>) -> Router {
    let app_state = AppState { user_app };

    Router::new()
        .route(
            "/api/users",
            get(handlers::get_all_users).post(handlers::create_user),
        )
        .route("/api/users/count", get(handlers::get_user_count))
        .route(
            "/api/users/:id",
            get(handlers::get_user_by_id)
                .put(handlers::update_user)
                .delete(handlers::delete_user),
        )
        .route("/health", get(handlers::health_check))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(app_state)
}
