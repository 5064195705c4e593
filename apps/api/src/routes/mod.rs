pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::matching::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/v1/skills", get(handlers::handle_list_skills))
        .route("/api/v1/careers", get(handlers::handle_list_careers))
        .route(
            "/api/v1/careers/recommendations",
            post(handlers::handle_recommendations),
        )
        .route("/api/v1/careers/trends", get(handlers::handle_trends))
        .route("/api/v1/careers/:id", get(handlers::handle_get_career))
        .route(
            "/api/v1/careers/:id/skill-gap",
            post(handlers::handle_skill_gap),
        )
        .route(
            "/api/v1/catalog/reload",
            post(handlers::handle_reload_catalog),
        )
        .with_state(state)
}
