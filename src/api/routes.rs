use axum::{
    middleware,
    routing::{get, post, put},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use super::handlers;
use super::AppState;
use crate::middleware::{make_span_with_request_id, request_id_middleware};

/// Creates the main API router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health_check))
        .nest("/api", api_routes())
        .layer(TraceLayer::new_for_http().make_span_with(make_span_with_request_id))
        .layer(middleware::from_fn(request_id_middleware))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Routes under /api
fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/upstream/health", get(handlers::upstream_health))
        // Catalog
        .route("/items", get(handlers::list_items))
        .route("/items/:id", get(handlers::get_item))
        .route("/users", get(handlers::get_users))
        // Home page
        .route("/home", get(handlers::get_home))
        .route("/home/user", put(handlers::select_user))
        .route("/home/refresh", post(handlers::refresh_home))
        // Onboarding
        .route("/cold-start", post(handlers::submit_cold_start))
        .route("/cold-start/options", get(handlers::cold_start_options))
}
