use super::handlers;
use super::state::AppState;
use axum::{
    routing::{get, post},
    Router,
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Create the HTTP router with all routes
pub fn create_router(state: AppState) -> Router {
    let api = Router::new()
        // Health check
        .route("/health", get(handlers::health_check))
        // Session lifecycle
        .route("/session/create", post(handlers::create_session))
        .route("/session/validate", post(handlers::validate_session))
        .route("/session/destroy", post(handlers::destroy_session))
        // Transcription processing
        .route("/transcribe", post(handlers::process_transcription));

    Router::new()
        .nest("/api", api)
        // Browser frontend runs on a different origin
        .layer(CorsLayer::permissive())
        // Add tracing middleware for request logging
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
