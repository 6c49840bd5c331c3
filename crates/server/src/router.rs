use super::{handlers, state::AppState};
use axum::extract::DefaultBodyLimit;
use axum::{
    routing::{get, post},
    Router,
};
use fixrag::MAX_ATTACHMENT_BYTES;
use tower_http::trace::TraceLayer;

/// Creates the Axum router with all the application routes.
pub fn create_router(app_state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/health", get(handlers::health_check))
        .route(
            "/chat",
            // The per-attachment ceiling is enforced in the handler; the
            // transport limit leaves headroom for several attachments plus
            // form overhead.
            post(handlers::chat_handler).layer(DefaultBodyLimit::max(4 * MAX_ATTACHMENT_BYTES)),
        )
        .with_state(app_state)
        .layer(TraceLayer::new_for_http())
}
