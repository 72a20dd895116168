use axum::{Router, routing::post};
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tower_http::{
    cors::{Any, CorsLayer},
    services::ServeDir,
};

use crate::notify::NOTIFY_DELAY;
use crate::transport::SearchBackend;

pub mod handlers;
pub mod models;

pub struct AppState<B> {
    pub backend: Arc<B>,
    pub notify_delay: Duration,
}

impl<B> AppState<B> {
    pub fn new(backend: B) -> AppState<B> {
        AppState {
            backend: Arc::new(backend),
            notify_delay: NOTIFY_DELAY,
        }
    }
}

pub fn create_router<B>(state: Arc<AppState<B>>, static_dir: impl AsRef<Path>) -> Router
where
    B: SearchBackend + 'static,
{
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // API routes
        .route("/api/search", post(handlers::search_handler::<B>))
        .with_state(state)
        // Static file serving for the UI
        .fallback_service(ServeDir::new(static_dir))
        .layer(cors)
}
