use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::assistants::AssistantsApi;
use crate::config::Config;
use crate::run::RunDriver;

use super::handlers;

/// Shared handler state: the upstream client behind its trait seam, the run
/// driver built on top of it, and the startup configuration.
#[derive(Clone)]
pub struct AppState {
    pub api: Arc<dyn AssistantsApi>,
    pub driver: RunDriver,
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(config: Config, api: Arc<dyn AssistantsApi>) -> Self {
        Self {
            driver: RunDriver::new(api.clone()),
            api,
            config: Arc::new(config),
        }
    }
}

/// Builds the API router.
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(handlers::health))
        .route("/chat", post(handlers::chat))
        .route("/session", post(handlers::open_session))
        .route("/knowledge-bases", get(handlers::list_knowledge_bases))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
