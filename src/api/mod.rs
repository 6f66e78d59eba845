use std::sync::Arc;

use axum::Router;
use tower_http::trace::TraceLayer;

use crate::upstream::CompletionProvider;

pub mod cors;
pub mod handler;
pub mod request;

#[derive(Clone)]
pub struct AppState {
    /// Upstream completion service, `None` when no API key is configured
    pub provider: Option<Arc<dyn CompletionProvider>>,
}

/// Serves the evaluation handler on every path and method.
pub fn router(state: AppState) -> Router {
    Router::new()
        .fallback(handler::handle_evaluation)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
