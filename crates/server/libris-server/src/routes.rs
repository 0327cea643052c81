use crate::handlers;
use crate::state::AppState;
use axum::{Router, routing::get};
use tower_http::trace::TraceLayer;

pub const RESOURCE: &str = "/auth/resource";
pub const CONNECT: &str = "/auth/connect";
pub const DISCONNECT: &str = "/auth/disconnect";
pub const CALLBACK: &str = "/auth/callback";

pub fn router(state: AppState) -> Router {
    Router::new()
        .route(RESOURCE, get(handlers::books))
        .route(CONNECT, get(handlers::connect))
        .route(DISCONNECT, get(handlers::disconnect))
        .route(CALLBACK, get(handlers::callback))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
