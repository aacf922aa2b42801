pub mod mcp_handlers;
pub mod status_handlers;

pub use mcp_handlers::{mcp_post_handler, mcp_usage_handler};
pub use status_handlers::{health_handler, not_found_handler};

use axum::{
    http::{header, Method},
    routing::get,
    Router,
};
use std::time::Duration;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::AppState;

/// Build the full application router: status routes, the MCP endpoint,
/// permissive CORS (the endpoint is meant for browser-based agents too),
/// request tracing, and a 404 fallback for anything else.
pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
        .max_age(Duration::from_secs(86400));

    Router::new()
        .route("/", get(status_handlers::health_handler))
        .route("/health", get(status_handlers::health_handler))
        .route(
            "/mcp",
            get(mcp_handlers::mcp_usage_handler).post(mcp_handlers::mcp_post_handler),
        )
        .fallback(status_handlers::not_found_handler)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
