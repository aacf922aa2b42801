pub mod config;
pub mod error;
pub mod handlers;
pub mod mcp;
pub mod services;

// Make test_utils available for both unit tests and integration tests
pub mod test_utils;

use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub dispatcher: Arc<mcp::dispatcher::Dispatcher>,
    pub environment: String,
}
