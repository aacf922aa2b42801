pub mod test_helpers {
    use std::sync::Arc;

    use crate::mcp::dispatcher::Dispatcher;
    use crate::services::bdl_client::BdlClient;
    use crate::{handlers, AppState};

    /// Dispatcher wired against an arbitrary upstream base URL, typically
    /// a wiremock server.
    pub fn test_dispatcher(base_url: &str) -> Dispatcher {
        Dispatcher::new(BdlClient::new(base_url.to_string(), "pl".to_string()))
    }

    /// Full application router against an arbitrary upstream base URL.
    pub fn test_router(base_url: &str) -> axum::Router {
        let state = AppState {
            dispatcher: Arc::new(test_dispatcher(base_url)),
            environment: "test".to_string(),
        };
        handlers::router(state)
    }
}
