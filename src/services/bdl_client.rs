//! HTTP client for the BDL statistics API
//!
//! One outbound GET per tool call, nothing else: no caching, no retry, no
//! timeout. A hung upstream call hangs that one reply; callers impose
//! their own timeout at the transport boundary.
//!
//! Upstream failures are not `Err` values here. Every call resolves to a
//! [`CallOutcome`] so the boundary contract stays explicit: the dispatcher
//! turns either arm into reply content.

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
use serde_json::{json, Value};

/// Result of one upstream call: the verbatim parsed JSON body, or a
/// described failure. Never retained past the request/response cycle.
#[derive(Debug, Clone)]
pub enum CallOutcome {
    Success(Value),
    UpstreamError {
        message: String,
        /// Present for HTTP error statuses, absent for transport failures.
        status_code: Option<u16>,
    },
}

impl CallOutcome {
    fn failure(message: String) -> Self {
        CallOutcome::UpstreamError {
            message,
            status_code: None,
        }
    }

    /// Reduce the outcome to the payload the reply content carries.
    pub fn into_payload(self) -> Value {
        match self {
            CallOutcome::Success(body) => body,
            CallOutcome::UpstreamError {
                message,
                status_code: Some(code),
            } => json!({ "error": message, "status_code": code }),
            CallOutcome::UpstreamError {
                message,
                status_code: None,
            } => json!({ "error": message }),
        }
    }
}

/// Thin GET client over the BDL API. Holds only immutable configuration;
/// `Clone` shares the underlying connection pool.
#[derive(Clone)]
pub struct BdlClient {
    client: reqwest::Client,
    base_url: String,
    default_lang: String,
}

impl BdlClient {
    pub fn new(base_url: String, default_lang: String) -> Self {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .user_agent(concat!("bdl-mcp-server/", env!("CARGO_PKG_VERSION")))
            .default_headers(headers)
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());

        BdlClient {
            client,
            base_url,
            default_lang,
        }
    }

    /// Issue one GET against `{base_url}{endpoint}` with the given query
    /// pairs.
    ///
    /// Pairs whose serialized value is the literal text `"undefined"` or
    /// `"null"` are dropped first; that cleans up accidentally-stringified
    /// absent values without filtering legitimate falsy ones like `0` or
    /// the empty string. `lang` (defaulted when the caller supplied none)
    /// and `format=json` are attached to every query.
    pub async fn request(&self, endpoint: &str, query: Vec<(String, String)>) -> CallOutcome {
        let mut pairs: Vec<(String, String)> = query
            .into_iter()
            .filter(|(_, value)| value != "undefined" && value != "null")
            .collect();

        if !pairs.iter().any(|(key, _)| key == "lang") {
            pairs.push(("lang".to_string(), self.default_lang.clone()));
        }
        pairs.push(("format".to_string(), "json".to_string()));

        let url = format!("{}{}", self.base_url, endpoint);
        tracing::debug!(url = %url, "Requesting upstream");

        let response = match self.client.get(&url).query(&pairs).send().await {
            Ok(response) => response,
            Err(e) => {
                tracing::error!(error = %e, "Upstream request failed");
                return CallOutcome::failure(e.to_string());
            }
        };

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(status = status.as_u16(), url = %url, "Upstream error status");
            return CallOutcome::UpstreamError {
                message: format!(
                    "HTTP {}: {}",
                    status.as_u16(),
                    status.canonical_reason().unwrap_or("Unknown")
                ),
                status_code: Some(status.as_u16()),
            };
        }

        match response.json::<Value>().await {
            Ok(body) => CallOutcome::Success(body),
            Err(e) => CallOutcome::failure(e.to_string()),
        }
    }
}
