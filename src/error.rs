use thiserror::Error;

/// Protocol-level dispatch failures.
///
/// These are the only failures surfaced through the JSON-RPC error
/// envelope (code -32603) and an HTTP 500 at the listener. Upstream HTTP
/// failures and unknown tool names are not errors at this level: they
/// travel as data inside a successful reply (see
/// [`crate::services::bdl_client::CallOutcome`]).
#[derive(Debug, Error)]
pub enum DispatchError {
    /// Request carried no usable `method` field.
    #[error("Missing method field")]
    MissingMethod,

    /// Request named a method outside the supported protocol surface.
    #[error("Unknown method: {0}")]
    UnknownMethod(String),

    /// Unexpected serialization failure while building a reply.
    #[error("Internal error: {0}")]
    Internal(String),
}
