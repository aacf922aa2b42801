//! JSON-RPC dispatch for the MCP endpoint
//!
//! One decoded message in, at most one reply out. The dispatcher decides
//! notification vs request, routes the three supported request methods,
//! and keeps the three error tiers apart:
//!
//! 1. upstream failures surface as data inside a successful reply,
//! 2. unknown tool names likewise,
//! 3. only unknown methods and malformed envelopes become protocol-level
//!    `-32603` errors (the listener maps those to HTTP 500).

use serde_json::{json, Map, Value};

use crate::error::DispatchError;
use crate::mcp::protocol::{self, InitializeResult};
use crate::mcp::registry::{self, ToolSpec};
use crate::services::bdl_client::BdlClient;

/// Outcome of dispatching one decoded protocol message.
#[derive(Debug)]
pub enum DispatchOutcome {
    /// Notification: no reply body at all.
    NoReply,
    /// Request handled: full JSON-RPC success envelope.
    Reply(Value),
    /// Protocol-level failure: full JSON-RPC error envelope.
    ProtocolError(Value),
}

/// Stateless message router. Holds only the immutable upstream client;
/// safe to share across concurrent requests.
#[derive(Clone)]
pub struct Dispatcher {
    client: BdlClient,
}

impl Dispatcher {
    pub fn new(client: BdlClient) -> Self {
        Dispatcher { client }
    }

    /// Handle one protocol message.
    ///
    /// Notifications (absent id, or a `notifications/` method) return
    /// [`DispatchOutcome::NoReply`] before any further processing, even
    /// when the method is otherwise unrecognized. Requests always produce
    /// exactly one envelope correlated to the original id.
    pub async fn dispatch(&self, message: &Value) -> DispatchOutcome {
        if protocol::is_notification(message) {
            tracing::debug!("Ignoring notification");
            return DispatchOutcome::NoReply;
        }

        let id = message.get("id").cloned().unwrap_or(Value::Null);

        let result = match message.get("method").and_then(Value::as_str) {
            Some("initialize") => serde_json::to_value(InitializeResult::current())
                .map_err(|e| DispatchError::Internal(e.to_string())),

            Some("tools/list") => Ok(json!({ "tools": registry::list_descriptors() })),

            Some("tools/call") => Ok(self.handle_tool_call(message.get("params")).await),

            Some(other) => Err(DispatchError::UnknownMethod(other.to_string())),

            None => Err(DispatchError::MissingMethod),
        };

        match result {
            Ok(result) => DispatchOutcome::Reply(protocol::success_envelope(id, result)),
            Err(e) => {
                tracing::error!(error = %e, "Dispatch failed");
                DispatchOutcome::ProtocolError(protocol::error_envelope(
                    id,
                    protocol::INTERNAL_ERROR,
                    &e.to_string(),
                ))
            }
        }
    }

    /// Resolve a tools/call request to its call-result payload.
    ///
    /// A missing or unknown tool name is not a protocol error: the outer
    /// envelope stays a successful reply and the error lives in the
    /// payload, so the calling agent can read the failure as data.
    async fn handle_tool_call(&self, params: Option<&Value>) -> Value {
        let name = params.and_then(|p| p.get("name")).and_then(Value::as_str);
        let empty = Map::new();
        let arguments = params
            .and_then(|p| p.get("arguments"))
            .and_then(Value::as_object)
            .unwrap_or(&empty);

        let payload = match name {
            None => json!({ "error": "Missing tool name" }),
            Some(name) => match registry::find_tool(name) {
                None => {
                    tracing::warn!(tool = %name, "Call to unregistered tool");
                    json!({ "error": format!("Unknown tool: {}", name) })
                }
                Some(tool) => {
                    tracing::debug!(tool = %tool.name, "Executing tool call");
                    self.call_tool(tool, arguments).await
                }
            },
        };

        call_reply(payload)
    }

    async fn call_tool(&self, tool: &ToolSpec, arguments: &Map<String, Value>) -> Value {
        match tool.upstream_query(arguments) {
            Ok(query) => self
                .client
                .request(&query.path, query.params)
                .await
                .into_payload(),
            Err(e) => json!({ "error": e.to_string() }),
        }
    }
}

/// Wrap a call payload as the standard single-text-content call result.
fn call_reply(payload: Value) -> Value {
    let text = serde_json::to_string_pretty(&payload).unwrap_or_else(|_| payload.to_string());
    json!({
        "content": [
            {
                "type": "text",
                "text": text,
            }
        ],
    })
}
