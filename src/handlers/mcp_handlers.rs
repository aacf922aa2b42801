//! HTTP transport for the MCP endpoint
//!
//! `POST /mcp` decodes one JSON-RPC message, hands it to the dispatcher
//! and maps the outcome onto the wire:
//!
//! - notification -> `204 No Content`, empty body
//! - handled request -> `200 OK` with the success envelope
//! - protocol-level failure -> `500` with the `-32603` error envelope
//!
//! A body that is not JSON at all gets the same `500` treatment with a
//! null id, since no id could be determined.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde_json::{json, Value};

use crate::mcp::dispatcher::DispatchOutcome;
use crate::mcp::protocol::{self, PROTOCOL_VERSION, SERVER_NAME};
use crate::AppState;

/// POST /mcp - single JSON-RPC request/notification per call.
pub async fn mcp_post_handler(State(state): State<AppState>, body: String) -> Response {
    let message: Value = match serde_json::from_str(&body) {
        Ok(message) => message,
        Err(e) => {
            tracing::warn!(error = %e, "Rejecting unparseable request body");
            let envelope =
                protocol::error_envelope(Value::Null, protocol::INTERNAL_ERROR, &e.to_string());
            return (StatusCode::INTERNAL_SERVER_ERROR, Json(envelope)).into_response();
        }
    };

    match state.dispatcher.dispatch(&message).await {
        DispatchOutcome::NoReply => StatusCode::NO_CONTENT.into_response(),
        DispatchOutcome::Reply(envelope) => (StatusCode::OK, Json(envelope)).into_response(),
        DispatchOutcome::ProtocolError(envelope) => {
            (StatusCode::INTERNAL_SERVER_ERROR, Json(envelope)).into_response()
        }
    }
}

/// GET /mcp - static usage documentation for humans poking the endpoint.
pub async fn mcp_usage_handler() -> Json<Value> {
    Json(json!({
        "service": "BDL MCP Server",
        "version": env!("CARGO_PKG_VERSION"),
        "protocol": "MCP over HTTP (JSON-RPC 2.0)",
        "endpoint": "/mcp",
        "method": "POST",
        "description": "Model Context Protocol server for Polish statistical data (GUS BDL API)",
        "usage": {
            "initialize": {
                "method": "initialize",
                "params": {
                    "protocolVersion": PROTOCOL_VERSION,
                    "capabilities": {},
                    "clientInfo": { "name": "client", "version": "1.0.0" },
                },
            },
            "listTools": {
                "method": "tools/list",
                "params": {},
            },
            "callTool": {
                "method": "tools/call",
                "params": {
                    "name": "get_units",
                    "arguments": { "level": 2, "lang": "pl" },
                },
            },
        },
        "example": {
            "url": "/mcp",
            "method": "POST",
            "headers": { "Content-Type": "application/json" },
            "body": {
                "jsonrpc": "2.0",
                "id": 1,
                "method": "tools/list",
                "params": {},
            },
        },
        "server": SERVER_NAME,
    }))
}
