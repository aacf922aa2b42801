//! JSON-RPC envelope types and constants for the MCP surface

use serde::Serialize;
use serde_json::{json, Map, Value};

pub const JSONRPC_VERSION: &str = "2.0";
pub const PROTOCOL_VERSION: &str = "2024-11-05";
pub const SERVER_NAME: &str = "bdl-mcp-server";

/// JSON-RPC "Internal error" code, used for every protocol-level failure.
pub const INTERNAL_ERROR: i32 = -32603;

/// Reply to the `initialize` request. Fixed for the process lifetime.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InitializeResult {
    pub protocol_version: &'static str,
    pub capabilities: Capabilities,
    pub server_info: ServerInfo,
}

/// Declared capabilities. The empty `tools` object is the signal that
/// tools/list and tools/call are supported.
#[derive(Debug, Serialize)]
pub struct Capabilities {
    pub tools: Map<String, Value>,
}

#[derive(Debug, Serialize)]
pub struct ServerInfo {
    pub name: &'static str,
    pub version: &'static str,
}

impl InitializeResult {
    pub fn current() -> Self {
        InitializeResult {
            protocol_version: PROTOCOL_VERSION,
            capabilities: Capabilities { tools: Map::new() },
            server_info: ServerInfo {
                name: SERVER_NAME,
                version: env!("CARGO_PKG_VERSION"),
            },
        }
    }
}

/// A message is a notification when it carries no id, or when its method
/// lives under the `notifications/` prefix. The prefix rule wins even when
/// an id is present. Notifications get no reply of any kind.
pub fn is_notification(message: &Value) -> bool {
    let has_id = message.get("id").is_some_and(|id| !id.is_null());
    let notification_method = message
        .get("method")
        .and_then(Value::as_str)
        .is_some_and(|m| m.starts_with("notifications/"));

    !has_id || notification_method
}

pub fn success_envelope(id: Value, result: Value) -> Value {
    json!({
        "jsonrpc": JSONRPC_VERSION,
        "id": id,
        "result": result,
    })
}

pub fn error_envelope(id: Value, code: i32, message: &str) -> Value {
    json!({
        "jsonrpc": JSONRPC_VERSION,
        "id": id,
        "error": {
            "code": code,
            "message": message,
        },
    })
}
