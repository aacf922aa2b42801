//! Integration tests for the JSON-RPC dispatcher
//!
//! Protocol routing (notifications, initialize, tools/list, error tiers)
//! plus full tool calls against a wiremock upstream.

use bdl_mcp_server::mcp::dispatcher::{DispatchOutcome, Dispatcher};
use bdl_mcp_server::test_utils::test_helpers;
use serde_json::{json, Value};
use wiremock::matchers::{method, path, query_param, query_param_is_missing};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Dispatcher whose upstream nobody should ever reach.
fn offline_dispatcher() -> Dispatcher {
    test_helpers::test_dispatcher("http://127.0.0.1:9")
}

fn expect_reply(outcome: DispatchOutcome) -> Value {
    match outcome {
        DispatchOutcome::Reply(envelope) => envelope,
        other => panic!("Expected Reply, got {:?}", other),
    }
}

fn expect_protocol_error(outcome: DispatchOutcome) -> Value {
    match outcome {
        DispatchOutcome::ProtocolError(envelope) => envelope,
        other => panic!("Expected ProtocolError, got {:?}", other),
    }
}

/// Parse the single text content block of a call reply back into JSON.
fn call_payload(envelope: &Value) -> Value {
    let text = envelope["result"]["content"][0]["text"]
        .as_str()
        .expect("call reply should carry one text content block");
    serde_json::from_str(text).expect("content text should be JSON")
}

// ============================================================================
// Notification handling
// ============================================================================

#[tokio::test]
async fn test_message_without_id_yields_no_reply() {
    let dispatcher = offline_dispatcher();

    for method_name in ["initialize", "tools/list", "tools/call", "no/such/method"] {
        let message = json!({ "jsonrpc": "2.0", "method": method_name });
        let outcome = dispatcher.dispatch(&message).await;
        assert!(
            matches!(outcome, DispatchOutcome::NoReply),
            "method {} without id should be a notification",
            method_name
        );
    }
}

#[tokio::test]
async fn test_notifications_prefix_dominates_present_id() {
    let dispatcher = offline_dispatcher();

    let message = json!({
        "jsonrpc": "2.0",
        "id": 7,
        "method": "notifications/cancelled",
        "params": { "requestId": 3 },
    });
    let outcome = dispatcher.dispatch(&message).await;
    assert!(matches!(outcome, DispatchOutcome::NoReply));
}

#[tokio::test]
async fn test_null_id_is_treated_as_notification() {
    let dispatcher = offline_dispatcher();

    let message = json!({ "jsonrpc": "2.0", "id": null, "method": "tools/list" });
    let outcome = dispatcher.dispatch(&message).await;
    assert!(matches!(outcome, DispatchOutcome::NoReply));
}

// ============================================================================
// Request routing
// ============================================================================

#[tokio::test]
async fn test_initialize_returns_fixed_capability_descriptor() {
    let dispatcher = offline_dispatcher();

    let message = json!({ "jsonrpc": "2.0", "id": 1, "method": "initialize", "params": {} });
    let envelope = expect_reply(dispatcher.dispatch(&message).await);

    assert_eq!(envelope["jsonrpc"], "2.0");
    assert_eq!(envelope["id"], 1);
    assert_eq!(envelope["result"]["protocolVersion"], "2024-11-05");
    assert_eq!(envelope["result"]["capabilities"]["tools"], json!({}));
    assert_eq!(envelope["result"]["serverInfo"]["name"], "bdl-mcp-server");
    assert!(envelope["result"]["serverInfo"]["version"].is_string());
}

#[tokio::test]
async fn test_tools_list_returns_six_descriptors_in_order() {
    let dispatcher = offline_dispatcher();

    let message = json!({ "jsonrpc": "2.0", "id": 2, "method": "tools/list", "params": {} });
    let envelope = expect_reply(dispatcher.dispatch(&message).await);

    let tools = envelope["result"]["tools"]
        .as_array()
        .expect("tools should be an array");
    assert_eq!(tools.len(), 6);

    let names: Vec<&str> = tools.iter().filter_map(|t| t["name"].as_str()).collect();
    assert_eq!(
        names,
        vec![
            "get_aggregates",
            "get_subjects",
            "get_units",
            "search_units",
            "get_variables",
            "get_data_by_variable",
        ]
    );
}

#[tokio::test]
async fn test_unknown_method_is_a_protocol_error() {
    let dispatcher = offline_dispatcher();

    let message = json!({ "jsonrpc": "2.0", "id": 9, "method": "resources/list" });
    let envelope = expect_protocol_error(dispatcher.dispatch(&message).await);

    assert_eq!(envelope["jsonrpc"], "2.0");
    assert_eq!(envelope["id"], 9);
    assert_eq!(envelope["error"]["code"], -32603);
    assert_eq!(envelope["error"]["message"], "Unknown method: resources/list");
}

#[tokio::test]
async fn test_missing_method_is_a_protocol_error() {
    let dispatcher = offline_dispatcher();

    let message = json!({ "jsonrpc": "2.0", "id": 4, "params": {} });
    let envelope = expect_protocol_error(dispatcher.dispatch(&message).await);

    assert_eq!(envelope["error"]["code"], -32603);
    assert_eq!(envelope["error"]["message"], "Missing method field");
}

// ============================================================================
// Tool calls: error-as-data tier
// ============================================================================

#[tokio::test]
async fn test_unknown_tool_is_a_successful_reply_with_error_payload() {
    let dispatcher = offline_dispatcher();

    let message = json!({
        "jsonrpc": "2.0",
        "id": 5,
        "method": "tools/call",
        "params": { "name": "delete_everything", "arguments": {} },
    });
    let envelope = expect_reply(dispatcher.dispatch(&message).await);

    assert_eq!(envelope["id"], 5);
    assert_eq!(
        call_payload(&envelope),
        json!({ "error": "Unknown tool: delete_everything" })
    );
}

#[tokio::test]
async fn test_missing_tool_name_is_an_error_payload() {
    let dispatcher = offline_dispatcher();

    let message = json!({ "jsonrpc": "2.0", "id": 6, "method": "tools/call", "params": {} });
    let envelope = expect_reply(dispatcher.dispatch(&message).await);

    assert_eq!(call_payload(&envelope), json!({ "error": "Missing tool name" }));
}

#[tokio::test]
async fn test_missing_required_argument_is_an_error_payload() {
    let dispatcher = offline_dispatcher();

    let message = json!({
        "jsonrpc": "2.0",
        "id": 8,
        "method": "tools/call",
        "params": { "name": "search_units", "arguments": { "level": 2 } },
    });
    let envelope = expect_reply(dispatcher.dispatch(&message).await);

    assert_eq!(
        call_payload(&envelope),
        json!({ "error": "Missing required parameter: name" })
    );
}

// ============================================================================
// Tool calls against a mock upstream
// ============================================================================

#[tokio::test]
async fn test_get_units_call_translates_query() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/units"))
        .and(query_param("level", "2"))
        .and(query_param("lang", "pl"))
        .and(query_param("format", "json"))
        .and(query_param_is_missing("parent-id"))
        .and(query_param_is_missing("name"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "totalRecords": 16, "results": [] })),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let dispatcher = test_helpers::test_dispatcher(&mock_server.uri());
    let message = json!({
        "jsonrpc": "2.0",
        "id": 10,
        "method": "tools/call",
        "params": { "name": "get_units", "arguments": { "level": 2, "lang": "pl" } },
    });

    let envelope = expect_reply(dispatcher.dispatch(&message).await);
    assert_eq!(
        call_payload(&envelope),
        json!({ "totalRecords": 16, "results": [] })
    );
}

#[tokio::test]
async fn test_get_data_by_variable_substitutes_path_and_defaults_lang() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/data/by-variable/450"))
        .and(query_param("year", "2020"))
        .and(query_param("year", "2021"))
        .and(query_param("lang", "pl"))
        .and(query_param("format", "json"))
        .and(query_param_is_missing("var_id"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "results": [] })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let dispatcher = test_helpers::test_dispatcher(&mock_server.uri());
    let message = json!({
        "jsonrpc": "2.0",
        "id": 11,
        "method": "tools/call",
        "params": {
            "name": "get_data_by_variable",
            "arguments": { "var_id": 450, "year": [2020, 2021] },
        },
    });

    let envelope = expect_reply(dispatcher.dispatch(&message).await);
    assert_eq!(call_payload(&envelope), json!({ "results": [] }));
}

#[tokio::test]
async fn test_null_argument_is_stripped_from_outbound_query() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/units"))
        .and(query_param_is_missing("level"))
        .and(query_param("lang", "pl"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "results": [] })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let dispatcher = test_helpers::test_dispatcher(&mock_server.uri());
    let message = json!({
        "jsonrpc": "2.0",
        "id": 12,
        "method": "tools/call",
        "params": { "name": "get_units", "arguments": { "level": null } },
    });

    let envelope = expect_reply(dispatcher.dispatch(&message).await);
    assert_eq!(call_payload(&envelope), json!({ "results": [] }));
}

#[tokio::test]
async fn test_upstream_error_status_becomes_error_payload() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/aggregates"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock_server)
        .await;

    let dispatcher = test_helpers::test_dispatcher(&mock_server.uri());
    let message = json!({
        "jsonrpc": "2.0",
        "id": 13,
        "method": "tools/call",
        "params": { "name": "get_aggregates", "arguments": {} },
    });

    let envelope = expect_reply(dispatcher.dispatch(&message).await);
    assert_eq!(
        call_payload(&envelope),
        json!({ "error": "HTTP 404: Not Found", "status_code": 404 })
    );
}

#[tokio::test]
async fn test_transport_failure_becomes_error_payload_without_status() {
    // Nothing listens on this port; the GET fails at the transport level.
    let dispatcher = offline_dispatcher();

    let message = json!({
        "jsonrpc": "2.0",
        "id": 14,
        "method": "tools/call",
        "params": { "name": "get_aggregates", "arguments": {} },
    });

    let envelope = expect_reply(dispatcher.dispatch(&message).await);
    let payload = call_payload(&envelope);
    assert!(payload["error"].is_string());
    assert!(payload.get("status_code").is_none());
}

#[tokio::test]
async fn test_identical_calls_yield_identical_replies() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/subjects"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "results": [{ "id": "K3", "name": "Ludność" }] })),
        )
        .expect(2)
        .mount(&mock_server)
        .await;

    let dispatcher = test_helpers::test_dispatcher(&mock_server.uri());
    let message = json!({
        "jsonrpc": "2.0",
        "id": 15,
        "method": "tools/call",
        "params": { "name": "get_subjects", "arguments": { "page_size": 10 } },
    });

    let first = expect_reply(dispatcher.dispatch(&message).await);
    let second = expect_reply(dispatcher.dispatch(&message).await);
    assert_eq!(first, second);
}
