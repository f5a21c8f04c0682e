//! Integration tests for the Assisted Service MCP Server
//!
//! These tests verify the MCP protocol handling and tool surface.
//! They don't make real Assisted Service API calls.

use serde_json::{json, Value};

/// Helper to create a JSON-RPC request
fn make_request(id: i64, method: &str, params: Option<Value>) -> Value {
    let mut request = json!({
        "jsonrpc": "2.0",
        "id": id,
        "method": method,
    });
    if let Some(p) = params {
        request["params"] = p;
    }
    request
}

mod mcp_protocol_tests {
    use super::*;
    use assisted_mcp_server::assisted::auth::TokenManager;
    use assisted_mcp_server::assisted::client::AssistedClient;
    use assisted_mcp_server::config::{assisted, Config};
    use assisted_mcp_server::mcp::server::McpServer;
    use std::sync::Arc;

    fn offline_server() -> McpServer {
        let config = Config {
            api_url: "http://127.0.0.1:0".to_string(),
            sso_token_url: "http://127.0.0.1:0/token".to_string(),
            offline_token: "test-token".to_string(),
            pull_secret: None,
            sse_host: assisted::DEFAULT_SSE_HOST.to_string(),
            sse_port: assisted::DEFAULT_SSE_PORT,
        };
        let token_manager = Arc::new(TokenManager::new(&config));
        let client = Arc::new(AssistedClient::new(&config, token_manager));
        McpServer::new(client, None)
    }

    #[tokio::test]
    async fn test_initialize_round_trip() {
        let server = offline_server();
        let request = make_request(
            1,
            "initialize",
            Some(json!({
                "protocolVersion": "2024-11-05",
                "clientInfo": {"name": "test-client", "version": "1.0.0"},
                "capabilities": {}
            })),
        );

        let response = server
            .handle_message(&request.to_string())
            .await
            .expect("initialize should be answered");

        let result = response.result.expect("success result");
        assert_eq!(result["protocolVersion"], "2024-11-05");
        assert_eq!(result["serverInfo"]["name"], "assisted");
        assert!(result["capabilities"]["tools"].is_object());
    }

    #[tokio::test]
    async fn test_initialized_notification_has_no_response() {
        let server = offline_server();
        let notification = json!({
            "jsonrpc": "2.0",
            "method": "notifications/initialized"
        });

        let response = server.handle_message(&notification.to_string()).await;
        assert!(response.is_none());
    }

    #[tokio::test]
    async fn test_ping() {
        let server = offline_server();
        let response = server
            .handle_message(&make_request(2, "ping", None).to_string())
            .await
            .unwrap();

        assert!(response.error.is_none());
        assert_eq!(response.result, Some(json!({})));
    }

    #[tokio::test]
    async fn test_tools_list_contains_all_tools() {
        let server = offline_server();
        let response = server
            .handle_message(&make_request(3, "tools/list", None).to_string())
            .await
            .unwrap();

        let result = response.result.expect("success result");
        let tools: Vec<&str> = result["tools"]
            .as_array()
            .unwrap()
            .iter()
            .map(|t| t["name"].as_str().unwrap())
            .collect();

        for expected in [
            "list_clusters",
            "cluster_info",
            "cluster_events",
            "create_cluster",
            "update_cluster",
            "delete_cluster",
            "list_manifests",
            "create_manifests",
            "delete_manifests",
        ] {
            assert!(tools.contains(&expected), "missing tool: {}", expected);
        }
    }

    #[tokio::test]
    async fn test_every_tool_advertises_object_schema() {
        let server = offline_server();
        let response = server
            .handle_message(&make_request(4, "tools/list", None).to_string())
            .await
            .unwrap();

        let result = response.result.unwrap();
        for tool in result["tools"].as_array().unwrap() {
            assert_eq!(tool["inputSchema"]["type"], "object", "tool: {}", tool["name"]);
            assert!(tool["description"].is_string());
        }
    }

    #[tokio::test]
    async fn test_unknown_method_is_rejected() {
        let server = offline_server();
        let response = server
            .handle_message(&make_request(5, "resources/list", None).to_string())
            .await
            .unwrap();

        let error = response.error.expect("error response");
        assert_eq!(error.code, -32601);
    }

    #[tokio::test]
    async fn test_malformed_json_is_parse_error_with_null_id() {
        let server = offline_server();
        let response = server.handle_message("{not json").await.unwrap();

        assert_eq!(response.error.as_ref().expect("error response").code, -32700);

        let serialized = serde_json::to_value(&response).unwrap();
        assert!(serialized["id"].is_null());
    }

    #[tokio::test]
    async fn test_unknown_tool_is_tool_error_not_protocol_error() {
        let server = offline_server();
        let request = make_request(
            6,
            "tools/call",
            Some(json!({"name": "reboot_host", "arguments": {}})),
        );

        let response = server.handle_message(&request.to_string()).await.unwrap();

        // Tool failures surface as isError content, not JSON-RPC errors
        assert!(response.error.is_none());
        let result = response.result.unwrap();
        assert_eq!(result["isError"], true);
        let text = result["content"][0]["text"].as_str().unwrap();
        assert!(text.contains("Unknown tool"));
    }

    #[tokio::test]
    async fn test_call_tool_without_params() {
        let server = offline_server();
        let response = server
            .handle_message(&make_request(7, "tools/call", None).to_string())
            .await
            .unwrap();

        let result = response.result.unwrap();
        assert_eq!(result["isError"], true);
    }

    #[tokio::test]
    async fn test_create_cluster_without_pull_secret_fails_cleanly() {
        let server = offline_server();
        let request = make_request(
            8,
            "tools/call",
            Some(json!({
                "name": "create_cluster",
                "arguments": {"name": "dev", "openshift_version": "4.15"}
            })),
        );

        let response = server.handle_message(&request.to_string()).await.unwrap();
        let result = response.result.unwrap();
        assert_eq!(result["isError"], true);
        let text = result["content"][0]["text"].as_str().unwrap();
        assert!(text.contains("pull secret") || text.contains("PULL_SECRET"));
    }
}

mod tool_schema_tests {
    use super::*;

    #[test]
    fn test_create_cluster_arguments_shape() {
        let args = json!({
            "name": "prod-east",
            "openshift_version": "4.15",
            "base_dns_domain": "example.com",
            "high_availability_mode": "Full",
            "cluster_network_cidr": "10.128.0.0/14",
            "ssh_public_key": "ssh-ed25519 AAAA..."
        });

        assert!(args["name"].is_string());
        assert!(args["openshift_version"].is_string());
        assert!(args["high_availability_mode"].is_string());
    }

    #[test]
    fn test_cluster_name_arguments_shape() {
        let args = json!({"cluster_name": "prod-east"});
        assert!(args["cluster_name"].is_string());
    }

    #[test]
    fn test_create_manifests_arguments_shape() {
        let args = json!({
            "cluster_name": "prod-east",
            "directory": "/tmp/manifests",
            "folder": "openshift"
        });

        assert!(args["cluster_name"].is_string());
        assert!(args["directory"].is_string());
    }

    #[test]
    fn test_call_tool_request_format() {
        let request = make_request(
            3,
            "tools/call",
            Some(json!({
                "name": "cluster_events",
                "arguments": {"cluster_name": "dev"}
            })),
        );

        assert_eq!(request["method"], "tools/call");
        assert_eq!(request["params"]["name"], "cluster_events");
        assert_eq!(request["params"]["arguments"]["cluster_name"], "dev");
    }
}

mod types_serialization_tests {
    use assisted_mcp_server::assisted::types::*;

    #[test]
    fn test_cluster_list_deserialization() {
        let json = r#"[
            {"id": "aaa", "name": "one", "status": "ready", "openshift_version": "4.15.2"},
            {"id": "bbb", "name": "two", "status": "installing"}
        ]"#;

        let clusters: Vec<Cluster> = serde_json::from_str(json).unwrap();
        assert_eq!(clusters.len(), 2);
        assert_eq!(clusters[0].openshift_version.as_deref(), Some("4.15.2"));
        assert!(clusters[1].openshift_version.is_none());
    }

    #[test]
    fn test_manifest_create_params_serialization() {
        let params = ManifestCreateParams {
            folder: "manifests".to_string(),
            file_name: "chrony.yaml".to_string(),
            content: "YXBpVmVyc2lvbjogdjE=".to_string(),
        };

        let json = serde_json::to_string(&params).unwrap();
        assert!(json.contains("\"folder\":\"manifests\""));
        assert!(json.contains("chrony.yaml"));
    }

    #[test]
    fn test_update_params_serialize_only_set_fields() {
        let params = ClusterUpdateParams {
            api_vip: Some("192.168.111.5".to_string()),
            ..Default::default()
        };

        let json = serde_json::to_string(&params).unwrap();
        assert!(json.contains("api_vip"));
        assert!(!json.contains("ingress_vip"));
        assert!(!json.contains("base_dns_domain"));
    }
}

mod mcp_types_tests {
    use assisted_mcp_server::mcp::types::*;

    #[test]
    fn test_tool_result_text() {
        let result = CallToolResult::text("Found 3 clusters");
        assert!(!result.is_error);
        assert_eq!(result.content.len(), 1);
    }

    #[test]
    fn test_tool_result_error() {
        let result = CallToolResult::error("Cluster not found: dev");

        assert!(result.is_error);
        let ToolResultContent::Text { text } = &result.content[0];
        assert!(text.contains("Error:"));
        assert!(text.contains("Cluster not found"));
    }

    #[test]
    fn test_jsonrpc_response_success() {
        let response =
            JsonRpcResponse::success(RequestId::Number(1), serde_json::json!({"status": "ok"}));

        assert!(response.result.is_some());
        assert!(response.error.is_none());
    }

    #[test]
    fn test_jsonrpc_response_error() {
        let response = JsonRpcResponse::error(
            RequestId::Number(1),
            JsonRpcError::method_not_found("unknown_method"),
        );

        assert!(response.result.is_none());
        assert_eq!(response.error.as_ref().unwrap().code, -32601);
    }
}
