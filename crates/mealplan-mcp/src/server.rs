use serde_json::Value;

use mealplan_core::SpoonacularClient;

use crate::protocol::{
    InitializeResult, JsonRpcRequest, JsonRpcResponse, ServerCapabilities, ServerInfo,
    ToolCallResult, ToolsCapability,
};
use crate::tools::{self, ToolState};

// ---------------------------------------------------------------------------
// Server
// ---------------------------------------------------------------------------

pub struct McpServer {
    state: ToolState,
}

impl McpServer {
    /// The client is built once at startup; every tool call shares it and
    /// nothing else, so overlapping calls need no synchronization.
    pub fn new(client: SpoonacularClient) -> Self {
        Self {
            state: ToolState { client },
        }
    }

    /// Dispatch an incoming JSON-RPC request and return an optional response.
    ///
    /// Returns `None` for notifications (requests without an `id`), which
    /// the MCP spec leaves unanswered.
    pub async fn handle_request(&self, req: JsonRpcRequest) -> Option<JsonRpcResponse> {
        let id = match req.id {
            Some(id) => id,
            None => {
                eprintln!("[mealplan-mcp] notification received: {}", req.method);
                return None;
            }
        };

        let result = match req.method.as_str() {
            "initialize" => self.handle_initialize(),
            "tools/list" => self.handle_tools_list(),
            "tools/call" => self.handle_tools_call(req.params).await,
            other => Err((-32601, format!("Method not found: {other}"))),
        };

        Some(match result {
            Ok(value) => JsonRpcResponse::success(id, value),
            Err((code, msg)) => JsonRpcResponse::error(id, code, msg),
        })
    }

    // -----------------------------------------------------------------------
    // Method handlers
    // -----------------------------------------------------------------------

    fn handle_initialize(&self) -> Result<Value, (i32, String)> {
        let result = InitializeResult {
            protocol_version: "2024-11-05".to_string(),
            capabilities: ServerCapabilities {
                tools: Some(ToolsCapability {}),
            },
            server_info: ServerInfo {
                name: "mealplan-mcp".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
        };
        serde_json::to_value(result).map_err(|e| (-32603, e.to_string()))
    }

    fn handle_tools_list(&self) -> Result<Value, (i32, String)> {
        let tool_defs = tools::all_tool_definitions();
        serde_json::to_value(serde_json::json!({ "tools": tool_defs }))
            .map_err(|e| (-32603, e.to_string()))
    }

    async fn handle_tools_call(&self, params: Option<Value>) -> Result<Value, (i32, String)> {
        let params = params.ok_or_else(|| (-32602, "Missing params for tools/call".to_string()))?;

        let name = params
            .get("name")
            .and_then(|v| v.as_str())
            .ok_or_else(|| (-32602, "Missing 'name' in tools/call params".to_string()))?
            .to_string();

        let arguments = params
            .get("arguments")
            .cloned()
            .unwrap_or(Value::Object(Default::default()));

        eprintln!("[mealplan-mcp] calling tool: {name}");

        let tool_result: ToolCallResult = tools::dispatch_tool(&name, arguments, &self.state).await;

        serde_json::to_value(tool_result).map_err(|e| (-32603, e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mealplan_core::ApiConfig;

    fn test_server() -> McpServer {
        let client = SpoonacularClient::new(ApiConfig::default()).expect("client should build");
        McpServer::new(client)
    }

    fn request(id: Option<Value>, method: &str, params: Option<Value>) -> JsonRpcRequest {
        serde_json::from_value(serde_json::json!({
            "jsonrpc": "2.0",
            "id": id,
            "method": method,
            "params": params,
        }))
        .expect("request should deserialize")
    }

    #[tokio::test]
    async fn initialize_advertises_tools_capability() {
        let server = test_server();
        let response = server
            .handle_request(request(Some(Value::from(1)), "initialize", None))
            .await
            .expect("requests with an id get a response");

        let result = response.result.expect("initialize succeeds");
        assert_eq!(result["protocolVersion"], "2024-11-05");
        assert_eq!(result["serverInfo"]["name"], "mealplan-mcp");
        assert!(result["capabilities"]["tools"].is_object());
    }

    #[tokio::test]
    async fn tools_list_exposes_generate_meal_plan() {
        let server = test_server();
        let response = server
            .handle_request(request(Some(Value::from(2)), "tools/list", None))
            .await
            .expect("requests with an id get a response");

        let result = response.result.expect("tools/list succeeds");
        let tools = result["tools"].as_array().expect("tools array");
        assert_eq!(tools.len(), 1);
        assert_eq!(tools[0]["name"], "generate_meal_plan");
    }

    #[tokio::test]
    async fn notifications_get_no_response() {
        let server = test_server();
        let response = server
            .handle_request(request(None, "notifications/initialized", None))
            .await;
        assert!(response.is_none());
    }

    #[tokio::test]
    async fn unknown_method_answers_method_not_found() {
        let server = test_server();
        let response = server
            .handle_request(request(Some(Value::from(3)), "resources/list", None))
            .await
            .expect("requests with an id get a response");

        let error = response.error.expect("unknown method is an error");
        assert_eq!(error.code, -32601);
    }
}
