use std::sync::Arc;
use rmcp::{
    model::{
        CallToolRequestParam, CallToolResult, Content, Implementation, ListToolsResult,
        PaginatedRequestParam, ServerCapabilities, ServerInfo, Tool as McpTool,
    },
    service::{RequestContext, ServiceExt},
    transport::stdio,
    ErrorData, RoleServer, ServerHandler,
};
use serde_json::Value;
use tracing::{error, info};
use crate::config::Config;
use crate::launcher::{Launcher, Platform};
use crate::search::YoutubeSearchClient;
use crate::tools::builtin::PlaySongTool;
use crate::tools::{ToolExecutor, ToolRegistry};

pub const SERVER_NAME: &str = "youtube-music-server";

/// MCP server exposing the registered tools over stdio.
#[derive(Clone)]
pub struct McpToolServer {
    executor: Arc<ToolExecutor>,
}

impl McpToolServer {
    pub fn new(executor: Arc<ToolExecutor>) -> Self {
        Self { executor }
    }

    pub fn from_config(config: &Config) -> Self {
        let search = Arc::new(YoutubeSearchClient::new(config));
        let launcher = Arc::new(Launcher::chrome(Platform::current(), config.detach_grace()));

        let mut registry = ToolRegistry::new();
        registry.register(Arc::new(PlaySongTool::new(search, launcher)));
        Self::new(Arc::new(ToolExecutor::new(Arc::new(registry))))
    }

    pub fn tools(&self) -> Vec<McpTool> {
        self.executor
            .registry()
            .list_tools()
            .iter()
            .map(|tool| {
                let schema = match tool.parameters_schema() {
                    Value::Object(map) => map,
                    _ => serde_json::Map::new(),
                };
                McpTool::new(
                    tool.name().to_string(),
                    tool.description().to_string(),
                    Arc::new(schema),
                )
            })
            .collect()
    }

    pub async fn call(
        &self,
        name: &str,
        arguments: Option<Value>,
    ) -> Result<CallToolResult, ErrorData> {
        let params = arguments.unwrap_or(Value::Null);
        match self.executor.execute(name, params).await {
            Ok(text) => Ok(CallToolResult::success(vec![Content::text(text)])),
            Err(e) => Err(e.into_mcp()),
        }
    }

    /// Serves until the client disconnects or the process is interrupted.
    pub async fn serve_stdio(self) -> anyhow::Result<()> {
        let running = self.serve(stdio()).await.map_err(|e| {
            error!("MCP server: failed to start on stdio: {}", e);
            anyhow::anyhow!("Failed to start MCP server: {}", e)
        })?;
        info!("Youtube Music MCP server running on stdio (Windows + Chrome only)");

        let cancel = running.cancellation_token();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                info!("MCP server: interrupt received, closing connection");
                cancel.cancel();
            }
        });

        let reason = running.waiting().await?;
        info!("MCP server: stopped ({:?})", reason);
        Ok(())
    }
}

impl ServerHandler for McpToolServer {
    fn get_info(&self) -> ServerInfo {
        let mut server_info = Implementation::from_build_env();
        server_info.name = SERVER_NAME.to_string();
        server_info.version = env!("CARGO_PKG_VERSION").to_string();
        ServerInfo {
            instructions: Some(
                "Use 'play_song' with a song name (and optionally an artist) to open the top YouTube result in Chrome."
                    .into(),
            ),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info,
            ..Default::default()
        }
    }

    async fn list_tools(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListToolsResult, ErrorData> {
        Ok(ListToolsResult::with_all_items(self.tools()))
    }

    async fn call_tool(
        &self,
        request: CallToolRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, ErrorData> {
        self.call(&request.name, request.arguments.map(Value::Object)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SearchError;
    use crate::launcher::tests::fake_launcher;
    use crate::search::{SearchResult, SongSearch};
    use async_trait::async_trait;
    use rmcp::model::ErrorCode;
    use serde_json::json;

    struct OneHit;

    #[async_trait]
    impl SongSearch for OneHit {
        async fn search(&self, _query: &str) -> Result<Vec<SearchResult>, SearchError> {
            Ok(vec![SearchResult {
                title: "Imagine".into(),
                video_id: "abc123".into(),
                description: String::new(),
            }])
        }
    }

    fn server(launch_ok: bool) -> McpToolServer {
        let (launcher, _) = fake_launcher(Platform::Windows, &[launch_ok]);
        let mut registry = ToolRegistry::new();
        registry.register(Arc::new(PlaySongTool::new(Arc::new(OneHit), Arc::new(launcher))));
        McpToolServer::new(Arc::new(ToolExecutor::new(Arc::new(registry))))
    }

    fn text(result: &CallToolResult) -> String {
        result
            .content
            .first()
            .and_then(|c| c.as_text())
            .map(|t| t.text.clone())
            .unwrap_or_default()
    }

    #[test]
    fn test_info_and_tools() {
        let server = server(true);
        let info = server.get_info();
        assert_eq!(info.server_info.name, SERVER_NAME);
        assert_eq!(info.server_info.version, env!("CARGO_PKG_VERSION"));
        assert!(info.capabilities.tools.is_some());

        let tools = server.tools();
        assert_eq!(tools.len(), 1);
        assert_eq!(tools[0].name, "play_song");
        assert_eq!(tools[0].input_schema.get("required"), Some(&json!(["song_name"])));
    }

    #[tokio::test]
    async fn test_call_success() {
        let result = server(true)
            .call("play_song", Some(json!({"song_name": "Imagine"})))
            .await
            .unwrap();
        assert_eq!(text(&result), "Playing top result: Imagine");
        assert_ne!(result.is_error, Some(true));
    }

    #[tokio::test]
    async fn test_call_errors_map_to_codes() {
        let server = server(true);

        let err = server.call("pause_song", Some(json!({}))).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::METHOD_NOT_FOUND);
        assert_eq!(err.message, "Unknown tool: pause_song");

        let err = server.call("play_song", None).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::INVALID_PARAMS);

        let err = server
            .call("play_song", Some(json!({"artist_name": "John Lennon"})))
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::INVALID_PARAMS);
    }

    #[tokio::test]
    async fn test_call_launch_failure_is_text() {
        let result = server(false)
            .call("play_song", Some(json!({"song_name": "Imagine"})))
            .await
            .unwrap();
        let body = text(&result);
        assert!(body.contains("https://music.youtube.com/watch?v=abc123"));
        assert!(body.contains("https://www.youtube.com/watch?v=abc123"));
    }
}
