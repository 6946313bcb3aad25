use std::sync::Arc;
use crate::error::ToolError;
use crate::tools::ToolRegistry;
use serde_json::Value;
use tracing::{debug, error};

pub struct ToolExecutor {
    registry: Arc<ToolRegistry>,
}

impl ToolExecutor {
    pub fn new(registry: Arc<ToolRegistry>) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &ToolRegistry {
        &self.registry
    }

    pub async fn execute(&self, name: &str, params: Value) -> Result<String, ToolError> {
        let tool = self.registry.get(name).ok_or_else(|| {
            error!("Tool not found: {}", name);
            ToolError::UnknownTool(name.to_string())
        })?;

        debug!("Executing tool '{}' with arguments: {}", name, params);
        let result = tool.execute(params).await;
        if let Err(e) = &result {
            error!("Tool {} failed: {}", name, e);
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::Tool;
    use async_trait::async_trait;
    use serde_json::json;

    struct EchoTool;

    #[async_trait]
    impl Tool for EchoTool {
        fn name(&self) -> &str {
            "echo"
        }

        fn description(&self) -> &str {
            "Echo the arguments back"
        }

        fn parameters_schema(&self) -> Value {
            json!({"type": "object"})
        }

        async fn execute(&self, params: Value) -> Result<String, ToolError> {
            Ok(params.to_string())
        }
    }

    fn executor() -> ToolExecutor {
        let mut registry = ToolRegistry::new();
        registry.register(Arc::new(EchoTool));
        ToolExecutor::new(Arc::new(registry))
    }

    #[tokio::test]
    async fn test_dispatch_by_name() {
        let out = executor().execute("echo", json!({"a": 1})).await.unwrap();
        assert_eq!(out, r#"{"a":1}"#);
    }

    #[tokio::test]
    async fn test_unknown_tool() {
        let err = executor().execute("stop_song", json!({})).await.unwrap_err();
        assert!(matches!(err, ToolError::UnknownTool(ref name) if name == "stop_song"));
        assert_eq!(err.to_string(), "Unknown tool: stop_song");
    }
}
