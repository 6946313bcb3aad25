use rmcp::model::ErrorCode;
use rmcp::ErrorData;
use thiserror::Error;

/// Failure of the outbound search call.
#[derive(Debug, Error)]
pub enum SearchError {
    #[error("{0}")]
    Http(#[from] reqwest::Error),
    #[error("Request failed with status code {status}: {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },
    #[error("Malformed search response: {0}")]
    Malformed(String),
}

/// Failure of a single launch strategy. Never surfaced to the caller.
#[derive(Debug, Error)]
pub enum LaunchError {
    #[error("failed to run `{program}`: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },
    #[error("`{program}` exited with {status}")]
    ExitStatus {
        program: String,
        status: std::process::ExitStatus,
    },
    #[error("unsupported platform: {0}")]
    Unsupported(String),
}

/// Errors a tool call can end with. Everything else is a text response.
#[derive(Debug, Error)]
pub enum ToolError {
    #[error("Unknown tool: {0}")]
    UnknownTool(String),
    #[error("{0}")]
    InvalidParams(String),
    #[error("Error searching for song: {0}")]
    Search(#[from] SearchError),
}

impl ToolError {
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::UnknownTool(_) => ErrorCode::METHOD_NOT_FOUND,
            Self::InvalidParams(_) => ErrorCode::INVALID_PARAMS,
            Self::Search(_) => ErrorCode::INTERNAL_ERROR,
        }
    }

    pub fn into_mcp(self) -> ErrorData {
        ErrorData::new(self.code(), self.to_string(), None)
    }
}
