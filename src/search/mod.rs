use crate::error::SearchError;
use async_trait::async_trait;

pub mod youtube;

pub use youtube::YoutubeSearchClient;

/// One matched video, in the relevance order the API returned it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchResult {
    pub title: String,
    pub video_id: String,
    pub description: String,
}

#[async_trait]
pub trait SongSearch: Send + Sync {
    async fn search(&self, query: &str) -> Result<Vec<SearchResult>, SearchError>;
}
