use super::{SearchResult, SongSearch};
use crate::config::Config;
use crate::error::SearchError;
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, error};

const MAX_RESULTS: u32 = 5;

#[derive(Debug, Default, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    items: Option<Vec<SearchItem>>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct SearchItem {
    id: Option<ItemId>,
    snippet: Option<Snippet>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct ItemId {
    video_id: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct Snippet {
    title: Option<String>,
    description: Option<String>,
}

impl From<SearchItem> for SearchResult {
    fn from(item: SearchItem) -> Self {
        let (title, description) = match item.snippet {
            Some(s) => (s.title.unwrap_or_default(), s.description.unwrap_or_default()),
            None => (String::new(), String::new()),
        };
        Self {
            title,
            video_id: item.id.and_then(|id| id.video_id).unwrap_or_default(),
            description,
        }
    }
}

/// YouTube Data API v3 `search` endpoint client
#[derive(Clone)]
pub struct YoutubeSearchClient {
    http: Client,
    api_key: String,
    api_base: String,
}

impl YoutubeSearchClient {
    pub fn new(config: &Config) -> Self {
        Self::with_client(Client::new(), &config.youtube_api_key, &config.youtube_api_base)
    }

    pub fn with_client(http: Client, api_key: &str, api_base: &str) -> Self {
        Self {
            http,
            api_key: api_key.to_string(),
            api_base: api_base.trim_end_matches('/').to_string(),
        }
    }

    fn request(&self, query: &str) -> reqwest::RequestBuilder {
        let max_results = MAX_RESULTS.to_string();
        self.http
            .get(format!("{}/search", self.api_base))
            .query(&[
                ("key", self.api_key.as_str()),
                ("part", "snippet"),
                ("maxResults", max_results.as_str()),
                ("type", "video"),
                ("q", query),
            ])
    }
}

/// Map a raw `search` payload to results. Missing fields become empty strings.
pub fn parse_search_response(body: &str) -> Result<Vec<SearchResult>, SearchError> {
    let parsed: SearchResponse =
        serde_json::from_str(body).map_err(|e| SearchError::Malformed(e.to_string()))?;
    Ok(parsed
        .items
        .unwrap_or_default()
        .into_iter()
        .map(SearchResult::from)
        .collect())
}

#[async_trait]
impl SongSearch for YoutubeSearchClient {
    async fn search(&self, query: &str) -> Result<Vec<SearchResult>, SearchError> {
        debug!("YouTube search: q={:?}", query);
        // reqwest errors carry the request URL, which holds the API key.
        let response = self.request(query).send().await.map_err(|e| {
            let e = e.without_url();
            error!("YouTube search request failed: {}", e);
            SearchError::from(e)
        })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| SearchError::from(e.without_url()))?;
        if !status.is_success() {
            error!("YouTube search returned {}", status);
            return Err(SearchError::Status { status, body });
        }

        let results = parse_search_response(&body)?;
        debug!("YouTube search returned {} results", results.len());
        Ok(results)
    }
}
