use crate::error::ToolError;
use crate::launcher::Launcher;
use crate::search::{SearchResult, SongSearch};
use crate::tools::Tool;
use async_trait::async_trait;
use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::Value;
use std::sync::Arc;
use tracing::info;

pub const PLAY_SONG: &str = "play_song";
const INVALID_ARGUMENTS: &str = "Invalid play_song arguments";

/// Arguments advertised for `play_song`.
///
/// Only used to derive the input schema; calls are parsed by [`PlaySongRequest::validate`].
#[allow(dead_code)]
#[derive(Debug, Deserialize, JsonSchema)]
pub struct PlaySongArgs {
    /// Name of the song to play
    song_name: String,
    /// Name of the artist
    #[serde(default)]
    #[schemars(with = "String")]
    artist_name: Option<String>,
}

/// Arguments after the structural check. `song_name` may still be absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlaySongRequest {
    pub song_name: Option<String>,
    pub artist_name: Option<String>,
}

impl PlaySongRequest {
    /// Accepts any object whose `song_name`/`artist_name`, when present, are strings.
    pub fn validate(raw: &Value) -> Result<Self, ToolError> {
        let obj = raw
            .as_object()
            .ok_or_else(|| ToolError::InvalidParams(INVALID_ARGUMENTS.to_string()))?;

        let text_field = |key: &str| -> Result<Option<String>, ToolError> {
            match obj.get(key) {
                None => Ok(None),
                Some(Value::String(s)) => Ok(Some(s.clone())),
                Some(_) => Err(ToolError::InvalidParams(INVALID_ARGUMENTS.to_string())),
            }
        };

        Ok(Self {
            song_name: text_field("song_name")?,
            artist_name: text_field("artist_name")?,
        })
    }

    /// `song_name` is required even though [`validate`](Self::validate) lets it through.
    pub fn require_song_name(&self) -> Result<&str, ToolError> {
        match self.song_name.as_deref() {
            Some(name) if !name.is_empty() => Ok(name),
            _ => Err(ToolError::InvalidParams(
                "Missing required argument: song_name".to_string(),
            )),
        }
    }

    pub fn search_query(&self) -> Result<String, ToolError> {
        let song = self.require_song_name()?;
        Ok(match self.artist_name.as_deref() {
            Some(artist) if !artist.is_empty() => format!("{} {}", song, artist),
            _ => song.to_string(),
        })
    }
}

/// YouTube Music first, plain YouTube second.
pub fn candidate_urls(video_id: &str) -> [String; 2] {
    [
        format!("https://music.youtube.com/watch?v={}", video_id),
        format!("https://www.youtube.com/watch?v={}", video_id),
    ]
}

fn manual_open_message(top: &SearchResult, urls: &[String; 2]) -> String {
    format!(
        "Found: {}\n\
         Could not open the browser automatically. Open one of these links manually:\n\
         🎵 YouTube Music: {}\n\
         🎬 YouTube: {}",
        top.title, urls[0], urls[1]
    )
}

pub struct PlaySongTool {
    search: Arc<dyn SongSearch>,
    launcher: Arc<Launcher>,
}

impl PlaySongTool {
    pub fn new(search: Arc<dyn SongSearch>, launcher: Arc<Launcher>) -> Self {
        Self { search, launcher }
    }
}

#[async_trait]
impl Tool for PlaySongTool {
    fn name(&self) -> &str {
        PLAY_SONG
    }

    fn description(&self) -> &str {
        "Play a song on YouTube Music"
    }

    fn parameters_schema(&self) -> Value {
        serde_json::to_value(schemars::schema_for!(PlaySongArgs))
            .unwrap_or_else(|_| serde_json::json!({"type": "object"}))
    }

    async fn execute(&self, params: Value) -> Result<String, ToolError> {
        let request = PlaySongRequest::validate(&params)?;
        let query = request.search_query()?;

        info!("Searching for song: {}", query);
        let results = self.search.search(&query).await?;

        let Some(top) = results.into_iter().next() else {
            return Ok(format!("No search results found for: {}", query));
        };

        let urls = candidate_urls(&top.video_id);
        let mut opened = false;
        for url in &urls {
            if self.launcher.launch(url).await {
                opened = true;
                break;
            }
        }

        if opened {
            Ok(format!("Playing top result: {}", top.title))
        } else {
            Ok(manual_open_message(&top, &urls))
        }
    }
}
