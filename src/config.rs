use dotenvy::dotenv;
use std::env;
use std::time::Duration;

#[derive(Clone)]
pub struct Config {
    pub youtube_api_key: String,
    pub youtube_api_base: String,
    pub launch_detach_grace_ms: u64,
}

pub const DEFAULT_YOUTUBE_API_BASE: &str = "https://www.googleapis.com/youtube/v3";

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenv().ok();
        Self::build()
    }

    fn build() -> anyhow::Result<Self> {
        Ok(Config {
            youtube_api_key: env::var("YOUTUBE_API_KEY")
                .ok()
                .filter(|key| !key.is_empty())
                .ok_or_else(|| anyhow::anyhow!("YOUTUBE_API_KEY must be set"))?,
            youtube_api_base: env::var("YOUTUBE_API_BASE")
                .unwrap_or_else(|_| DEFAULT_YOUTUBE_API_BASE.to_string()),
            launch_detach_grace_ms: env::var("LAUNCH_DETACH_GRACE_MS")
                .unwrap_or_else(|_| "800".to_string())
                .parse()
                .unwrap_or(800),
        })
    }

    pub fn detach_grace(&self) -> Duration {
        Duration::from_millis(self.launch_detach_grace_ms)
    }
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("youtube_api_key", &"[REDACTED]")
            .field("youtube_api_base", &self.youtube_api_base)
            .field("launch_detach_grace_ms", &self.launch_detach_grace_ms)
            .finish()
    }
}
