pub mod music;

pub use music::PlaySongTool;
