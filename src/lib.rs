pub mod config;
pub mod error;
pub mod launcher;
pub mod mcp;
pub mod search;
pub mod tools;
