//! mame-dl - a CLI ROM manager for MAME
//!
//! Scrapes configured web pages for `.zip` links, keeps the resulting
//! name→URL catalogue, and downloads or deletes archives in a MAME install's
//! `roms` directory.

pub mod cli;
pub mod config;
pub mod core;
pub mod download;
pub mod http;
pub mod manager;
pub mod scrape;
pub mod sources;
pub mod storage;
pub mod utils;

// Re-export core types for easier use
pub use config::{AppPaths, Config, ConfigStore};
pub use crate::core::{catalogue::Catalogue, traits::Transport};
pub use download::{AddOutcome, DownloadManager};
pub use storage::CatalogueStore;
pub use utils::error::{AppError, AppResult};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
