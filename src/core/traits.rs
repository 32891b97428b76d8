//! Core trait definitions
//!
//! The network is reached only through [`Transport`], so the scraper and the
//! download manager can run against canned pages and files.

use crate::utils::error::AppResult;
use async_trait::async_trait;
use std::path::Path;

#[async_trait]
pub trait Transport: Send + Sync {
    /// Fetch a page and return its body as text.
    ///
    /// A response with a non-success status is an error.
    async fn fetch_page(&self, url: &str) -> AppResult<String>;

    /// Stream the body of `url` into the file at `dest`, creating or
    /// truncating it. Returns the number of bytes written.
    ///
    /// On failure whatever was already written stays in `dest`.
    async fn download(&self, url: &str, dest: &Path, label: &str) -> AppResult<u64>;
}
