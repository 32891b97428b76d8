//! Catalogue rebuild: scrape every source page for archive links.

use crate::core::catalogue::{ARCHIVE_EXTENSION, Catalogue};
use crate::core::traits::Transport;
use crate::utils::error::{AppError, AppResult};
use crate::utils::output::OutputStyle;
use scraper::{Html, Selector};
use std::io::Write;
use tracing::{debug, warn};
use url::Url;

/// Outcome of a full rebuild
#[derive(Debug)]
pub struct Rebuild {
    pub catalogue: Catalogue,
    /// New entries contributed by each source, in source order
    pub added_per_source: Vec<usize>,
}

pub struct Scraper<'a> {
    transport: &'a dyn Transport,
}

impl<'a> Scraper<'a> {
    pub fn new(transport: &'a dyn Transport) -> Self {
        Self { transport }
    }

    /// Build a fresh catalogue from `sources`, visited in order.
    ///
    /// The first page to list a file name owns it. Any failed request aborts
    /// the whole rebuild.
    pub async fn rebuild(&self, sources: &[String]) -> AppResult<Rebuild> {
        let mut catalogue = Catalogue::new();
        let mut added_per_source = Vec::with_capacity(sources.len());

        for (i, source) in sources.iter().enumerate() {
            println!(
                "Source {} of {}: {}",
                i + 1,
                sources.len(),
                OutputStyle::url(source)
            );

            print!("Requesting... ");
            flush_stdout();
            let page = self.transport.fetch_page(source).await?;

            print!("Parsing... ");
            flush_stdout();
            let before = catalogue.len();
            for (name, url) in parse_archive_links(&page, source)? {
                catalogue.insert_if_absent(name, url);
            }
            let added = catalogue.len() - before;

            println!("{}", OutputStyle::success("Complete"));
            println!("{} new zip files catalogued\n", added);
            debug!(source = %source, added, total = catalogue.len(), "source scraped");
            added_per_source.push(added);
        }

        Ok(Rebuild {
            catalogue,
            added_per_source,
        })
    }
}

/// Every `(text, absolute url)` pair for anchors whose text names an archive,
/// in document order. Duplicates are left for the caller to resolve.
pub fn parse_archive_links(html: &str, source: &str) -> AppResult<Vec<(String, String)>> {
    let base = directory_url(source)?;
    let document = Html::parse_document(html);
    let selector = Selector::parse("a").map_err(|e| AppError::System(e.to_string()))?;

    let mut links = Vec::new();
    for anchor in document.select(&selector) {
        let text: String = anchor.text().collect();
        let text = text.trim();
        if text.is_empty() || !text.ends_with(ARCHIVE_EXTENSION) {
            continue;
        }

        let Some(href) = anchor.value().attr("href") else {
            continue;
        };

        match base.join(href) {
            Ok(url) => links.push((text.to_string(), url.to_string())),
            Err(e) => warn!(href, error = %e, "skipping unresolvable link"),
        }
    }

    Ok(links)
}

/// Parse `source` as a directory URL, so relative links resolve beneath it.
fn directory_url(source: &str) -> AppResult<Url> {
    let with_slash = if source.ends_with('/') {
        source.to_string()
    } else {
        format!("{}/", source)
    };

    Url::parse(&with_slash).map_err(|e| AppError::Fetch {
        url: source.to_string(),
        reason: format!("invalid source URL: {}", e),
    })
}

fn flush_stdout() {
    std::io::stdout().flush().ok();
}
