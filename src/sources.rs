use crate::config::AppPaths;
use crate::utils::error::AppResult;
use crate::utils::output::print_warning;
use std::path::PathBuf;
use tracing::debug;

/// Written to `sources.cfg` the first time it is needed.
pub const DEFAULT_SOURCES: &str = "\
# mame-dl sources: one page URL per line, scraped in order by `mame-dl update`.
# Every link on a page whose text ends in .zip is catalogued; when two pages
# list the same file name the earlier page wins. Lines starting with # are ignored.
https://archive.org/download/mame-merged/mame-merged/
https://archive.org/download/mame-0.221-roms-merged/
";

/// The user-editable list of pages to scrape
pub struct SourceList {
    path: PathBuf,
}

impl SourceList {
    pub fn new(paths: &AppPaths) -> Self {
        Self {
            path: paths.sources_file(),
        }
    }

    /// Read the source URLs in file order, seeding the file with
    /// [`DEFAULT_SOURCES`] when it does not exist yet.
    pub fn load(&self) -> AppResult<Vec<String>> {
        if !self.path.exists() {
            print_warning("No sources.cfg file, writing defaults");
            if let Some(parent) = self.path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(&self.path, DEFAULT_SOURCES)?;
        }

        let content = std::fs::read_to_string(&self.path)?;
        let sources = parse_sources(&content);
        debug!(path = %self.path.display(), count = sources.len(), "loaded sources");
        Ok(sources)
    }
}

/// One URL per line; blank lines and `#` comments are skipped.
pub fn parse_sources(content: &str) -> Vec<String> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_string)
        .collect()
}
