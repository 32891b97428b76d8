// Catalogue operations - update, search

use crate::cli::SearchArgs;
use crate::config::AppPaths;
use crate::core::catalogue::Catalogue;
use crate::core::traits::Transport;
use crate::scrape::Scraper;
use crate::sources::SourceList;
use crate::storage::CatalogueStore;
use crate::utils::error::AppResult;
use crate::utils::output::print_success;
use tracing::info;

/// Rescrape every source and replace the stored catalogue.
///
/// Nothing is written unless every source was fetched successfully.
pub async fn handle_update_command(paths: &AppPaths, transport: &dyn Transport) -> AppResult<Catalogue> {
    let sources = SourceList::new(paths).load()?;
    let rebuild = Scraper::new(transport).rebuild(&sources).await?;

    println!("Saving database...");
    CatalogueStore::new(paths).save(&rebuild.catalogue)?;
    print_success(&format!(
        "{} zip files catalogued from {} sources",
        rebuild.catalogue.len(),
        sources.len()
    ));

    Ok(rebuild.catalogue)
}

pub fn handle_search_command(paths: &AppPaths, args: &SearchArgs) -> AppResult<Vec<String>> {
    let catalogue = CatalogueStore::new(paths).load()?;
    let found: Vec<String> = catalogue
        .search(&args.query, args.regex)?
        .into_iter()
        .map(str::to_string)
        .collect();

    if found.is_empty() {
        info!(query = %args.query, regex = args.regex, "no machines matched");
    }
    for name in &found {
        println!("{}", name);
    }

    Ok(found)
}
