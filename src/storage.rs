use crate::config::AppPaths;
use crate::core::catalogue::Catalogue;
use crate::utils::error::{AppError, AppResult};
use std::path::PathBuf;
use tracing::debug;

/// Persists the catalogue built by `update` in `db.json`.
pub struct CatalogueStore {
    path: PathBuf,
}

impl CatalogueStore {
    pub fn new(paths: &AppPaths) -> Self {
        Self {
            path: paths.catalogue_file(),
        }
    }

    pub fn load(&self) -> AppResult<Catalogue> {
        if !self.path.exists() {
            return Err(AppError::CatalogueMissing);
        }

        let content = std::fs::read_to_string(&self.path)?;
        let catalogue: Catalogue = serde_json::from_str(&content)?;
        debug!(path = %self.path.display(), entries = catalogue.len(), "loaded catalogue");
        Ok(catalogue)
    }

    /// Replace the stored catalogue with `catalogue`.
    pub fn save(&self, catalogue: &Catalogue) -> AppResult<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string(catalogue)?;
        std::fs::write(&self.path, content)?;
        debug!(path = %self.path.display(), entries = catalogue.len(), "saved catalogue");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_load_without_file_is_catalogue_missing() {
        let dir = TempDir::new().unwrap();
        let store = CatalogueStore::new(&AppPaths::new(dir.path()));
        assert!(matches!(store.load(), Err(AppError::CatalogueMissing)));
    }

    #[test]
    fn test_save_replaces_previous_catalogue() {
        let dir = TempDir::new().unwrap();
        let store = CatalogueStore::new(&AppPaths::new(dir.path()));

        let mut first = Catalogue::new();
        first.insert_if_absent("sonic.zip", "http://a/sonic.zip");
        first.insert_if_absent("pacman.zip", "http://a/pacman.zip");
        store.save(&first).unwrap();

        let mut second = Catalogue::new();
        second.insert_if_absent("galaga.zip", "http://b/galaga.zip");
        store.save(&second).unwrap();

        let loaded = store.load().unwrap();
        assert_eq!(loaded, second);
        assert!(!loaded.contains("sonic.zip"));
    }

    #[test]
    fn test_corrupt_file_is_serialization_error() {
        let dir = TempDir::new().unwrap();
        let paths = AppPaths::new(dir.path());
        std::fs::write(paths.catalogue_file(), "not json").unwrap();

        let store = CatalogueStore::new(&paths);
        assert!(matches!(store.load(), Err(AppError::Serialization(_))));
    }
}
