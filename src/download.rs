//! Fetching and removing archives in the install root's `roms` directory.

use crate::core::catalogue::{Catalogue, archive_file_name};
use crate::core::traits::Transport;
use crate::utils::error::{AppError, AppResult};
use crate::utils::output::{OutputStyle, print_skip};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

const TMP_SUFFIX: &str = ".tmp";

/// What `add` did for a single machine
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddOutcome {
    Downloaded { file: String, bytes: u64 },
    /// The archive was already present and `force` was not given
    Skipped { file: String },
}

pub struct DownloadManager {
    roms_dir: PathBuf,
}

impl DownloadManager {
    pub fn new(roms_dir: impl Into<PathBuf>) -> Self {
        Self {
            roms_dir: roms_dir.into(),
        }
    }

    pub fn roms_dir(&self) -> &Path {
        &self.roms_dir
    }

    pub fn archive_path(&self, file_name: &str) -> PathBuf {
        self.roms_dir.join(file_name)
    }

    fn tmp_path(&self, file_name: &str) -> PathBuf {
        self.roms_dir.join(format!("{}{}", file_name, TMP_SUFFIX))
    }

    /// Download each machine in order.
    ///
    /// Stops at the first machine missing from the catalogue or the first
    /// failed transfer. Existing archives are skipped unless `force` is set.
    pub async fn add(
        &self,
        catalogue: &Catalogue,
        transport: &dyn Transport,
        machines: &[String],
        force: bool,
    ) -> AppResult<Vec<AddOutcome>> {
        let mut outcomes = Vec::with_capacity(machines.len());

        for machine in machines {
            let file = archive_file_name(machine);
            let url = catalogue
                .url_for(&file)
                .ok_or_else(|| AppError::UnknownMachine(machine.clone()))?;

            let dest = self.archive_path(&file);
            if dest.exists() {
                if !force {
                    print_skip(&format!("'{}' already exists in the roms directory", machine));
                    outcomes.push(AddOutcome::Skipped { file });
                    continue;
                }
                debug!(path = %dest.display(), "removing existing archive before re-download");
                std::fs::remove_file(&dest)?;
            }

            let tmp = self.tmp_path(&file);
            if tmp.exists() {
                debug!(path = %tmp.display(), "removing stale partial download");
                std::fs::remove_file(&tmp)?;
            }

            let bytes = transport.download(url, &tmp, machine).await?;
            // Only a completed transfer ever gets the final name
            std::fs::rename(&tmp, &dest)?;

            info!(machine = %machine, bytes, "archive installed");
            println!("+ {}", OutputStyle::machine(machine));
            outcomes.push(AddOutcome::Downloaded { file, bytes });
        }

        Ok(outcomes)
    }

    /// Delete each machine's archive, stopping at the first one that is not
    /// present. The catalogue is not consulted.
    pub fn del(&self, machines: &[String]) -> AppResult<Vec<PathBuf>> {
        let mut removed = Vec::with_capacity(machines.len());

        for machine in machines {
            let path = self.archive_path(&archive_file_name(machine));
            if !path.exists() {
                return Err(AppError::UnknownFile(machine.clone()));
            }

            std::fs::remove_file(&path)?;
            info!(path = %path.display(), "archive deleted");
            println!("- {}", OutputStyle::machine(machine));
            removed.push(path);
        }

        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::Mutex;
    use tempfile::TempDir;

    /// Serves a fixed body for every download; optionally fails after
    /// writing half of it.
    struct FakeFiles {
        body: Vec<u8>,
        fail_midway: bool,
        requested: Mutex<Vec<String>>,
    }

    impl FakeFiles {
        fn serving(body: &[u8]) -> Self {
            Self {
                body: body.to_vec(),
                fail_midway: false,
                requested: Mutex::new(Vec::new()),
            }
        }

        fn interrupted(body: &[u8]) -> Self {
            Self {
                fail_midway: true,
                ..Self::serving(body)
            }
        }

        fn requests(&self) -> Vec<String> {
            self.requested.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl Transport for FakeFiles {
        async fn fetch_page(&self, url: &str) -> AppResult<String> {
            Err(AppError::Network(format!("unexpected page fetch of {}", url)))
        }

        async fn download(&self, url: &str, dest: &Path, _label: &str) -> AppResult<u64> {
            self.requested.lock().unwrap().push(url.to_string());
            if self.fail_midway {
                std::fs::write(dest, &self.body[..self.body.len() / 2])?;
                return Err(AppError::Fetch {
                    url: url.to_string(),
                    reason: "transfer interrupted: connection reset".to_string(),
                });
            }
            std::fs::write(dest, &self.body)?;
            Ok(self.body.len() as u64)
        }
    }

    fn setup() -> (TempDir, DownloadManager, Catalogue) {
        let dir = TempDir::new().unwrap();
        let roms = dir.path().join("roms");
        std::fs::create_dir(&roms).unwrap();

        let mut catalogue = Catalogue::new();
        catalogue.insert_if_absent("sonic.zip", "http://x/sonic.zip");
        catalogue.insert_if_absent("pacman.zip", "http://x/pacman.zip");

        (dir, DownloadManager::new(roms), catalogue)
    }

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[tokio::test]
    async fn test_add_del_scenario() {
        let (_dir, manager, catalogue) = setup();
        let archive = manager.archive_path("sonic.zip");

        let fake = FakeFiles::serving(b"first");
        let outcomes = manager.add(&catalogue, &fake, &names(&["sonic"]), false).await.unwrap();
        assert_eq!(
            outcomes,
            vec![AddOutcome::Downloaded { file: "sonic.zip".to_string(), bytes: 5 }]
        );
        assert_eq!(std::fs::read(&archive).unwrap(), b"first");
        assert_eq!(fake.requests(), vec!["http://x/sonic.zip"]);

        // Second add without force leaves the file alone
        let fake = FakeFiles::serving(b"second");
        let outcomes = manager.add(&catalogue, &fake, &names(&["sonic"]), false).await.unwrap();
        assert_eq!(outcomes, vec![AddOutcome::Skipped { file: "sonic.zip".to_string() }]);
        assert!(fake.requests().is_empty());
        assert_eq!(std::fs::read(&archive).unwrap(), b"first");

        // Forced add replaces it
        let outcomes = manager.add(&catalogue, &fake, &names(&["sonic"]), true).await.unwrap();
        assert!(matches!(outcomes[0], AddOutcome::Downloaded { .. }));
        assert_eq!(std::fs::read(&archive).unwrap(), b"second");

        let removed = manager.del(&names(&["sonic"])).unwrap();
        assert_eq!(removed, vec![archive.clone()]);
        assert!(!archive.exists());

        assert!(matches!(
            manager.del(&names(&["sonic"])),
            Err(AppError::UnknownFile(ref name)) if name == "sonic"
        ));
    }

    #[tokio::test]
    async fn test_add_accepts_name_with_extension() {
        let (_dir, manager, catalogue) = setup();
        let fake = FakeFiles::serving(b"data");

        manager.add(&catalogue, &fake, &names(&["pacman.zip"]), false).await.unwrap();
        assert!(manager.archive_path("pacman.zip").exists());
    }

    #[tokio::test]
    async fn test_skip_does_not_stop_batch() {
        let (_dir, manager, catalogue) = setup();
        std::fs::write(manager.archive_path("sonic.zip"), b"kept").unwrap();
        let fake = FakeFiles::serving(b"data");

        let outcomes = manager
            .add(&catalogue, &fake, &names(&["sonic", "pacman"]), false)
            .await
            .unwrap();

        assert!(matches!(outcomes[0], AddOutcome::Skipped { .. }));
        assert!(matches!(outcomes[1], AddOutcome::Downloaded { .. }));
        assert_eq!(fake.requests(), vec!["http://x/pacman.zip"]);
    }

    #[tokio::test]
    async fn test_unknown_machine_aborts_batch() {
        let (_dir, manager, catalogue) = setup();
        let fake = FakeFiles::serving(b"data");

        let result = manager
            .add(&catalogue, &fake, &names(&["nosuch", "sonic"]), false)
            .await;

        assert!(matches!(result, Err(AppError::UnknownMachine(ref name)) if name == "nosuch"));
        assert!(fake.requests().is_empty());
        assert!(!manager.archive_path("sonic.zip").exists());
    }

    #[tokio::test]
    async fn test_interrupted_download_leaves_only_tmp() {
        let (_dir, manager, catalogue) = setup();
        let fake = FakeFiles::interrupted(b"0123456789");

        let result = manager.add(&catalogue, &fake, &names(&["sonic"]), false).await;

        assert!(matches!(result, Err(AppError::Fetch { .. })));
        assert!(!manager.archive_path("sonic.zip").exists());
        assert_eq!(std::fs::read(manager.tmp_path("sonic.zip")).unwrap(), b"01234");
    }

    #[tokio::test]
    async fn test_stale_tmp_is_replaced() {
        let (_dir, manager, catalogue) = setup();
        std::fs::write(manager.tmp_path("sonic.zip"), b"stale partial").unwrap();
        let fake = FakeFiles::serving(b"fresh");

        manager.add(&catalogue, &fake, &names(&["sonic"]), false).await.unwrap();

        assert!(!manager.tmp_path("sonic.zip").exists());
        assert_eq!(std::fs::read(manager.archive_path("sonic.zip")).unwrap(), b"fresh");
    }

    #[test]
    fn test_del_stops_at_first_missing() {
        let (_dir, manager, _catalogue) = setup();
        std::fs::write(manager.archive_path("pacman.zip"), b"x").unwrap();

        let result = manager.del(&names(&["galaga", "pacman"]));

        assert!(matches!(result, Err(AppError::UnknownFile(_))));
        assert!(manager.archive_path("pacman.zip").exists());
    }
}
