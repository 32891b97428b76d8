use crate::utils::error::{AppError, AppResult, DirectoryProblem};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Component, MAIN_SEPARATOR_STR, Path, PathBuf};
use tracing::debug;

/// Key holding the MAME install root
pub const MAMEDIR_KEY: &str = "mamedir";

const SETTINGS_DIR_NAME: &str = ".mame-dl";
const CONFIG_FILE_NAME: &str = "conf.json";
const CATALOGUE_FILE_NAME: &str = "db.json";
const SOURCES_FILE_NAME: &str = "sources.cfg";

/// Location of every file the tool persists.
#[derive(Debug, Clone)]
pub struct AppPaths {
    settings_dir: PathBuf,
}

impl AppPaths {
    pub fn new(settings_dir: impl Into<PathBuf>) -> Self {
        Self {
            settings_dir: settings_dir.into(),
        }
    }

    /// Pick the settings directory: explicit override, then `MAME_DL_HOME`,
    /// then `~/.mame-dl`.
    pub fn resolve(override_dir: Option<&Path>) -> Self {
        if let Some(dir) = override_dir {
            return Self::new(dir);
        }

        if let Some(dir) = get_home_override() {
            return Self::new(dir);
        }

        Self::new(
            dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(SETTINGS_DIR_NAME),
        )
    }

    pub fn ensure_exists(&self) -> AppResult<()> {
        if !self.settings_dir.exists() {
            debug!(dir = %self.settings_dir.display(), "creating settings directory");
            std::fs::create_dir_all(&self.settings_dir)?;
        }
        Ok(())
    }

    pub fn settings_dir(&self) -> &Path {
        &self.settings_dir
    }

    pub fn config_file(&self) -> PathBuf {
        self.settings_dir.join(CONFIG_FILE_NAME)
    }

    pub fn catalogue_file(&self) -> PathBuf {
        self.settings_dir.join(CATALOGUE_FILE_NAME)
    }

    pub fn sources_file(&self) -> PathBuf {
        self.settings_dir.join(SOURCES_FILE_NAME)
    }
}

pub fn get_home_override() -> Option<PathBuf> {
    std::env::var("MAME_DL_HOME")
        .ok()
        .filter(|dir| !dir.is_empty())
        .map(PathBuf::from)
}

/// User settings, persisted as a flat JSON object of strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Config {
    values: BTreeMap<String, String>,
}

impl Config {
    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.values.insert(key.into(), value.into());
    }

    pub fn mamedir(&self) -> AppResult<PathBuf> {
        self.get(MAMEDIR_KEY)
            .map(PathBuf::from)
            .ok_or(AppError::ConfigMissing)
    }

    /// `<mamedir>/roms`, where archives live
    pub fn roms_dir(&self) -> AppResult<PathBuf> {
        Ok(self.mamedir()?.join("roms"))
    }
}

pub struct ConfigStore {
    path: PathBuf,
}

impl ConfigStore {
    pub fn new(paths: &AppPaths) -> Self {
        Self {
            path: paths.config_file(),
        }
    }

    pub fn load(&self) -> AppResult<Config> {
        if !self.path.exists() {
            return Err(AppError::ConfigMissing);
        }

        let content = std::fs::read_to_string(&self.path)?;
        let config: Config = serde_json::from_str(&content)?;
        debug!(path = %self.path.display(), "loaded configuration");
        Ok(config)
    }

    /// Merge one key into the stored settings and write them back.
    pub fn set(&self, key: &str, value: &str) -> AppResult<Config> {
        let mut config = if self.path.exists() {
            self.load()?
        } else {
            Config::default()
        };

        config.set(key, value);
        self.save(&config)?;
        Ok(config)
    }

    fn save(&self, config: &Config) -> AppResult<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string(config)?;
        std::fs::write(&self.path, content)?;
        debug!(path = %self.path.display(), "saved configuration");
        Ok(())
    }
}

/// Turn a user-supplied path into a validated install root.
///
/// The path is made absolute lexically, so a `roms` symlink is still seen as
/// `roms`. A path to the `roms` folder itself is accepted and replaced by its
/// parent. The result always ends with a path separator.
pub fn resolve_install_root(path: &Path) -> AppResult<PathBuf> {
    let missing = || AppError::InvalidDirectory {
        path: path.to_path_buf(),
        problem: DirectoryProblem::Missing,
    };

    let absolute = lexical_absolute(path).map_err(|_| missing())?;
    if !absolute.exists() {
        return Err(missing());
    }

    let root = match absolute.file_name() {
        Some(name) if name == "roms" => absolute
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| absolute.clone()),
        _ => absolute,
    };

    if !root.join("roms").is_dir() {
        return Err(AppError::InvalidDirectory {
            path: root,
            problem: DirectoryProblem::NoRomsFolder,
        });
    }

    Ok(with_trailing_separator(root))
}

/// Absolute form of `path` with `.` and `..` folded away, without touching
/// the filesystem.
fn lexical_absolute(path: &Path) -> std::io::Result<PathBuf> {
    let mut folded = PathBuf::new();
    for component in std::path::absolute(path)?.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                folded.pop();
            }
            other => folded.push(other),
        }
    }
    Ok(folded)
}

fn with_trailing_separator(path: PathBuf) -> PathBuf {
    if path.as_os_str().to_string_lossy().ends_with(MAIN_SEPARATOR_STR) {
        return path;
    }
    let mut raw = path.into_os_string();
    raw.push(MAIN_SEPARATOR_STR);
    PathBuf::from(raw)
}
