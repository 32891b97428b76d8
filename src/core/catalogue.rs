//! The machine catalogue: archive file names mapped to download URLs.

use crate::utils::error::{AppError, AppResult};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Extension every catalogued archive carries
pub const ARCHIVE_EXTENSION: &str = ".zip";

/// Archive file name for a machine, e.g. `sonic` -> `sonic.zip`.
/// Names that already carry the extension are returned unchanged.
pub fn archive_file_name(machine: &str) -> String {
    if machine.ends_with(ARCHIVE_EXTENSION) {
        machine.to_string()
    } else {
        format!("{}{}", machine, ARCHIVE_EXTENSION)
    }
}

/// Machine name for an archive file, e.g. `sonic.zip` -> `sonic`.
pub fn machine_name(file_name: &str) -> &str {
    file_name
        .strip_suffix(ARCHIVE_EXTENSION)
        .unwrap_or(file_name)
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Catalogue {
    entries: BTreeMap<String, String>,
}

impl Catalogue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, file_name: &str) -> bool {
        self.entries.contains_key(file_name)
    }

    pub fn url_for(&self, file_name: &str) -> Option<&str> {
        self.entries.get(file_name).map(String::as_str)
    }

    /// Insert an entry unless the file name is already catalogued.
    /// Returns whether the entry was added.
    pub fn insert_if_absent(&mut self, file_name: impl Into<String>, url: impl Into<String>) -> bool {
        let file_name = file_name.into();
        if self.entries.contains_key(&file_name) {
            return false;
        }
        self.entries.insert(file_name, url.into());
        true
    }

    /// Machine names of every entry, extension stripped
    pub fn machine_names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(|k| machine_name(k))
    }

    /// Search machine names.
    ///
    /// Plain queries match anywhere in the name. Regex queries must match
    /// starting at the first character, but need not consume the whole name.
    pub fn search(&self, query: &str, use_regex: bool) -> AppResult<Vec<&str>> {
        if !use_regex {
            return Ok(self
                .machine_names()
                .filter(|name| name.contains(query))
                .collect());
        }

        let re = Regex::new(query).map_err(|e| AppError::InvalidPattern(e.to_string()))?;
        Ok(self
            .machine_names()
            .filter(|name| re.find(name).is_some_and(|m| m.start() == 0))
            .collect())
    }
}

impl FromIterator<(String, String)> for Catalogue {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        let mut catalogue = Catalogue::new();
        for (file_name, url) in iter {
            catalogue.insert_if_absent(file_name, url);
        }
        catalogue
    }
}
