//! Checksum index over a reference DAT.
//!
//! A [`CatalogIndex`] maps each game's CRC32 to its name. The verification
//! engine owns one for the duration of a run and shrinks it with
//! [`CatalogIndex::remove`] as files are matched, so whatever remains at the
//! end is the set of missing entries.

use std::collections::HashMap;
use std::path::Path;

use crate::dat::{DatFile, parse_dat_file};
use crate::error::DatError;

/// One catalog entry: a game name and the checksum it is indexed under.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct CatalogEntry {
    pub name: String,
    pub checksum: String,
}

impl CatalogEntry {
    pub fn new(name: impl Into<String>, checksum: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            checksum: checksum.into(),
        }
    }
}

/// Mapping of checksum (lowercase hex CRC32) to game name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CatalogIndex {
    by_checksum: HashMap<String, String>,
}

impl CatalogIndex {
    /// Build an index from a parsed DAT file.
    ///
    /// Games are inserted in document order. Two games sharing a checksum
    /// collapse to one entry carrying the later name.
    pub fn from_dat(dat: &DatFile) -> Self {
        Self::from_entries(dat.games.iter().filter_map(|game| {
            game.checksum()
                .map(|crc| CatalogEntry::new(game.name.clone(), crc))
        }))
    }

    /// Build an index from entries, in order. Later duplicates win.
    pub fn from_entries(entries: impl IntoIterator<Item = CatalogEntry>) -> Self {
        let mut by_checksum = HashMap::new();
        for entry in entries {
            if let Some(previous) = by_checksum.insert(entry.checksum.clone(), entry.name) {
                log::debug!(
                    "Checksum {} is shared by multiple games; dropping \"{}\"",
                    entry.checksum,
                    previous
                );
            }
        }
        Self { by_checksum }
    }

    pub fn len(&self) -> usize {
        self.by_checksum.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_checksum.is_empty()
    }

    pub fn contains(&self, checksum: &str) -> bool {
        self.by_checksum.contains_key(checksum)
    }

    /// Name of the game indexed under `checksum`, if any.
    pub fn get(&self, checksum: &str) -> Option<&str> {
        self.by_checksum.get(checksum).map(String::as_str)
    }

    /// Remove an entry, returning its name. A second removal of the same
    /// checksum returns `None`.
    pub fn remove(&mut self, checksum: &str) -> Option<String> {
        self.by_checksum.remove(checksum)
    }

    /// Iterate over `(checksum, name)` pairs in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.by_checksum
            .iter()
            .map(|(crc, name)| (crc.as_str(), name.as_str()))
    }

    /// Number of entries whose name contains `marker` (case-sensitive substring).
    pub fn count_matching(&self, marker: &str) -> usize {
        self.by_checksum
            .values()
            .filter(|name| name.contains(marker))
            .count()
    }

    /// Entries whose name contains `marker`, sorted by name then checksum.
    pub fn entries_matching(&self, marker: &str) -> Vec<CatalogEntry> {
        let mut entries: Vec<CatalogEntry> = self
            .iter()
            .filter(|(_, name)| name.contains(marker))
            .map(|(crc, name)| CatalogEntry::new(name, crc))
            .collect();
        entries.sort();
        entries
    }
}

/// Parse a DAT file and build its checksum index.
pub fn load_catalog(path: &Path) -> Result<CatalogIndex, DatError> {
    let dat = parse_dat_file(path)?;
    log::debug!(
        "Loaded DAT \"{}\" version {} ({} games)",
        dat.name,
        dat.version,
        dat.games.len()
    );
    Ok(CatalogIndex::from_dat(&dat))
}

#[cfg(test)]
#[path = "tests/catalog_tests.rs"]
mod tests;
