//! Directory scanner for ROM collections.
//!
//! Walks one or more roots recursively and yields every regular file,
//! pruning directories whose name is in the exclusion list before they are
//! entered. Entries are visited in file-name order. Symbolic links are
//! followed, so a linked archive is checked like any other file; link cycles
//! are reported as walk errors.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use walkdir::{DirEntry, WalkDir};

use crate::error::ScanError;

/// Lazy sequence of discovered file paths.
pub struct ItemScan {
    inner: Box<dyn Iterator<Item = PathBuf>>,
}

impl Iterator for ItemScan {
    type Item = PathBuf;

    fn next(&mut self) -> Option<PathBuf> {
        self.inner.next()
    }
}

/// Start a scan over `roots`.
///
/// Every root is checked for readability first, so an inaccessible root fails
/// here rather than partway through a run. Nothing else is read until the
/// returned iterator is advanced.
pub fn scan_items(roots: &[PathBuf], excluded: &[String]) -> Result<ItemScan, ScanError> {
    for root in roots {
        check_root(root)?;
    }

    let excluded: HashSet<String> = excluded.iter().cloned().collect();
    let roots = roots.to_vec();
    let inner = roots
        .into_iter()
        .flat_map(move |root| walk_root(root, excluded.clone()));

    Ok(ItemScan {
        inner: Box::new(inner),
    })
}

fn check_root(root: &Path) -> Result<(), ScanError> {
    std::fs::read_dir(root)
        .map(|_| ())
        .map_err(|source| ScanError::RootUnreadable {
            path: root.to_path_buf(),
            source,
        })
}

fn walk_root(root: PathBuf, excluded: HashSet<String>) -> impl Iterator<Item = PathBuf> {
    WalkDir::new(root)
        .follow_links(true)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(move |entry| !is_excluded_dir(entry, &excluded))
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(e) => {
                log::warn!("Skipping unreadable path: {e}");
                None
            }
        })
        .filter(|entry| entry.file_type().is_file())
        .map(DirEntry::into_path)
}

/// Whether a directory below the root carries an excluded name.
fn is_excluded_dir(entry: &DirEntry, excluded: &HashSet<String>) -> bool {
    entry.depth() > 0
        && entry.file_type().is_dir()
        && entry
            .file_name()
            .to_str()
            .is_some_and(|name| excluded.contains(name))
}

#[cfg(test)]
#[path = "tests/scanner_tests.rs"]
mod tests;
