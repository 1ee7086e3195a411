//! Single-entry archive extraction.

use std::io::{Cursor, Read};
use std::path::Path;

use serde::Deserialize;
use zip::ZipArchive;

use crate::error::ItemError;

/// How to treat archives that list more than one entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ArchivePolicy {
    /// Use the first listed entry and ignore the rest
    #[default]
    FirstEntryOnly,
    /// Fail with [`ItemError::MultiEntryArchive`]
    RejectMultiEntry,
}

/// The first entry of an archive, fully decompressed.
#[derive(Debug, Clone)]
pub struct ExtractedPayload {
    pub entry_name: String,
    pub data: Vec<u8>,
}

/// Check whether `path` has one of the given archive extensions.
pub fn is_supported_archive(path: &Path, extensions: &[String]) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| extensions.iter().any(|allowed| allowed.eq_ignore_ascii_case(ext)))
}

/// Read an archive from disk and return its first entry.
pub fn extract_payload(path: &Path, policy: ArchivePolicy) -> Result<ExtractedPayload, ItemError> {
    let bytes = std::fs::read(path)?;
    extract_from_bytes(bytes, policy)
}

/// Open an in-memory archive and return its first entry.
pub fn extract_from_bytes(
    bytes: Vec<u8>,
    policy: ArchivePolicy,
) -> Result<ExtractedPayload, ItemError> {
    let mut archive = ZipArchive::new(Cursor::new(bytes))?;

    match archive.len() {
        0 => return Err(ItemError::ArchiveEmpty),
        1 => {}
        n if policy == ArchivePolicy::RejectMultiEntry => {
            return Err(ItemError::MultiEntryArchive { entries: n });
        }
        n => log::debug!("Archive has {n} entries, using the first"),
    }

    let mut entry = archive.by_index(0)?;
    let entry_name = entry.name().to_string();
    let mut data = Vec::new();
    entry
        .read_to_end(&mut data)
        .map_err(|e| ItemError::archive_corrupt(format!("{entry_name}: {e}")))?;

    Ok(ExtractedPayload { entry_name, data })
}

#[cfg(test)]
#[path = "tests/archive_tests.rs"]
mod tests;
