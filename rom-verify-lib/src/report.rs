//! Completion report and missing-entries file.

use std::collections::BTreeSet;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use rom_verify_dat::CatalogEntry;

use crate::engine::Reconciliation;
use crate::error::ReportError;

/// Summary of a verification run for one region marker.
#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    pub region: String,
    /// Catalog entries containing the region marker, counted before matching
    pub dat_size: usize,
    /// Distinct checksums matched during the run, whatever their region
    pub romset_size: usize,
    /// `romset_size / dat_size * 100`, rounded to two decimals
    pub completion_rate: f64,
    /// Matched games whose name contains the region marker
    pub region_matched: usize,
    /// Unmatched entries containing the region marker, sorted by name
    pub missing: Vec<CatalogEntry>,
}

impl Report {
    /// Build a report. `dat_size` must be counted on the catalog as it was
    /// before reconciliation started, not on the shrunken index.
    pub fn generate(dat_size: usize, reconciliation: &Reconciliation, region: &str) -> Self {
        let romset_size = reconciliation.matched.len();
        let region_matched = reconciliation
            .matched
            .values()
            .filter(|game| game.contains(region))
            .count();
        Self {
            region: region.to_string(),
            dat_size,
            romset_size,
            completion_rate: completion_rate(romset_size, dat_size),
            region_matched,
            missing: reconciliation.unmatched.entries_matching(region),
        }
    }

    /// Write one `name, checksum` line per missing entry.
    pub fn write_missing_to<W: Write>(&self, writer: W) -> std::io::Result<()> {
        write_entries_to(writer, &self.missing)
    }

    /// Create (or truncate) `path` and write the missing entries to it.
    pub fn write_missing(&self, path: &Path) -> Result<(), ReportError> {
        write_entries(path, &self.missing)
    }

    /// The two closing summary lines.
    pub fn summary_lines(&self) -> [String; 2] {
        [
            format!(
                "found {} valid roms out of {}",
                self.romset_size, self.dat_size
            ),
            format!("romset is {}% complete", format_rate(self.completion_rate)),
        ]
    }

    /// Completion counting only matches inside this region.
    pub fn region_rate(&self) -> f64 {
        completion_rate(self.region_matched, self.dat_size)
    }

    /// One row of the per-region table: marker, rate, matched / total.
    pub fn breakdown_line(&self) -> String {
        format!(
            "{:<10}{:>8}%{:>10}/{}",
            self.region,
            format_rate(self.region_rate()),
            self.region_matched,
            self.dat_size
        )
    }
}

/// Union of the missing entries of several reports, sorted by name.
pub fn combined_missing(reports: &[Report]) -> Vec<CatalogEntry> {
    let entries: BTreeSet<&CatalogEntry> = reports.iter().flat_map(|r| &r.missing).collect();
    entries.into_iter().cloned().collect()
}

/// Create (or truncate) `path` and write `entries` to it, one per line.
pub fn write_entries(path: &Path, entries: &[CatalogEntry]) -> Result<(), ReportError> {
    let to_error = |source| ReportError::Write {
        path: path.to_path_buf(),
        source,
    };
    let file = File::create(path).map_err(to_error)?;
    write_entries_to(BufWriter::new(file), entries).map_err(to_error)
}

fn write_entries_to<W: Write>(mut writer: W, entries: &[CatalogEntry]) -> std::io::Result<()> {
    for entry in entries {
        writeln!(writer, "{}, {}", entry.name, entry.checksum)?;
    }
    writer.flush()
}

/// Percentage of `dat_size` covered by `romset_size`, rounded to two decimals.
/// An empty region yields 0.
pub fn completion_rate(romset_size: usize, dat_size: usize) -> f64 {
    if dat_size == 0 {
        return 0.0;
    }
    let rate = romset_size as f64 / dat_size as f64 * 100.0;
    // Exact ties go to the even neighbour, so 3.125 becomes 3.12
    (rate * 100.0).round_ties_even() / 100.0
}

/// Render a rate with at most two decimals and at least one: `100.0`, `12.5`, `33.33`.
pub fn format_rate(rate: f64) -> String {
    let fixed = format!("{rate:.2}");
    let trimmed = fixed.trim_end_matches('0');
    if trimmed.ends_with('.') {
        format!("{trimmed}0")
    } else {
        trimmed.to_string()
    }
}

#[cfg(test)]
#[path = "tests/report_tests.rs"]
mod tests;
