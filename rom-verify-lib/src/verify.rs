use std::path::Path;

use rom_verify_dat::{CatalogEntry, load_catalog};

use crate::engine::{ItemEvent, Reconciler, Reconciliation};
use crate::error::{ReportError, VerifyError};
use crate::report::{Report, combined_missing, write_entries};
use crate::scanner::scan_items;
use crate::settings::VerifyConfig;

/// Result of a complete verification run.
#[derive(Debug, Clone)]
pub struct VerifyOutcome {
    /// One report per configured region, in configuration order
    pub reports: Vec<Report>,
    pub reconciliation: Reconciliation,
}

impl VerifyOutcome {
    /// Missing entries of every region, without duplicates, sorted by name.
    pub fn missing(&self) -> Vec<CatalogEntry> {
        combined_missing(&self.reports)
    }

    /// Create (or truncate) `path` and write [`VerifyOutcome::missing`] to it.
    pub fn write_missing(&self, path: &Path) -> Result<(), ReportError> {
        write_entries(path, &self.missing())
    }
}

/// Load the catalog, scan the configured roots and reconcile the two.
///
/// The catalog is parsed afresh on every call. Settings, catalog and root
/// directory problems are returned as errors before any file is processed;
/// per-file problems are only reported through `observer`. Writing the
/// missing-entries file is left to the caller.
pub fn verify_collection(
    config: &VerifyConfig,
    observer: &dyn Fn(ItemEvent),
) -> Result<VerifyOutcome, VerifyError> {
    config.validate()?;
    let index = load_catalog(&config.dat_file)?;
    let items = scan_items(&config.roots, &config.excluded_dirs)?;

    let dat_sizes: Vec<usize> = config
        .regions
        .iter()
        .map(|region| index.count_matching(region))
        .collect();
    for (region, dat_size) in config.regions.iter().zip(&dat_sizes) {
        log::debug!(
            "Catalog has {} entries, {} matching \"{}\"",
            index.len(),
            dat_size,
            region
        );
    }

    let reconciliation = Reconciler::new(config.clone()).run(index, items, observer);
    let reports = config
        .regions
        .iter()
        .zip(dat_sizes)
        .map(|(region, dat_size)| Report::generate(dat_size, &reconciliation, region))
        .collect();

    Ok(VerifyOutcome {
        reports,
        reconciliation,
    })
}
