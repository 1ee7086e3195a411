//! Reconciliation of discovered files against the catalog index.
//!
//! The [`Reconciler`] owns the [`CatalogIndex`] for the duration of a run.
//! Each supported file is extracted and checksummed; a checksum still present
//! in the index is removed and recorded as matched. Because an entry can only
//! be removed once, the first file carrying a given checksum claims it and any
//! later duplicate is reported as unmatched.
//!
//! With more than one job, extraction and checksumming run on a rayon pool
//! in batches, but results are applied on the calling thread in discovery
//! order, so the outcome is identical to a sequential run.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use rayon::prelude::*;
use rom_verify_dat::CatalogIndex;

use crate::archive::{extract_payload, is_supported_archive};
use crate::error::ItemError;
use crate::hasher::payload_checksum;
use crate::settings::VerifyConfig;

/// Files handed to each worker per parallel batch.
const BATCH_PER_JOB: usize = 16;

/// Checksum of one archive's payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemChecksum {
    /// Name of the archive entry that was hashed
    pub entry_name: String,
    pub checksum: String,
}

/// Progress events emitted once per discovered file.
#[derive(Debug)]
pub enum ItemEvent {
    /// The checksum was found in the catalog and claimed
    Matched {
        path: PathBuf,
        entry_name: String,
        checksum: String,
        game: String,
    },
    /// The checksum is not (or no longer) in the catalog
    NoMatch {
        path: PathBuf,
        entry_name: String,
        checksum: String,
    },
    /// Extraction or checksumming failed; the file was skipped
    Failed { path: PathBuf, error: ItemError },
    /// Not a supported archive type
    Skipped { path: PathBuf },
}

/// Counters for a single run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunStats {
    /// Archives that were opened and checksummed (or attempted)
    pub checked: usize,
    pub matched: usize,
    pub unmatched: usize,
    pub failed: usize,
    /// Files ignored because of their extension
    pub skipped: usize,
}

/// Final state of a run.
#[derive(Debug, Clone)]
pub struct Reconciliation {
    /// Catalog entries no file matched
    pub unmatched: CatalogIndex,
    /// Checksums confirmed present, with the game each one claimed
    pub matched: BTreeMap<String, String>,
    pub stats: RunStats,
}

/// Extract the first entry of an archive, strip its header and checksum it.
pub fn checksum_item(path: &Path, config: &VerifyConfig) -> Result<ItemChecksum, ItemError> {
    let payload = extract_payload(path, config.archive_policy)?;
    let checksum = payload_checksum(&payload.data, config.header_len)?;
    Ok(ItemChecksum {
        entry_name: payload.entry_name,
        checksum,
    })
}

/// Drives a verification run.
pub struct Reconciler {
    config: VerifyConfig,
}

impl Reconciler {
    pub fn new(config: VerifyConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &VerifyConfig {
        &self.config
    }

    /// Reconcile `items` against `index`, reporting each file to `observer`.
    pub fn run<I>(
        &self,
        index: CatalogIndex,
        items: I,
        observer: &dyn Fn(ItemEvent),
    ) -> Reconciliation
    where
        I: IntoIterator<Item = PathBuf>,
    {
        let mut state = RunState {
            index,
            matched: BTreeMap::new(),
            stats: RunStats::default(),
        };

        match worker_pool(self.config.effective_jobs()) {
            Some(pool) => self.run_parallel(&mut state, &pool, items, observer),
            None => {
                for path in items {
                    let result = self.check(&path);
                    state.record(path, result, observer);
                }
            }
        }

        log::debug!(
            "Reconciliation finished: {} matched, {} unmatched, {} failed, {} skipped",
            state.stats.matched,
            state.stats.unmatched,
            state.stats.failed,
            state.stats.skipped
        );

        Reconciliation {
            unmatched: state.index,
            matched: state.matched,
            stats: state.stats,
        }
    }

    /// `None` for files that are not supported archives.
    fn check(&self, path: &Path) -> Option<Result<ItemChecksum, ItemError>> {
        is_supported_archive(path, &self.config.extensions)
            .then(|| checksum_item(path, &self.config))
    }

    fn run_parallel(
        &self,
        state: &mut RunState,
        pool: &rayon::ThreadPool,
        items: impl IntoIterator<Item = PathBuf>,
        observer: &dyn Fn(ItemEvent),
    ) {
        // Checksum a batch in parallel, then apply it in discovery order so
        // progress keeps flowing between batches
        let batch_len = pool.current_num_threads() * BATCH_PER_JOB;
        let mut items = items.into_iter().peekable();
        while items.peek().is_some() {
            let batch: Vec<PathBuf> = items.by_ref().take(batch_len).collect();
            let results: Vec<_> =
                pool.install(|| batch.par_iter().map(|path| self.check(path)).collect());
            for (path, result) in batch.into_iter().zip(results) {
                state.record(path, result, observer);
            }
        }
    }
}

/// A dedicated pool for `jobs` workers, or `None` to check on the calling thread.
fn worker_pool(jobs: usize) -> Option<rayon::ThreadPool> {
    if jobs <= 1 {
        return None;
    }
    match rayon::ThreadPoolBuilder::new().num_threads(jobs).build() {
        Ok(pool) => Some(pool),
        Err(e) => {
            log::warn!("Cannot start {jobs} checksum workers ({e}), checking sequentially");
            None
        }
    }
}

/// Index and match set, owned by a single run.
struct RunState {
    index: CatalogIndex,
    matched: BTreeMap<String, String>,
    stats: RunStats,
}

impl RunState {
    fn record(
        &mut self,
        path: PathBuf,
        result: Option<Result<ItemChecksum, ItemError>>,
        observer: &dyn Fn(ItemEvent),
    ) {
        let Some(result) = result else {
            self.stats.skipped += 1;
            observer(ItemEvent::Skipped { path });
            return;
        };

        self.stats.checked += 1;
        match result {
            Ok(item) => match self.index.remove(&item.checksum) {
                Some(game) => {
                    self.stats.matched += 1;
                    self.matched.insert(item.checksum.clone(), game.clone());
                    observer(ItemEvent::Matched {
                        path,
                        entry_name: item.entry_name,
                        checksum: item.checksum,
                        game,
                    });
                }
                None => {
                    self.stats.unmatched += 1;
                    observer(ItemEvent::NoMatch {
                        path,
                        entry_name: item.entry_name,
                        checksum: item.checksum,
                    });
                }
            },
            Err(error) => {
                self.stats.failed += 1;
                observer(ItemEvent::Failed { path, error });
            }
        }
    }
}

#[cfg(test)]
#[path = "tests/engine_tests.rs"]
mod tests;
