//! Verification engine: reconciles a tree of zipped ROM dumps against a
//! reference DAT and reports which catalog entries are missing.

pub mod archive;
pub mod engine;
pub mod error;
pub mod hasher;
pub mod report;
pub mod scanner;
pub mod settings;
pub mod verify;

pub use archive::{ArchivePolicy, ExtractedPayload, extract_payload, is_supported_archive};
pub use engine::{ItemChecksum, ItemEvent, Reconciler, Reconciliation, RunStats, checksum_item};
pub use error::{ConfigError, ItemError, ReportError, ScanError, VerifyError};
pub use hasher::{DEFAULT_HEADER_LEN, payload_checksum};
pub use report::{Report, combined_missing, format_rate};
pub use scanner::{ItemScan, scan_items};
pub use settings::{VerifyConfig, load_config};
pub use verify::{VerifyOutcome, verify_collection};

pub use rom_verify_dat::{CatalogEntry, CatalogIndex, DatError};
