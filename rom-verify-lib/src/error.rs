use std::path::PathBuf;

use thiserror::Error;

use rom_verify_dat::DatError;

/// Per-item failures. These are reported and the run moves on to the next file.
#[derive(Debug, Error)]
pub enum ItemError {
    /// The file could not be read from disk
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The archive container or its entry data is malformed
    #[error("Corrupt archive: {0}")]
    ArchiveCorrupt(String),

    /// The archive is well-formed but lists no entries
    #[error("Archive contains no entries")]
    ArchiveEmpty,

    /// More than one entry under the reject-multi-entry policy
    #[error("Archive contains {entries} entries, expected exactly one")]
    MultiEntryArchive { entries: usize },

    /// The payload is smaller than the header that has to be stripped
    #[error("Payload too short: expected at least {expected} bytes, got {actual}")]
    PayloadTooShort { expected: usize, actual: usize },
}

impl ItemError {
    pub fn archive_corrupt(msg: impl Into<String>) -> Self {
        Self::ArchiveCorrupt(msg.into())
    }
}

impl From<zip::result::ZipError> for ItemError {
    fn from(e: zip::result::ZipError) -> Self {
        // The archive is always read from memory, so even an I/O error from
        // the zip reader means the bytes themselves are bad.
        Self::ArchiveCorrupt(e.to_string())
    }
}

/// Errors raised while preparing the directory scan.
#[derive(Debug, Error)]
pub enum ScanError {
    #[error("Cannot read ROM directory {}: {source}", path.display())]
    RootUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Errors loading a configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Cannot read config file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config file {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Invalid settings: {0}")]
    Invalid(String),
}

impl ConfigError {
    pub fn invalid(msg: impl Into<String>) -> Self {
        Self::Invalid(msg.into())
    }
}

/// Errors writing the missing-entries file.
#[derive(Debug, Error)]
pub enum ReportError {
    #[error("Cannot write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Fatal errors that abort a verification run before any item is processed.
#[derive(Debug, Error)]
pub enum VerifyError {
    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Catalog(#[from] DatError),

    #[error("{0}")]
    Scan(#[from] ScanError),
}
