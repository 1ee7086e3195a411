use thiserror::Error;

use rom_verify_lib::{ConfigError, DatError, ReportError, ScanError, VerifyError};

/// Errors that end a CLI run, each mapped to a distinct exit code.
#[derive(Debug, Error)]
pub(crate) enum CliError {
    /// The reference DAT could not be read or parsed
    #[error("DAT error: {0}")]
    Catalog(#[from] DatError),

    /// A ROM directory could not be read
    #[error("{0}")]
    Scan(#[from] ScanError),

    /// Settings file error
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    /// The missing-entries file could not be written
    #[error("{0}")]
    Report(#[from] ReportError),
}

impl CliError {
    /// Process exit code: 1 for catalog problems, 2 for unreadable ROM
    /// directories, 3 for settings or output problems.
    pub(crate) fn exit_code(&self) -> i32 {
        match self {
            Self::Catalog(_) => 1,
            Self::Scan(_) => 2,
            Self::Config(_) | Self::Report(_) => 3,
        }
    }
}

impl From<VerifyError> for CliError {
    fn from(e: VerifyError) -> Self {
        match e {
            VerifyError::Config(e) => Self::Config(e),
            VerifyError::Catalog(e) => Self::Catalog(e),
            VerifyError::Scan(e) => Self::Scan(e),
        }
    }
}
