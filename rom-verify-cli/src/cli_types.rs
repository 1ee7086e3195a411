//! CLI type definitions.

use std::path::PathBuf;

use clap::Parser;

use rom_verify_lib::{ArchivePolicy, VerifyConfig};

#[derive(Parser)]
#[command(name = "rom-verify")]
#[command(about = "Check a zipped ROM collection against a reference DAT", long_about = None)]
pub(crate) struct Cli {
    /// ROM directories to scan (default: `roots` from the settings file)
    pub roots: Vec<PathBuf>,

    /// Reference DAT file (default: nes.dat)
    #[arg(short, long)]
    pub dat: Option<PathBuf>,

    /// File to write missing entries to (default: MISSING)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Region marker a game name must contain to count, e.g. "(USA)"
    /// (repeatable, replaces the configured list; the first one drives the summary)
    #[arg(short = 'r', long = "region")]
    pub regions: Vec<String>,

    /// Directory names to skip, at any depth (replaces the default list)
    #[arg(short = 'x', long = "exclude")]
    pub exclude: Vec<String>,

    /// Bytes of header to strip before hashing (default: 16)
    #[arg(long)]
    pub header_len: Option<usize>,

    /// Fail archives holding more than one entry instead of using the first
    #[arg(long)]
    pub strict_archives: bool,

    /// Checksum worker threads (0 = all cores)
    #[arg(short, long)]
    pub jobs: Option<usize>,

    /// Settings file (default: ~/.config/rom-verify/config.toml if present)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Only show warnings and errors (suppress normal output)
    #[arg(short, long)]
    pub quiet: bool,

    /// Enable verbose/debug logging (timestamps + debug-level messages)
    #[arg(short, long, conflicts_with = "quiet")]
    pub verbose: bool,
}

impl Cli {
    /// Apply command-line values on top of file/default settings.
    pub(crate) fn apply_overrides(&self, config: &mut VerifyConfig) {
        if !self.roots.is_empty() {
            config.roots = self.roots.clone();
        }
        if let Some(ref dat) = self.dat {
            config.dat_file = dat.clone();
        }
        if let Some(ref output) = self.output {
            config.missing_file = output.clone();
        }
        if !self.regions.is_empty() {
            config.regions = self.regions.clone();
        }
        if !self.exclude.is_empty() {
            config.excluded_dirs = self.exclude.clone();
        }
        if let Some(header_len) = self.header_len {
            config.header_len = header_len;
        }
        if self.strict_archives {
            config.archive_policy = ArchivePolicy::RejectMultiEntry;
        }
        if let Some(jobs) = self.jobs {
            config.jobs = jobs;
        }
    }
}
