use std::cell::Cell;

use indicatif::{ProgressBar, ProgressStyle};
use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use rom_verify_lib::report::write_entries;
use rom_verify_lib::{ItemEvent, load_config, verify_collection};

use crate::cli_types::Cli;
use crate::error::CliError;

/// Run a full verification and write the missing-entries file.
pub(crate) fn run_verify(cli: &Cli) -> Result<(), CliError> {
    let mut config = load_config(cli.config.as_deref())?;
    cli.apply_overrides(&mut config);
    config.validate()?;

    log::info!(
        "Verifying {} against {}",
        config
            .roots
            .iter()
            .map(|p| p.display().to_string())
            .collect::<Vec<_>>()
            .join(", ")
            .if_supports_color(Stdout, |t| t.cyan()),
        config.dat_file.display(),
    );
    log::debug!(
        "Regions {:?}, header {} bytes, excluding {:?}, {} job(s)",
        config.regions,
        config.header_len,
        config.excluded_dirs,
        config.effective_jobs(),
    );

    let pb = if cli.quiet {
        ProgressBar::hidden()
    } else {
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::with_template("  {spinner:.cyan} {msg}")
                .expect("static pattern")
                .tick_chars("/-\\|"),
        );
        pb
    };

    let checked = Cell::new(0usize);
    let observer = |event: ItemEvent| {
        match event {
            ItemEvent::Matched {
                entry_name, game, ..
            } => {
                log::debug!("{entry_name} matches {game}");
            }
            ItemEvent::NoMatch {
                entry_name,
                checksum,
                ..
            } => {
                pb.suspend(|| log::warn!("{entry_name} with CRC {checksum} has no matches"));
            }
            ItemEvent::Failed { path, error } => {
                pb.suspend(|| log::warn!("Failed to check {}: {error}, skipping", path.display()));
            }
            ItemEvent::Skipped { path } => {
                log::debug!("Skipping {}", path.display());
                return;
            }
        }
        checked.set(checked.get() + 1);
        pb.set_message(format!("{} archives checked", checked.get()));
        pb.tick();
    };

    let outcome = verify_collection(&config, &observer);
    pb.finish_and_clear();
    let outcome = outcome?;

    let stats = &outcome.reconciliation.stats;
    if stats.failed > 0 {
        log::warn!("{} archive(s) could not be checked", stats.failed);
    }

    if let Some(report) = outcome.reports.first() {
        let [found, complete] = report.summary_lines();
        log::info!("");
        log::info!("{}", found.if_supports_color(Stdout, |t| t.bold()));
        if report.romset_size >= report.dat_size {
            log::info!("{}", complete.if_supports_color(Stdout, |t| t.green()));
        } else {
            log::info!("{}", complete.if_supports_color(Stdout, |t| t.yellow()));
        }
    }

    if outcome.reports.len() > 1 {
        log::info!("");
        for report in &outcome.reports {
            log::info!("{}", report.breakdown_line());
            log::debug!("{} missing in {}", report.missing.len(), report.region);
        }
    }

    let missing = outcome.missing();
    log::info!(
        "writing {} missing roms to {}",
        missing.len(),
        config.missing_file.display()
    );
    write_entries(&config.missing_file, &missing)?;

    Ok(())
}
