use std::io::Write;

use log::LevelFilter;

/// Install the global logger.
///
/// Output goes to stdout as bare messages. `--quiet` keeps warnings and
/// errors only; `--verbose` adds debug messages with timestamps and levels.
/// `ROM_VERIFY_LOG` can override the level using `env_logger` filter syntax.
pub(crate) fn init(quiet: bool, verbose: bool) {
    let level = if quiet {
        LevelFilter::Warn
    } else if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    env_logger::Builder::new()
        .filter_level(level)
        .parse_env("ROM_VERIFY_LOG")
        .target(env_logger::Target::Stdout)
        .format(move |buf, record| {
            if verbose {
                writeln!(
                    buf,
                    "[{} {:<5}] {}",
                    buf.timestamp_millis(),
                    record.level(),
                    record.args()
                )
            } else {
                writeln!(buf, "{}", record.args())
            }
        })
        .init();
}
