//! Logging setup for the career assistant binary.
//!
//! Logs go to `./career_assistant.log` so they do not interleave with the
//! rendered analysis; `--log-to-terminal` mirrors them to the terminal.

use std::path::PathBuf;

use assistant_logging::{LogDestination, DEFAULT_LOG_FILE};
use log::LevelFilter;

use crate::cli::Cli;

pub fn initialize(cli: &Cli) {
    let (destination, level) = log_settings(cli);
    assistant_logging::initialize(destination, level);
}

fn log_settings(cli: &Cli) -> (LogDestination, LevelFilter) {
    let level = if cli.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    let destination = if cli.log_to_terminal {
        LogDestination::Both(PathBuf::from(DEFAULT_LOG_FILE))
    } else {
        LogDestination::default()
    };
    (destination, level)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_file_at_info() {
        let (destination, level) = log_settings(&Cli::default());
        assert_eq!(destination, LogDestination::default());
        assert_eq!(level, LevelFilter::Info);
    }

    #[test]
    fn flags_raise_level_and_mirror_to_terminal() {
        let cli = Cli {
            verbose: true,
            log_to_terminal: true,
            ..Cli::default()
        };
        let (destination, level) = log_settings(&cli);
        assert_eq!(destination, LogDestination::Both(PathBuf::from(DEFAULT_LOG_FILE)));
        assert_eq!(level, LevelFilter::Debug);
    }
}
