//! `dotfiles` command-line entry point.

use std::io::IsTerminal as _;
use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;

use dotfiles_link::cli::Cli;
use dotfiles_link::commands;
use dotfiles_link::logging::{self, Log as _, Logger};

/// Name of the log file under the cache directory.
const LOG_NAME: &str = "link";

/// Exit status when stdout or stderr is not a terminal.
const EXIT_NOT_A_TERMINAL: u8 = 2;

/// Exit status after Ctrl-C (128 + SIGINT).
const EXIT_INTERRUPTED: i32 = 130;

fn main() -> ExitCode {
    let _ = enable_ansi_support::enable_ansi_support();
    let args = Cli::parse();

    // A refused run must not touch the previous run's log file.
    let interactive = std::io::stdout().is_terminal() && std::io::stderr().is_terminal();
    logging::init_subscriber(args.verbose, interactive.then_some(LOG_NAME));
    if !interactive {
        Logger::default().error("stdout and stderr must be attached to a terminal");
        return ExitCode::from(EXIT_NOT_A_TERMINAL);
    }
    let log = Arc::new(Logger::new(LOG_NAME));

    if let Err(e) = ctrlc::set_handler(|| {
        tracing::warn!("interrupted");
        std::process::exit(EXIT_INTERRUPTED);
    }) {
        log.warn(&format!("cannot install Ctrl-C handler: {e}"));
    }

    let version = option_env!("DOTFILES_VERSION").unwrap_or(env!("CARGO_PKG_VERSION"));
    log.debug(&format!("dotfiles {version}"));
    if let Some(path) = log.log_path() {
        log.debug(&format!("log file: {}", path.display()));
    }

    match commands::install::run(&args, log.clone()) {
        Ok(tally) if tally.has_errors() => ExitCode::FAILURE,
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            log.error(&format!("{e:#}"));
            ExitCode::FAILURE
        }
    }
}
