//! Tracing-backed [`Log`] implementation.
use std::path::PathBuf;

use super::types::Log;
use super::utils::log_file_path;

/// Target marking stage headers for the formatters.
pub(super) const STAGE_TARGET: &str = "dotfiles::stage";

/// Target marking dry-run messages for the formatters.
pub(super) const DRY_RUN_TARGET: &str = "dotfiles::dry_run";

/// Logger that emits every message as a `tracing` event.
///
/// Console and file output are decided by the subscriber installed with
/// [`init_subscriber`](super::subscriber::init_subscriber); the logger only
/// tags stage headers and dry-run lines with their own targets.
#[derive(Debug, Default)]
pub struct Logger {
    log_file: Option<PathBuf>,
}

impl Logger {
    /// Create a logger for `command`.
    ///
    /// Only remembers where the log file lives; the file itself is opened by
    /// the subscriber's file layer.
    #[must_use]
    pub fn new(command: &str) -> Self {
        Self {
            log_file: log_file_path(command),
        }
    }

    /// Path of the persistent log file, if the cache directory is usable.
    #[must_use]
    pub const fn log_path(&self) -> Option<&PathBuf> {
        self.log_file.as_ref()
    }
}

impl Log for Logger {
    fn stage(&self, msg: &str) {
        tracing::info!(target: STAGE_TARGET, "{msg}");
    }

    fn info(&self, msg: &str) {
        tracing::info!("{msg}");
    }

    fn debug(&self, msg: &str) {
        tracing::debug!("{msg}");
    }

    fn warn(&self, msg: &str) {
        tracing::warn!("{msg}");
    }

    fn error(&self, msg: &str) {
        tracing::error!("{msg}");
    }

    fn dry_run(&self, msg: &str) {
        tracing::info!(target: DRY_RUN_TARGET, "{msg}");
    }
}
