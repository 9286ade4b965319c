use std::fmt::Display;
use std::path::Path;
use std::sync::Arc;

use super::Tally;
use crate::config::Dirs;
use crate::error::Severity;
use crate::logging::Log;

/// Shared state for one reconciliation run.
pub struct Context {
    /// Directories the run operates on.
    pub dirs: Dirs,
    /// Logger for progress, warnings, and errors.
    pub log: Arc<dyn Log>,
    /// Report what would change instead of changing it.
    pub dry_run: bool,
}

impl std::fmt::Debug for Context {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Context")
            .field("dirs", &self.dirs)
            .field("log", &"<dyn Log>")
            .field("dry_run", &self.dry_run)
            .finish()
    }
}

impl Context {
    /// Create a context for a run over `dirs`.
    #[must_use]
    pub const fn new(dirs: Dirs, log: Arc<dyn Log>, dry_run: bool) -> Self {
        Self { dirs, log, dry_run }
    }

    /// Render `path` relative to home for log output.
    #[must_use]
    pub fn display(&self, path: &Path) -> String {
        self.dirs.beautify(path)
    }

    /// Log a failure at its severity and count it in `tally`.
    ///
    /// Paths under the home directory are shown as `~/...`.
    pub fn report(&self, tally: &mut Tally, severity: Severity, err: &dyn Display) {
        let msg = self.dirs.beautify_text(&err.to_string());
        match severity {
            Severity::Warning => self.log.warn(&msg),
            Severity::Error => self.log.error(&msg),
        }
        tally.record(severity);
    }
}
