//! The `dotfiles` run: resolve directories, then reconcile every phase.
use std::sync::Arc;

use anyhow::Result;

use crate::cli::Cli;
use crate::config::{Dirs, resolve_root};
use crate::logging::Log;
use crate::tasks::{self, Context, Tally};

/// Resolve directories from the environment and reconcile the home
/// directory with the repository.
///
/// # Errors
///
/// Returns an error if the repository root or the home directory cannot be
/// resolved.  Per-item failures do not error; they are counted in the
/// returned [`Tally`].
pub fn run(args: &Cli, log: Arc<dyn Log>) -> Result<Tally> {
    let root = resolve_root(args.root.as_deref())?;
    let dirs = Dirs::from_env(&root)?;

    log.debug(&format!("home: {}", dirs.home.display()));
    log.debug(&format!("root: {}", dirs.root.display()));
    log.debug(&format!("config home: {}", dirs.config_home.display()));
    log.debug(&format!("data home: {}", dirs.data_home.display()));

    Ok(reconcile(&Context::new(dirs, log, args.dry_run)))
}

/// Run every phase in order and merge their tallies.
#[must_use]
pub fn reconcile(ctx: &Context) -> Tally {
    let mut total = Tally::default();
    for task in tasks::all_tasks() {
        total += tasks::execute(task.as_ref(), ctx);
    }
    total
}
