//! The three reconciliation phases and the loop that drives them.
mod context;
pub mod create_links;
pub mod exec_scripts;
pub mod remove_links;
mod tally;

pub use context::Context;
pub use tally::Tally;

use anyhow::Result;

/// One complete reconciliation phase.
pub trait Task {
    /// Human-readable phase name, logged as a stage header.
    fn name(&self) -> &str;

    /// Run the phase over every item it covers.
    ///
    /// Per-item failures are reported through the context and counted in the
    /// returned [`Tally`]; they never end the phase early.
    ///
    /// # Errors
    ///
    /// Returns an error only if the phase cannot start at all, for example
    /// when the repository root cannot be listed.
    fn run(&self, ctx: &Context) -> Result<Tally>;
}

/// The phases of a run, in execution order.
#[must_use]
pub fn all_tasks() -> Vec<Box<dyn Task>> {
    vec![
        Box::new(remove_links::RemoveExistingLinks),
        Box::new(create_links::CreateLinks),
        Box::new(exec_scripts::RunExecScripts),
    ]
}

/// Execute one phase and return its tally.
///
/// A phase that fails to start counts as a single hard error.
pub fn execute(task: &dyn Task, ctx: &Context) -> Tally {
    ctx.log.stage(task.name());

    match task.run(ctx) {
        Ok(tally) => {
            ctx.log
                .debug(&format!("{}: {}", task.name(), tally.summary(ctx.dry_run)));
            tally
        }
        Err(e) => {
            ctx.log
                .error(&ctx.dirs.beautify_text(&format!("{}: {e:#}", task.name())));
            Tally {
                errors: 1,
                ..Tally::default()
            }
        }
    }
}


#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::test_helpers::Fixture;
    use super::*;
    use crate::logging::Entry;

    struct Failing;

    impl Task for Failing {
        fn name(&self) -> &str {
            "Failing phase"
        }

        fn run(&self, _ctx: &Context) -> Result<Tally> {
            anyhow::bail!("cannot list repository")
        }
    }

    #[test]
    fn phases_run_in_fixed_order() {
        let names: Vec<String> = all_tasks().iter().map(|t| t.name().to_string()).collect();
        assert_eq!(
            names,
            ["Removing existing links", "Creating links", "Running exec scripts"]
        );
    }

    #[test]
    fn execute_logs_stage_header() {
        let fx = Fixture::new();
        let tally = execute(&remove_links::RemoveExistingLinks, &fx.ctx(false));
        assert!(!tally.has_errors());
        assert_eq!(
            fx.log.entries()[0],
            Entry::Stage("Removing existing links".into())
        );
    }

    #[test]
    fn phase_that_cannot_start_counts_one_error() {
        let fx = Fixture::new();
        let tally = execute(&Failing, &fx.ctx(false));
        assert_eq!(tally.errors, 1);
        assert_eq!(
            fx.log.errors(),
            ["Failing phase: cannot list repository"]
        );
    }
}
