//! Phase 3: run the setup script of every directory marked with `.exec`.
use anyhow::{Context as _, Result};

use super::{Context, Task, Tally};
use crate::config::{EXEC_MARKER, EXEC_SCRIPT, spec_files};
use crate::error::ExecError;
use crate::exec;

/// Run each marked directory's setup script, one at a time.
///
/// A failing script does not stop the scripts after it.
#[derive(Debug)]
pub struct RunExecScripts;

impl Task for RunExecScripts {
    fn name(&self) -> &str {
        "Running exec scripts"
    }

    fn run(&self, ctx: &Context) -> Result<Tally> {
        let markers = spec_files(&ctx.dirs.root, EXEC_MARKER)
            .with_context(|| format!("listing {}", ctx.display(&ctx.dirs.root)))?;

        let mut tally = Tally::default();
        for marker in &markers {
            let script = marker.with_file_name(EXEC_SCRIPT);
            let shown = ctx.display(&script);

            if ctx.dry_run {
                if script.is_file() {
                    ctx.log.dry_run(&format!("would run {shown}"));
                    tally.changed += 1;
                } else {
                    let e = ExecError::Spawn {
                        script,
                        source: std::io::ErrorKind::NotFound.into(),
                    };
                    ctx.report(&mut tally, e.severity(), &e);
                }
                continue;
            }

            ctx.log.info(&format!("running {shown}"));
            match exec::run_script(&script) {
                Ok(()) => tally.changed += 1,
                Err(e) => ctx.report(&mut tally, e.severity(), &e),
            }
        }

        Ok(tally)
    }
}
