//! Phase 1: remove every symlink that currently points into the repository.
use anyhow::Result;

use super::{Context, Task, Tally};
use crate::links::{Symlink, scan};

/// Scan the home directory and delete each managed symlink.
#[derive(Debug)]
pub struct RemoveExistingLinks;

impl Task for RemoveExistingLinks {
    fn name(&self) -> &str {
        "Removing existing links"
    }

    fn run(&self, ctx: &Context) -> Result<Tally> {
        let dirs = &ctx.dirs;
        let links: Vec<Symlink> = scan::existing_links(&dirs.home, &dirs.root).collect();
        ctx.log
            .debug(&format!("found {} existing link(s)", links.len()));

        let mut tally = Tally::default();
        for link in &links {
            let shown = ctx.display(&link.link_path);

            if ctx.dry_run {
                ctx.log.dry_run(&format!("would remove {shown}"));
                tally.changed += 1;
                continue;
            }

            match link.delete(&dirs.home) {
                Ok(()) => {
                    ctx.log.debug(&format!("removed {shown}"));
                    tally.changed += 1;
                }
                Err(e) => {
                    ctx.report(&mut tally, e.severity(), &e);
                    tally.skipped += 1;
                }
            }
        }

        Ok(tally)
    }
}
