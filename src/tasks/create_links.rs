//! Phase 2: create every symlink declared in the repository's link files.
use anyhow::{Context as _, Result};

use super::{Context, Task, Tally};
use crate::config::{LINKS_FILE, spec_files};
use crate::error::LinkError;
use crate::links::{LinkChange, LinkState, Symlink, descriptor, scan};

/// Parse each `.links` file and create the symlinks it declares.
///
/// Files are visited in directory-name order.  A file with a bad line is
/// skipped entirely; the remaining files are still processed.
#[derive(Debug)]
pub struct CreateLinks;

impl Task for CreateLinks {
    fn name(&self) -> &str {
        "Creating links"
    }

    fn run(&self, ctx: &Context) -> Result<Tally> {
        let files = spec_files(&ctx.dirs.root, LINKS_FILE)
            .with_context(|| format!("listing {}", ctx.display(&ctx.dirs.root)))?;
        ctx.log
            .debug(&format!("found {} link file(s)", files.len()));

        let mut tally = Tally::default();
        for file in &files {
            let links = match descriptor::parse_file(file, &ctx.dirs) {
                Ok(links) => links,
                Err(e) => {
                    ctx.report(&mut tally, e.severity(), &e);
                    tally.skipped += 1;
                    continue;
                }
            };
            for link in &links {
                if ctx.dry_run {
                    preview(ctx, link, &mut tally);
                } else {
                    create(ctx, link, &mut tally);
                }
            }
        }

        Ok(tally)
    }
}

fn create(ctx: &Context, link: &Symlink, tally: &mut Tally) {
    let shown = ctx.display(&link.link_path);
    match link.create() {
        Ok(LinkChange::Applied) => {
            ctx.log
                .info(&format!("{shown} -> {}", ctx.display(&link.target_path)));
            tally.changed += 1;
        }
        Ok(LinkChange::AlreadyCorrect) => {
            ctx.log.debug(&format!("ok: {shown} (already linked)"));
            tally.already_ok += 1;
        }
        Err(e) => {
            ctx.report(tally, e.severity(), &e);
            tally.skipped += 1;
        }
    }
}

/// Report what [`create`] would do, assuming the removal phase has run.
fn preview(ctx: &Context, link: &Symlink, tally: &mut Tally) {
    let shown = ctx.display(&link.link_path);
    let target = ctx.display(&link.target_path);
    let skip = |tally: &mut Tally, e: LinkError| {
        ctx.report(tally, e.severity(), &e);
        tally.skipped += 1;
    };

    let managed = scan::is_managed(&link.link_path, &ctx.dirs.root);

    match link.state() {
        LinkState::Linked if !managed => {
            ctx.log.debug(&format!("ok: {shown} (already linked)"));
            tally.already_ok += 1;
        }
        LinkState::Conflict if !managed => {
            skip(
                tally,
                LinkError::SymlinkExists {
                    link: link.link_path.clone(),
                },
            );
        }
        LinkState::Missing | LinkState::Linked | LinkState::Conflict => {
            ctx.log.dry_run(&format!("would link {shown} -> {target}"));
            tally.changed += 1;
        }
        LinkState::TargetMissing => {
            skip(
                tally,
                LinkError::TargetNotFound {
                    target: link.target_path.clone(),
                },
            );
        }
    }
}
