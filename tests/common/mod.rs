// Shared helpers for integration tests.
//
// Provides a temporary home directory holding a dotfiles repository and a
// fluent builder so each test can lay out `.links` files, targets, and exec
// scripts without repeating filesystem boilerplate.
//
// Used by all integration test binaries that declare `mod common;`.
#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use dotfiles_link::commands::install;
use dotfiles_link::config::{Dirs, EXEC_MARKER, EXEC_SCRIPT, LINKS_FILE};
use dotfiles_link::logging::Log;
use dotfiles_link::tasks::{Context, Tally};

/// [`Log`] that keeps warnings and errors for assertions.
#[derive(Debug, Default)]
pub struct CapturedLog {
    pub warnings: Mutex<Vec<String>>,
    pub errors: Mutex<Vec<String>>,
}

impl CapturedLog {
    pub fn warnings(&self) -> Vec<String> {
        self.warnings.lock().expect("lock warnings").clone()
    }

    pub fn errors(&self) -> Vec<String> {
        self.errors.lock().expect("lock errors").clone()
    }
}

impl Log for CapturedLog {
    fn stage(&self, _msg: &str) {}
    fn info(&self, _msg: &str) {}
    fn debug(&self, _msg: &str) {}
    fn warn(&self, msg: &str) {
        self.warnings.lock().expect("lock warnings").push(msg.to_string());
    }
    fn error(&self, msg: &str) {
        self.errors.lock().expect("lock errors").push(msg.to_string());
    }
    fn dry_run(&self, _msg: &str) {}
}

/// An isolated home directory containing a `dotfiles/` repository, backed by
/// a [`tempfile::TempDir`].
pub struct IntegrationTestContext {
    _dir: tempfile::TempDir,
    /// Canonical home directory.
    pub home: PathBuf,
    /// Canonical repository root (`home/dotfiles`).
    pub root: PathBuf,
    /// Value used for `XDG_CONFIG_HOME`, if overridden.
    pub config_home: Option<PathBuf>,
    /// Log of the most recent run.
    pub log: Arc<CapturedLog>,
}

impl IntegrationTestContext {
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("create temp dir");
        let home = dunce::canonicalize(dir.path())
            .expect("canonicalize temp dir")
            .join("home");
        let root = home.join("dotfiles");
        std::fs::create_dir_all(&root).expect("create repository");
        Self {
            _dir: dir,
            home,
            root,
            config_home: None,
            log: Arc::new(CapturedLog::default()),
        }
    }

    pub fn dirs(&self) -> Dirs {
        let config_home = self.config_home.clone();
        Dirs::new(self.home.clone(), self.root.clone(), move |key| match key {
            "XDG_CONFIG_HOME" => config_home.clone().map(Into::into),
            _ => None,
        })
    }

    /// Run all phases with a fresh log.
    pub fn run(&mut self, dry_run: bool) -> Tally {
        self.log = Arc::new(CapturedLog::default());
        let ctx = Context::new(self.dirs(), self.log.clone(), dry_run);
        install::reconcile(&ctx)
    }

    pub fn home_path(&self, rel: &str) -> PathBuf {
        self.home.join(rel)
    }

    pub fn repo_path(&self, rel: &str) -> PathBuf {
        self.root.join(rel)
    }
}

/// Fluent builder for [`IntegrationTestContext`].
pub struct TestContextBuilder {
    ctx: IntegrationTestContext,
}

impl TestContextBuilder {
    pub fn new() -> Self {
        Self {
            ctx: IntegrationTestContext::new(),
        }
    }

    /// Write a file inside the repository, creating parent directories.
    pub fn with_repo_file(self, rel: &str, content: &str) -> Self {
        write(&self.ctx.root.join(rel), content);
        self
    }

    /// Write `dir/.links` with the given declarations.
    pub fn with_links(self, dir: &str, declarations: &str) -> Self {
        self.with_repo_file(&format!("{dir}/{LINKS_FILE}"), declarations)
    }

    /// Write an executable `dir/setup` with `body` and mark it with `.exec`.
    #[cfg(unix)]
    pub fn with_exec_script(self, dir: &str, body: &str) -> Self {
        use std::os::unix::fs::PermissionsExt as _;
        let script = self.ctx.root.join(dir).join(EXEC_SCRIPT);
        write(&script, &format!("#!/bin/sh\n{body}\n"));
        std::fs::set_permissions(&script, std::fs::Permissions::from_mode(0o755))
            .expect("chmod script");
        self.with_repo_file(&format!("{dir}/{EXEC_MARKER}"), "")
    }

    /// Write a file in the home directory.
    pub fn with_home_file(self, rel: &str, content: &str) -> Self {
        write(&self.ctx.home.join(rel), content);
        self
    }

    /// Point `XDG_CONFIG_HOME` at `rel` under the temp home.
    pub fn with_config_home(mut self, rel: &str) -> Self {
        self.ctx.config_home = Some(self.ctx.home.join(rel));
        self
    }

    pub fn build(self) -> IntegrationTestContext {
        self.ctx
    }
}

fn write(path: &Path, content: &str) {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).expect("create parent");
    }
    std::fs::write(path, content).expect("write file");
}

/// Whether `path` is a symlink (dangling or not).
pub fn is_symlink(path: &Path) -> bool {
    path.symlink_metadata()
        .is_ok_and(|m| m.file_type().is_symlink())
}
