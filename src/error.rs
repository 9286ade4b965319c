//! Domain-specific error types for symlink reconciliation.
//!
//! Every fallible operation in the engine returns one of the enums below.
//! Each variant knows its [`Severity`], which the phase driver inspects to
//! decide whether the event is a warning or a hard error.  Nothing here
//! aborts a run; aborting is reserved for setup failures at the command
//! boundary, which use [`anyhow::Error`].
//!
//! # Error hierarchy
//!
//! ```text
//! LinkError
//! ├── InvalidSyntax   — malformed declaration (skips the whole file)
//! ├── SymlinkExists   — unrelated entry at the link path (warning)
//! ├── TargetNotFound  — declared target is missing
//! └── Io              — permission / I/O failure on a path
//!
//! ExecError
//! ├── NonZeroExit     — script ran and failed (warning)
//! ├── NotExecutable   — script lacks execute permission
//! └── Spawn           — any other failure to start the script
//! ```

use std::path::PathBuf;

use thiserror::Error;

/// How a failure affects the final exit status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Reported, but the run still succeeds.
    Warning,
    /// Reported and flips the run to failure.
    Error,
}

/// Errors raised while parsing, creating, or deleting symlinks.
#[derive(Error, Debug)]
pub enum LinkError {
    /// A link declaration could not be parsed.
    #[error("invalid link declaration in {} line {line}: {reason}", file.display())]
    InvalidSyntax {
        /// Link specification file containing the declaration.
        file: PathBuf,
        /// 1-based line number.
        line: usize,
        /// What is wrong with the declaration.
        reason: String,
    },

    /// Something other than the expected symlink already occupies the link path.
    #[error("{} already exists", link.display())]
    SymlinkExists {
        /// Path where the symlink would have been created.
        link: PathBuf,
    },

    /// The declared target does not exist.
    #[error("target {} does not exist", target.display())]
    TargetNotFound {
        /// Missing target path.
        target: PathBuf,
    },

    /// A filesystem operation failed.
    #[error("{action} {}: {source}", path.display())]
    Io {
        /// Short verb phrase naming the failed operation (e.g. `"remove"`).
        action: &'static str,
        /// Path the operation was applied to.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },
}

impl LinkError {
    /// Build an [`LinkError::Io`] from an I/O error.
    pub fn io(action: &'static str, path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            action,
            path: path.into(),
            source,
        }
    }

    /// Severity of this error.
    #[must_use]
    pub const fn severity(&self) -> Severity {
        match self {
            Self::SymlinkExists { .. } => Severity::Warning,
            Self::InvalidSyntax { .. } | Self::TargetNotFound { .. } | Self::Io { .. } => {
                Severity::Error
            }
        }
    }
}

/// Errors raised while running a post-link exec script.
#[derive(Error, Debug)]
pub enum ExecError {
    /// The script ran and exited unsuccessfully.
    #[error("{} exited with {}", script.display(), describe_code(*code))]
    NonZeroExit {
        /// Script that was run.
        script: PathBuf,
        /// Exit code, or `None` when terminated by a signal.
        code: Option<i32>,
    },

    /// The script exists but may not be executed.
    #[error("{} is not executable", script.display())]
    NotExecutable {
        /// Script that could not be executed.
        script: PathBuf,
    },

    /// The script could not be started for any other reason.
    #[error("failed to run {}: {source}", script.display())]
    Spawn {
        /// Script that could not be started.
        script: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },
}

impl ExecError {
    /// Severity of this error.
    #[must_use]
    pub const fn severity(&self) -> Severity {
        match self {
            Self::NonZeroExit { .. } => Severity::Warning,
            Self::NotExecutable { .. } | Self::Spawn { .. } => Severity::Error,
        }
    }
}

fn describe_code(code: Option<i32>) -> String {
    code.map_or_else(|| "a signal".to_string(), |c| format!("status {c}"))
}
