//! Directory configuration for a reconciliation run.
//!
//! Resolves the home directory, the repository root, and the XDG config and
//! data bases that link declarations may target.  Environment access goes
//! through a lookup function so tests never have to mutate the process
//! environment.
use anyhow::{Context as _, Result, bail};
use std::ffi::OsString;
use std::io;
use std::path::{Path, PathBuf};

/// Name of the link specification file in each top-level repository directory.
pub const LINKS_FILE: &str = ".links";

/// Name of the presence-only marker that enables a directory's exec script.
pub const EXEC_MARKER: &str = ".exec";

/// Conventional name of the script run when [`EXEC_MARKER`] is present.
pub const EXEC_SCRIPT: &str = "setup";

/// Link-side prefix selecting [`Dirs::config_home`] as the base directory.
pub const CONFIG_PREFIX: &str = "XDG_CONFIG_HOME/";

/// Link-side prefix selecting [`Dirs::data_home`] as the base directory.
pub const DATA_PREFIX: &str = "XDG_DATA_HOME/";

/// Directories a reconciliation run operates on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dirs {
    /// User's home directory; the scan root and pruning boundary.
    pub home: PathBuf,
    /// Repository root; links resolving inside it belong to the dotfiles.
    pub root: PathBuf,
    /// `$XDG_CONFIG_HOME`, or `~/.config`.
    pub config_home: PathBuf,
    /// `$XDG_DATA_HOME`, or `~/.local/share`.
    pub data_home: PathBuf,
}

impl Dirs {
    /// Build directories from an explicit home and root, reading the XDG
    /// overrides through `env`.
    ///
    /// Empty and relative values are ignored, as the XDG base directory
    /// rules require, so both bases are always absolute.
    pub fn new(home: PathBuf, root: PathBuf, env: impl Fn(&str) -> Option<OsString>) -> Self {
        let var = |key: &str| {
            env(key)
                .map(PathBuf::from)
                .filter(|p| p.is_absolute())
        };
        let config_home = var("XDG_CONFIG_HOME").unwrap_or_else(|| home.join(".config"));
        let data_home = var("XDG_DATA_HOME").unwrap_or_else(|| home.join(".local").join("share"));
        Self {
            home,
            root,
            config_home,
            data_home,
        }
    }

    /// Resolve directories from the process environment.
    ///
    /// `home` and `root` are canonicalised so that containment checks against
    /// paths discovered while walking the tree compare like with like.
    ///
    /// # Errors
    ///
    /// Returns an error if `HOME` is unset, or if the home or root directory
    /// does not exist.
    pub fn from_env(root: &Path) -> Result<Self> {
        let home = std::env::var_os("HOME")
            .filter(|h| !h.is_empty())
            .context("HOME environment variable is not set")?;
        let home = dunce::canonicalize(&home)
            .with_context(|| format!("resolving home directory {}", Path::new(&home).display()))?;
        let root = dunce::canonicalize(root)
            .with_context(|| format!("resolving repository root {}", root.display()))?;
        Ok(Self::new(home, root, |key| std::env::var_os(key)))
    }

    /// Render `path` for humans, replacing the home directory prefix with `~`.
    #[must_use]
    pub fn beautify(&self, path: &Path) -> String {
        match path.strip_prefix(&self.home) {
            Ok(rest) if rest.as_os_str().is_empty() => "~".to_string(),
            Ok(rest) => format!("~/{}", rest.display()),
            Err(_) => path.display().to_string(),
        }
    }

    /// Replace every occurrence of the home directory in `text` with `~`.
    ///
    /// Used for messages that embed paths, such as rendered errors.
    #[must_use]
    pub fn beautify_text(&self, text: &str) -> String {
        let home = self.home.display().to_string();
        text.replace(&format!("{home}/"), "~/")
    }
}

/// List `<root>/<dir>/<file_name>` for every top-level directory that has one.
///
/// Results are sorted by directory name so runs are reproducible.
///
/// # Errors
///
/// Returns an error if `root` cannot be read.
pub fn spec_files(root: &Path, file_name: &str) -> io::Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in std::fs::read_dir(root)? {
        let dir = entry?.path();
        let file = dir.join(file_name);
        if dir.is_dir() && file.is_file() {
            files.push(file);
        }
    }
    files.sort();
    Ok(files)
}

/// Resolve the repository root from an explicit override or auto-detection.
///
/// Order: `explicit`, `DOTFILES_ROOT`, the directory containing `.git` two or
/// one levels above the binary (`target/release/` or `bin/`), then the
/// current directory if it contains `.git`.
///
/// # Errors
///
/// Returns an error if no candidate applies.
pub fn resolve_root(explicit: Option<&Path>) -> Result<PathBuf> {
    if let Some(root) = explicit {
        return Ok(root.to_path_buf());
    }

    if let Some(root) = std::env::var_os("DOTFILES_ROOT").filter(|r| !r.is_empty()) {
        return Ok(PathBuf::from(root));
    }

    if let Ok(exe) = std::env::current_exe()
        && let Some(parent) = exe.parent()
    {
        for candidate in [parent.join("../.."), parent.join("..")] {
            if candidate.join(".git").exists() {
                return Ok(dunce::canonicalize(&candidate)?);
            }
        }
    }

    let cwd = std::env::current_dir()?;
    if cwd.join(".git").exists() {
        return Ok(cwd);
    }

    bail!("cannot determine dotfiles root. Use --root or set DOTFILES_ROOT env var");
}
