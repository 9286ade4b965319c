//! Symlink entity: create, delete, and inspect one managed link.
use std::io;
use std::path::{Path, PathBuf};

use super::paths::{canonical_parent_join, relative_path, same_file};
use crate::error::LinkError;

/// One symlink managed by the dotfiles repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Symlink {
    /// Absolute location of the symlink itself.
    pub link_path: PathBuf,
    /// Absolute path the symlink should resolve to.
    pub target_path: PathBuf,
}

/// Result of a successful [`Symlink::create`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkChange {
    /// The filesystem was modified.
    Applied,
    /// The link already matched; nothing was done.
    AlreadyCorrect,
}

/// Observed state of a symlink, computed without touching the filesystem.
///
/// # Examples
///
/// ```
/// use dotfiles_link::links::LinkState;
///
/// assert_ne!(LinkState::Missing, LinkState::Linked);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkState {
    /// Nothing exists at the link path.
    Missing,
    /// A symlink resolving to the target already exists.
    Linked,
    /// Some other entry occupies the link path.
    Conflict,
    /// The declared target does not exist.
    TargetMissing,
}

impl Symlink {
    /// Create a new symlink entity.
    #[must_use]
    pub const fn new(link_path: PathBuf, target_path: PathBuf) -> Self {
        Self {
            link_path,
            target_path,
        }
    }

    /// Create the symlink on disk.
    ///
    /// Missing parent directories are created.  The link stores a path
    /// relative to its parent directory so the repository can move without
    /// breaking it.  An existing symlink that already resolves to the target
    /// is left alone.
    ///
    /// # Errors
    ///
    /// - [`LinkError::TargetNotFound`] if the target does not exist.
    /// - [`LinkError::SymlinkExists`] if something else occupies the link path.
    /// - [`LinkError::Io`] for any other filesystem failure.
    pub fn create(&self) -> Result<LinkChange, LinkError> {
        if !self.target_path.exists() {
            return Err(LinkError::TargetNotFound {
                target: self.target_path.clone(),
            });
        }

        let parent = self.parent()?;
        std::fs::create_dir_all(parent)
            .map_err(|e| LinkError::io("create directory", parent, e))?;

        let relative = self.relative_target(parent)?;
        match create_symlink(&relative, &self.link_path, self.target_path.is_dir()) {
            Ok(()) => Ok(LinkChange::Applied),
            Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {
                if self.points_at_target() {
                    Ok(LinkChange::AlreadyCorrect)
                } else {
                    Err(LinkError::SymlinkExists {
                        link: self.link_path.clone(),
                    })
                }
            }
            Err(e) => Err(LinkError::io("create symlink", &self.link_path, e)),
        }
    }

    /// Remove the symlink, then prune parent directories that became empty.
    ///
    /// Pruning walks upward and stops at `boundary` (never removed), at any
    /// directory outside it, or at the first directory that cannot be removed
    /// (usually because it is not empty).
    ///
    /// # Errors
    ///
    /// Returns [`LinkError::Io`] if the link does not exist, is not a
    /// symlink, or cannot be removed.
    pub fn delete(&self, boundary: &Path) -> Result<(), LinkError> {
        remove_symlink(&self.link_path).map_err(|e| LinkError::io("remove", &self.link_path, e))?;
        prune_empty_parents(&self.link_path, boundary);
        Ok(())
    }

    /// Inspect the link path without modifying anything.
    #[must_use]
    pub fn state(&self) -> LinkState {
        if !self.target_path.exists() {
            return LinkState::TargetMissing;
        }
        match self.link_path.symlink_metadata() {
            Err(_) => LinkState::Missing,
            Ok(_) if self.points_at_target() => LinkState::Linked,
            Ok(_) => LinkState::Conflict,
        }
    }

    fn parent(&self) -> Result<&Path, LinkError> {
        self.link_path.parent().ok_or_else(|| {
            LinkError::io(
                "resolve parent of",
                &self.link_path,
                io::Error::new(io::ErrorKind::InvalidInput, "link path has no parent"),
            )
        })
    }

    /// Path from the (canonical) link directory to the target.
    fn relative_target(&self, parent: &Path) -> Result<PathBuf, LinkError> {
        let from = dunce::canonicalize(parent).map_err(|e| LinkError::io("resolve", parent, e))?;
        let to = canonical_parent_join(&self.target_path)
            .map_err(|e| LinkError::io("resolve", &self.target_path, e))?;
        Ok(relative_path(&from, &to))
    }

    /// Whether the link path is a symlink resolving to the target file.
    fn points_at_target(&self) -> bool {
        self.link_path
            .symlink_metadata()
            .is_ok_and(|m| m.file_type().is_symlink())
            && same_file(&self.link_path, &self.target_path)
    }
}

/// Remove empty ancestors of `path` up to, but excluding, `boundary`.
fn prune_empty_parents(path: &Path, boundary: &Path) {
    let mut dir = path.parent();
    while let Some(current) = dir {
        if current == boundary || !current.starts_with(boundary) {
            break;
        }
        if std::fs::remove_dir(current).is_err() {
            break;
        }
        dir = current.parent();
    }
}

/// Create a symlink at `link` whose stored destination is `dest`.
fn create_symlink(dest: &Path, link: &Path, dest_is_dir: bool) -> io::Result<()> {
    #[cfg(unix)]
    {
        let _ = dest_is_dir;
        std::os::unix::fs::symlink(dest, link)
    }

    #[cfg(windows)]
    {
        if dest_is_dir {
            std::os::windows::fs::symlink_dir(dest, link)
        } else {
            std::os::windows::fs::symlink_file(dest, link)
        }
    }
}

/// Remove the symlink at `path`, refusing to touch anything that is not one.
///
/// On Windows, directory symlinks must be removed with `remove_dir`.
fn remove_symlink(path: &Path) -> io::Result<()> {
    let meta = std::fs::symlink_metadata(path)?;
    if !meta.file_type().is_symlink() {
        return Err(io::Error::new(io::ErrorKind::InvalidInput, "not a symlink"));
    }
    if is_dir_like(&meta) {
        std::fs::remove_dir(path)
    } else {
        std::fs::remove_file(path)
    }
}

/// Check if metadata represents a directory-like entry.
///
/// On Windows, `symlink_metadata().is_dir()` returns `false` for directory
/// symlinks, so the raw `FILE_ATTRIBUTE_DIRECTORY` bit is checked instead.
fn is_dir_like(meta: &std::fs::Metadata) -> bool {
    #[cfg(windows)]
    {
        use std::os::windows::fs::MetadataExt;
        meta.file_attributes() & 0x10 != 0 // FILE_ATTRIBUTE_DIRECTORY
    }
    #[cfg(not(windows))]
    {
        meta.is_dir()
    }
}
