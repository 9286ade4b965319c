//! Discovery of symlinks in the home directory that point into the repository.
use std::path::Path;

use walkdir::{DirEntry, WalkDir};

use super::paths::resolve_lenient;
use super::symlink::Symlink;

/// Lazily enumerate symlinks under `home` that resolve into `root`.
///
/// Symlinks are never followed during the walk, and the walk does not
/// descend into `root` itself: links living inside the repository are the
/// repository's own business.  Dangling links whose destination would lie
/// inside `root` are included so stale links get cleaned up.  Entries that
/// cannot be read are skipped.
///
/// Both `home` and `root` are expected to be canonical.
pub fn existing_links<'a>(home: &'a Path, root: &'a Path) -> impl Iterator<Item = Symlink> + 'a {
    WalkDir::new(home)
        .follow_links(false)
        .min_depth(1)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(move |entry| !entry.path().starts_with(root))
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(e) => {
                tracing::debug!("skipping unreadable entry: {e}");
                None
            }
        })
        .filter(|entry| entry.path_is_symlink())
        .filter_map(move |entry| managed_link(&entry, root))
}

/// Whether `path` is a symlink, living outside `root`, that resolves into it.
///
/// `root` is expected to be canonical.
#[must_use]
pub fn is_managed(path: &Path, root: &Path) -> bool {
    !path.starts_with(root)
        && path
            .symlink_metadata()
            .is_ok_and(|m| m.file_type().is_symlink())
        && resolve_lenient(path).is_ok_and(|resolved| resolved.starts_with(root))
}

/// Build a [`Symlink`] for `entry` if it resolves into `root`.
fn managed_link(entry: &DirEntry, root: &Path) -> Option<Symlink> {
    let resolved = resolve_lenient(entry.path()).ok()?;
    resolved
        .starts_with(root)
        .then(|| Symlink::new(entry.path().to_path_buf(), resolved))
}

#[cfg(all(test, unix))]
#[allow(clippy::expect_used, clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use std::os::unix::fs::symlink;
    use std::path::PathBuf;

    /// Canonical `home/` containing a `dotfiles/` repository.
    fn layout() -> (tempfile::TempDir, PathBuf, PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let home = dunce::canonicalize(dir.path()).unwrap();
        let root = home.join("dotfiles");
        std::fs::create_dir_all(root.join("bash")).unwrap();
        std::fs::write(root.join("bash").join("bashrc"), "x").unwrap();
        (dir, home, root)
    }

    fn found(home: &Path, root: &Path) -> Vec<PathBuf> {
        existing_links(home, root).map(|l| l.link_path).collect()
    }

    #[test]
    fn finds_links_into_repository() {
        let (_dir, home, root) = layout();
        symlink("dotfiles/bash/bashrc", home.join(".bashrc")).unwrap();

        let links: Vec<Symlink> = existing_links(&home, &root).collect();

        assert_eq!(links.len(), 1);
        assert_eq!(links[0].link_path, home.join(".bashrc"));
        assert_eq!(links[0].target_path, root.join("bash").join("bashrc"));
    }

    #[test]
    fn finds_nested_links() {
        let (_dir, home, root) = layout();
        std::fs::create_dir_all(home.join(".config").join("bash")).unwrap();
        let link = home.join(".config").join("bash").join("rc");
        symlink(root.join("bash").join("bashrc"), &link).unwrap();

        assert_eq!(found(&home, &root), vec![link]);
    }

    #[test]
    fn ignores_links_outside_repository() {
        let (_dir, home, root) = layout();
        std::fs::write(home.join("elsewhere"), "x").unwrap();
        symlink(home.join("elsewhere"), home.join(".other")).unwrap();

        assert!(found(&home, &root).is_empty());
    }

    #[test]
    fn ignores_links_inside_repository() {
        let (_dir, home, root) = layout();
        symlink("bashrc", root.join("bash").join("alias")).unwrap();

        assert!(found(&home, &root).is_empty());
    }

    #[test]
    fn ignores_regular_files() {
        let (_dir, home, root) = layout();
        std::fs::write(home.join(".profile"), "x").unwrap();

        assert!(found(&home, &root).is_empty());
    }

    #[test]
    fn includes_dangling_links_into_repository() {
        let (_dir, home, root) = layout();
        symlink("dotfiles/bash/removed", home.join(".removed")).unwrap();

        assert_eq!(found(&home, &root), vec![home.join(".removed")]);
    }

    #[test]
    fn does_not_follow_directory_links() {
        let (_dir, home, root) = layout();
        std::fs::create_dir_all(root.join("nvim")).unwrap();
        std::fs::write(root.join("nvim").join("init.lua"), "x").unwrap();
        symlink(root.join("nvim"), home.join(".nvim")).unwrap();

        assert_eq!(found(&home, &root), vec![home.join(".nvim")]);
    }

    #[test]
    fn is_managed_checks_kind_and_destination() {
        let (_dir, home, root) = layout();
        symlink("dotfiles/bash/bashrc", home.join(".bashrc")).unwrap();
        std::fs::write(home.join(".profile"), "x").unwrap();
        symlink("/etc/hosts", home.join(".hosts")).unwrap();

        assert!(is_managed(&home.join(".bashrc"), &root));
        assert!(!is_managed(&home.join(".profile"), &root));
        assert!(!is_managed(&home.join(".hosts"), &root));
        assert!(!is_managed(&home.join(".missing"), &root));
    }

    #[test]
    fn repository_outside_home_is_still_matched() {
        let dir = tempfile::tempdir().unwrap();
        let base = dunce::canonicalize(dir.path()).unwrap();
        let home = base.join("home");
        let root = base.join("repo");
        std::fs::create_dir_all(&home).unwrap();
        std::fs::create_dir_all(&root).unwrap();
        std::fs::write(root.join("vimrc"), "x").unwrap();
        symlink("../repo/vimrc", home.join(".vimrc")).unwrap();

        assert_eq!(found(&home, &root), vec![home.join(".vimrc")]);
    }
}
