//! Path helpers shared by the symlink entity and the scanner.
use std::io;
use std::path::{Component, Path, PathBuf};

/// Compute the path that leads from directory `from` to `to`.
///
/// Both paths must be absolute and free of `.`/`..` components (i.e.
/// canonical) for the result to be meaningful.
#[must_use]
pub fn relative_path(from: &Path, to: &Path) -> PathBuf {
    let from: Vec<Component<'_>> = from.components().collect();
    let to: Vec<Component<'_>> = to.components().collect();
    let common = from.iter().zip(&to).take_while(|(a, b)| a == b).count();

    let mut out = PathBuf::new();
    for _ in common..from.len() {
        out.push(Component::ParentDir);
    }
    for component in to.iter().skip(common) {
        out.push(component);
    }
    if out.as_os_str().is_empty() {
        out.push(Component::CurDir);
    }
    out
}

/// Canonicalise `path` without requiring the final component to exist.
///
/// The parent directory is resolved and the file name appended, so a symlink
/// at `path` is itself kept rather than followed.
///
/// # Errors
///
/// Returns an error if the parent directory cannot be resolved.
pub fn canonical_parent_join(path: &Path) -> io::Result<PathBuf> {
    match (path.parent(), path.file_name()) {
        (Some(parent), Some(name)) => Ok(dunce::canonicalize(parent)?.join(name)),
        _ => dunce::canonicalize(path),
    }
}

/// Fully resolve the symlink at `link`, tolerating a dangling destination.
///
/// When the destination exists this is plain canonicalisation.  Otherwise the
/// longest existing ancestor of the destination is canonicalised and the
/// missing components are appended, so a link whose repository file was
/// deleted still resolves into the repository.
///
/// # Errors
///
/// Returns an error if `link` is not a readable symlink.
pub fn resolve_lenient(link: &Path) -> io::Result<PathBuf> {
    if let Ok(resolved) = dunce::canonicalize(link) {
        return Ok(resolved);
    }

    let dest = std::fs::read_link(link)?;
    let joined = if dest.is_absolute() {
        dest
    } else {
        link.parent().unwrap_or_else(|| Path::new("/")).join(dest)
    };

    let mut existing = joined.as_path();
    let mut missing = Vec::new();
    loop {
        if let Ok(base) = dunce::canonicalize(existing) {
            let mut resolved = base;
            for name in missing.iter().rev() {
                resolved.push(name);
            }
            return Ok(resolved);
        }
        match (existing.parent(), existing.file_name()) {
            (Some(parent), Some(name)) => {
                missing.push(name.to_os_string());
                existing = parent;
            }
            _ => return Ok(joined),
        }
    }
}

/// Whether `a` and `b` refer to the same underlying file (following symlinks).
///
/// Identity is by device and inode, not by path string.
#[must_use]
pub fn same_file(a: &Path, b: &Path) -> bool {
    #[cfg(unix)]
    {
        use std::os::unix::fs::MetadataExt as _;
        match (std::fs::metadata(a), std::fs::metadata(b)) {
            (Ok(ma), Ok(mb)) => ma.dev() == mb.dev() && ma.ino() == mb.ino(),
            _ => false,
        }
    }
    #[cfg(not(unix))]
    {
        match (dunce::canonicalize(a), dunce::canonicalize(b)) {
            (Ok(ca), Ok(cb)) => ca == cb,
            _ => false,
        }
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn relative_path_to_sibling_tree() {
        let rel = relative_path(
            Path::new("/home/u/.config/git"),
            Path::new("/home/u/dotfiles/git/config"),
        );
        assert_eq!(rel, PathBuf::from("../../dotfiles/git/config"));
    }

    #[test]
    fn relative_path_to_child() {
        let rel = relative_path(Path::new("/home/u"), Path::new("/home/u/dotfiles/bashrc"));
        assert_eq!(rel, PathBuf::from("dotfiles/bashrc"));
    }

    #[test]
    fn relative_path_to_self_is_cur_dir() {
        let rel = relative_path(Path::new("/home/u"), Path::new("/home/u"));
        assert_eq!(rel, PathBuf::from("."));
    }

    #[test]
    fn relative_path_across_root() {
        let rel = relative_path(Path::new("/a/b"), Path::new("/c"));
        assert_eq!(rel, PathBuf::from("../../c"));
    }

    #[cfg(unix)]
    #[test]
    fn resolve_lenient_follows_existing_link() {
        let dir = tempfile::tempdir().unwrap();
        let base = dunce::canonicalize(dir.path()).unwrap();
        let target = base.join("target");
        std::fs::write(&target, "x").unwrap();
        let link = base.join("link");
        std::os::unix::fs::symlink("target", &link).unwrap();
        assert_eq!(resolve_lenient(&link).unwrap(), target);
    }

    #[cfg(unix)]
    #[test]
    fn resolve_lenient_handles_dangling_link() {
        let dir = tempfile::tempdir().unwrap();
        let base = dunce::canonicalize(dir.path()).unwrap();
        std::fs::create_dir(base.join("repo")).unwrap();
        std::fs::create_dir(base.join("home")).unwrap();
        let link = base.join("home").join("link");
        std::os::unix::fs::symlink("../repo/gone/file", &link).unwrap();
        assert_eq!(
            resolve_lenient(&link).unwrap(),
            base.join("repo").join("gone").join("file")
        );
    }

    #[test]
    fn resolve_lenient_rejects_missing_path() {
        let dir = tempfile::tempdir().unwrap();
        assert!(resolve_lenient(&dir.path().join("nothing")).is_err());
    }

    #[cfg(unix)]
    #[test]
    fn same_file_sees_through_symlinks() {
        let dir = tempfile::tempdir().unwrap();
        let a = dir.path().join("a");
        let b = dir.path().join("b");
        let link = dir.path().join("link");
        std::fs::write(&a, "a").unwrap();
        std::fs::write(&b, "b").unwrap();
        std::os::unix::fs::symlink(&a, &link).unwrap();
        assert!(same_file(&link, &a));
        assert!(!same_file(&link, &b));
        assert!(!same_file(&dir.path().join("missing"), &a));
    }

    #[test]
    fn canonical_parent_join_keeps_file_name() {
        let dir = tempfile::tempdir().unwrap();
        let base = dunce::canonicalize(dir.path()).unwrap();
        let p = canonical_parent_join(&dir.path().join("not-yet")).unwrap();
        assert_eq!(p, base.join("not-yet"));
    }
}
