//! Parser for link specification files.
//!
//! Each non-blank line declares one symlink:
//!
//! ```text
//! # comment
//! .bashrc -> bashrc
//! XDG_CONFIG_HOME/git/config -> gitconfig   # trailing comment
//! XDG_DATA_HOME/fonts -> fonts
//! ```
//!
//! The left side is relative to the home directory (or to the config/data
//! base when prefixed), the right side to the directory holding the file.
//! A literal `#` is written as `\#`.
use std::path::Path;

use super::symlink::Symlink;
use crate::config::{CONFIG_PREFIX, DATA_PREFIX, Dirs};
use crate::error::LinkError;

/// Separator between the link and target sides of a declaration.
const SEPARATOR: &str = " -> ";

/// Read and parse the link specification file at `spec_file`.
///
/// # Errors
///
/// Returns [`LinkError::Io`] if the file cannot be read and
/// [`LinkError::InvalidSyntax`] for the first malformed declaration.
pub fn parse_file(spec_file: &Path, dirs: &Dirs) -> Result<Vec<Symlink>, LinkError> {
    let text =
        std::fs::read_to_string(spec_file).map_err(|e| LinkError::io("read", spec_file, e))?;
    parse(&text, spec_file, dirs)
}

/// Parse the contents of a link specification file.
///
/// `spec_file` locates the file: targets resolve against its directory and
/// syntax errors name it.  Symlinks are returned in line order.  A single bad
/// line rejects the whole file.
///
/// # Errors
///
/// Returns [`LinkError::InvalidSyntax`] for the first malformed declaration.
pub fn parse(text: &str, spec_file: &Path, dirs: &Dirs) -> Result<Vec<Symlink>, LinkError> {
    let spec_dir = spec_file.parent().unwrap_or_else(|| Path::new(""));
    let mut links = Vec::new();

    for (index, raw) in text.lines().enumerate() {
        let line = strip_comment(raw);
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let invalid = |reason: String| LinkError::InvalidSyntax {
            file: spec_file.to_path_buf(),
            line: index + 1,
            reason,
        };

        let (left, right) = split_declaration(line).map_err(invalid)?;
        let (base, rel_link) = select_base(left, dirs);
        check_relative(rel_link, "link").map_err(invalid)?;
        check_relative(right, "target").map_err(invalid)?;

        links.push(Symlink::new(base.join(rel_link), spec_dir.join(right)));
    }

    Ok(links)
}

/// Drop everything from the first unescaped `#`, unescaping `\#` to `#`.
fn strip_comment(line: &str) -> String {
    let mut out = String::with_capacity(line.len());
    let mut chars = line.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '\\' if chars.peek() == Some(&'#') => {
                out.push('#');
                chars.next();
            }
            '#' => break,
            _ => out.push(c),
        }
    }
    out
}

/// Split `line` on the single ` -> ` separator into trimmed link and target.
fn split_declaration(line: &str) -> Result<(&str, &str), String> {
    let mut parts = line.split(SEPARATOR);
    match (parts.next(), parts.next(), parts.next()) {
        (Some(left), Some(right), None) => Ok((left.trim(), right.trim())),
        (_, None, _) => Err(format!("missing '{}' separator", SEPARATOR.trim())),
        _ => Err(format!("more than one '{}' separator", SEPARATOR.trim())),
    }
}

/// Pick the base directory for a link path and strip its prefix marker.
fn select_base<'a>(left: &'a str, dirs: &'a Dirs) -> (&'a Path, &'a str) {
    if let Some(rest) = left.strip_prefix(CONFIG_PREFIX) {
        (dirs.config_home.as_path(), rest)
    } else if let Some(rest) = left.strip_prefix(DATA_PREFIX) {
        (dirs.data_home.as_path(), rest)
    } else {
        (dirs.home.as_path(), left)
    }
}

/// Reject empty, absolute, and trailing-separator paths.
fn check_relative(path: &str, side: &str) -> Result<(), String> {
    if path.is_empty() {
        return Err(format!("empty {side} path"));
    }
    if Path::new(path).is_absolute() || path.starts_with('/') {
        return Err(format!("{side} path '{path}' must be relative"));
    }
    if path.ends_with('/') || path.ends_with(std::path::MAIN_SEPARATOR) {
        return Err(format!("{side} path '{path}' must not end with a separator"));
    }
    Ok(())
}
