//! Symlink reconciliation primitives.
//!
//! - [`descriptor`] parses link specification files into [`Symlink`]s
//! - [`symlink`] creates and deletes one link
//! - [`scan`] finds links in the home directory that point into the repository
pub mod descriptor;
mod paths;
pub mod scan;
pub mod symlink;

pub use symlink::{LinkChange, LinkState, Symlink};
