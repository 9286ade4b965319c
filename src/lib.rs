//! Dotfiles symlink reconciliation engine.
//!
//! Keeps the home directory's symlinks in step with a dotfiles repository:
//! every run removes the links that currently point into the repository,
//! recreates the set declared by the repository's `.links` files, and then
//! runs the `setup` scripts of directories marked with `.exec`.
//!
//! - **[`links`]**: parse declarations, create and delete single links, scan
//!   the home directory
//! - **[`tasks`]**: the three phases and their [`Tally`](tasks::Tally)
//! - **[`commands`]**: the top-level run
#![deny(clippy::or_fun_call)]
#![deny(clippy::bool_to_int_with_if)]

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod exec;
pub mod links;
pub mod logging;
pub mod tasks;
