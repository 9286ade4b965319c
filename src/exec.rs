//! Post-link exec scripts.
use std::io;
use std::path::Path;
use std::process::{Command, ExitStatus};

use crate::error::ExecError;

/// Run `script` to completion with its containing directory as working
/// directory.
///
/// Standard streams are inherited so the script can talk to the terminal.
///
/// # Errors
///
/// - [`ExecError::NonZeroExit`] if the script exits unsuccessfully.
/// - [`ExecError::NotExecutable`] if the OS refuses to execute it.
/// - [`ExecError::Spawn`] for any other failure to start it.
pub fn run_script(script: &Path) -> Result<(), ExecError> {
    let mut cmd = Command::new(script);
    if let Some(dir) = script.parent() {
        cmd.current_dir(dir);
    }
    let status = cmd.status().map_err(|e| spawn_error(script, e))?;
    check_status(script, status)
}

fn spawn_error(script: &Path, source: io::Error) -> ExecError {
    if source.kind() == io::ErrorKind::PermissionDenied {
        ExecError::NotExecutable {
            script: script.to_path_buf(),
        }
    } else {
        ExecError::Spawn {
            script: script.to_path_buf(),
            source,
        }
    }
}

fn check_status(script: &Path, status: ExitStatus) -> Result<(), ExecError> {
    if status.success() {
        Ok(())
    } else {
        Err(ExecError::NonZeroExit {
            script: script.to_path_buf(),
            code: status.code(),
        })
    }
}
