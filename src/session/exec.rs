use std::env;
use std::io;
use std::path::PathBuf;
use std::process::Command;

use thiserror::Error;

use crate::session::invocation::{Invocation, Tool};

#[derive(Debug, Error)]
pub enum ExecError {
    #[error("{program} not found in PATH: {error}")]
    NotFound {
        program: String,
        error: which::Error,
    },
    #[error("exec {program}: {error}")]
    Spawn { program: String, error: io::Error },
}

/// Locate the binary for `tool`, honouring its override variable.
pub fn program_path(tool: Tool) -> Result<PathBuf, ExecError> {
    let program = match env::var(tool.override_var()) {
        Ok(value) if !value.trim().is_empty() => value.trim().to_string(),
        _ => tool.program().to_string(),
    };

    which::which(&program).map_err(|error| ExecError::NotFound { program, error })
}

/// Replace the current process with the invocation so ssh owns the terminal.
///
/// Only returns on failure.
#[cfg(unix)]
pub fn exec_into(invocation: &Invocation) -> Result<i32, ExecError> {
    use std::os::unix::process::CommandExt;

    let path = program_path(invocation.tool)?;
    tracing::info!("exec {} ({})", invocation.tool.program(), path.display());

    let error = Command::new(&path)
        .arg0(invocation.tool.program())
        .args(&invocation.args)
        .exec();

    Err(ExecError::Spawn {
        program: invocation.tool.program().to_string(),
        error,
    })
}

/// Windows has no exec; run the child with inherited stdio and hand back its exit code.
#[cfg(not(unix))]
pub fn exec_into(invocation: &Invocation) -> Result<i32, ExecError> {
    let path = program_path(invocation.tool)?;
    tracing::info!("spawn {} ({})", invocation.tool.program(), path.display());

    let status = Command::new(&path)
        .args(&invocation.args)
        .status()
        .map_err(|error| ExecError::Spawn {
            program: invocation.tool.program().to_string(),
            error,
        })?;

    Ok(status.code().unwrap_or(1))
}
