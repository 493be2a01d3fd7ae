//! Error types for sitepub.

use std::io;

use thiserror::Error;

/// Errors the pipeline can surface to the operator.
#[derive(Error, Debug)]
pub enum SitepubError {
    /// An external command exited with a non-zero status.
    #[error("command `{command}` failed ({status}): {stderr}")]
    CommandFailed {
        command: String,
        status: String,
        code: Option<i32>,
        stderr: String,
    },

    /// An external command could not be started at all.
    #[error("failed to spawn `{command}`: {source}")]
    CommandSpawn {
        command: String,
        #[source]
        source: io::Error,
    },

    /// A destructive wipe was requested while the wrong branch is checked out.
    #[error("refusing to wipe: checked out branch is '{actual}', expected '{expected}'")]
    WrongBranch { expected: String, actual: String },
}

impl SitepubError {
    /// Exit code the process should terminate with for this error, if the
    /// error carries one (the failing command's own exit code).
    pub fn exit_code(&self) -> Option<i32> {
        match self {
            SitepubError::CommandFailed { code, .. } => Some(code.unwrap_or(1)),
            _ => None,
        }
    }
}
