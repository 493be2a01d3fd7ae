//! External command execution.

use std::path::Path;
use std::process::{Command, ExitStatus};

use anyhow::Result;
use tracing::debug;

use crate::error::SitepubError;

/// Run an external command and return its trimmed stdout.
///
/// The command inherits the parent environment and credentials. A non-zero
/// exit status is fatal to the run: it surfaces as
/// [`SitepubError::CommandFailed`] carrying the rendered command line and the
/// captured stderr.
pub fn run_in(program: &str, args: &[&str], cwd: Option<&Path>) -> Result<String> {
    let command = render_command_line(program, args);
    match cwd {
        Some(dir) => debug!("> {command}  (cwd={})", dir.display()),
        None => debug!("> {command}"),
    }

    let mut cmd = Command::new(program);
    cmd.args(args);
    if let Some(dir) = cwd {
        cmd.current_dir(dir);
    }
    let output = cmd.output().map_err(|source| SitepubError::CommandSpawn {
        command: command.clone(),
        source,
    })?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
        return Err(SitepubError::CommandFailed {
            command,
            status: status_label(&output.status),
            code: output.status.code(),
            stderr,
        }
        .into());
    }

    Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
}

fn render_command_line(program: &str, args: &[&str]) -> String {
    let mut parts = Vec::with_capacity(args.len() + 1);
    parts.push(program);
    parts.extend_from_slice(args);
    shell_words::join(parts)
}

fn status_label(status: &ExitStatus) -> String {
    match status.code() {
        Some(code) => format!("exit status {code}"),
        None => "terminated by signal".to_string(),
    }
}
