//! Execution of shell aliases.

use std::process::{Command, ExitCode, ExitStatus, Stdio};

use tracing::debug;

use crate::error::CliError;

/// Runs `command` through the platform shell with inherited standard streams.
///
/// Returns the child's exit status as the process exit code.
///
/// # Errors
///
/// Returns [`CliError::Shell`] if the shell cannot be started.
pub fn run_shell(command: &str) -> Result<ExitCode, CliError> {
    debug!(command, "running shell alias");
    let status = shell_command(command)
        .stdin(Stdio::inherit())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .status()
        .map_err(|source| CliError::Shell {
            command: command.to_string(),
            source,
        })?;
    debug!(%status, "shell alias finished");
    Ok(ExitCode::from(status_code(status)))
}

/// Builds the shell invocation for `command`.
#[cfg(not(windows))]
#[must_use]
pub fn shell_command(command: &str) -> Command {
    let mut cmd = Command::new("sh");
    cmd.arg("-c").arg(command);
    cmd
}

/// Builds the shell invocation for `command`.
#[cfg(windows)]
#[must_use]
pub fn shell_command(command: &str) -> Command {
    let mut cmd = Command::new("cmd");
    cmd.arg("/C").arg(command);
    cmd
}

/// Maps a child status to an exit code; signals and out-of-range codes become 1.
fn status_code(status: ExitStatus) -> u8 {
    status
        .code()
        .and_then(|code| u8::try_from(code).ok())
        .unwrap_or(1)
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    #[test]
    fn exit_status_is_propagated() {
        let status = shell_command("exit 3").status().expect("spawn sh");
        assert_eq!(status_code(status), 3);
    }

    #[test]
    fn pipelines_run_in_the_shell() {
        let output = shell_command("printf 'a\\nb\\n' | wc -l")
            .output()
            .expect("spawn sh");
        assert!(output.status.success());
        assert_eq!(String::from_utf8_lossy(&output.stdout).trim(), "2");
    }

    #[test]
    fn success_maps_to_zero() {
        let status = shell_command("true").status().expect("spawn sh");
        assert_eq!(status_code(status), 0);
    }
}
