use crate::error::Error;

use std::io::Write;
use std::process::{Command, ExitStatus, Stdio};
use tracing::debug;

/// Capability for running external programs (`git`, the editor, a fuzzy selector).
///
/// Production code uses [`SystemRunner`]; tests substitute a fake that records
/// invocations instead of spawning anything.
pub trait Runner {
    /// Runs a program attached to this process's standard streams and waits
    /// for it to exit.
    ///
    /// # Returns
    ///
    /// * `Ok(())` if the program exited with status `0`.
    /// * `Err(Error::CommandFailed)` on a non-zero exit.
    /// * `Err(Error::Spawn)` if the program could not be started.
    fn run(&self, program: &str, args: &[&str]) -> Result<(), Error>;

    /// Runs a program and returns its trimmed standard output.
    ///
    /// Standard error is captured and reported as the failure reason when the
    /// program exits non-zero.
    fn output(&self, program: &str, args: &[&str]) -> Result<String, Error>;

    /// Runs a program with `input` written to its standard input and returns
    /// its trimmed standard output. Standard error stays attached to the
    /// terminal so interactive programs can draw their UI.
    fn output_with_input(&self, program: &str, args: &[&str], input: &str)
    -> Result<String, Error>;
}

/// [`Runner`] backed by [`std::process::Command`].
pub struct SystemRunner;

/// Renders `program args...` for error messages and logs.
pub(crate) fn display_command(program: &str, args: &[&str]) -> String {
    std::iter::once(program)
        .chain(args.iter().copied())
        .collect::<Vec<&str>>()
        .join(" ")
}

fn describe_status(status: ExitStatus) -> String {
    match status.code() {
        Some(code) => format!("exited with status {}", code),
        None => String::from("was terminated by a signal"),
    }
}

fn spawn_error(program: &str) -> impl FnOnce(std::io::Error) -> Error + '_ {
    move |source| Error::Spawn {
        program: program.to_string(),
        source,
    }
}

impl Runner for SystemRunner {
    fn run(&self, program: &str, args: &[&str]) -> Result<(), Error> {
        debug!(command = %display_command(program, args), "running");
        let mut cmd = Command::new(program);
        cmd.args(args);
        cmd.stdin(Stdio::inherit());
        cmd.stdout(Stdio::inherit());
        cmd.stderr(Stdio::inherit());

        let status = cmd.status().map_err(spawn_error(program))?;
        if status.success() {
            Ok(())
        } else {
            Err(Error::CommandFailed {
                command: display_command(program, args),
                status: describe_status(status),
            })
        }
    }

    fn output(&self, program: &str, args: &[&str]) -> Result<String, Error> {
        debug!(command = %display_command(program, args), "capturing output");
        let mut cmd = Command::new(program);
        cmd.args(args);
        cmd.stdin(Stdio::null());
        cmd.stdout(Stdio::piped());
        cmd.stderr(Stdio::piped());

        let out = cmd.output().map_err(spawn_error(program))?;
        if out.status.success() {
            Ok(String::from_utf8_lossy(&out.stdout).trim().to_string())
        } else {
            let stderr = String::from_utf8_lossy(&out.stderr).trim().to_string();
            let status = if stderr.is_empty() {
                describe_status(out.status)
            } else {
                format!("{}: {}", describe_status(out.status), stderr)
            };
            Err(Error::CommandFailed {
                command: display_command(program, args),
                status,
            })
        }
    }

    fn output_with_input(
        &self,
        program: &str,
        args: &[&str],
        input: &str,
    ) -> Result<String, Error> {
        debug!(command = %display_command(program, args), "piping input");
        let mut cmd = Command::new(program);
        cmd.args(args);
        cmd.stdin(Stdio::piped());
        cmd.stdout(Stdio::piped());
        cmd.stderr(Stdio::inherit());

        let mut child = cmd.spawn().map_err(spawn_error(program))?;
        if let Some(mut stdin) = child.stdin.take() {
            stdin
                .write_all(input.as_bytes())
                .map_err(Error::io("failed to write selector input"))?;
            // Dropping stdin closes the pipe so the selector sees EOF.
        }

        let out = child.wait_with_output().map_err(spawn_error(program))?;
        if out.status.success() {
            Ok(String::from_utf8_lossy(&out.stdout).trim().to_string())
        } else {
            Err(Error::CommandFailed {
                command: display_command(program, args),
                status: describe_status(out.status),
            })
        }
    }
}
