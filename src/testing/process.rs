//! External program execution
//!
//! Reduces a child process to pass/fail. Output is inherited, never
//! captured, and there is no timeout.

use std::path::Path;
use std::process::{ExitStatus, Stdio};

use async_trait::async_trait;
use colored::Colorize;
use tokio::process::Command;

use crate::common::{Error, Result};

/// Runs one external program in the current working directory
#[async_trait]
pub trait ProcessRunner: Send {
    /// Run `program` with `args` and wait for it to exit
    ///
    /// Returns `Ok(true)` on a successful exit status and `Ok(false)` after
    /// reporting a diagnostic otherwise. `Err` means the program could not
    /// be started at all.
    async fn run(&mut self, program: &Path, args: &[String]) -> Result<bool>;
}

/// [`ProcessRunner`] that spawns real child processes
#[derive(Debug, Default, Clone)]
pub struct SystemRunner {
    /// Echo each command line before running it
    pub verbose: bool,
}

impl SystemRunner {
    pub fn new(verbose: bool) -> Self {
        Self { verbose }
    }
}

#[async_trait]
impl ProcessRunner for SystemRunner {
    async fn run(&mut self, program: &Path, args: &[String]) -> Result<bool> {
        let line = command_line(program, args);
        if self.verbose {
            println!("  $ {}", line.dimmed());
        }
        tracing::debug!(command = %line, "running");

        let status = Command::new(program)
            .args(args)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .await
            .map_err(|e| Error::spawn(program.display(), e))?;

        Ok(check_status(program, status))
    }
}

/// Report a non-successful exit status; returns whether the run succeeded
pub fn check_status(program: &Path, status: ExitStatus) -> bool {
    if status.success() {
        return true;
    }
    eprintln!("{}", failure_message(program, status.code()).red());
    tracing::debug!(program = %program.display(), status = ?status, "command failed");
    false
}

/// Diagnostic line for a failed program
///
/// A missing code means the child was terminated by a signal.
pub fn failure_message(program: &Path, code: Option<i32>) -> String {
    match code {
        Some(code) => format!("{} ended with error {}", program.display(), code),
        None => format!("{} was terminated by a signal", program.display()),
    }
}

/// Human-readable command line for logs and verbose output
pub fn command_line(program: &Path, args: &[String]) -> String {
    std::iter::once(program.display().to_string())
        .chain(args.iter().cloned())
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_failure_message_with_code() {
        assert_eq!(
            failure_message(Path::new("/work/bin/c++modules"), Some(2)),
            "/work/bin/c++modules ended with error 2"
        );
    }

    #[test]
    fn test_failure_message_signal() {
        assert_eq!(
            failure_message(Path::new("ninja"), None),
            "ninja was terminated by a signal"
        );
    }

    #[test]
    fn test_command_line() {
        let args = vec![
            "-Tpng".to_string(),
            "-o".to_string(),
            "dependencies.png".to_string(),
            "dependencies.dot".to_string(),
        ];
        assert_eq!(
            command_line(Path::new("dot"), &args),
            "dot -Tpng -o dependencies.png dependencies.dot"
        );
        assert_eq!(command_line(Path::new("ninja"), &[]), "ninja");
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_system_runner_success_and_failure() {
        let mut runner = SystemRunner::new(false);
        assert!(runner.run(Path::new("true"), &[]).await.unwrap());
        assert!(!runner.run(Path::new("false"), &[]).await.unwrap());
        assert!(!runner
            .run(Path::new("sh"), &["-c".to_string(), "exit 7".to_string()])
            .await
            .unwrap());
    }

    #[tokio::test]
    async fn test_system_runner_missing_program() {
        let mut runner = SystemRunner::new(false);
        let missing = PathBuf::from("/definitely/not/a/program");
        let err = runner.run(&missing, &[]).await.unwrap_err();
        assert!(matches!(err, Error::Spawn { .. }));
    }
}
