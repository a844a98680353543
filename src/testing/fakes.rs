//! Scripted [`ProcessRunner`] for unit tests

use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};

use async_trait::async_trait;

use crate::common::{Error, Result};

use super::process::{failure_message, ProcessRunner};

/// One recorded program invocation
#[derive(Debug, Clone)]
pub struct Invocation {
    pub program: PathBuf,
    pub args: Vec<String>,
    /// Canonical working directory at the time of the call
    pub cwd: PathBuf,
}

/// Records every call instead of spawning; programs succeed unless scripted
#[derive(Debug, Default)]
pub struct RecordingRunner {
    pub invocations: Vec<Invocation>,
    failures: HashMap<PathBuf, i32>,
    missing: HashSet<PathBuf>,
    creates: HashMap<PathBuf, PathBuf>,
}

impl RecordingRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make `program` exit with `code`
    pub fn failing(mut self, program: impl AsRef<Path>, code: i32) -> Self {
        self.failures.insert(program.as_ref().to_path_buf(), code);
        self
    }

    /// Make `program` fail to start
    pub fn missing(mut self, program: impl AsRef<Path>) -> Self {
        self.missing.insert(program.as_ref().to_path_buf());
        self
    }

    /// Make `program` create `dir` (relative to its working directory)
    pub fn creating(mut self, program: impl AsRef<Path>, dir: impl AsRef<Path>) -> Self {
        self.creates
            .insert(program.as_ref().to_path_buf(), dir.as_ref().to_path_buf());
        self
    }

    pub fn programs(&self) -> Vec<PathBuf> {
        self.invocations.iter().map(|i| i.program.clone()).collect()
    }
}

#[async_trait]
impl ProcessRunner for RecordingRunner {
    async fn run(&mut self, program: &Path, args: &[String]) -> Result<bool> {
        self.invocations.push(Invocation {
            program: program.to_path_buf(),
            args: args.to_vec(),
            cwd: std::env::current_dir()?.canonicalize()?,
        });

        if self.missing.contains(program) {
            return Err(Error::spawn(
                program.display(),
                std::io::Error::new(std::io::ErrorKind::NotFound, "not found"),
            ));
        }
        if let Some(code) = self.failures.get(program) {
            eprintln!("{}", failure_message(program, Some(*code)));
            return Ok(false);
        }
        if let Some(dir) = self.creates.get(program) {
            std::fs::create_dir_all(dir)?;
        }
        Ok(true)
    }
}
