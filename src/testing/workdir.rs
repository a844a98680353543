//! Scoped working directory changes
//!
//! The process working directory is global state. [`WorkDir`] is the only
//! place that mutates it: entering records the previous directory, and
//! dropping the guard restores it on every exit path, including `?` returns
//! and panics unwinding through the scope.

use std::path::{Path, PathBuf};

use crate::common::paths::expand_home;
use crate::common::{Error, Result};

/// Guard for a temporary change of the process working directory
#[derive(Debug)]
#[must_use = "the previous directory is restored as soon as the guard is dropped"]
pub struct WorkDir {
    saved: PathBuf,
    entered: PathBuf,
}

impl WorkDir {
    /// Change into `path`, remembering the current directory
    ///
    /// A leading `~` is expanded to the home directory. If the change fails
    /// no guard exists, so nothing is restored and the error propagates.
    pub fn enter(path: impl AsRef<Path>) -> Result<Self> {
        let target = expand_home(path.as_ref());
        let saved = std::env::current_dir()?;
        std::env::set_current_dir(&target).map_err(|e| Error::directory_change(&target, e))?;
        tracing::debug!(dir = %target.display(), "entered directory");
        Ok(Self {
            saved,
            entered: target,
        })
    }

    /// Directory this guard entered, as given (after home expansion)
    pub fn path(&self) -> &Path {
        &self.entered
    }

    /// Directory that will be restored on drop
    pub fn saved(&self) -> &Path {
        &self.saved
    }
}

impl Drop for WorkDir {
    fn drop(&mut self) {
        if let Err(e) = std::env::set_current_dir(&self.saved) {
            tracing::error!(
                dir = %self.saved.display(),
                error = %e,
                "failed to restore working directory"
            );
        } else {
            tracing::debug!(dir = %self.saved.display(), "restored directory");
        }
    }
}
