//! E2E Test Pipeline
//!
//! Drives the build generator through each fixture directory and chains the
//! graph renderer, the build executor and the produced executable after it.
//! Everything runs sequentially in the process working directory, which
//! only [`workdir::WorkDir`] changes.

mod driver;
mod process;
mod registry;
mod runner;
mod workdir;

#[cfg(test)]
mod fakes;

pub use driver::{run_cases, run_selected, select, RunSummary};
pub use process::{check_status, command_line, failure_message, ProcessRunner, SystemRunner};
pub use registry::{Registry, TestCase};
pub use runner::{banner, CaseResult, Layout, Pipeline, Step, Toolchain};
pub use workdir::WorkDir;

/// Serializes unit tests that change the process working directory
#[cfg(test)]
pub(crate) static CWD_LOCK: tokio::sync::Mutex<()> = tokio::sync::Mutex::const_new(());
