//! c++modules E2E driver
//!
//! Runs each test case's fixture through the build generator, the graph
//! renderer, the build executor and finally the produced executable,
//! stopping a case at its first failing step.

pub mod cli;
pub mod commands;
pub mod common;
pub mod testing;

// Re-export commonly used types for tests
pub use common::{Error, Result};
pub use testing::{Pipeline, Registry, TestCase};
