//! CLI argument definitions

use clap::Args;
use std::path::PathBuf;

#[derive(Args, Debug, Default)]
pub struct RunArgs {
    /// Test cases to run, in order (default: every registered case, sorted)
    pub cases: Vec<String>,

    /// Configuration file (default: the platform config dir)
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Build generator under test (default: bin/c++modules)
    #[arg(long, value_name = "PATH")]
    pub tool: Option<PathBuf>,

    /// Directory containing one fixture directory per test case
    #[arg(long, value_name = "DIR")]
    pub fixtures: Option<PathBuf>,

    /// List registered test cases and exit
    #[arg(long)]
    pub list: bool,

    /// Echo each command before running it
    #[arg(long, short)]
    pub verbose: bool,
}
