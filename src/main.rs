//! c++modules E2E driver
//!
//! Runs the build generator in each fixture directory, then renders the
//! dependency graph, builds with ninja and runs the produced executable.

use clap::Parser;
use cxxmodules_e2e::cli;
use cxxmodules_e2e::commands::RunArgs;
use cxxmodules_e2e::common::logging;

#[derive(Parser)]
#[command(name = "cxxmodules-e2e", about = "End-to-end tests for the c++modules build generator")]
#[command(version, long_about = None)]
struct Cli {
    #[command(flatten)]
    args: RunArgs,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    logging::init_cli(cli.args.verbose);

    match cli::dispatch(cli.args).await {
        Ok(true) => {}
        Ok(false) => std::process::exit(1),
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    }
}
