//! CLI command handling
//!
//! Turns arguments and configuration into a pipeline, runs it and prints
//! the summary.

use std::path::Path;

use colored::Colorize;

use crate::commands::RunArgs;
use crate::common::config::Config;
use crate::common::paths::is_bare_name;
use crate::common::Result;
use crate::testing::{self, Pipeline, Registry, RunSummary, SystemRunner};

/// Run the driver; `Ok(false)` means at least one test case failed
pub async fn dispatch(args: RunArgs) -> Result<bool> {
    let mut config = Config::load(args.config.as_deref())?;
    if let Some(tool) = args.tool {
        config.tools.subject = tool;
    }
    if let Some(fixtures) = args.fixtures {
        config.layout.fixtures = fixtures;
    }

    let registry = match config.suite.take() {
        Some(suite) => Registry::from_pairs(suite),
        None => Registry::builtin(),
    };

    if args.list {
        for case in registry.sorted() {
            println!("{}", case);
        }
        return Ok(true);
    }

    let base = std::env::current_dir()?;
    let pipeline = Pipeline::from_config(&config, &base);
    preflight(&pipeline);

    let mut runner = SystemRunner::new(args.verbose);
    let summary = testing::run_selected(&pipeline, &registry, &args.cases, &mut runner).await?;
    print_summary(&summary);

    Ok(summary.success())
}

/// Warn about tools that cannot be found before any case runs
fn preflight(pipeline: &Pipeline) {
    let tools = &pipeline.tools;
    if !tools.subject.is_file() {
        tracing::warn!(path = %tools.subject.display(), "build generator not found");
    }
    for tool in [&tools.visualizer, &tools.executor] {
        check_tool(tool);
    }
}

fn check_tool(tool: &Path) {
    if is_bare_name(tool) {
        match which::which(tool) {
            Ok(path) => tracing::debug!(tool = %tool.display(), path = %path.display(), "found tool"),
            Err(_) => tracing::warn!(tool = %tool.display(), "tool not found on PATH"),
        }
    } else if !tool.is_file() {
        tracing::warn!(tool = %tool.display(), "tool not found");
    }
}

fn print_summary(summary: &RunSummary) {
    let line = format!("{} passed, {} failed", summary.passed(), summary.failed());
    if summary.success() {
        println!("\n{} {}", "✓".green().bold(), line.green().bold());
    } else {
        println!("\n{} {}", "✗".red().bold(), line.red().bold());
        for name in summary.failed_names() {
            println!("  {} {}", "✗".red(), name);
        }
    }
}
