//! Test pipeline implementation
//!
//! Runs one test case: regenerate the build with the subject tool, render
//! the dependency graph, build, then run the produced executable. The first
//! failing step ends the case.

use std::fmt;
use std::path::{Path, PathBuf};

use colored::Colorize;

use crate::common::config::Config;
use crate::common::paths::{absolutize, is_bare_name};
use crate::common::{Error, Result};

use super::process::ProcessRunner;
use super::registry::TestCase;
use super::workdir::WorkDir;

/// Width of the banner text after the `==[   ` prefix
const BANNER_WIDTH: usize = 50;

/// Pipeline steps in execution order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// Subject tool generates the build files in the fixture directory
    Generate,
    /// Dependency graph is rendered to an image
    Visualize,
    /// Build executor compiles the artifact
    Build,
    /// Produced executable runs
    Execute,
}

impl Step {
    pub const ALL: [Step; 4] = [Step::Generate, Step::Visualize, Step::Build, Step::Execute];

    pub fn name(&self) -> &'static str {
        match self {
            Step::Generate => "generate",
            Step::Visualize => "visualize",
            Step::Build => "build",
            Step::Execute => "execute",
        }
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Result of a test case run
#[derive(Debug)]
pub struct CaseResult {
    pub name: String,
    pub passed: bool,
    pub steps_run: usize,
    pub steps_total: usize,
    /// Step whose program exited unsuccessfully
    pub failed_step: Option<Step>,
    /// Hard failure that stopped the case (missing directory, spawn failure)
    pub error: Option<Error>,
}

impl CaseResult {
    fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            passed: false,
            steps_run: 0,
            steps_total: Step::ALL.len(),
            failed_step: None,
            error: None,
        }
    }
}

/// External programs used by the pipeline
#[derive(Debug, Clone)]
pub struct Toolchain {
    pub subject: PathBuf,
    pub visualizer: PathBuf,
    pub executor: PathBuf,
}

/// Where fixtures live and what the build output is called
#[derive(Debug, Clone)]
pub struct Layout {
    pub fixtures: PathBuf,
    pub build_dir: PathBuf,
    pub graph_file: String,
    pub image_file: String,
    pub image_format: String,
}

/// Ordered step chain shared by every test case
#[derive(Debug, Clone)]
pub struct Pipeline {
    pub tools: Toolchain,
    pub layout: Layout,
}

impl Pipeline {
    /// Build a pipeline from configuration
    ///
    /// The subject tool and fixture root are made absolute against `base`
    /// (the invocation directory) because every step runs elsewhere. Bare
    /// tool names are left for PATH lookup.
    pub fn from_config(config: &Config, base: &Path) -> Self {
        let resolve_tool = |tool: &Path| {
            if is_bare_name(tool) {
                tool.to_path_buf()
            } else {
                absolutize(tool, base)
            }
        };

        Self {
            tools: Toolchain {
                subject: absolutize(&config.tools.subject, base),
                visualizer: resolve_tool(&config.tools.visualizer),
                executor: resolve_tool(&config.tools.executor),
            },
            layout: Layout {
                fixtures: absolutize(&config.layout.fixtures, base),
                build_dir: config.layout.build_dir.clone(),
                graph_file: config.layout.graph_file.clone(),
                image_file: config.layout.image_file.clone(),
                image_format: config.layout.image_format.clone(),
            },
        }
    }

    /// Fixture directory for a test case
    pub fn fixture_dir(&self, case: &TestCase) -> PathBuf {
        self.layout.fixtures.join(&case.name)
    }

    /// Renderer arguments: `-T<format> -o <image> <graph>`
    pub fn visualize_args(&self) -> Vec<String> {
        vec![
            format!("-T{}", self.layout.image_format),
            "-o".to_string(),
            self.layout.image_file.clone(),
            self.layout.graph_file.clone(),
        ]
    }

    /// Run a test case from banner to its last step
    ///
    /// Step failures have already been reported by the runner; hard errors
    /// are reported here. Either way the working directory is restored
    /// before this returns.
    pub async fn run_case<R>(&self, case: &TestCase, runner: &mut R) -> CaseResult
    where
        R: ProcessRunner + ?Sized,
    {
        println!("{}", banner(&case.name).bold());

        let mut result = CaseResult::new(&case.name);
        match self.execute(case, runner, &mut result).await {
            Ok(passed) => result.passed = passed,
            Err(e) => {
                eprintln!("  {} {}: {}", "✗".red(), case.name, e);
                tracing::debug!(case = %case.name, error = ?e, "test case aborted");
                result.error = Some(e);
            }
        }
        result
    }

    async fn execute<R>(&self, case: &TestCase, runner: &mut R, result: &mut CaseResult) -> Result<bool>
    where
        R: ProcessRunner + ?Sized,
    {
        let _fixture = WorkDir::enter(self.fixture_dir(case))?;
        reset_build_dir(&self.layout.build_dir)?;

        if !run_step(runner, result, Step::Generate, &self.tools.subject, &[]).await? {
            return Ok(false);
        }

        let _build = WorkDir::enter(&self.layout.build_dir)?;

        let passed = run_step(runner, result, Step::Visualize, &self.tools.visualizer, &self.visualize_args()).await?
            && run_step(runner, result, Step::Build, &self.tools.executor, &[]).await?
            && run_step(runner, result, Step::Execute, &case.artifact_path(), &[]).await?;

        Ok(passed)
    }
}

async fn run_step<R>(
    runner: &mut R,
    result: &mut CaseResult,
    step: Step,
    program: &Path,
    args: &[String],
) -> Result<bool>
where
    R: ProcessRunner + ?Sized,
{
    result.steps_run += 1;
    tracing::debug!(case = %result.name, step = %step, "starting step");
    let ok = runner.run(program, args).await?;
    if !ok {
        result.failed_step = Some(step);
    }
    Ok(ok)
}

/// Remove stale build output; absence is not an error
fn reset_build_dir(build_dir: &Path) -> Result<()> {
    match std::fs::remove_dir_all(build_dir) {
        Ok(()) => {
            tracing::debug!(dir = %build_dir.display(), "removed stale build output");
            Ok(())
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(Error::Cleanup {
            path: build_dir.to_path_buf(),
            source: e,
        }),
    }
}

/// Banner printed before each test case
pub fn banner(name: &str) -> String {
    format!("==[   {:=<width$}", format!("{}   ]", name), width = BANNER_WIDTH)
}
