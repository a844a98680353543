//! Test case selection and sequential execution

use super::process::ProcessRunner;
use super::registry::{Registry, TestCase};
use super::runner::{CaseResult, Pipeline};
use crate::common::Result;

/// Outcome of a whole run, in execution order
#[derive(Debug, Default)]
pub struct RunSummary {
    pub results: Vec<CaseResult>,
}

impl RunSummary {
    pub fn passed(&self) -> usize {
        self.results.iter().filter(|r| r.passed).count()
    }

    pub fn failed(&self) -> usize {
        self.results.len() - self.passed()
    }

    pub fn failed_names(&self) -> Vec<&str> {
        self.results
            .iter()
            .filter(|r| !r.passed)
            .map(|r| r.name.as_str())
            .collect()
    }

    pub fn success(&self) -> bool {
        self.failed() == 0
    }
}

/// Resolve which test cases to run
///
/// Requested names run in the given order and must all be registered; an
/// empty request selects the whole registry in lexicographic order. Every
/// name is checked before anything runs.
pub fn select<'a>(registry: &'a Registry, requested: &[String]) -> Result<Vec<&'a TestCase>> {
    if requested.is_empty() {
        return Ok(registry.sorted().collect());
    }
    requested.iter().map(|name| registry.get(name)).collect()
}

/// Run test cases one after another
pub async fn run_cases<R>(pipeline: &Pipeline, cases: &[&TestCase], runner: &mut R) -> RunSummary
where
    R: ProcessRunner + ?Sized,
{
    let mut summary = RunSummary::default();
    for case in cases {
        let result = pipeline.run_case(case, runner).await;
        tracing::debug!(
            case = %result.name,
            passed = result.passed,
            steps_run = result.steps_run,
            "test case finished"
        );
        summary.results.push(result);
    }
    summary
}

/// Select and run test cases
pub async fn run_selected<R>(
    pipeline: &Pipeline,
    registry: &Registry,
    requested: &[String],
    runner: &mut R,
) -> Result<RunSummary>
where
    R: ProcessRunner + ?Sized,
{
    let cases = select(registry, requested)?;
    Ok(run_cases(pipeline, &cases, runner).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::config::Config;
    use crate::common::Error;
    use crate::testing::fakes::RecordingRunner;
    use crate::testing::CWD_LOCK;
    use std::path::PathBuf;

    fn names(cases: &[&TestCase]) -> Vec<String> {
        cases.iter().map(|c| c.name.clone()).collect()
    }

    #[test]
    fn test_select_all_sorted() {
        let registry = Registry::from_pairs([("b-case", "app"), ("a-case", "app")]);
        let cases = select(&registry, &[]).unwrap();
        assert_eq!(names(&cases), vec!["a-case", "b-case"]);
    }

    #[test]
    fn test_select_keeps_requested_order() {
        let registry = Registry::from_pairs([("a-case", "app"), ("b-case", "app")]);
        let requested = vec!["b-case".to_string(), "a-case".to_string()];
        let cases = select(&registry, &requested).unwrap();
        assert_eq!(names(&cases), vec!["b-case", "a-case"]);
    }

    #[test]
    fn test_select_unknown_fails() {
        let registry = Registry::from_pairs([("a-case", "app")]);
        let requested = vec!["a-case".to_string(), "typo".to_string()];
        let err = select(&registry, &requested).unwrap_err();
        assert!(matches!(err, Error::UnknownTestCase { ref name, .. } if name == "typo"));
    }

    #[tokio::test]
    async fn test_unknown_case_runs_nothing() {
        let registry = Registry::from_pairs([("a-case", "app")]);
        let pipeline = Pipeline::from_config(&Config::default(), &PathBuf::from("/nowhere"));
        let mut runner = RecordingRunner::new();
        let requested = vec!["a-case".to_string(), "typo".to_string()];

        let result = run_selected(&pipeline, &registry, &requested, &mut runner).await;

        assert!(result.is_err());
        assert!(runner.invocations.is_empty());
    }

    #[tokio::test]
    async fn test_runs_all_in_sorted_order() {
        let _lock = CWD_LOCK.lock().await;
        let root = tempfile::tempdir().unwrap();
        let base = root.path().canonicalize().unwrap();
        for name in ["a-case", "b-case"] {
            std::fs::create_dir_all(base.join("tests").join(name)).unwrap();
        }
        let registry = Registry::from_pairs([("b-case", "b-app"), ("a-case", "a-app")]);
        let pipeline = Pipeline::from_config(&Config::default(), &base);
        let mut runner = RecordingRunner::new().creating(&pipeline.tools.subject, "build");

        let summary = run_selected(&pipeline, &registry, &[], &mut runner)
            .await
            .unwrap();

        assert!(summary.success());
        assert_eq!(summary.passed(), 2);
        let order: Vec<_> = summary.results.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(order, vec!["a-case", "b-case"]);
        assert_eq!(runner.invocations.len(), 8);
        assert_eq!(runner.invocations[0].cwd, base.join("tests").join("a-case"));
        assert_eq!(runner.invocations[3].program, PathBuf::from("./a-app"));
        assert_eq!(runner.invocations[4].cwd, base.join("tests").join("b-case"));
        assert_eq!(runner.invocations[7].program, PathBuf::from("./b-app"));
    }

    #[tokio::test]
    async fn test_failure_does_not_stop_later_cases() {
        let _lock = CWD_LOCK.lock().await;
        let before = std::env::current_dir().unwrap();
        let root = tempfile::tempdir().unwrap();
        let base = root.path().canonicalize().unwrap();
        std::fs::create_dir_all(base.join("tests").join("good")).unwrap();
        // "broken" has no fixture directory.
        let registry = Registry::from_pairs([("broken", "app"), ("good", "app")]);
        let pipeline = Pipeline::from_config(&Config::default(), &base);
        let mut runner = RecordingRunner::new().creating(&pipeline.tools.subject, "build");

        let summary = run_selected(&pipeline, &registry, &[], &mut runner)
            .await
            .unwrap();

        assert!(!summary.success());
        assert_eq!(summary.failed(), 1);
        assert_eq!(summary.failed_names(), vec!["broken"]);
        assert_eq!(summary.passed(), 1);
        assert_eq!(std::env::current_dir().unwrap(), before);
    }
}
