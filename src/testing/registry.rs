//! Test case registry
//!
//! Maps each test case (a fixture directory name) to the executable its
//! build produces.

use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;

use crate::common::{Error, Result};

/// A single end-to-end test case
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestCase {
    /// Fixture directory name, unique within the registry
    pub name: String,
    /// Executable produced by the build, relative to the build-output directory
    pub artifact: String,
}

impl TestCase {
    pub fn new(name: impl Into<String>, artifact: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            artifact: artifact.into(),
        }
    }

    /// Invocation path of the artifact from inside the build-output directory
    ///
    /// Always prefixed with `./` so the program is never looked up on PATH.
    pub fn artifact_path(&self) -> PathBuf {
        PathBuf::from(".").join(&self.artifact)
    }
}

impl fmt::Display for TestCase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.name, self.artifact)
    }
}

/// Built-in suite: fixture directory and produced executable
static BUILTIN_SUITE: &[(&str, &str)] = &[
    ("01-cxx17", "app"),
    ("02-internal", "app"),
    ("03-strings-hm", "app"),
    ("03-strings-inc", "app"),
    ("04-impl", "app"),
    ("05-strings-B", "app"),
    ("06-static-lib", "app/example"),
];

/// Immutable set of known test cases
#[derive(Debug, Clone)]
pub struct Registry {
    cases: BTreeMap<String, TestCase>,
}

impl Registry {
    /// The suite shipped with the project
    pub fn builtin() -> Self {
        Self::from_pairs(BUILTIN_SUITE.iter().copied())
    }

    /// Build a registry from `(name, artifact)` pairs
    pub fn from_pairs<I, N, A>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (N, A)>,
        N: Into<String>,
        A: Into<String>,
    {
        let cases = pairs
            .into_iter()
            .map(|(name, artifact)| {
                let case = TestCase::new(name, artifact);
                (case.name.clone(), case)
            })
            .collect();
        Self { cases }
    }

    /// Look up a test case, failing loudly when it is not registered
    pub fn get(&self, name: &str) -> Result<&TestCase> {
        self.cases
            .get(name)
            .ok_or_else(|| Error::unknown_test_case(name, &self.names()))
    }

    /// All test cases in lexicographic name order
    pub fn sorted(&self) -> impl Iterator<Item = &TestCase> {
        self.cases.values()
    }

    /// All test case names in lexicographic order
    pub fn names(&self) -> Vec<&str> {
        self.cases.keys().map(String::as_str).collect()
    }

    pub fn len(&self) -> usize {
        self.cases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cases.is_empty()
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::builtin()
    }
}
