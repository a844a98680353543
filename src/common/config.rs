//! Configuration file handling

use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use super::paths::config_path;
use super::Result;

/// Main configuration structure
#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// External programs the pipeline invokes
    #[serde(default)]
    pub tools: ToolsConfig,

    /// Fixture and build-output layout
    #[serde(default)]
    pub layout: LayoutConfig,

    /// Test case name -> produced executable; replaces the built-in suite
    #[serde(default)]
    pub suite: Option<BTreeMap<String, String>>,
}

/// External tool settings
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ToolsConfig {
    /// The build generator under test
    #[serde(default = "default_subject")]
    pub subject: PathBuf,

    /// Graph renderer
    #[serde(default = "default_visualizer")]
    pub visualizer: PathBuf,

    /// Build executor consuming the generated build files
    #[serde(default = "default_executor")]
    pub executor: PathBuf,
}

impl Default for ToolsConfig {
    fn default() -> Self {
        Self {
            subject: default_subject(),
            visualizer: default_visualizer(),
            executor: default_executor(),
        }
    }
}

fn default_subject() -> PathBuf {
    PathBuf::from("bin").join("c++modules")
}
fn default_visualizer() -> PathBuf {
    PathBuf::from("dot")
}
fn default_executor() -> PathBuf {
    PathBuf::from("ninja")
}

/// Directory and file naming settings
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LayoutConfig {
    /// Directory holding one fixture directory per test case
    #[serde(default = "default_fixtures")]
    pub fixtures: PathBuf,

    /// Build-output directory the subject tool creates inside a fixture
    #[serde(default = "default_build_dir")]
    pub build_dir: PathBuf,

    /// Dependency graph written by the subject tool
    #[serde(default = "default_graph_file")]
    pub graph_file: String,

    /// Image rendered from the dependency graph
    #[serde(default = "default_image_file")]
    pub image_file: String,

    /// Renderer output format, passed as `-T<format>`
    #[serde(default = "default_image_format")]
    pub image_format: String,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            fixtures: default_fixtures(),
            build_dir: default_build_dir(),
            graph_file: default_graph_file(),
            image_file: default_image_file(),
            image_format: default_image_format(),
        }
    }
}

fn default_fixtures() -> PathBuf {
    PathBuf::from("tests")
}
fn default_build_dir() -> PathBuf {
    PathBuf::from("build")
}
fn default_graph_file() -> String {
    "dependencies.dot".to_string()
}
fn default_image_file() -> String {
    "dependencies.png".to_string()
}
fn default_image_format() -> String {
    "png".to_string()
}

impl Config {
    /// Load configuration
    ///
    /// An explicit path must exist. Without one, the default config file is
    /// read if present, otherwise defaults are returned.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        match explicit {
            Some(path) => Self::from_file(path),
            None => match config_path() {
                Some(path) if path.exists() => Self::from_file(&path),
                _ => Ok(Self::default()),
            },
        }
    }

    /// Parse a configuration file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| super::Error::FileRead {
            path: path.display().to_string(),
            error: e.to_string(),
        })?;
        Self::parse(&content)
    }

    /// Parse configuration from TOML text
    pub fn parse(content: &str) -> Result<Self> {
        let config: Self =
            toml::from_str(content).map_err(|e| super::Error::ConfigParse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.layout.build_dir.as_os_str().is_empty() {
            return Err(super::Error::Config("layout.build_dir must not be empty".to_string()));
        }
        if let Some(suite) = &self.suite {
            if suite.is_empty() {
                return Err(super::Error::Config("[suite] must list at least one test case".to_string()));
            }
            if let Some((name, _)) = suite.iter().find(|(_, artifact)| artifact.is_empty()) {
                return Err(super::Error::Config(format!(
                    "Test case '{}' has an empty artifact name",
                    name
                )));
            }
        }
        Ok(())
    }
}
