//! Configuration paths and path resolution helpers

use std::path::{Path, PathBuf};

/// Name used for the configuration directory
const APP_NAME: &str = "cxxmodules-e2e";

/// Get the configuration directory path
///
/// Uses the directories crate for platform-appropriate locations:
/// - Linux: `~/.config/cxxmodules-e2e/`
/// - macOS: `~/Library/Application Support/cxxmodules-e2e/`
/// - Windows: `%APPDATA%\cxxmodules-e2e\`
pub fn config_dir() -> Option<PathBuf> {
    directories::ProjectDirs::from("", "", APP_NAME).map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the configuration file
pub fn config_path() -> Option<PathBuf> {
    config_dir().map(|dir| dir.join("config.toml"))
}

/// Replace a leading `~` component with the user's home directory
///
/// Paths without the shorthand, and `~user` forms, are returned unchanged.
pub fn expand_home(path: &Path) -> PathBuf {
    let mut components = path.components();
    match components.next() {
        Some(first) if first.as_os_str() == "~" => match home_dir() {
            Some(home) => home.join(components.as_path()),
            None => path.to_path_buf(),
        },
        _ => path.to_path_buf(),
    }
}

fn home_dir() -> Option<PathBuf> {
    directories::BaseDirs::new().map(|dirs| dirs.home_dir().to_path_buf())
}

/// Resolve `path` against `base` after home expansion
///
/// Used once at startup so later directory changes cannot alter what a
/// configured relative path refers to.
pub fn absolutize(path: &Path, base: &Path) -> PathBuf {
    let expanded = expand_home(path);
    if expanded.is_absolute() {
        expanded
    } else {
        base.join(expanded)
    }
}

/// Whether a tool path should be looked up on PATH rather than resolved
/// against the invocation directory
pub fn is_bare_name(path: &Path) -> bool {
    path.components().count() == 1 && !path.is_absolute() && path.as_os_str() != "~"
}
