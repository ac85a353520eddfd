// src/core/paths.rs

use crate::constants::{
    DEFAULT_WORKSPACE_DIRNAME, DEFAULT_WORKSPACE_NAME, REPOS_DIRNAME, RIT_HOME_DIRNAME,
    RIT_HOME_ENV, WORKSPACES_FILENAME,
};
use crate::models::Workspace;
use lazy_static::lazy_static;
use std::fs;
use std::path::PathBuf;
use std::sync::Mutex;
use thiserror::Error;

lazy_static! {
    static ref RIT_HOME_DIR: Mutex<Option<PathBuf>> = Mutex::new(None);
}

/// Errors raised while locating rit's own directories.
#[derive(Error, Debug)]
pub enum PathError {
    /// Neither `RIT_HOME` nor a home directory is available.
    #[error("Could not find the user's home directory.")]
    HomeDirNotFound,
    /// A rit directory couldn't be created.
    #[error("Could not create directory at '{path}': {source}")]
    DirCreation {
        path: String,
        #[source]
        source: std::io::Error,
    },
    /// A `~` or `$VAR` in a user path couldn't be expanded.
    #[error("Failed to expand path '{path}': {reason}")]
    Expansion { path: String, reason: String },
}

/// Returns the user's home directory.
pub fn get_user_home_dir() -> Result<PathBuf, PathError> {
    dirs::home_dir().ok_or(PathError::HomeDirNotFound)
}

/// Returns the tool's home directory (`$RIT_HOME`, or `~/.rit`).
/// Creates it if it doesn't exist.
///
/// Memoized: the first call resolves and creates the directory, later calls
/// return the cached value.
pub fn get_rit_home_dir() -> Result<PathBuf, PathError> {
    // A poisoned lock only means another thread panicked mid-lookup; the cached
    // value (if any) is still a plain PathBuf.
    let mut cached = RIT_HOME_DIR
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner());

    if let Some(path) = &*cached {
        return Ok(path.clone());
    }

    let home = match std::env::var(RIT_HOME_ENV) {
        Ok(value) if !value.trim().is_empty() => expand_user_path(&value)?,
        _ => get_user_home_dir()?.join(RIT_HOME_DIRNAME),
    };

    if !home.exists() {
        fs::create_dir_all(&home).map_err(|e| PathError::DirCreation {
            path: home.display().to_string(),
            source: e,
        })?;
    }

    log::debug!("Using rit home directory: {}", home.display());
    *cached = Some(home.clone());
    Ok(home)
}

/// Returns the path to the workspace registry file.
pub fn get_workspaces_file_path() -> Result<PathBuf, PathError> {
    get_rit_home_dir().map(|dir| dir.join(WORKSPACES_FILENAME))
}

/// Returns the directory holding local mirrors of synchronized workspaces.
pub fn get_repos_dir() -> Result<PathBuf, PathError> {
    get_rit_home_dir().map(|dir| dir.join(REPOS_DIRNAME))
}

/// Returns the workspace that is always available, rooted in the user's home.
pub fn default_workspace() -> Result<Workspace, PathError> {
    Ok(Workspace::new(
        DEFAULT_WORKSPACE_NAME,
        get_user_home_dir()?.join(DEFAULT_WORKSPACE_DIRNAME),
    ))
}

/// Expands `~` and environment variables (`$VAR`, `${VAR}`) in a user-supplied path.
pub fn expand_user_path(raw: &str) -> Result<PathBuf, PathError> {
    let expanded = shellexpand::full(raw.trim()).map_err(|e| PathError::Expansion {
        path: raw.to_string(),
        reason: e.to_string(),
    })?;
    Ok(PathBuf::from(expanded.into_owned()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expand_user_path_plain() {
        assert_eq!(
            expand_user_path("  /tmp/workspace ").unwrap(),
            PathBuf::from("/tmp/workspace")
        );
    }

    #[test]
    fn test_expand_user_path_home() {
        let home = dirs::home_dir().unwrap();
        assert_eq!(expand_user_path("~/formulas").unwrap(), home.join("formulas"));
    }

    #[test]
    fn test_expand_user_path_unknown_var_fails() {
        let result = expand_user_path("$RIT_SURELY_UNDEFINED_VARIABLE_123/x");
        assert!(matches!(result, Err(PathError::Expansion { .. })));
    }
}
