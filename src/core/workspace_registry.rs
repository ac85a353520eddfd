// src/core/workspace_registry.rs

use crate::constants::DEFAULT_WORKSPACE_NAME;
use crate::models::{Workspace, Workspaces};

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Represents errors that can occur while reading or updating the workspace registry.
#[derive(Error, Debug)]
pub enum RegistryError {
    /// A filesystem I/O error occurred.
    #[error("Filesystem Error on '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// The registry file exists but is not a valid JSON object of names to paths.
    #[error("Workspace registry '{}' is malformed: {source}", path.display())]
    Malformed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    /// The registry couldn't be encoded.
    #[error("Failed to serialize the workspace registry: {0}")]
    Serialize(#[from] serde_json::Error),
    /// A workspace was added whose directory does not exist.
    #[error("The workspace directory '{}' does not exist.", dir.display())]
    InvalidWorkspace { dir: PathBuf },
    /// A workspace was added without a name.
    #[error("A workspace name cannot be empty.")]
    EmptyName,
}

type RegistryResult<T> = Result<T, RegistryError>;

/// The set of known workspaces, injected into every resolver that needs it.
pub trait WorkspaceRegistry {
    /// All workspaces by name, the default workspace included.
    fn list(&self) -> RegistryResult<Workspaces>;

    /// Registers `workspace`, replacing any entry whose name matches case-insensitively.
    fn add(&self, workspace: &Workspace) -> RegistryResult<()>;
}

/// Finds a workspace by name, ignoring case.
pub fn find_by_name(workspaces: &Workspaces, name: &str) -> Option<Workspace> {
    workspaces
        .iter()
        .find(|(ws_name, _)| ws_name.eq_ignore_ascii_case(name))
        .map(|(ws_name, dir)| Workspace::new(ws_name.clone(), dir.clone()))
}

/// Finds a workspace by its root path, compared as text and ignoring case.
pub fn find_by_path(workspaces: &Workspaces, path: &str) -> Option<Workspace> {
    let wanted = path.trim().trim_end_matches(['/', '\\']);
    workspaces
        .iter()
        .find(|(_, dir)| {
            dir.to_string_lossy()
                .trim_end_matches(['/', '\\'])
                .eq_ignore_ascii_case(wanted)
        })
        .map(|(ws_name, dir)| Workspace::new(ws_name.clone(), dir.clone()))
}

/// A registry persisted as a JSON object (`{"Name": "/path"}`).
#[derive(Debug, Clone)]
pub struct FileWorkspaceRegistry {
    file: PathBuf,
    default_workspace: Workspace,
}

impl FileWorkspaceRegistry {
    /// Creates a registry stored in `file`, always listing `default_workspace`.
    pub fn new(file: PathBuf, default_workspace: Workspace) -> Self {
        Self {
            file,
            default_workspace,
        }
    }

    /// The JSON file backing this registry.
    pub fn file(&self) -> &Path {
        &self.file
    }

    fn load(&self) -> RegistryResult<Workspaces> {
        let content = match fs::read_to_string(&self.file) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                log::debug!(
                    "Workspace registry '{}' not found. Starting empty.",
                    self.file.display()
                );
                return Ok(Workspaces::new());
            }
            Err(source) => {
                return Err(RegistryError::Io {
                    path: self.file.clone(),
                    source,
                });
            }
        };

        if content.trim().is_empty() {
            return Ok(Workspaces::new());
        }

        serde_json::from_str(&content).map_err(|source| RegistryError::Malformed {
            path: self.file.clone(),
            source,
        })
    }

    fn save(&self, workspaces: &Workspaces) -> RegistryResult<()> {
        if let Some(parent) = self.file.parent() {
            fs::create_dir_all(parent).map_err(|source| RegistryError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        let json = serde_json::to_string_pretty(workspaces)?;
        fs::write(&self.file, json).map_err(|source| RegistryError::Io {
            path: self.file.clone(),
            source,
        })
    }
}

impl WorkspaceRegistry for FileWorkspaceRegistry {
    fn list(&self) -> RegistryResult<Workspaces> {
        let mut workspaces = self.load()?;
        workspaces.insert(
            self.default_workspace.name.clone(),
            self.default_workspace.dir.clone(),
        );
        Ok(workspaces)
    }

    fn add(&self, workspace: &Workspace) -> RegistryResult<()> {
        let name = workspace.name.trim();
        if name.is_empty() {
            return Err(RegistryError::EmptyName);
        }
        if name.eq_ignore_ascii_case(DEFAULT_WORKSPACE_NAME) {
            log::debug!("Workspace '{}' is always registered. Skipping.", name);
            return Ok(());
        }
        if !workspace.dir.is_dir() {
            return Err(RegistryError::InvalidWorkspace {
                dir: workspace.dir.clone(),
            });
        }

        let dir = dunce::canonicalize(&workspace.dir).map_err(|source| RegistryError::Io {
            path: workspace.dir.clone(),
            source,
        })?;

        let mut workspaces = self.load()?;
        workspaces.retain(|existing, _| !existing.eq_ignore_ascii_case(name));
        workspaces.insert(name.to_string(), dir.clone());
        self.save(&workspaces)?;

        log::info!("Registered workspace '{}' at '{}'", name, dir.display());
        Ok(())
    }
}
