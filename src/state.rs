// src/state.rs

use std::io::Read;
use std::path::PathBuf;

use crate::core::{
    directory::{DirLister, FileManager, LocalFs},
    input_strategy::InputResolver,
    namespace_mutator::NamespaceMutator,
    paths::{self, PathError},
    prompt::{DialoguerPrompt, Prompt},
    tree_generator::{FsTreeGenerator, TreeGenerator},
    workspace_registry::{FileWorkspaceRegistry, WorkspaceRegistry},
};

/// Everything a command handler talks to, injected once at startup.
///
/// Handlers never reach for process-wide state: tests build a context from
/// doubles and temporary directories.
pub struct AppContext {
    /// Known workspaces.
    pub registry: Box<dyn WorkspaceRegistry>,
    /// Read access to namespaces.
    pub directory: Box<dyn DirLister>,
    /// Write access to namespaces.
    pub files: Box<dyn FileManager>,
    /// Interactive questions.
    pub prompt: Box<dyn Prompt>,
    /// Builds `tree.json` contents.
    pub tree: Box<dyn TreeGenerator>,
    /// `<RIT_HOME>/repos`, where local mirrors of workspaces live.
    pub repos_dir: PathBuf,
    /// Source of batch payloads (stdin in the binary).
    pub input: Box<dyn Read>,
}

impl AppContext {
    /// The context used by the `rit` binary: local filesystem, terminal prompts
    /// and the registry under `RIT_HOME`.
    pub fn from_environment() -> Result<Self, PathError> {
        let registry =
            FileWorkspaceRegistry::new(paths::get_workspaces_file_path()?, paths::default_workspace()?);
        Ok(Self {
            registry: Box::new(registry),
            directory: Box::new(LocalFs),
            files: Box::new(LocalFs),
            prompt: Box::new(DialoguerPrompt),
            tree: Box::new(FsTreeGenerator),
            repos_dir: paths::get_repos_dir()?,
            input: Box::new(std::io::stdin()),
        })
    }

    /// Splits the context into an input resolver and the batch input stream.
    pub fn resolver_and_input(&mut self) -> (InputResolver<'_>, &mut dyn Read) {
        let resolver = InputResolver::new(
            self.registry.as_ref(),
            self.directory.as_ref(),
            self.prompt.as_ref(),
        );
        (resolver, self.input.as_mut())
    }

    /// A mutator over this context's filesystem boundary.
    pub fn mutator(&self) -> NamespaceMutator<'_> {
        NamespaceMutator::new(
            self.directory.as_ref(),
            self.files.as_ref(),
            self.tree.as_ref(),
        )
    }
}
