// src/test_support.rs

//! Scripted doubles shared by the unit tests.

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::fs;
use std::path::{Path, PathBuf};

use crate::constants::SRC_DIR;
use crate::core::directory::{DirResult, DirectoryError, FileManager, LocalFs};
use crate::core::prompt::{Prompt, PromptError, PromptResult, TextValidator, parse_bool_option};
use crate::core::tree_generator::{FsTreeGenerator, TreeGenerator, TreeResult};
use crate::core::workspace_registry::{RegistryError, WorkspaceRegistry};
use crate::models::{CommandTree, Workspace, Workspaces};

/// Creates a formula (`<segments>/src/main.sh`) below `root`.
pub(crate) fn formula_at(root: &Path, segments: &[&str]) -> PathBuf {
    let dir = segments.iter().fold(root.to_path_buf(), |p, s| p.join(s));
    fs::create_dir_all(dir.join(SRC_DIR)).unwrap();
    fs::write(dir.join(SRC_DIR).join("main.sh"), "echo hello\n").unwrap();
    dir
}

/// Replays queued answers in order. Running out of answers behaves like Ctrl+C.
#[derive(Debug, Default)]
pub(crate) struct ScriptedPrompt {
    answers: RefCell<VecDeque<String>>,
    questions: RefCell<Vec<(String, Vec<String>)>>,
}

impl ScriptedPrompt {
    pub(crate) fn new(answers: &[&str]) -> Self {
        Self {
            answers: RefCell::new(answers.iter().map(|a| a.to_string()).collect()),
            questions: RefCell::default(),
        }
    }

    /// Options offered by the `index`-th question.
    pub(crate) fn offered(&self, index: usize) -> Vec<String> {
        self.questions
            .borrow()
            .get(index)
            .map(|(_, options)| options.clone())
            .unwrap_or_default()
    }

    pub(crate) fn asked(&self) -> usize {
        self.questions.borrow().len()
    }

    fn answer(&self, question: &str, options: Vec<String>) -> PromptResult<String> {
        self.questions
            .borrow_mut()
            .push((question.to_string(), options));
        self.answers
            .borrow_mut()
            .pop_front()
            .ok_or(PromptError::Cancelled)
    }
}

impl Prompt for ScriptedPrompt {
    fn choice(&self, question: &str, options: &[String]) -> PromptResult<String> {
        self.answer(question, options.to_vec())
    }

    fn yes_no(&self, question: &str, options: &[&str; 2]) -> PromptResult<bool> {
        let options = options.iter().map(|o| o.to_string()).collect();
        self.answer(question, options)
            .map(|answer| parse_bool_option(&answer))
    }

    fn text(
        &self,
        question: &str,
        validator: TextValidator<'_>,
        _help: &str,
    ) -> PromptResult<String> {
        let answer = self.answer(question, Vec::new())?;
        validator(&answer).map_err(|_| PromptError::Cancelled)?;
        Ok(answer)
    }
}

/// A registry kept in memory; `Default` is not implied.
#[derive(Debug, Default)]
pub(crate) struct MemoryRegistry {
    workspaces: RefCell<Workspaces>,
}

impl MemoryRegistry {
    pub(crate) fn with(entries: &[(&str, &str)]) -> Self {
        Self {
            workspaces: RefCell::new(
                entries
                    .iter()
                    .map(|(name, dir)| (name.to_string(), PathBuf::from(dir)))
                    .collect(),
            ),
        }
    }
}

impl WorkspaceRegistry for MemoryRegistry {
    fn list(&self) -> Result<Workspaces, RegistryError> {
        Ok(self.workspaces.borrow().clone())
    }

    fn add(&self, workspace: &Workspace) -> Result<(), RegistryError> {
        let mut workspaces = self.workspaces.borrow_mut();
        workspaces.retain(|name, _| !name.eq_ignore_ascii_case(&workspace.name));
        workspaces.insert(workspace.name.clone(), workspace.dir.clone());
        Ok(())
    }
}

/// Delegates to the local filesystem and records every single-file removal.
#[derive(Debug, Default)]
pub(crate) struct RecordingFileManager {
    removed: RefCell<Vec<PathBuf>>,
}

impl RecordingFileManager {
    pub(crate) fn removed(&self) -> Vec<PathBuf> {
        self.removed.borrow().clone()
    }
}

impl FileManager for RecordingFileManager {
    fn remove(&self, path: &Path) -> DirResult<()> {
        self.removed.borrow_mut().push(path.to_path_buf());
        LocalFs.remove(path)
    }

    fn remove_all(&self, dir: &Path) -> DirResult<()> {
        LocalFs.remove_all(dir)
    }

    fn write(&self, path: &Path, bytes: &[u8]) -> DirResult<()> {
        LocalFs.write(path, bytes)
    }

    fn create_dir_all(&self, dir: &Path) -> DirResult<()> {
        LocalFs.create_dir_all(dir)
    }

    fn rename(&self, from: &Path, to: &Path) -> DirResult<()> {
        LocalFs.rename(from, to)
    }
}

/// Delegates to the local filesystem but fails `remove_all` on one chosen
/// directory and, optionally, every `write`.
#[derive(Debug, Default)]
pub(crate) struct FailingFileManager {
    fail_remove_all: Option<PathBuf>,
    fail_write: bool,
}

impl FailingFileManager {
    pub(crate) fn failing_remove_all(dir: &Path) -> Self {
        Self {
            fail_remove_all: Some(dir.to_path_buf()),
            fail_write: false,
        }
    }

    pub(crate) fn failing_write() -> Self {
        Self {
            fail_remove_all: None,
            fail_write: true,
        }
    }

    fn injected() -> std::io::Error {
        std::io::Error::new(std::io::ErrorKind::PermissionDenied, "injected failure")
    }
}

impl FileManager for FailingFileManager {
    fn remove(&self, path: &Path) -> DirResult<()> {
        LocalFs.remove(path)
    }

    fn remove_all(&self, dir: &Path) -> DirResult<()> {
        if self.fail_remove_all.as_deref() == Some(dir) {
            return Err(DirectoryError::Remove {
                path: dir.to_path_buf(),
                source: Self::injected(),
            });
        }
        LocalFs.remove_all(dir)
    }

    fn write(&self, path: &Path, bytes: &[u8]) -> DirResult<()> {
        if self.fail_write {
            return Err(DirectoryError::Write {
                path: path.to_path_buf(),
                source: Self::injected(),
            });
        }
        LocalFs.write(path, bytes)
    }

    fn create_dir_all(&self, dir: &Path) -> DirResult<()> {
        LocalFs.create_dir_all(dir)
    }

    fn rename(&self, from: &Path, to: &Path) -> DirResult<()> {
        LocalFs.rename(from, to)
    }
}

/// Walks the real filesystem and counts how often a tree was generated.
#[derive(Debug, Default)]
pub(crate) struct CountingTreeGenerator {
    calls: Cell<usize>,
    roots: RefCell<Vec<PathBuf>>,
}

impl CountingTreeGenerator {
    pub(crate) fn calls(&self) -> usize {
        self.calls.get()
    }

    pub(crate) fn roots(&self) -> Vec<PathBuf> {
        self.roots.borrow().clone()
    }
}

impl TreeGenerator for CountingTreeGenerator {
    fn generate(&self, root: &Path) -> TreeResult<CommandTree> {
        self.calls.set(self.calls.get() + 1);
        self.roots.borrow_mut().push(root.to_path_buf());
        FsTreeGenerator.generate(root)
    }
}
