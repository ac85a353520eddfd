// src/core/namespace_mutator.rs

//! Structural changes to a formula namespace: delete, rename and the pruning
//! of ancestors left empty by either.
//!
//! A change is applied to the user's workspace first and then, when the same
//! formula exists there too, to the workspace's local mirror under
//! `<RIT_HOME>/repos`. Only the mirror's `tree.json` is regenerated.

use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::constants::{BIN_DIR, SRC_DIR};
use crate::core::directory::{DirLister, DirResult, DirectoryError, FileManager};
use crate::core::tree_generator::{self, TreeError, TreeGenerator};
use crate::models::{FormulaTarget, RenameTarget, command_line, has_nested_content, segments_path};

/// Errors raised while deleting or renaming formulas.
#[derive(Error, Debug)]
pub enum MutationError {
    /// The formula to rename isn't present in this workspace.
    #[error("This formula '{formula}' doesn't exist on this workspace = '{workspace}'")]
    FormulaLookup { formula: String, workspace: String },
    /// The new command path is already taken.
    #[error("The formula '{formula}' already exists on this workspace = '{workspace}'")]
    FormulaAlreadyExists { formula: String, workspace: String },
    /// The new command path lies below the old one.
    #[error("Cannot move '{old}' into itself ('{new}')")]
    MoveIntoItself { old: String, new: String },
    /// A filesystem operation failed; nothing after it ran.
    #[error(transparent)]
    Directory(#[from] DirectoryError),
    /// Regenerating `tree.json` failed.
    #[error(transparent)]
    Tree(#[from] TreeError),
}

/// Result of every mutation.
pub type MutationResult<T> = Result<T, MutationError>;

/// What a completed mutation touched besides the user's workspace.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MutationOutcome {
    /// The regenerated `tree.json` of the local mirror, if the mirror changed.
    pub mirror_tree: Option<PathBuf>,
}

/// Applies deletes and renames to one or more copies of a namespace.
pub struct NamespaceMutator<'a> {
    directory: &'a dyn DirLister,
    files: &'a dyn FileManager,
    tree: &'a dyn TreeGenerator,
}

impl<'a> NamespaceMutator<'a> {
    /// Creates a mutator over the given filesystem boundary and tree generator.
    pub fn new(
        directory: &'a dyn DirLister,
        files: &'a dyn FileManager,
        tree: &'a dyn TreeGenerator,
    ) -> Self {
        Self {
            directory,
            files,
            tree,
        }
    }

    // --- DELETE ---

    /// Deletes the formula of `target` from the workspace and from its local mirror.
    ///
    /// An empty target is a no-op: the user declined to select anything.
    pub fn delete_formula(
        &self,
        target: &FormulaTarget,
        repos_dir: &Path,
    ) -> MutationResult<MutationOutcome> {
        if target.is_empty() {
            log::debug!("No formula selected. Nothing to delete.");
            return Ok(MutationOutcome::default());
        }

        self.delete(&target.workspace.dir, &target.segments)?;

        let mirror = target.workspace.mirror_dir(repos_dir);
        if !self.formula_exists_in_workspace(&mirror, &target.segments) {
            log::debug!(
                "'{}' is not mirrored in '{}'",
                target.command(),
                mirror.display()
            );
            return Ok(MutationOutcome::default());
        }

        self.delete(&mirror, &target.segments)?;
        let tree = self.recreate_tree_json(&mirror)?;

        log::info!(
            "Deleted '{}' from '{}' and its mirror",
            target.command(),
            target.workspace.name
        );
        Ok(MutationOutcome {
            mirror_tree: Some(tree),
        })
    }

    /// Deletes the formula at `segments` below `root`, then prunes every ancestor
    /// left without subdirectories. `root` itself is never removed.
    pub fn delete(&self, root: &Path, segments: &[String]) -> MutationResult<()> {
        if segments.is_empty() {
            return Ok(());
        }

        let leaf = segments_path(root, segments);
        if self.is_nested(&leaf)? {
            log::debug!("'{}' holds nested formulas. Removing its own files only.", leaf.display());
            self.safe_remove(&leaf)?;
        } else {
            self.files.remove_all(&leaf)?;
        }

        self.prune_empty_ancestors(root, segments)?;
        Ok(())
    }

    /// Removes `src`, `bin` and the plain files of a formula, keeping every
    /// other subdirectory.
    fn safe_remove(&self, dir: &Path) -> DirResult<()> {
        for name in self.directory.list(dir, true)? {
            if name == SRC_DIR || name == BIN_DIR {
                self.files.remove_all(&dir.join(name))?;
            }
        }
        for name in self.directory.list_files(dir)? {
            self.files.remove(&dir.join(name))?;
        }
        Ok(())
    }

    /// Walks from the leaf's parent up to depth 1, removing directories left
    /// without subdirectories.
    fn prune_empty_ancestors(&self, root: &Path, segments: &[String]) -> DirResult<()> {
        let leaf = segments_path(root, segments);
        let depth = segments.len();

        for dir in leaf.ancestors().skip(1).take(depth.saturating_sub(1)) {
            if !self.can_delete(dir)? {
                // Its ancestors contain it, so none of them can be empty either.
                break;
            }
            log::debug!("Pruning empty group '{}'", dir.display());
            self.files.remove_all(dir)?;
        }
        Ok(())
    }

    /// True iff `dir` has no subdirectories. Plain files don't count.
    pub fn can_delete(&self, dir: &Path) -> DirResult<bool> {
        Ok(self.directory.list(dir, true)?.is_empty())
    }

    /// True if `dir` contains a subdirectory other than `src` or `bin`.
    pub fn is_nested(&self, dir: &Path) -> DirResult<bool> {
        Ok(has_nested_content(&self.directory.list(dir, true)?))
    }

    /// True if the directory of `segments` exists below `root`.
    pub fn formula_exists_in_workspace(&self, root: &Path, segments: &[String]) -> bool {
        self.directory.exists(&segments_path(root, segments))
    }

    // --- RENAME ---

    /// Moves a formula to a new command path in the workspace and its mirror.
    ///
    /// Both copies are validated before anything is written.
    pub fn rename_formula(
        &self,
        target: &RenameTarget,
        repos_dir: &Path,
    ) -> MutationResult<MutationOutcome> {
        let workspace = &target.workspace;
        let (old, new) = (&target.old_segments, &target.new_segments);

        if new.starts_with(old) {
            return Err(MutationError::MoveIntoItself {
                old: command_line(old),
                new: command_line(new),
            });
        }

        self.check_movable(&workspace.dir, &workspace.name, old, new)?;

        let mirror = workspace.mirror_dir(repos_dir);
        let mirrored = self.formula_exists_in_workspace(&mirror, old);
        if mirrored {
            self.check_movable(&mirror, &workspace.local_name(), old, new)?;
        }

        self.rename(&workspace.dir, old, new)?;
        if !mirrored {
            log::info!(
                "Renamed '{}' to '{}' in '{}'",
                command_line(old),
                command_line(new),
                workspace.name
            );
            return Ok(MutationOutcome::default());
        }

        self.rename(&mirror, old, new)?;
        let tree = self.recreate_tree_json(&mirror)?;
        log::info!(
            "Renamed '{}' to '{}' in '{}' and its mirror",
            command_line(old),
            command_line(new),
            workspace.name
        );
        Ok(MutationOutcome {
            mirror_tree: Some(tree),
        })
    }

    /// Moves the formula at `old` to `new` below `root` and prunes `old`'s
    /// emptied ancestors.
    ///
    /// A nested formula only gives up its own `src`, `bin` and plain files:
    /// the formulas below it keep their command paths, as they do on delete.
    pub fn rename(&self, root: &Path, old: &[String], new: &[String]) -> MutationResult<()> {
        let from = segments_path(root, old);
        let to = segments_path(root, new);

        if self.is_nested(&from)? {
            log::debug!("'{}' holds nested formulas. Moving its own files only.", from.display());
            self.move_own_content(&from, &to)?;
        } else {
            if let Some(parent) = to.parent() {
                self.files.create_dir_all(parent)?;
            }
            self.files.rename(&from, &to)?;
        }

        self.prune_empty_ancestors(root, old)?;
        Ok(())
    }

    /// Moves what `safe_remove` would delete from `from` into a new `to`.
    fn move_own_content(&self, from: &Path, to: &Path) -> DirResult<()> {
        self.files.create_dir_all(to)?;
        let own_dirs = self
            .directory
            .list(from, true)?
            .into_iter()
            .filter(|name| name == SRC_DIR || name == BIN_DIR);
        for name in own_dirs.chain(self.directory.list_files(from)?) {
            self.files.rename(&from.join(&name), &to.join(&name))?;
        }
        Ok(())
    }

    fn check_movable(
        &self,
        root: &Path,
        workspace_name: &str,
        old: &[String],
        new: &[String],
    ) -> MutationResult<()> {
        if !self.formula_exists_in_workspace(root, old) {
            return Err(MutationError::FormulaLookup {
                formula: command_line(old),
                workspace: workspace_name.to_string(),
            });
        }
        if self.formula_exists_in_workspace(root, new) {
            return Err(MutationError::FormulaAlreadyExists {
                formula: command_line(new),
                workspace: workspace_name.to_string(),
            });
        }
        Ok(())
    }

    // --- COMMAND TREE ---

    /// Regenerates `tree.json` at `root` from its current shape.
    pub fn recreate_tree_json(&self, root: &Path) -> MutationResult<PathBuf> {
        Ok(tree_generator::write_tree_json(self.tree, self.files, root)?)
    }
}
