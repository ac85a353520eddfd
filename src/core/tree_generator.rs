// src/core/tree_generator.rs

use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::{DirEntry, WalkDir};

use crate::constants::{
    BIN_DIR, DOCS_DIR, HELP_FILENAME, SRC_DIR, TREE_FILENAME, TREE_ROOT_ID, TREE_VERSION,
};
use crate::core::directory::{DirectoryError, FileManager};
use crate::models::{CommandHelp, CommandTree, FormulaKind, TreeCommand};

/// Errors raised while building or saving a command tree.
#[derive(Error, Debug)]
pub enum TreeError {
    /// The workspace walk failed.
    #[error("Could not walk workspace '{}': {source}", root.display())]
    Walk {
        root: PathBuf,
        #[source]
        source: walkdir::Error,
    },
    /// The tree couldn't be encoded.
    #[error("Failed to serialize the command tree: {0}")]
    Serialize(#[from] serde_json::Error),
    /// Listing a directory or writing `tree.json` failed.
    #[error(transparent)]
    Directory(#[from] DirectoryError),
}

/// Result of tree generation and saving.
pub type TreeResult<T> = Result<T, TreeError>;

/// Builds the command tree of a workspace.
pub trait TreeGenerator {
    /// Walks `root` and describes every command below it.
    fn generate(&self, root: &Path) -> TreeResult<CommandTree>;
}

/// Builds the command tree by walking the workspace directories.
#[derive(Debug, Default, Clone, Copy)]
pub struct FsTreeGenerator;

impl TreeGenerator for FsTreeGenerator {
    fn generate(&self, root: &Path) -> TreeResult<CommandTree> {
        let mut tree = CommandTree {
            version: TREE_VERSION.to_string(),
            ..Default::default()
        };

        let walker = WalkDir::new(root)
            .min_depth(1)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(is_command_dir);

        for entry in walker {
            let entry = entry.map_err(|source| TreeError::Walk {
                root: root.to_path_buf(),
                source,
            })?;

            let Ok(relative) = entry.path().strip_prefix(root) else {
                continue;
            };
            let segments: Vec<String> = relative
                .components()
                .map(|c| c.as_os_str().to_string_lossy().into_owned())
                .collect();

            let kind = FormulaKind::classify(&subdirectories(entry.path())?);
            let help = read_help(entry.path());
            let (parent_segments, usage) = match segments.split_last() {
                Some((usage, parents)) => (parents, usage.clone()),
                None => continue,
            };

            let id = command_id(&segments);
            tree.commands.insert(
                id.clone(),
                TreeCommand {
                    id,
                    parent: command_id(parent_segments),
                    usage,
                    help: help.short,
                    long_help: help.long,
                    formula: kind.is_formula(),
                },
            );
        }

        log::debug!(
            "Generated command tree for '{}' with {} commands",
            root.display(),
            tree.commands.len()
        );
        Ok(tree)
    }
}

/// The id of a command: `root` followed by its words, joined with `_`.
pub fn command_id(segments: &[String]) -> String {
    let mut parts = vec![TREE_ROOT_ID];
    parts.extend(segments.iter().map(String::as_str));
    parts.join("_")
}

/// Serializes `tree` tab-indented, with a trailing newline.
pub fn to_json(tree: &CommandTree) -> TreeResult<Vec<u8>> {
    let mut bytes = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"\t");
    let mut serializer = serde_json::Serializer::with_formatter(&mut bytes, formatter);
    tree.serialize(&mut serializer)?;
    bytes.push(b'\n');
    Ok(bytes)
}

/// Regenerates `tree.json` at `root` from scratch, replacing any previous version.
pub fn write_tree_json(
    generator: &dyn TreeGenerator,
    files: &dyn FileManager,
    root: &Path,
) -> TreeResult<PathBuf> {
    let tree = generator.generate(root)?;
    save_tree(files, root, &tree)
}

/// Writes an already generated `tree` as `root/tree.json`.
pub fn save_tree(files: &dyn FileManager, root: &Path, tree: &CommandTree) -> TreeResult<PathBuf> {
    let path = root.join(TREE_FILENAME);
    files.write(&path, &to_json(tree)?)?;
    log::info!("Wrote command tree to '{}'", path.display());
    Ok(path)
}

fn is_command_dir(entry: &DirEntry) -> bool {
    if entry.depth() == 0 {
        return true;
    }
    let name = entry.file_name().to_string_lossy();
    entry.file_type().is_dir()
        && !name.starts_with('.')
        && name != SRC_DIR
        && name != BIN_DIR
        && name != DOCS_DIR
}

fn subdirectories(dir: &Path) -> TreeResult<Vec<String>> {
    let list_err = |source| DirectoryError::List {
        path: dir.to_path_buf(),
        source,
    };

    let mut names = Vec::new();
    for entry in fs::read_dir(dir).map_err(list_err)? {
        let entry = entry.map_err(list_err)?;
        if entry.file_type().map_err(list_err)?.is_dir() {
            names.push(entry.file_name().to_string_lossy().into_owned());
        }
    }
    Ok(names)
}

fn read_help(dir: &Path) -> CommandHelp {
    let path = dir.join(HELP_FILENAME);
    let Ok(content) = fs::read_to_string(&path) else {
        return CommandHelp::default();
    };
    serde_json::from_str(&content).unwrap_or_else(|e| {
        log::warn!("Ignoring malformed help file '{}': {}", path.display(), e);
        CommandHelp::default()
    })
}
