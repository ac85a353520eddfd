// src/models.rs

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};

use crate::constants::{BIN_DIR, LOCAL_REPO_PREFIX, SRC_DIR};

// --- WORKSPACES ---

/// A named root directory containing a formula namespace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Workspace {
    /// Registry name, e.g. `Default`.
    pub name: String,
    /// Root of the namespace.
    pub dir: PathBuf,
}

impl Workspace {
    /// Creates a workspace.
    pub fn new(name: impl Into<String>, dir: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            dir: dir.into(),
        }
    }

    /// The directory name of this workspace's local mirror inside `<RIT_HOME>/repos`.
    pub fn local_name(&self) -> String {
        format!("{}{}", LOCAL_REPO_PREFIX, self.name.to_lowercase())
    }

    /// The root of this workspace's local mirror.
    pub fn mirror_dir(&self, repos_dir: &Path) -> PathBuf {
        repos_dir.join(self.local_name())
    }
}

impl fmt::Display for Workspace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.dir.display())
    }
}

/// Registered workspaces by name. Sorted so prompts and listings are stable.
pub type Workspaces = BTreeMap<String, PathBuf>;

// --- FORMULA TARGETS ---

/// The outcome of input resolution: a workspace and the command words below its root.
///
/// An empty `segments` list means the user declined to select anything, which
/// callers treat as a no-op rather than an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormulaTarget {
    /// Where the formula lives.
    pub workspace: Workspace,
    /// Command words below the workspace root, without `rit`.
    pub segments: Vec<String>,
}

impl FormulaTarget {
    /// Creates a target.
    pub fn new(workspace: Workspace, segments: Vec<String>) -> Self {
        Self {
            workspace,
            segments,
        }
    }

    /// A target that selects nothing.
    pub fn declined(workspace: Workspace) -> Self {
        Self::new(workspace, Vec::new())
    }

    /// True if nothing was selected.
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// The full command as typed by a user (`rit test unit`).
    pub fn command(&self) -> String {
        command_line(&self.segments)
    }
}

/// A resolved rename request: both command paths live in the same workspace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenameTarget {
    /// Where both command paths live.
    pub workspace: Workspace,
    /// Current command words.
    pub old_segments: Vec<String>,
    /// Command words after the move.
    pub new_segments: Vec<String>,
}

/// Joins command words behind the `rit` sentinel.
pub fn command_line(segments: &[String]) -> String {
    let mut words = vec![crate::constants::CMD_USE.to_string()];
    words.extend(segments.iter().cloned());
    words.join(" ")
}

/// Joins `segments` below `root`, one directory level per word.
pub fn segments_path(root: &Path, segments: &[String]) -> PathBuf {
    segments
        .iter()
        .fold(root.to_path_buf(), |path, segment| path.join(segment))
}

// --- DIRECTORY CLASSIFICATION ---

/// What a namespace directory is, derived from the names of its subdirectories.
///
/// Always computed from the filesystem on demand; never cached across mutations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormulaKind {
    /// No `src`: an intermediate namespace node.
    Group,
    /// Has `src` and nothing else besides `bin`.
    Formula,
    /// Has `src` plus further command subdirectories.
    NestedFormula,
}

impl FormulaKind {
    /// Classifies a directory by the names of its subdirectories.
    pub fn classify(dirs: &[String]) -> Self {
        let has_src = dirs.iter().any(|d| d == SRC_DIR);
        match (has_src, has_nested_content(dirs)) {
            (false, _) => Self::Group,
            (true, false) => Self::Formula,
            (true, true) => Self::NestedFormula,
        }
    }

    /// True for both kinds of formula.
    pub fn is_formula(self) -> bool {
        !matches!(self, Self::Group)
    }
}

/// True if any subdirectory is something other than `src` or `bin`.
pub fn has_nested_content(dirs: &[String]) -> bool {
    dirs.iter().any(|d| d != SRC_DIR && d != BIN_DIR)
}

// --- BATCH PAYLOADS ---

/// Payload read from stdin by `rit delete formula --stdin`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct DeleteFormulaStdin {
    /// Root of a registered workspace.
    pub workspace_path: String,
    /// Full command, e.g. `rit test unit`.
    pub formula: String,
}

/// Payload read from stdin by `rit rename formula --stdin`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct RenameFormulaStdin {
    /// Root of a registered workspace.
    pub workspace_path: String,
    /// Current full command.
    pub old_formula: String,
    /// New full command.
    pub new_formula: String,
}

// --- COMMAND TREE ---

/// The derived command index consumed by autocomplete and dispatch.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Default)]
pub struct CommandTree {
    /// Format version of the document.
    pub version: String,
    /// Every command by id.
    pub commands: BTreeMap<String, TreeCommand>,
}

/// One node of the command tree: a group or a formula.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TreeCommand {
    /// `root` plus the command words, joined with `_`.
    pub id: String,
    /// Id of the enclosing group, `root` at the top.
    pub parent: String,
    /// The command word itself.
    pub usage: String,
    /// Short help from `help.json`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub help: Option<String>,
    /// Long help from `help.json`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub long_help: Option<String>,
    /// True if the directory holds `src`.
    pub formula: bool,
}

/// Contents of an optional `help.json` next to a command directory's content.
#[derive(Deserialize, Debug, Clone, Default)]
pub struct CommandHelp {
    /// One-line help.
    #[serde(default)]
    pub short: Option<String>,
    /// Extended help.
    #[serde(default)]
    pub long: Option<String>,
}
