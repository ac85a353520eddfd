// src/core/path_resolver.rs

//! Turns user choices or a typed command into the directory segments of a formula.

use lazy_static::lazy_static;
use regex::Regex;
use std::path::{Component, Path};
use thiserror::Error;

use crate::constants::{BIN_DIR, CMD_USE, DOCS_DIR, SRC_DIR};
use crate::core::{
    directory::{DirLister, DirectoryError},
    paths::PathError,
    prompt::{Prompt, PromptError},
    workspace_registry::{self, RegistryError, WorkspaceRegistry},
};
use crate::models::{FormulaTarget, Workspace};

lazy_static! {
    static ref COMMAND_WORD: Regex = Regex::new(r"^[a-z0-9][a-z0-9_-]*$").expect("valid regex");
}

/// Words that already belong to the tool and can't start a formula command.
pub const CORE_COMMANDS: &[&str] = &[
    "add",
    "build",
    "completion",
    "create",
    "delete",
    "help",
    "init",
    "list",
    "metrics",
    "rename",
    "set",
    "show",
    "tree",
    "update",
    "upgrade",
];

/// Errors raised while turning user input into a formula target.
#[derive(Error, Debug)]
pub enum ResolveError {
    /// Interactive resolution found nothing to select.
    #[error("could not find formula")]
    FormulaNotFound,
    /// The command doesn't start with `rit`, or one of its words isn't a plain directory name.
    #[error("formula name is incorrect: '{formula}' must start with 'rit' followed by plain words")]
    IncorrectFormulaName { formula: String },
    /// No registered workspace has this name or path.
    #[error("no workspace found with this name: '{name}'")]
    WorkspaceNotFound { name: String },
    /// The formula isn't present in the workspace.
    #[error("This formula '{formula}' doesn't exist on this workspace = '{workspace}'")]
    FormulaLookup { formula: String, workspace: String },
    /// A required flag was absent or blank.
    #[error("please provide a value for '{flag}'")]
    MissingFlag { flag: String },
    /// A new formula command failed validation.
    #[error("invalid formula command '{formula}': {reason}")]
    InvalidFormulaCommand { formula: String, reason: String },
    /// The stdin payload wasn't valid JSON for this command.
    #[error("Failed to decode the input payload: {0}")]
    Decode(#[source] serde_json::Error),
    /// Listing the namespace failed.
    #[error(transparent)]
    Directory(#[from] DirectoryError),
    /// A prompt failed or was cancelled.
    #[error(transparent)]
    Prompt(#[from] PromptError),
    /// Reading or updating the registry failed.
    #[error(transparent)]
    Registry(#[from] RegistryError),
    /// A rit path couldn't be resolved.
    #[error(transparent)]
    Path(#[from] PathError),
}

impl ResolveError {
    /// True if the user aborted a prompt.
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Prompt(PromptError::Cancelled))
    }
}

/// Result of every resolver operation.
pub type ResolveResult<T> = Result<T, ResolveError>;

/// Walks a workspace one directory level at a time, asking the user where to go.
pub struct PathResolver<'a> {
    directory: &'a dyn DirLister,
    prompt: &'a dyn Prompt,
    found_formula_question: &'a str,
}

impl<'a> PathResolver<'a> {
    /// Creates a resolver that asks the standard formula question.
    pub fn new(directory: &'a dyn DirLister, prompt: &'a dyn Prompt) -> Self {
        Self {
            directory,
            prompt,
            found_formula_question: t!("resolver.prompt.found_formula"),
        }
    }

    /// Replaces the question asked when a formula also contains other formulas.
    pub fn with_found_formula_question(mut self, question: &'a str) -> Self {
        self.found_formula_question = question;
        self
    }

    /// Resolves a formula below `start_dir` interactively.
    ///
    /// `start_label` is the command typed so far (usually `rit`) and is the
    /// option offered when the user may stop at an already-found formula.
    /// An empty result means `start_dir` itself is the formula.
    pub fn resolve_interactive(
        &self,
        start_dir: &Path,
        start_label: &str,
    ) -> ResolveResult<Vec<String>> {
        let mut segments = Vec::new();
        let mut current_dir = start_dir.to_path_buf();
        let mut current_label = start_label.to_string();

        loop {
            let mut dirs = self.directory.list(&current_dir, false)?;
            remove_from(&mut dirs, DOCS_DIR);

            // A formula can also group more formulas: only offer to descend then.
            if is_formula(&dirs) {
                if !has_formula_in_dir(&dirs) {
                    return Ok(segments);
                }

                let options = vec![
                    current_label.clone(),
                    t!("resolver.option.other_formula").to_string(),
                ];
                let response = self.prompt.choice(self.found_formula_question, &options)?;
                if response == current_label {
                    return Ok(segments);
                }
                remove_from(&mut dirs, SRC_DIR);
            }

            if dirs.is_empty() {
                log::debug!(
                    "Nothing selectable below '{}'",
                    current_dir.display()
                );
                return Err(ResolveError::FormulaNotFound);
            }

            let selected = self
                .prompt
                .choice(t!("resolver.prompt.select_formula_group"), &dirs)?;

            log::trace!("Selected '{}' below '{}'", selected, current_dir.display());
            current_label = format!("{} {}", current_label, selected);
            current_dir = current_dir.join(&selected);
            segments.push(selected);
        }
    }
}

/// Splits `rit my amazing formula` into `["my", "amazing", "formula"]`.
///
/// Purely syntactic: the filesystem is never consulted. Every word must name a
/// single directory below the workspace, so `..`, `.`, separators and absolute
/// paths are refused.
pub fn resolve_from_flat_string(command: &str) -> ResolveResult<Vec<String>> {
    let incorrect = || ResolveError::IncorrectFormulaName {
        formula: command.to_string(),
    };

    let mut words = command.split_whitespace();
    if words.next() != Some(CMD_USE) {
        return Err(incorrect());
    }

    words
        .map(|word| {
            if is_plain_component(word) {
                Ok(word.to_string())
            } else {
                log::warn!("Refusing command word '{}' in '{}'", word, command);
                Err(incorrect())
            }
        })
        .collect()
}

/// True if `word` is exactly one normal path component.
fn is_plain_component(word: &str) -> bool {
    let mut components = Path::new(word).components();
    matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(_)), None)
    ) && !word.contains(['/', '\\'])
}

/// Resolves `--workspace` and `--formula` flag values against the registry.
pub fn resolve_from_flags(
    workspace_flag: &str,
    formula_flag: &str,
    registry: &dyn WorkspaceRegistry,
) -> ResolveResult<FormulaTarget> {
    let workspace = resolve_workspace_by_name(workspace_flag, registry)?;
    let segments = resolve_from_flat_string(formula_flag)?;
    Ok(FormulaTarget::new(workspace, segments))
}

/// Looks a workspace up by name, ignoring case.
pub fn resolve_workspace_by_name(
    name: &str,
    registry: &dyn WorkspaceRegistry,
) -> ResolveResult<Workspace> {
    let workspaces = registry.list()?;
    workspace_registry::find_by_name(&workspaces, name).ok_or_else(|| {
        ResolveError::WorkspaceNotFound {
            name: name.to_string(),
        }
    })
}

/// Looks a workspace up by its root path, ignoring case.
pub fn resolve_workspace_by_path(
    path: &str,
    registry: &dyn WorkspaceRegistry,
) -> ResolveResult<Workspace> {
    let workspaces = registry.list()?;
    workspace_registry::find_by_path(&workspaces, path).ok_or_else(|| {
        ResolveError::WorkspaceNotFound {
            name: path.to_string(),
        }
    })
}

/// Validates a command for a formula that doesn't exist yet and returns its segments.
pub fn validate_formula_command(command: &str) -> ResolveResult<Vec<String>> {
    let invalid = |reason: &str| ResolveError::InvalidFormulaCommand {
        formula: command.to_string(),
        reason: reason.to_string(),
    };

    if command.trim().is_empty() {
        return Err(invalid(t!("resolver.validation.empty")));
    }

    let segments = resolve_from_flat_string(command)?;
    if segments.len() < 2 {
        return Err(invalid(t!("resolver.validation.too_short")));
    }
    if let Some(word) = segments.iter().find(|w| !COMMAND_WORD.is_match(w)) {
        return Err(invalid(&format!(t!("resolver.validation.bad_word"), word = word)));
    }
    if let Some(word) = segments
        .iter()
        .find(|w| [SRC_DIR, BIN_DIR, DOCS_DIR].contains(&w.as_str()))
    {
        return Err(invalid(&format!(
            t!("resolver.validation.reserved_dir"),
            word = word
        )));
    }
    if let Some(first) = segments.first()
        && CORE_COMMANDS.contains(&first.as_str())
    {
        return Err(invalid(&format!(
            t!("resolver.validation.core_command"),
            word = first
        )));
    }

    Ok(segments)
}

/// A directory is a formula iff it contains `src`.
pub fn is_formula(dirs: &[String]) -> bool {
    dirs.iter().any(|d| d == SRC_DIR)
}

/// True if there is anything besides `docs` and `src` to descend into.
pub fn has_formula_in_dir(dirs: &[String]) -> bool {
    dirs.iter().any(|d| d != DOCS_DIR && d != SRC_DIR)
}

fn remove_from(dirs: &mut Vec<String>, name: &str) {
    dirs.retain(|d| d != name);
}
