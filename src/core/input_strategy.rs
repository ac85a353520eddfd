// src/core/input_strategy.rs

//! Chooses how a command gets its target: a JSON payload on stdin, explicit
//! flags, or interactive prompts. The mode is picked once per invocation.

use serde::de::DeserializeOwned;
use std::io::Read;

use crate::constants::CMD_USE;
use crate::core::{
    directory::DirLister,
    path_resolver::{self, PathResolver, ResolveError, ResolveResult},
    paths,
    prompt::Prompt,
    workspace_registry::WorkspaceRegistry,
};
use crate::models::{
    DeleteFormulaStdin, FormulaTarget, RenameFormulaStdin, RenameTarget, Workspace, command_line,
    segments_path,
};

/// The channel a command reads its target from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    /// A JSON payload read from stdin.
    Batch,
    /// Command-line flags.
    Flags,
    /// Terminal prompts.
    Interactive,
}

impl InputMode {
    /// `--stdin` wins; otherwise any channel flag means flag mode.
    pub fn select(stdin: bool, any_flag: bool) -> Self {
        match (stdin, any_flag) {
            (true, _) => Self::Batch,
            (false, true) => Self::Flags,
            (false, false) => Self::Interactive,
        }
    }
}

/// Flag values of `rit delete formula`.
#[derive(Debug, Clone, Default)]
pub struct DeleteRequest {
    /// `--workspace`
    pub workspace: Option<String>,
    /// `--formula`
    pub formula: Option<String>,
}

impl DeleteRequest {
    /// True if any flag was given.
    pub fn has_flags(&self) -> bool {
        self.workspace.is_some() || self.formula.is_some()
    }
}

/// Flag values of `rit rename formula`.
#[derive(Debug, Clone, Default)]
pub struct RenameRequest {
    /// `--workspace`
    pub workspace: Option<String>,
    /// `--old-formula`
    pub old_formula: Option<String>,
    /// `--new-formula`
    pub new_formula: Option<String>,
}

impl RenameRequest {
    /// True if any flag was given.
    pub fn has_flags(&self) -> bool {
        self.workspace.is_some() || self.old_formula.is_some() || self.new_formula.is_some()
    }
}

/// Decodes one JSON document from `reader`.
pub fn read_json_payload<T: DeserializeOwned>(reader: &mut dyn Read) -> ResolveResult<T> {
    serde_json::from_reader(reader).map_err(ResolveError::Decode)
}

/// Returns the flag's value, failing if it is absent or blank.
pub fn require_flag<'v>(value: Option<&'v str>, flag: &str) -> ResolveResult<&'v str> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(ResolveError::MissingFlag {
            flag: flag.to_string(),
        }),
    }
}

/// Resolves command targets through the collaborators injected by the caller.
pub struct InputResolver<'a> {
    registry: &'a dyn WorkspaceRegistry,
    directory: &'a dyn DirLister,
    prompt: &'a dyn Prompt,
}

impl<'a> InputResolver<'a> {
    /// Creates a resolver over the injected registry, namespace and prompts.
    pub fn new(
        registry: &'a dyn WorkspaceRegistry,
        directory: &'a dyn DirLister,
        prompt: &'a dyn Prompt,
    ) -> Self {
        Self {
            registry,
            directory,
            prompt,
        }
    }

    // --- DELETE ---

    /// The formula to delete. In interactive mode a declined confirmation
    /// yields an empty target.
    pub fn resolve_delete(
        &self,
        mode: InputMode,
        request: &DeleteRequest,
        input: &mut dyn Read,
    ) -> ResolveResult<FormulaTarget> {
        log::debug!("Resolving delete target in {:?} mode", mode);
        match mode {
            InputMode::Batch => {
                let payload: DeleteFormulaStdin = read_json_payload(input)?;
                let workspace =
                    path_resolver::resolve_workspace_by_path(&payload.workspace_path, self.registry)?;
                let segments = path_resolver::resolve_from_flat_string(&payload.formula)?;
                self.existing(FormulaTarget::new(workspace, segments))
            }
            InputMode::Flags => {
                let workspace = require_flag(request.workspace.as_deref(), "workspace")?;
                let formula = require_flag(request.formula.as_deref(), "formula")?;
                let target = path_resolver::resolve_from_flags(workspace, formula, self.registry)?;
                self.existing(target)
            }
            InputMode::Interactive => {
                let workspace = self.choose_workspace()?;
                let segments = PathResolver::new(self.directory, self.prompt)
                    .resolve_interactive(&workspace.dir, CMD_USE)?;
                if segments.is_empty() {
                    return Err(ResolveError::FormulaNotFound);
                }

                let question = format!(
                    t!("delete.prompt.confirm"),
                    formula = command_line(&segments)
                );
                if !self.prompt.yes_no(&question, &["no", "yes"])? {
                    return Ok(FormulaTarget::declined(workspace));
                }
                Ok(FormulaTarget::new(workspace, segments))
            }
        }
    }

    // --- RENAME ---

    /// The formula to rename and its new command path. Only the syntax of the
    /// new path is checked here.
    pub fn resolve_rename(
        &self,
        mode: InputMode,
        request: &RenameRequest,
        input: &mut dyn Read,
    ) -> ResolveResult<RenameTarget> {
        log::debug!("Resolving rename target in {:?} mode", mode);
        let (workspace, old_segments, new_command) = match mode {
            InputMode::Batch => {
                let payload: RenameFormulaStdin = read_json_payload(input)?;
                let workspace =
                    path_resolver::resolve_workspace_by_path(&payload.workspace_path, self.registry)?;
                let old = path_resolver::resolve_from_flat_string(&payload.old_formula)?;
                let old = self.existing(FormulaTarget::new(workspace, old))?;
                (old.workspace, old.segments, payload.new_formula)
            }
            InputMode::Flags => {
                let workspace = require_flag(request.workspace.as_deref(), "workspace")?;
                let old_formula = require_flag(request.old_formula.as_deref(), "old-formula")?;
                let new_formula = require_flag(request.new_formula.as_deref(), "new-formula")?;
                let old = path_resolver::resolve_from_flags(workspace, old_formula, self.registry)?;
                let old = self.existing(old)?;
                (old.workspace, old.segments, new_formula.to_string())
            }
            InputMode::Interactive => {
                let workspace = self.choose_workspace()?;
                let segments = PathResolver::new(self.directory, self.prompt)
                    .with_found_formula_question(t!("resolver.prompt.found_formula_rename"))
                    .resolve_interactive(&workspace.dir, CMD_USE)?;
                if segments.is_empty() {
                    return Err(ResolveError::FormulaNotFound);
                }

                let validator = |value: &str| {
                    path_resolver::validate_formula_command(value)
                        .map(|_| ())
                        .map_err(|e| e.to_string())
                };
                let new_command = self.prompt.text(
                    t!("rename.prompt.new_formula"),
                    &validator,
                    t!("rename.help.new_formula"),
                )?;
                (workspace, segments, new_command)
            }
        };

        let new_segments = path_resolver::validate_formula_command(&new_command)?;
        Ok(RenameTarget {
            workspace,
            old_segments,
            new_segments,
        })
    }

    // --- WORKSPACES ---

    /// Lets the user pick a registered workspace or type a new one, and
    /// registers the result.
    pub fn choose_workspace(&self) -> ResolveResult<Workspace> {
        let workspaces: Vec<Workspace> = self
            .registry
            .list()?
            .into_iter()
            .map(|(name, dir)| Workspace::new(name, dir))
            .collect();

        let new_option = t!("workspace.option.new").to_string();
        let mut options: Vec<String> = workspaces.iter().map(ToString::to_string).collect();
        options.push(new_option.clone());

        let selected = self.prompt.choice(t!("workspace.prompt.select"), &options)?;

        let workspace = if selected == new_option {
            self.type_new_workspace()?
        } else {
            workspaces
                .into_iter()
                .find(|ws| ws.to_string() == selected)
                .ok_or(ResolveError::WorkspaceNotFound { name: selected })?
        };

        self.registry.add(&workspace)?;
        Ok(workspace)
    }

    fn type_new_workspace(&self) -> ResolveResult<Workspace> {
        let name = self.prompt.text(
            t!("workspace.prompt.name"),
            &|value: &str| {
                if value.trim().is_empty() {
                    Err(t!("workspace.validation.empty_name").to_string())
                } else {
                    Ok(())
                }
            },
            "",
        )?;

        let dir = self.prompt.text(
            t!("workspace.prompt.path"),
            &|value: &str| match paths::expand_user_path(value) {
                Ok(path) if path.is_dir() => Ok(()),
                Ok(_) => Err(format!(t!("workspace.validation.missing_dir"), path = value)),
                Err(e) => Err(e.to_string()),
            },
            t!("workspace.help.path"),
        )?;

        Ok(Workspace::new(name, paths::expand_user_path(&dir)?))
    }

    fn existing(&self, target: FormulaTarget) -> ResolveResult<FormulaTarget> {
        if self
            .directory
            .exists(&segments_path(&target.workspace.dir, &target.segments))
        {
            return Ok(target);
        }
        Err(ResolveError::FormulaLookup {
            formula: target.command(),
            workspace: target.workspace.name,
        })
    }
}
