// src/cli/handlers/delete.rs

use anyhow::Result;
use clap::Parser;

use crate::{
    cli::handlers::commons,
    core::input_strategy::{DeleteRequest, InputMode},
    state::AppContext,
};

#[derive(Parser, Debug, Default)]
#[command(
    no_binary_name = true,
    about = "Deletes a formula and prunes the groups it leaves empty."
)]
struct DeleteFormulaArgs {
    /// Workspace name (e.g.: Default or default).
    #[arg(long)]
    workspace: Option<String>,

    /// Formula to remove (e.g.: "rit test delete").
    #[arg(long)]
    formula: Option<String>,

    /// Reads `{"workspace_path", "formula"}` as JSON from stdin.
    #[arg(long, conflicts_with_all = ["workspace", "formula"])]
    stdin: bool,
}

/// Handles `rit delete formula`.
pub fn handle(args: Vec<String>, context: &mut AppContext) -> Result<()> {
    // 1. Parse arguments and pick the input channel once.
    let delete_args = DeleteFormulaArgs::try_parse_from(&args)?;
    let request = DeleteRequest {
        workspace: delete_args.workspace,
        formula: delete_args.formula,
    };
    let mode = InputMode::select(delete_args.stdin, request.has_flags());

    // 2. Resolve (and, interactively, confirm) the target.
    let target = {
        let (resolver, input) = context.resolver_and_input();
        resolver.resolve_delete(mode, &request, input)?
    };
    if target.is_empty() {
        log::info!("Delete declined. Nothing was changed.");
        return Ok(());
    }

    // 3. Mutate the workspace and its mirror.
    let outcome = context
        .mutator()
        .delete_formula(&target, &context.repos_dir)?;

    commons::print_success(t!("delete.success"));
    commons::report_outcome(&outcome);
    Ok(())
}
