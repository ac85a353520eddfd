// src/cli/handlers/rename.rs

use anyhow::Result;
use clap::Parser;
use colored::*;

use crate::{
    cli::handlers::commons,
    core::input_strategy::{InputMode, RenameRequest},
    models::command_line,
    state::AppContext,
};

// --- Command Argument Parsing ---
#[derive(Parser, Debug, Default)]
#[command(
    no_binary_name = true,
    about = "Moves a formula to a new command path."
)]
struct RenameFormulaArgs {
    /// Name of the workspace holding the formula.
    #[arg(long)]
    workspace: Option<String>,

    /// Current command of the formula (e.g.: "rit demo hello").
    #[arg(long, alias = "old-name-formula")]
    old_formula: Option<String>,

    /// New command of the formula (e.g.: "rit demo world").
    #[arg(long, alias = "new-name-formula")]
    new_formula: Option<String>,

    /// Reads `{"workspace_path", "old_formula", "new_formula"}` as JSON from stdin.
    #[arg(long, conflicts_with_all = ["workspace", "old_formula", "new_formula"])]
    stdin: bool,
}

// --- Main Handler ---
/// Handles `rit rename formula`.
pub fn handle(args: Vec<String>, context: &mut AppContext) -> Result<()> {
    let rename_args = RenameFormulaArgs::try_parse_from(&args)?;
    let request = RenameRequest {
        workspace: rename_args.workspace,
        old_formula: rename_args.old_formula,
        new_formula: rename_args.new_formula,
    };
    let mode = InputMode::select(rename_args.stdin, request.has_flags());

    let target = {
        let (resolver, input) = context.resolver_and_input();
        resolver.resolve_rename(mode, &request, input)?
    };

    println!(
        "\n{}",
        format_args!(
            t!("rename.info.renaming"),
            old = command_line(&target.old_segments).yellow(),
            new = command_line(&target.new_segments).cyan()
        )
    );

    let outcome = context
        .mutator()
        .rename_formula(&target, &context.repos_dir)?;

    commons::print_success(t!("rename.success"));
    commons::report_outcome(&outcome);
    Ok(())
}
