// src/cli/handlers/tree.rs

use anyhow::Result;
use clap::Parser;
use colored::Colorize;

use crate::{
    cli::handlers::commons,
    constants::DEFAULT_WORKSPACE_NAME,
    core::{
        graph_display::{self, DisplayOptions},
        path_resolver, tree_generator,
    },
    state::AppContext,
};

#[derive(Parser, Debug, Default)]
#[command(
    no_binary_name = true,
    about = "Displays the commands of a workspace as a tree."
)]
struct TreeArgs {
    /// The workspace to display. Defaults to the 'Default' workspace.
    #[arg(long, short)]
    workspace: Option<String>,

    /// Show the short help of each command.
    #[arg(long)]
    help_text: bool,

    /// Limit the depth of the tree display.
    #[arg(long, short)]
    depth: Option<usize>,

    /// Regenerate `tree.json` at the workspace root.
    #[arg(long)]
    write: bool,
}

/// Handles `rit tree`.
pub fn handle(args: Vec<String>, context: &mut AppContext) -> Result<()> {
    // 1. Parse this handler's specific arguments.
    let tree_args = TreeArgs::try_parse_from(&args)?;

    // 2. Resolve the workspace by name.
    let name = tree_args
        .workspace
        .as_deref()
        .unwrap_or(DEFAULT_WORKSPACE_NAME);
    let workspace = path_resolver::resolve_workspace_by_name(name, context.registry.as_ref())?;

    // 3. Generate the tree, and persist it if asked.
    let tree = context.tree.generate(&workspace.dir)?;
    if tree_args.write {
        let path = tree_generator::save_tree(context.files.as_ref(), &workspace.dir, &tree)?;
        commons::print_success(&format!(
            t!("tree.success.written"),
            path = path.display()
        ));
    }

    // 4. Delegate to the graph display module for rendering.
    let options = DisplayOptions {
        show_help: tree_args.help_text,
        max_depth: tree_args.depth,
    };
    println!(
        "\n{}",
        format!(t!("tree.header"), workspace = workspace.to_string().cyan())
    );
    print!("{}", graph_display::render_command_tree(&tree, &options));

    Ok(())
}
