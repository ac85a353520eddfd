// src/core/graph_display.rs

use crate::constants::{CMD_USE, TREE_ROOT_ID};
use crate::models::{CommandTree, TreeCommand};
use std::collections::HashMap;
use std::fmt::Write;

/// Options that control the rendering of the command tree.
#[derive(Debug, Clone, Copy, Default)]
pub struct DisplayOptions {
    /// Appends each command's short help.
    pub show_help: bool,
    /// Stops below this many levels.
    pub max_depth: Option<usize>,
}

/// Renders an ASCII tree of every command in `tree`, rooted at `rit`.
pub fn render_command_tree(tree: &CommandTree, options: &DisplayOptions) -> String {
    // 1. Build the relationship map, children sorted by their command word.
    let mut children_map: HashMap<&str, Vec<&TreeCommand>> = HashMap::new();
    for command in tree.commands.values() {
        children_map
            .entry(command.parent.as_str())
            .or_default()
            .push(command);
    }
    for children in children_map.values_mut() {
        children.sort_by(|a, b| a.usage.cmp(&b.usage));
    }

    // 2. Print from the root down.
    let mut out = String::new();
    let _ = writeln!(out, "{}", CMD_USE);
    if let Some(roots) = children_map.get(TREE_ROOT_ID) {
        for (i, command) in roots.iter().enumerate() {
            let is_last = i + 1 == roots.len();
            render_node(&mut out, command, &children_map, options, "", is_last, 1);
        }
    }
    out
}

/// Recursive function to render a command and its descendants.
fn render_node(
    out: &mut String,
    command: &TreeCommand,
    children_map: &HashMap<&str, Vec<&TreeCommand>>,
    options: &DisplayOptions,
    prefix: &str,
    is_last: bool,
    depth: usize,
) {
    let connector = if is_last { "└─" } else { "├─" };
    let marker = if command.formula {
        t!("tree.marker.formula")
    } else {
        ""
    };
    let help = match (&command.help, options.show_help) {
        (Some(help), true) => format!(" - {}", help),
        _ => String::new(),
    };
    let _ = writeln!(
        out,
        "{}{}{}{}{}",
        prefix, connector, command.usage, marker, help
    );

    if options.max_depth.is_some_and(|max| depth >= max) {
        return;
    }

    // Prepare the prefix for the children of this node
    let child_prefix = format!("{}{}", prefix, if is_last { "   " } else { "│  " });

    if let Some(children) = children_map.get(command.id.as_str()) {
        for (i, child) in children.iter().enumerate() {
            let is_last_child = i + 1 == children.len();
            render_node(
                out,
                child,
                children_map,
                options,
                &child_prefix,
                is_last_child,
                depth + 1,
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn command(id: &str, parent: &str, usage: &str, formula: bool) -> TreeCommand {
        TreeCommand {
            id: id.to_string(),
            parent: parent.to_string(),
            usage: usage.to_string(),
            help: Some(format!("{} help", usage)),
            long_help: None,
            formula,
        }
    }

    fn sample_tree() -> CommandTree {
        let mut tree = CommandTree::default();
        for cmd in [
            command("root_test", "root", "test", false),
            command("root_test_unit", "root_test", "unit", true),
            command("root_test_e2e", "root_test", "e2e", true),
            command("root_aws", "root", "aws", true),
        ] {
            tree.commands.insert(cmd.id.clone(), cmd);
        }
        tree
    }

    #[test]
    fn test_render_sorts_children_and_marks_formulas() {
        let rendered = render_command_tree(&sample_tree(), &DisplayOptions::default());
        let marker = t!("tree.marker.formula");
        let expected = format!(
            "rit\n├─aws{marker}\n└─test\n   ├─e2e{marker}\n   └─unit{marker}\n"
        );
        assert_eq!(rendered, expected);
    }

    #[test]
    fn test_render_respects_depth_and_help() {
        let options = DisplayOptions {
            show_help: true,
            max_depth: Some(1),
        };
        let rendered = render_command_tree(&sample_tree(), &options);
        assert!(rendered.contains("└─test - test help"));
        assert!(!rendered.contains("unit"));
    }

    #[test]
    fn test_render_empty_tree() {
        assert_eq!(
            render_command_tree(&CommandTree::default(), &DisplayOptions::default()),
            "rit\n"
        );
    }
}
