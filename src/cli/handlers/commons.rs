// src/cli/handlers/commons.rs

// Shared output helpers used by the formula handlers.

use colored::Colorize;

use crate::core::namespace_mutator::MutationOutcome;

/// Prints a green success line.
pub fn print_success(message: &str) {
    println!("\n{} {}", t!("common.success").green().bold(), message);
}

/// Tells the user which mirror index was regenerated, if any.
pub fn report_outcome(outcome: &MutationOutcome) {
    if let Some(tree) = &outcome.mirror_tree {
        println!(
            "  {}",
            format!(t!("common.info.tree_regenerated"), path = tree.display()).dimmed()
        );
    }
}
