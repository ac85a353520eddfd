// src/core/mod.rs

/// Filesystem boundary.
pub mod directory;
/// ASCII rendering of command trees.
pub mod graph_display;
/// Stdin, flag or prompt input.
pub mod input_strategy;
/// Delete, rename and pruning.
pub mod namespace_mutator;
/// From user input to formula segments.
pub mod path_resolver;
/// rit's home, registry and repos locations.
pub mod paths;
/// Interactive questions.
pub mod prompt;
/// `tree.json` generation.
pub mod tree_generator;
/// Known workspaces.
pub mod workspace_registry;
