// src/cli/handlers/mod.rs

// This module contains the logic for each CLI command.

/// Output helpers shared by the handlers.
pub mod commons;
/// `rit delete formula`
pub mod delete;
/// `rit rename formula`
pub mod rename;
/// `rit tree`
pub mod tree;
