//! The formula namespace engine behind the `rit` command.

include!(concat!(env!("OUT_DIR"), "/translations.rs"));

/// Command-line surface.
pub mod cli;
/// Shared names and reserved words.
pub mod constants;
/// The formula namespace engine.
pub mod core;
/// Domain types and payloads.
pub mod models;
/// Application context handed to handlers.
pub mod state;

#[cfg(test)]
pub(crate) mod test_support;
