// src/bin/rit.rs

use anyhow::Result;
use clap::Parser;
use colored::*;
use rit::{
    cli::{Cli, dispatcher},
    core::{path_resolver::ResolveError, prompt::PromptError},
    state::AppContext,
};

/// The main entry point of the `rit` application.
/// It sets up logging, builds the application context, dispatches to the
/// correct handler and performs centralized error handling.
fn main() {
    env_logger::init();

    if let Err(e) = run_cli(Cli::parse()) {
        // --- Centralized Error Handling ---
        // Handler flags are parsed late; let clap print help or usage itself.
        if let Some(clap_err) = e.downcast_ref::<clap::Error>() {
            clap_err.exit();
        }

        if is_cancelled(&e) {
            eprintln!("\n{}", rit::t!("common.info.operation_cancelled").yellow());
            std::process::exit(130);
        }

        eprintln!("\n{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run_cli(cli: Cli) -> Result<()> {
    log::debug!("CLI args parsed: {:?}", cli);
    let mut context = AppContext::from_environment()?;
    dispatcher::dispatch(cli.args, &mut context)
}

/// True if the user aborted a prompt anywhere below the handler.
fn is_cancelled(error: &anyhow::Error) -> bool {
    if let Some(resolve_err) = error.downcast_ref::<ResolveError>() {
        return resolve_err.is_cancelled();
    }
    matches!(
        error.downcast_ref::<PromptError>(),
        Some(PromptError::Cancelled)
    )
}
