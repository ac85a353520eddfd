// src/cli/dispatcher.rs

use anyhow::{Result, anyhow};

use crate::{cli::handlers, constants::CMD_USE, state::AppContext};

// --- Command Definition and Registry ---

/// A command path (`delete formula`), its alternative spellings and its handler.
struct CommandDefinition {
    path: &'static [&'static str],
    aliases: &'static [&'static [&'static str]],
    handler: fn(Vec<String>, &mut AppContext) -> Result<()>,
}

/// The single source of truth for all commands.
static COMMAND_REGISTRY: &[CommandDefinition] = &[
    CommandDefinition {
        path: &["delete", "formula"],
        aliases: &[&["del", "formula"]],
        handler: handlers::delete::handle,
    },
    CommandDefinition {
        path: &["rename", "formula"],
        aliases: &[],
        handler: handlers::rename::handle,
    },
    CommandDefinition {
        path: &["tree"],
        aliases: &[],
        handler: handlers::tree::handle,
    },
];

/// Finds the command whose path (or alias) prefixes `args`, and how many words it used.
fn find_command(args: &[String]) -> Option<(&'static CommandDefinition, usize)> {
    COMMAND_REGISTRY.iter().find_map(|cmd| {
        std::iter::once(cmd.path)
            .chain(cmd.aliases.iter().copied())
            .find(|path| {
                path.len() <= args.len()
                    && path.iter().zip(args).all(|(word, arg)| *word == arg.as_str())
            })
            .map(|path| (cmd, path.len()))
    })
}

/// The full command lines of every registered command, comma separated.
pub fn available_commands() -> String {
    COMMAND_REGISTRY
        .iter()
        .map(|cmd| format!("{} {}", CMD_USE, cmd.path.join(" ")))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Routes `all_args` to the handler of the matching command.
pub fn dispatch(all_args: Vec<String>, context: &mut AppContext) -> Result<()> {
    log::debug!("Dispatching args: {:?}", all_args);

    let Some((command, words)) = find_command(&all_args) else {
        return Err(anyhow!(
            t!("cli.error.unknown_command"),
            command = all_args.join(" "),
            available = available_commands()
        ));
    };

    let handler_args = all_args.into_iter().skip(words).collect();
    (command.handler)(handler_args, context)
}
