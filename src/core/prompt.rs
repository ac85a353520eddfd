// src/core/prompt.rs

use colored::Colorize;
use dialoguer::{Input, Select, theme::ColorfulTheme};
use std::io::ErrorKind;
use thiserror::Error;

/// Errors raised by interactive prompts.
#[derive(Error, Debug)]
pub enum PromptError {
    /// The user pressed Ctrl+C or Esc.
    #[error("Operation cancelled by user.")]
    Cancelled,
    /// The terminal UI failed.
    #[error("User Interface Error: {0}")]
    Dialoguer(#[source] dialoguer::Error),
    /// A choice was asked with nothing to choose from.
    #[error("No options available for '{question}'.")]
    NoOptions { question: String },
}

impl From<dialoguer::Error> for PromptError {
    fn from(e: dialoguer::Error) -> Self {
        match e {
            // Ctrl+C while a prompt is open surfaces as an interrupted read.
            dialoguer::Error::IO(ref io_err) if io_err.kind() == ErrorKind::Interrupted => {
                Self::Cancelled
            }
            other => Self::Dialoguer(other),
        }
    }
}

/// Result of every prompt.
pub type PromptResult<T> = Result<T, PromptError>;

/// Validates free text typed by the user. The error is shown and the question asked again.
pub type TextValidator<'a> = &'a dyn Fn(&str) -> Result<(), String>;

/// Everything the engine asks the user. All methods may fail with [`PromptError::Cancelled`].
pub trait Prompt {
    /// Single choice among `options`; returns the chosen option.
    fn choice(&self, question: &str, options: &[String]) -> PromptResult<String>;

    /// Binary choice between two labelled options, e.g. `["no", "yes"]`.
    fn yes_no(&self, question: &str, options: &[&str; 2]) -> PromptResult<bool>;

    /// Free text accepted once `validator` passes.
    fn text(&self, question: &str, validator: TextValidator<'_>, help: &str)
    -> PromptResult<String>;
}

/// Maps a yes/no option label to its boolean meaning.
pub fn parse_bool_option(option: &str) -> bool {
    matches!(option.to_lowercase().as_str(), "yes" | "y" | "true")
}

/// Terminal prompts rendered with `dialoguer`.
#[derive(Debug, Default, Clone, Copy)]
pub struct DialoguerPrompt;

impl Prompt for DialoguerPrompt {
    fn choice(&self, question: &str, options: &[String]) -> PromptResult<String> {
        if options.is_empty() {
            return Err(PromptError::NoOptions {
                question: question.to_string(),
            });
        }

        let selection = Select::with_theme(&ColorfulTheme::default())
            .with_prompt(question)
            .items(options)
            .default(0)
            .interact_opt()?
            .ok_or(PromptError::Cancelled)?;

        options
            .get(selection)
            .cloned()
            .ok_or(PromptError::Cancelled)
    }

    fn yes_no(&self, question: &str, options: &[&str; 2]) -> PromptResult<bool> {
        let selection = Select::with_theme(&ColorfulTheme::default())
            .with_prompt(question)
            .items(options)
            .default(0)
            .interact_opt()?
            .ok_or(PromptError::Cancelled)?;

        Ok(options
            .get(selection)
            .is_some_and(|option| parse_bool_option(option)))
    }

    fn text(
        &self,
        question: &str,
        validator: TextValidator<'_>,
        help: &str,
    ) -> PromptResult<String> {
        if !help.is_empty() {
            println!("{}", help.dimmed());
        }

        let answer: String = Input::with_theme(&ColorfulTheme::default())
            .with_prompt(question)
            .validate_with(|input: &String| validator(input.trim()))
            .interact_text()?;

        Ok(answer.trim().to_string())
    }
}
