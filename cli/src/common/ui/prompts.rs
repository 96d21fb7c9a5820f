//! # create-ock Interactive Prompts
//!
//! File: cli/src/common/ui/prompts.rs
//!
//! ## Overview
//!
//! Line-based text prompts. A prompt shows a message and a suggested default,
//! reads one line, trims it, and falls back to the default on empty input.
//! A validator may reject the answer with a message, in which case the message
//! is printed and the question is asked again.
//!
//! End of input (Ctrl+D, or a closed pipe) is treated as cancellation and
//! surfaces as `CreateError::Cancelled`.
//!
//! ## Architecture
//!
//! - `Prompter`: the trait the initializer talks to.
//! - `TerminalPrompter`: an interactive terminal, drawn with `dialoguer`.
//!   Ctrl+C inside the prompt is cancellation.
//! - `LinePrompter<R, W>`: the implementation over any `BufRead` + `Write`
//!   pair. Used when stdin or stdout is not a terminal (piped answers), and
//!   bound to an in-memory cursor and buffer in tests.
//!
//! `stdio_prompter()` picks between the first two for the current process.
//!
use crate::core::error::{CreateError, Result};
use anyhow::Context;
use dialoguer::{theme::ColorfulTheme, Input};
use std::io::{self, BufRead, IsTerminal, Write};
use tracing::debug;

/// Validator result: `Err` carries the message shown before re-asking.
pub type Validation = std::result::Result<(), String>;

/// One text question.
#[derive(Debug, Clone, Copy)]
pub struct TextPrompt<'a> {
    pub message: &'a str,
    pub initial: &'a str,
}

/// Asks the user questions.
pub trait Prompter {
    /// Returns the first answer accepted by `validate`. Answers are trimmed;
    /// an empty answer means `prompt.initial`.
    fn text(
        &mut self,
        prompt: &TextPrompt<'_>,
        validate: &dyn Fn(&str) -> Validation,
    ) -> Result<String>;
}

/// Prompter for this process: `dialoguer` on a terminal, plain lines otherwise.
pub fn stdio_prompter() -> Box<dyn Prompter> {
    if io::stdin().is_terminal() && io::stdout().is_terminal() {
        debug!("Using interactive terminal prompts");
        Box::new(TerminalPrompter::default())
    } else {
        debug!("Input is not a terminal, reading answers line by line");
        Box::new(LinePrompter::stdio())
    }
}

/// `Prompter` drawing prompts on the terminal with `dialoguer`.
#[derive(Default)]
pub struct TerminalPrompter {
    theme: ColorfulTheme,
}

impl Prompter for TerminalPrompter {
    fn text(
        &mut self,
        prompt: &TextPrompt<'_>,
        validate: &dyn Fn(&str) -> Validation,
    ) -> Result<String> {
        loop {
            // Empty input means the default, which is checked below.
            let mut input = Input::<String>::with_theme(&self.theme)
                .with_prompt(prompt.message)
                .allow_empty(true)
                .validate_with(|value: &String| -> Validation {
                    match value.trim() {
                        "" => Ok(()),
                        answer => validate(answer),
                    }
                });
            if !prompt.initial.is_empty() {
                input = input.default(prompt.initial.to_string());
            }
            let raw = input.interact_text().map_err(interaction_error)?;

            let answer = match raw.trim() {
                "" => prompt.initial.to_string(),
                answer => answer.to_string(),
            };
            match validate(&answer) {
                Ok(()) => {
                    debug!("Prompt '{}' answered with '{}'", prompt.message, answer);
                    return Ok(answer);
                }
                Err(message) => {
                    debug!("Prompt '{}' rejected '{}': {}", prompt.message, answer, message);
                    println!("✖ {}", message);
                }
            }
        }
    }
}

/// Maps a failed terminal interaction; Ctrl+C and a closed input cancel.
fn interaction_error(err: dialoguer::Error) -> anyhow::Error {
    let dialoguer::Error::IO(err) = err;
    match err.kind() {
        io::ErrorKind::Interrupted | io::ErrorKind::UnexpectedEof => CreateError::Cancelled.into(),
        _ => CreateError::Prompt(err.to_string()).into(),
    }
}

/// `Prompter` reading answers line by line.
pub struct LinePrompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> LinePrompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Gives back the output sink, e.g. to inspect what a test run printed.
    #[cfg(test)]
    pub fn into_output(self) -> W {
        self.output
    }

    fn ask_once(&mut self, prompt: &TextPrompt<'_>) -> Result<String> {
        let shown = if prompt.initial.is_empty() {
            write!(self.output, "? {} › ", prompt.message)
        } else {
            write!(self.output, "? {} › ({}) ", prompt.message, prompt.initial)
        };
        shown
            .and_then(|_| self.output.flush())
            .map_err(|e| CreateError::Prompt(e.to_string()))?;

        let mut line = String::new();
        let read = self
            .input
            .read_line(&mut line)
            .context("Failed to read answer from input")?;
        if read == 0 {
            // Keep the terminal tidy after ^D.
            let _ = writeln!(self.output);
            return Err(CreateError::Cancelled.into());
        }

        let answer = line.trim();
        Ok(if answer.is_empty() {
            prompt.initial.to_string()
        } else {
            answer.to_string()
        })
    }
}

impl LinePrompter<io::StdinLock<'static>, io::Stdout> {
    /// Prompter on the process's stdin/stdout.
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> Prompter for LinePrompter<R, W> {
    fn text(
        &mut self,
        prompt: &TextPrompt<'_>,
        validate: &dyn Fn(&str) -> Validation,
    ) -> Result<String> {
        loop {
            let answer = self.ask_once(prompt)?;
            match validate(&answer) {
                Ok(()) => {
                    debug!("Prompt '{}' answered with '{}'", prompt.message, answer);
                    return Ok(answer);
                }
                Err(message) => {
                    debug!("Prompt '{}' rejected '{}': {}", prompt.message, answer, message);
                    writeln!(self.output, "✖ {}", message)
                        .map_err(|e| CreateError::Prompt(e.to_string()))?;
                }
            }
        }
    }
}
