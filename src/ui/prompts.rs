//! ui::prompts
//!
//! Interactive prompts.
//!
//! # Design
//!
//! Prompts are only shown in interactive mode. In non-interactive mode,
//! operations requiring user input must either have defaults or fail
//! with a clear error message.

use dialoguer::theme::ColorfulTheme;
use dialoguer::{MultiSelect, Select};
use thiserror::Error;

/// Errors from prompts.
#[derive(Debug, Error)]
pub enum PromptError {
    #[error("prompt cancelled by user")]
    Cancelled,

    #[error("not in interactive mode")]
    NotInteractive,

    #[error("IO error: {0}")]
    IoError(String),
}

impl From<dialoguer::Error> for PromptError {
    fn from(err: dialoguer::Error) -> Self {
        PromptError::IoError(err.to_string())
    }
}

/// The prompts pipeline bootstrapping may need.
pub trait Prompter {
    /// Pick exactly one of `options`.
    fn select_one(&self, message: &str, options: &[String]) -> Result<String, PromptError>;

    /// Pick any number of `options`, returned in the order listed.
    fn select_many(&self, message: &str, options: &[String]) -> Result<Vec<String>, PromptError>;

    /// Read a value without echoing it.
    fn password(&self, message: &str) -> Result<String, PromptError>;
}

/// Terminal menus via `dialoguer`, masked input via `rpassword`.
#[derive(Debug, Clone, Copy)]
pub struct TerminalPrompter {
    interactive: bool,
}

impl TerminalPrompter {
    pub fn new(interactive: bool) -> Self {
        Self { interactive }
    }

    fn ensure_interactive(&self) -> Result<(), PromptError> {
        if self.interactive {
            Ok(())
        } else {
            Err(PromptError::NotInteractive)
        }
    }
}

impl Prompter for TerminalPrompter {
    fn select_one(&self, message: &str, options: &[String]) -> Result<String, PromptError> {
        self.ensure_interactive()?;
        let index = Select::with_theme(&ColorfulTheme::default())
            .with_prompt(message)
            .items(options)
            .default(0)
            .interact_opt()?
            .ok_or(PromptError::Cancelled)?;
        Ok(options[index].clone())
    }

    fn select_many(&self, message: &str, options: &[String]) -> Result<Vec<String>, PromptError> {
        self.ensure_interactive()?;
        let indices = MultiSelect::with_theme(&ColorfulTheme::default())
            .with_prompt(message)
            .items(options)
            .interact_opt()?
            .ok_or(PromptError::Cancelled)?;
        Ok(picked(options, indices))
    }

    fn password(&self, message: &str) -> Result<String, PromptError> {
        self.ensure_interactive()?;
        rpassword::prompt_password(format!("{message}: "))
            .map_err(|e| PromptError::IoError(e.to_string()))
    }
}

/// Selected options in listing order.
fn picked(options: &[String], mut indices: Vec<usize>) -> Vec<String> {
    indices.sort_unstable();
    indices.dedup();
    indices
        .into_iter()
        .filter_map(|i| options.get(i).cloned())
        .collect()
}

pub mod mock {
    //! Scripted [`Prompter`] for tests.

    use std::collections::VecDeque;
    use std::sync::{Arc, Mutex};

    use super::{PromptError, Prompter};

    /// Scripted answer for one prompt.
    #[derive(Debug)]
    pub enum Answer {
        One(String),
        Many(Vec<String>),
        Secret(String),
        Fail(PromptError),
    }

    /// Pops one scripted [`Answer`] per prompt, recording each prompt's
    /// message and options.
    #[derive(Debug, Clone, Default)]
    pub struct MockPrompter {
        answers: Arc<Mutex<VecDeque<Answer>>>,
        asked: Arc<Mutex<Vec<(String, Vec<String>)>>>,
    }

    impl MockPrompter {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn answer(self, answer: Answer) -> Self {
            self.answers
                .lock()
                .unwrap_or_else(|e| e.into_inner())
                .push_back(answer);
            self
        }

        /// `(message, options)` for every prompt shown.
        pub fn asked(&self) -> Vec<(String, Vec<String>)> {
            self.asked.lock().unwrap_or_else(|e| e.into_inner()).clone()
        }

        fn next(&self, message: &str, options: &[String]) -> Answer {
            self.asked
                .lock()
                .unwrap_or_else(|e| e.into_inner())
                .push((message.to_string(), options.to_vec()));
            self.answers
                .lock()
                .unwrap_or_else(|e| e.into_inner())
                .pop_front()
                .unwrap_or(Answer::Fail(PromptError::NotInteractive))
        }
    }

    impl Prompter for MockPrompter {
        fn select_one(&self, message: &str, options: &[String]) -> Result<String, PromptError> {
            match self.next(message, options) {
                Answer::One(choice) => Ok(choice),
                Answer::Fail(err) => Err(err),
                other => panic!("expected a select_one answer, got {other:?}"),
            }
        }

        fn select_many(
            &self,
            message: &str,
            options: &[String],
        ) -> Result<Vec<String>, PromptError> {
            match self.next(message, options) {
                Answer::Many(choices) => Ok(choices),
                Answer::Fail(err) => Err(err),
                other => panic!("expected a select_many answer, got {other:?}"),
            }
        }

        fn password(&self, message: &str) -> Result<String, PromptError> {
            match self.next(message, &[]) {
                Answer::Secret(value) => Ok(value),
                Answer::Fail(err) => Err(err),
                other => panic!("expected a password answer, got {other:?}"),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_interactive_refuses() {
        let prompter = TerminalPrompter::new(false);
        let options = vec!["a".to_string()];
        assert!(matches!(
            prompter.select_one("pick", &options),
            Err(PromptError::NotInteractive)
        ));
        assert!(matches!(
            prompter.select_many("pick", &options),
            Err(PromptError::NotInteractive)
        ));
        assert!(matches!(
            prompter.password("token"),
            Err(PromptError::NotInteractive)
        ));
    }

    #[test]
    fn picked_follows_listing_order() {
        let options: Vec<String> = ["prod", "staging", "test"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        assert_eq!(picked(&options, vec![2, 0, 2]), vec!["prod", "test"]);
        assert!(picked(&options, Vec::new()).is_empty());
    }
}
