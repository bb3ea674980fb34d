//! Interactive prompts
//!
//! Commands ask questions through the [`Prompt`] trait so tests can script
//! the answers.

use dialoguer::theme::ColorfulTheme;
use dialoguer::{Confirm, Input};

use crate::error::Result;

/// Source of operator answers
pub trait Prompt {
    /// Ask a yes/no question
    fn confirm(&mut self, message: &str) -> Result<bool>;

    /// Ask for a free-form line; may be empty
    fn input(&mut self, message: &str) -> Result<String>;
}

/// Prompts on the controlling terminal
pub struct TerminalPrompt;

impl Prompt for TerminalPrompt {
    fn confirm(&mut self, message: &str) -> Result<bool> {
        let answer = Confirm::with_theme(&ColorfulTheme::default())
            .with_prompt(message)
            .default(false)
            .interact()?;
        Ok(answer)
    }

    fn input(&mut self, message: &str) -> Result<String> {
        let answer: String = Input::with_theme(&ColorfulTheme::default())
            .with_prompt(message)
            .allow_empty(true)
            .interact_text()?;
        Ok(answer)
    }
}

/// Prompt answering from a fixed script, recording every question asked.
///
/// `confirm` treats `y`/`yes` as yes. Once the script runs out, every
/// answer is "no" / empty.
#[cfg(test)]
#[derive(Default)]
pub struct ScriptedPrompt {
    answers: std::collections::VecDeque<String>,
    pub asked: Vec<String>,
}

#[cfg(test)]
impl ScriptedPrompt {
    pub fn new(answers: &[&str]) -> Self {
        Self {
            answers: answers.iter().map(|a| a.to_string()).collect(),
            asked: Vec::new(),
        }
    }

    fn next(&mut self, message: &str) -> String {
        self.asked.push(message.to_string());
        self.answers.pop_front().unwrap_or_default()
    }
}

#[cfg(test)]
impl Prompt for ScriptedPrompt {
    fn confirm(&mut self, message: &str) -> Result<bool> {
        let answer = self.next(message);
        Ok(matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes"))
    }

    fn input(&mut self, message: &str) -> Result<String> {
        Ok(self.next(message))
    }
}
