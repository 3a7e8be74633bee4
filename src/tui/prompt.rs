//! Prompt seam between the sessions and the terminal.

use crate::error::GwirianError;
use std::collections::VecDeque;
use std::io::BufRead;

/// Blocking user input. One call returns one submitted answer.
pub trait Prompter {
    /// Hidden input (tokens).
    fn password(&mut self, prompt: &str) -> Result<String, GwirianError>;

    /// Text input prefilled with `default`.
    fn input(&mut self, prompt: &str, default: &str) -> Result<String, GwirianError>;

    /// Pick one of `items`; returns the index.
    fn select(&mut self, prompt: &str, items: &[String]) -> Result<usize, GwirianError>;
}

/// Terminal prompts through dialoguer.
#[derive(Debug, Default)]
pub struct DialoguerPrompter;

impl Prompter for DialoguerPrompter {
    fn password(&mut self, prompt: &str) -> Result<String, GwirianError> {
        use dialoguer::Password;
        Ok(Password::new()
            .with_prompt(prompt)
            .allow_empty_password(true)
            .interact()?)
    }

    fn input(&mut self, prompt: &str, default: &str) -> Result<String, GwirianError> {
        use dialoguer::Input;
        Ok(Input::<String>::new()
            .with_prompt(prompt)
            .default(default.to_string())
            .allow_empty(true)
            .interact_text()?)
    }

    fn select(&mut self, prompt: &str, items: &[String]) -> Result<usize, GwirianError> {
        use dialoguer::Select;
        Ok(Select::new()
            .with_prompt(prompt)
            .items(items)
            .default(0)
            .interact()?)
    }
}

/// Reads answers line by line from a non-terminal stdin, so tokens can be
/// piped in from scripts. End of input reads as an empty answer.
pub struct LinePrompter<R> {
    reader: R,
}

impl<R: BufRead> LinePrompter<R> {
    pub fn new(reader: R) -> Self {
        Self { reader }
    }

    fn read_line(&mut self) -> Result<String, GwirianError> {
        let mut line = String::new();
        self.reader.read_line(&mut line)?;
        Ok(line.trim().to_string())
    }
}

impl<R: BufRead> Prompter for LinePrompter<R> {
    fn password(&mut self, _prompt: &str) -> Result<String, GwirianError> {
        self.read_line()
    }

    fn input(&mut self, _prompt: &str, default: &str) -> Result<String, GwirianError> {
        let text = self.read_line()?;
        Ok(if text.is_empty() { default.to_string() } else { text })
    }

    fn select(&mut self, prompt: &str, _items: &[String]) -> Result<usize, GwirianError> {
        Err(GwirianError::InputError(format!(
            "'{}' needs an interactive terminal",
            prompt
        )))
    }
}

/// One scripted reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Answer {
    Text(String),
    Choice(usize),
}

/// Replays canned answers in order; used to drive flows without a terminal.
#[derive(Debug, Default)]
pub struct ScriptedPrompter {
    answers: VecDeque<Answer>,
    /// Prompts shown so far, in order.
    pub asked: Vec<String>,
}

impl ScriptedPrompter {
    pub fn new(answers: impl IntoIterator<Item = Answer>) -> Self {
        Self {
            answers: answers.into_iter().collect(),
            asked: Vec::new(),
        }
    }

    fn next(&mut self, prompt: &str) -> Result<Answer, GwirianError> {
        self.asked.push(prompt.to_string());
        self.answers
            .pop_front()
            .ok_or_else(|| GwirianError::InputError(format!("no answer scripted for '{}'", prompt)))
    }

    fn next_text(&mut self, prompt: &str) -> Result<String, GwirianError> {
        match self.next(prompt)? {
            Answer::Text(text) => Ok(text),
            Answer::Choice(i) => Err(GwirianError::InputError(format!(
                "expected text for '{}', got choice {}",
                prompt, i
            ))),
        }
    }
}

impl Prompter for ScriptedPrompter {
    fn password(&mut self, prompt: &str) -> Result<String, GwirianError> {
        self.next_text(prompt)
    }

    fn input(&mut self, prompt: &str, default: &str) -> Result<String, GwirianError> {
        let text = self.next_text(prompt)?;
        Ok(if text.is_empty() { default.to_string() } else { text })
    }

    fn select(&mut self, prompt: &str, items: &[String]) -> Result<usize, GwirianError> {
        match self.next(prompt)? {
            Answer::Choice(i) if i < items.len() => Ok(i),
            other => Err(GwirianError::InputError(format!(
                "invalid selection {:?} for '{}'",
                other, prompt
            ))),
        }
    }
}
