//! Console-backed UI implementation.

use dialoguer::Input;

use crate::error::Result;

use super::theme::PlinthTheme;
use super::UserInterface;

/// Terminal implementation of [`UserInterface`].
#[derive(Debug, Default)]
pub struct ConsoleUi {
    theme: PlinthTheme,
}

impl ConsoleUi {
    /// Create a new console UI.
    pub fn new() -> Self {
        Self {
            theme: PlinthTheme::new(),
        }
    }
}

impl UserInterface for ConsoleUi {
    fn message(&mut self, msg: &str) {
        println!("{}", msg);
    }

    fn success(&mut self, msg: &str) {
        println!("{}", self.theme.success.apply_to(msg));
    }

    fn error(&mut self, msg: &str) {
        eprintln!("{}", self.theme.error.apply_to(msg));
    }

    fn input(&mut self, _key: &str, question: &str, default: &str) -> Result<String> {
        let input = Input::<String>::new().with_prompt(question);

        let answer = if default.is_empty() {
            input.allow_empty(true).interact_text()
        } else {
            input.default(default.to_string()).interact_text()
        }
        .map_err(anyhow::Error::from)?;

        Ok(answer)
    }
}
