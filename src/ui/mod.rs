//! Terminal output and interactive prompts.
//!
//! This module provides:
//! - [`UserInterface`] trait for UI abstraction
//! - [`ConsoleUi`] for terminal usage
//! - [`MockUi`] for tests
//!
//! Commands and the generation engine talk to the terminal exclusively
//! through [`UserInterface`], so tests can capture output and script
//! prompt answers.

pub mod mock;
pub mod output;
pub mod theme;

pub use mock::MockUi;
pub use output::ConsoleUi;
pub use theme::PlinthTheme;

use crate::error::Result;

/// Trait for user interface interactions.
///
/// This trait allows mocking the UI in tests.
pub trait UserInterface {
    /// Display a message to the user.
    fn message(&mut self, msg: &str);

    /// Display a success message.
    fn success(&mut self, msg: &str);

    /// Display an error message.
    fn error(&mut self, msg: &str);

    /// Show a text prompt and get user input.
    ///
    /// `key` identifies the prompt (used by [`MockUi`] to script answers),
    /// `question` is the text shown to the user, and `default` is returned
    /// when the user just presses enter.
    fn input(&mut self, key: &str, question: &str, default: &str) -> Result<String>;
}

/// Create the UI for a terminal session.
pub fn create_ui() -> Box<dyn UserInterface> {
    Box::new(ConsoleUi::new())
}
