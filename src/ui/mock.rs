//! Mock UI implementation for testing.
//!
//! `MockUi` implements the `UserInterface` trait and captures all
//! interactions for later assertion. It can be configured with
//! pre-determined prompt responses.
//!
//! # Example
//!
//! ```
//! use plinth::ui::{MockUi, UserInterface};
//!
//! let mut ui = MockUi::new();
//! ui.set_input_response("project_name", "widget");
//!
//! ui.message("Starting");
//! assert!(ui.messages().contains(&"Starting".to_string()));
//! assert_eq!(ui.input("project_name", "Project name", "demo").unwrap(), "widget");
//! ```

use std::collections::HashMap;

use crate::error::Result;

use super::UserInterface;

/// Mock UI implementation for testing.
///
/// Captures all UI interactions and allows pre-configured prompt responses.
/// Prompts without a configured response return their default.
#[derive(Debug, Default)]
pub struct MockUi {
    messages: Vec<String>,
    successes: Vec<String>,
    errors: Vec<String>,
    input_responses: HashMap<String, String>,
    inputs_shown: Vec<String>,
}

impl MockUi {
    /// Create a new MockUi.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a response for a prompt key.
    pub fn set_input_response(&mut self, key: &str, response: &str) {
        self.input_responses
            .insert(key.to_string(), response.to_string());
    }

    /// All captured plain messages.
    pub fn messages(&self) -> &[String] {
        &self.messages
    }

    /// All captured success messages.
    pub fn successes(&self) -> &[String] {
        &self.successes
    }

    /// All captured error messages.
    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    /// Keys of prompts that were shown, in order.
    pub fn inputs_shown(&self) -> &[String] {
        &self.inputs_shown
    }
}

impl UserInterface for MockUi {
    fn message(&mut self, msg: &str) {
        self.messages.push(msg.to_string());
    }

    fn success(&mut self, msg: &str) {
        self.successes.push(msg.to_string());
    }

    fn error(&mut self, msg: &str) {
        self.errors.push(msg.to_string());
    }

    fn input(&mut self, key: &str, _question: &str, default: &str) -> Result<String> {
        self.inputs_shown.push(key.to_string());
        Ok(self
            .input_responses
            .get(key)
            .cloned()
            .unwrap_or_else(|| default.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn captures_messages_by_kind() {
        let mut ui = MockUi::new();
        ui.message("a");
        ui.success("b");
        ui.error("c");

        assert_eq!(ui.messages(), ["a".to_string()]);
        assert_eq!(ui.successes(), ["b".to_string()]);
        assert_eq!(ui.errors(), ["c".to_string()]);
    }

    #[test]
    fn input_returns_configured_response() {
        let mut ui = MockUi::new();
        ui.set_input_response("name", "custom");

        assert_eq!(ui.input("name", "Name", "fallback").unwrap(), "custom");
    }

    #[test]
    fn input_falls_back_to_default() {
        let mut ui = MockUi::new();

        assert_eq!(ui.input("name", "Name", "fallback").unwrap(), "fallback");
        assert_eq!(ui.inputs_shown(), ["name".to_string()]);
    }
}
