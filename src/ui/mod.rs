//! User interface components.
//!
//! This module provides:
//! - [`UserInterface`] trait for UI abstraction
//! - [`TerminalUI`] for interactive terminal usage
//! - [`NonInteractiveUI`] for CI/headless environments
//! - [`MockUI`](mock::MockUI) for tests
//!
//! # Example
//!
//! ```
//! use cairn::ui::{create_ui, OutputMode};
//!
//! // Use non-interactive mode for testability
//! let mut ui = create_ui(false, OutputMode::Quiet);
//! ui.show_header("bootstrap");
//! ui.success("Bootstrap complete");
//! ```

pub mod mock;
pub mod non_interactive;
pub mod output;
pub mod spinner;
pub mod terminal;
pub mod theme;

pub use mock::{MockSpinner, MockUI, SpinnerStatus};
pub use non_interactive::NonInteractiveUI;
pub use output::OutputMode;
pub use spinner::ProgressSpinner;
pub use terminal::{create_ui, TerminalUI};
pub use theme::{should_use_colors, CairnTheme};

use crate::error::Result;

/// Trait for user interface interactions.
///
/// This trait allows mocking the UI in tests.
pub trait UserInterface {
    /// Get the current output mode.
    fn output_mode(&self) -> OutputMode;

    /// Display a message to the user.
    fn message(&mut self, msg: &str);

    /// Display a success message.
    fn success(&mut self, msg: &str);

    /// Display a warning message.
    fn warning(&mut self, msg: &str);

    /// Display an error message.
    fn error(&mut self, msg: &str);

    /// Ask a yes/no question.
    fn confirm(&mut self, prompt: &ConfirmPrompt) -> Result<bool>;

    /// Start a spinner for an operation.
    fn start_spinner(&mut self, message: &str) -> Box<dyn SpinnerHandle>;

    /// Show a header/banner.
    fn show_header(&mut self, title: &str);

    /// Show a numbered phase line, e.g. "[2/4] Synchronizing submodules".
    fn show_step(&mut self, current: usize, total: usize, name: &str);

    /// Relay raw collaborator output (verbose mode only).
    fn command_output(&mut self, output: &str);

    /// Check if running in interactive mode.
    fn is_interactive(&self) -> bool;
}

/// Handle for controlling a spinner.
pub trait SpinnerHandle {
    /// Update the spinner message.
    fn set_message(&mut self, msg: &str);

    /// Mark the operation as successful.
    fn finish_success(&mut self, msg: &str);

    /// Mark the operation as failed.
    fn finish_error(&mut self, msg: &str);

    /// Mark as skipped.
    fn finish_skipped(&mut self, msg: &str);
}

/// A yes/no question for the user.
#[derive(Debug, Clone)]
pub struct ConfirmPrompt {
    /// Stable key for the prompt (used by tests to pre-seed answers).
    pub key: String,
    /// The question to display.
    pub question: String,
    /// Answer assumed when the user just presses enter.
    pub default_yes: bool,
}

impl ConfirmPrompt {
    /// Create a prompt defaulting to "yes".
    pub fn new(key: impl Into<String>, question: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            question: question.into(),
            default_yes: true,
        }
    }

    /// Override the default answer.
    pub fn default_no(mut self) -> Self {
        self.default_yes = false;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn confirm_prompt_defaults_to_yes() {
        let prompt = ConfirmPrompt::new("remediate.python", "Install Python?");
        assert_eq!(prompt.key, "remediate.python");
        assert!(prompt.default_yes);
    }

    #[test]
    fn confirm_prompt_default_no() {
        let prompt = ConfirmPrompt::new("k", "q").default_no();
        assert!(!prompt.default_yes);
    }
}
