//! Non-interactive UI for CI/headless environments.

use std::collections::HashMap;

use crate::error::Result;

use super::theme::CairnTheme;
use super::{ConfirmPrompt, OutputMode, SpinnerHandle, UserInterface};

/// UI implementation for non-interactive mode.
///
/// Confirm prompts never block: answers come from `CAIRN_PROMPT_*`
/// environment variables when present, otherwise from the prompt's
/// default. Spinners degrade to plain start/finish lines suitable for
/// log-based environments.
pub struct NonInteractiveUI {
    mode: OutputMode,
    env_overrides: HashMap<String, String>,
}

impl NonInteractiveUI {
    /// Create a new non-interactive UI.
    pub fn new(mode: OutputMode) -> Self {
        // Collect CAIRN_PROMPT_* env vars
        let env_overrides: HashMap<String, String> = std::env::vars()
            .filter(|(k, _)| k.starts_with("CAIRN_PROMPT_"))
            .collect();

        Self {
            mode,
            env_overrides,
        }
    }

    /// Create with explicit overrides (for testing).
    pub fn with_overrides(mode: OutputMode, overrides: HashMap<String, String>) -> Self {
        Self {
            mode,
            env_overrides: overrides,
        }
    }
}

/// Map a prompt key like `remediate.python` to `CAIRN_PROMPT_REMEDIATE_PYTHON`.
fn env_key_for(key: &str) -> String {
    format!("CAIRN_PROMPT_{}", key.to_uppercase().replace(['.', '-'], "_"))
}

fn parse_answer(value: &str) -> Option<bool> {
    match value.to_lowercase().as_str() {
        "1" | "true" | "yes" | "y" => Some(true),
        "0" | "false" | "no" | "n" => Some(false),
        _ => None,
    }
}

impl UserInterface for NonInteractiveUI {
    fn output_mode(&self) -> OutputMode {
        self.mode
    }

    fn message(&mut self, msg: &str) {
        if self.mode.shows_detail() {
            println!("{}", msg);
        }
    }

    fn success(&mut self, msg: &str) {
        if self.mode.shows_status() {
            println!("✓ {}", msg);
        }
    }

    fn warning(&mut self, msg: &str) {
        if self.mode.shows_status() {
            eprintln!("⚠ {}", msg);
        }
    }

    fn error(&mut self, msg: &str) {
        eprintln!("✗ {}", msg);
    }

    fn confirm(&mut self, prompt: &ConfirmPrompt) -> Result<bool> {
        if let Some(value) = self.env_overrides.get(&env_key_for(&prompt.key)) {
            if let Some(answer) = parse_answer(value) {
                return Ok(answer);
            }
        }
        Ok(prompt.default_yes)
    }

    fn start_spinner(&mut self, message: &str) -> Box<dyn SpinnerHandle> {
        if self.mode.shows_spinners() {
            println!("  {}", message);
        }
        Box::new(NoopSpinner {
            visible: self.mode.shows_spinners(),
        })
    }

    fn show_header(&mut self, title: &str) {
        if self.mode.shows_status() {
            println!("\n{}\n", title);
        }
    }

    fn show_step(&mut self, current: usize, total: usize, name: &str) {
        if self.mode.shows_status() {
            println!("[{}/{}] {}", current, total, name);
        }
    }

    fn command_output(&mut self, output: &str) {
        if self.mode.shows_command_output() {
            for line in output.lines() {
                println!("  {}", line);
            }
        }
    }

    fn is_interactive(&self) -> bool {
        false
    }
}

/// Spinner that prints plain finish lines (for non-interactive mode).
struct NoopSpinner {
    visible: bool,
}

impl SpinnerHandle for NoopSpinner {
    fn set_message(&mut self, _msg: &str) {}

    fn finish_success(&mut self, msg: &str) {
        if self.visible {
            let theme = CairnTheme::new();
            println!("{}", theme.format_success(msg));
        }
    }

    fn finish_error(&mut self, msg: &str) {
        if self.visible {
            let theme = CairnTheme::new();
            println!("{}", theme.format_error(msg));
        }
    }

    fn finish_skipped(&mut self, msg: &str) {
        if self.visible {
            let theme = CairnTheme::new();
            println!("{}", theme.format_skipped(msg));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_interactive_is_not_interactive() {
        let ui = NonInteractiveUI::new(OutputMode::Normal);
        assert!(!ui.is_interactive());
    }

    #[test]
    fn confirm_uses_prompt_default() {
        let mut ui = NonInteractiveUI::with_overrides(OutputMode::Normal, HashMap::new());

        let accept = ConfirmPrompt::new("remediate.python", "Install Python?");
        assert!(ui.confirm(&accept).unwrap());

        let decline = ConfirmPrompt::new("remediate.python", "Install Python?").default_no();
        assert!(!ui.confirm(&decline).unwrap());
    }

    #[test]
    fn confirm_uses_env_override() {
        let mut overrides = HashMap::new();
        overrides.insert("CAIRN_PROMPT_REMEDIATE_PYTHON".to_string(), "yes".to_string());

        let mut ui = NonInteractiveUI::with_overrides(OutputMode::Normal, overrides);
        let prompt = ConfirmPrompt::new("remediate.python", "Install Python?").default_no();
        assert!(ui.confirm(&prompt).unwrap());
    }

    #[test]
    fn confirm_override_can_decline() {
        let mut overrides = HashMap::new();
        overrides.insert("CAIRN_PROMPT_REMEDIATE_PYTHON".to_string(), "no".to_string());

        let mut ui = NonInteractiveUI::with_overrides(OutputMode::Normal, overrides);
        let prompt = ConfirmPrompt::new("remediate.python", "Install Python?");
        assert!(!ui.confirm(&prompt).unwrap());
    }

    #[test]
    fn confirm_ignores_unparseable_override() {
        let mut overrides = HashMap::new();
        overrides.insert("CAIRN_PROMPT_REMEDIATE_PYTHON".to_string(), "maybe".to_string());

        let mut ui = NonInteractiveUI::with_overrides(OutputMode::Normal, overrides);
        let prompt = ConfirmPrompt::new("remediate.python", "Install Python?").default_no();
        assert!(!ui.confirm(&prompt).unwrap());
    }

    #[test]
    fn env_key_normalizes_separators() {
        assert_eq!(
            env_key_for("remediate.vulkan-sdk"),
            "CAIRN_PROMPT_REMEDIATE_VULKAN_SDK"
        );
    }

    #[test]
    fn output_mode_preserved() {
        let ui = NonInteractiveUI::new(OutputMode::Quiet);
        assert_eq!(ui.output_mode(), OutputMode::Quiet);
    }

    #[test]
    fn noop_spinner_methods() {
        let mut spinner = NoopSpinner { visible: false };
        spinner.set_message("checking python");
        spinner.finish_success("done");
        spinner.finish_error("failed");
        spinner.finish_skipped("skipped");
    }
}
