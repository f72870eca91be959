//! Visual theme and styling.

use console::Style;

/// Cairn's visual theme.
#[derive(Debug, Clone)]
pub struct CairnTheme {
    /// Style for success messages (green).
    pub success: Style,
    /// Style for warning messages (orange).
    pub warning: Style,
    /// Style for error messages (red bold).
    pub error: Style,
    /// Style for informational elements (magenta).
    pub info: Style,
    /// Style for dim/secondary text.
    pub dim: Style,
    /// Style for highlighted/important text (bold).
    pub highlight: Style,
    /// Style for headers (magenta bold).
    pub header: Style,
    /// Style for phase counters like `[2/4]` (dim).
    pub step_number: Style,
    /// Style for phase titles (bold).
    pub step_title: Style,
    /// Style for commands shown in output (dim italic).
    pub command: Style,
    /// Style for contextual hints (magenta dim).
    pub hint: Style,
    /// Style for key labels in key-value displays (bold).
    pub key: Style,
    /// Style for values in key-value displays (normal).
    pub value: Style,
}

impl Default for CairnTheme {
    fn default() -> Self {
        Self::new()
    }
}

impl CairnTheme {
    /// Create the default Cairn theme.
    pub fn new() -> Self {
        Self {
            success: Style::new().green(),
            warning: Style::new().color256(208),
            error: Style::new().red().bold(),
            info: Style::new().magenta(),
            dim: Style::new().dim(),
            highlight: Style::new().bold(),
            header: Style::new().bold().magenta(),
            step_number: Style::new().dim(),
            step_title: Style::new().bold(),
            command: Style::new().dim().italic(),
            hint: Style::new().magenta().dim(),
            key: Style::new().bold(),
            value: Style::new(),
        }
    }

    /// Create a theme without colors (for non-TTY or --no-color).
    pub fn plain() -> Self {
        Self {
            success: Style::new(),
            warning: Style::new(),
            error: Style::new(),
            info: Style::new(),
            dim: Style::new(),
            highlight: Style::new(),
            header: Style::new(),
            step_number: Style::new(),
            step_title: Style::new(),
            command: Style::new(),
            hint: Style::new(),
            key: Style::new(),
            value: Style::new(),
        }
    }

    /// Format a success message (icon + text in green).
    pub fn format_success(&self, msg: &str) -> String {
        format!("{}", self.success.apply_to(format!("✓ {}", msg)))
    }

    /// Format a warning message (icon + text in orange).
    pub fn format_warning(&self, msg: &str) -> String {
        format!("{}", self.warning.apply_to(format!("⚠ {}", msg)))
    }

    /// Format an error message (icon + text in red bold).
    pub fn format_error(&self, msg: &str) -> String {
        format!("{}", self.error.apply_to(format!("✗ {}", msg)))
    }

    /// Format a skipped message (icon + text in dim).
    pub fn format_skipped(&self, msg: &str) -> String {
        format!("{}", self.dim.apply_to(format!("○ {}", msg)))
    }

    /// Format a numbered phase line, e.g. `[2/4] Synchronizing submodules`.
    pub fn format_step(&self, current: usize, total: usize, name: &str) -> String {
        format!(
            "{} {}",
            self.step_number.apply_to(format!("[{}/{}]", current, total)),
            self.step_title.apply_to(name)
        )
    }

    /// Format a header banner.
    pub fn format_header(&self, title: &str) -> String {
        format!(
            "{} {}",
            self.header.apply_to("🪨"),
            self.highlight.apply_to(title)
        )
    }
}

/// Check if colors should be enabled.
pub fn should_use_colors() -> bool {
    // Check NO_COLOR env var (https://no-color.org/)
    if std::env::var("NO_COLOR").is_ok() {
        return false;
    }

    // Check if stdout is a TTY
    console::Term::stdout().is_term()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn theme_formats_success() {
        let theme = CairnTheme::plain();
        let msg = theme.format_success("python 3.11.4");
        assert!(msg.contains("✓"));
        assert!(msg.contains("python 3.11.4"));
    }

    #[test]
    fn theme_formats_warning() {
        let theme = CairnTheme::plain();
        let msg = theme.format_warning("submodule sync failed");
        assert!(msg.contains("⚠"));
        assert!(msg.contains("submodule sync failed"));
    }

    #[test]
    fn theme_formats_error() {
        let theme = CairnTheme::plain();
        let msg = theme.format_error("premake not found");
        assert!(msg.contains("✗"));
        assert!(msg.contains("premake not found"));
    }

    #[test]
    fn theme_formats_skipped() {
        let theme = CairnTheme::plain();
        let msg = theme.format_skipped("generation skipped");
        assert!(msg.contains("○"));
        assert!(msg.contains("generation skipped"));
    }

    #[test]
    fn theme_formats_step() {
        let theme = CairnTheme::plain();
        let msg = theme.format_step(2, 4, "Synchronizing submodules");
        assert!(msg.contains("[2/4]"));
        assert!(msg.contains("Synchronizing submodules"));
    }

    #[test]
    fn theme_formats_header() {
        let theme = CairnTheme::plain();
        let msg = theme.format_header("myproject");
        assert!(msg.contains("myproject"));
    }

    #[test]
    fn default_impl_matches_new() {
        let default = CairnTheme::default();
        let new = CairnTheme::new();
        assert_eq!(default.format_success("test"), new.format_success("test"));
    }

    #[test]
    fn plain_theme_slots_exist() {
        let theme = CairnTheme::plain();
        let _ = theme.step_number.apply_to("[2/4]");
        let _ = theme.command.apply_to("git submodule update");
        let _ = theme.hint.apply_to("Run cairn init");
        let _ = theme.key.apply_to("Platform:");
        let _ = theme.value.apply_to("linux");
    }
}
