//! Process execution and host platform helpers.

pub mod command;
pub mod platform;

pub use command::{execute, open_url, run_script, run_shell, CommandResult};
pub use platform::{detect_shell, is_ci, is_elevated, ShellType};
