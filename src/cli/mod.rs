//! Command-line interface.

pub mod args;
pub mod commands;

pub use args::{CheckArgs, Cli, Commands, ConfigArgs, InitArgs, RunArgs};
pub use commands::{Command, CommandDispatcher, CommandResult};
