//! Run command implementation.
//!
//! The `cairn run` command executes the bootstrap sequence.

use std::path::{Path, PathBuf};

use crate::bootstrap::{default_context, BootstrapOrchestrator, Policy, TerminalState};
use crate::cli::args::RunArgs;
use crate::config::load_config;
use crate::error::{CairnError, Result};
use crate::generate::PlatformKind;
use crate::shell::is_elevated;
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};

/// The run command implementation.
pub struct RunCommand {
    project_root: PathBuf,
    args: RunArgs,
}

impl RunCommand {
    /// Create a new run command.
    pub fn new(project_root: &Path, args: RunArgs) -> Self {
        Self {
            project_root: project_root.to_path_buf(),
            args,
        }
    }

    /// Get the workspace root path.
    pub fn project_root(&self) -> &Path {
        &self.project_root
    }

    /// Get the command arguments.
    pub fn args(&self) -> &RunArgs {
        &self.args
    }
}

impl Command for RunCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let config = match load_config(&self.project_root) {
            Ok(c) => c,
            Err(CairnError::ConfigNotFound { .. }) => {
                ui.error("No configuration found. Run 'cairn init' first.");
                return Ok(CommandResult::failure(2));
            }
            Err(e) => return Err(e),
        };

        let mut plan = config.resolve()?;

        // Per-run overrides from flags.
        if self.args.strict {
            plan.policy = Policy::strict();
        }
        if self.args.skip_submodules {
            plan.sync_submodules = false;
        }

        ui.show_header(&format!("Bootstrapping {}", plan.project));

        if is_elevated() {
            ui.warning(
                "Running elevated; generated files will be owned by root and \
                 may break later unprivileged builds",
            );
        }

        let ctx = default_context();
        let orchestrator = BootstrapOrchestrator::new(&plan);
        let outcome = orchestrator.run(&self.project_root, PlatformKind::current(), ui, &ctx);

        match outcome.terminal {
            TerminalState::Done if outcome.exit_code == 0 => Ok(CommandResult::success()),
            _ => Ok(CommandResult::failure(outcome.exit_code)),
        }
    }
}
