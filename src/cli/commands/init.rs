//! Init command implementation.
//!
//! The `cairn init` command scaffolds `.cairn/config.yml` from templates
//! embedded at compile time.

use std::fs;
use std::path::{Path, PathBuf};

use include_dir::{include_dir, Dir};

use crate::cli::args::InitArgs;
use crate::error::{CairnError, Result};
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};

/// Embedded config templates.
static TEMPLATES_DIR: Dir<'_> = include_dir!("$CARGO_MANIFEST_DIR/templates");

/// The init command implementation.
pub struct InitCommand {
    project_root: PathBuf,
    args: InitArgs,
}

impl InitCommand {
    /// Create a new init command.
    pub fn new(project_root: &Path, args: InitArgs) -> Self {
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
    pub fn args(&self) -> &InitArgs {
        &self.args
    }

    fn template(&self) -> Result<&'static str> {
        let name = if self.args.minimal {
            "minimal.yml"
        } else {
            "config.yml"
        };
        TEMPLATES_DIR
            .get_file(name)
            .and_then(|f| f.contents_utf8())
            .ok_or_else(|| CairnError::ConfigNotFound {
                path: PathBuf::from("templates").join(name),
            })
    }

    /// Fill the template with the directory name as the project name.
    fn render(&self, template: &str) -> String {
        let project_name = self
            .project_root
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("MyProject");
        template.replace("{{project}}", project_name)
    }
}

impl Command for InitCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let config_path = crate::config::config_path(&self.project_root);

        if config_path.exists() && !self.args.force {
            ui.error("Configuration already exists. Use --force to overwrite.");
            return Ok(CommandResult::failure(1));
        }

        let content = self.render(self.template()?);

        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&config_path, content)?;

        ui.success("Created .cairn/config.yml");
        ui.message("Edit it to declare your toolchain, then run 'cairn'.");
        Ok(CommandResult::success())
    }
}
