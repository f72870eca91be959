//! Check command implementation.
//!
//! The `cairn check` command is a read-only preflight: every dependency is
//! probed, nothing is remediated, and nothing is generated.

use std::path::{Path, PathBuf};

use crate::bootstrap::PreflightReport;
use crate::cli::args::CheckArgs;
use crate::config::load_config;
use crate::deps::ValidationResult;
use crate::error::{CairnError, Result};
use crate::generate::PlatformKind;
use crate::ui::UserInterface;
use crate::version::{ProbeError, VersionProbe};

use super::dispatcher::{Command, CommandResult};

/// The check command implementation.
pub struct CheckCommand {
    project_root: PathBuf,
    args: CheckArgs,
}

impl CheckCommand {
    /// Create a new check command.
    pub fn new(project_root: &Path, args: CheckArgs) -> Self {
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
    pub fn args(&self) -> &CheckArgs {
        &self.args
    }
}

impl Command for CheckCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let config = match load_config(&self.project_root) {
            Ok(c) => c,
            Err(CairnError::ConfigNotFound { .. }) => {
                ui.error("No configuration found. Run 'cairn init' first.");
                return Ok(CommandResult::failure(2));
            }
            Err(e) => return Err(e),
        };
        let plan = config.resolve()?;

        let probe = VersionProbe::new();
        let results: Vec<ValidationResult> = plan
            .dependencies
            .iter()
            .map(|dep| {
                let (found, version) = match probe.run(&dep.probe) {
                    Ok(version) => (true, Some(version)),
                    Err(ProbeError::VersionUnparseable { .. }) => (true, None),
                    Err(ProbeError::DependencyMissing { .. }) => (false, None),
                };
                ValidationResult {
                    dependency: dep.name.clone(),
                    found,
                    version,
                    satisfied: found && ValidationResult::meets(version, dep.minimum_version),
                    remediated: false,
                }
            })
            .collect();

        let report = PreflightReport::new(
            plan.project.clone(),
            PlatformKind::current(),
            results,
        );

        if self.args.json {
            let json =
                serde_json::to_string_pretty(&report).map_err(|e| CairnError::Other(e.into()))?;
            ui.message(&json);
        } else {
            render_table(&report, &plan.dependencies, ui);
        }

        if report.all_satisfied {
            Ok(CommandResult::success())
        } else {
            Ok(CommandResult::failure(1))
        }
    }
}

fn render_table(
    report: &PreflightReport,
    dependencies: &[crate::deps::Dependency],
    ui: &mut dyn UserInterface,
) {
    let width = dependencies
        .iter()
        .map(|d| d.name.len())
        .max()
        .unwrap_or(0);

    for (result, dep) in report.results.iter().zip(dependencies) {
        let state = match (result.satisfied, result.found) {
            (true, _) => "ok",
            (false, true) => "outdated",
            (false, false) => "missing",
        };
        let detail = match result.version {
            Some(v) => match dep.minimum_version {
                Some(min) => format!("{v} (need >= {min})"),
                None => v.to_string(),
            },
            None => dep
                .minimum_version
                .map(|min| format!("need >= {min}"))
                .unwrap_or_default(),
        };
        let line = format!("{:width$}  {:8}  {}", dep.name, state, detail);
        if result.satisfied {
            ui.success(line.trim_end());
        } else {
            ui.warning(line.trim_end());
        }
    }

    if report.results.is_empty() {
        ui.message("No dependencies are declared");
    }
}
