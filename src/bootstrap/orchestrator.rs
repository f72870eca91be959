//! The bootstrap sequence.

use std::io;
use std::path::Path;

use tracing::{info, info_span, warn};

use crate::bootstrap::{
    BootstrapPlan, PersistOutcome, PhaseStatus, RunOutcome, TerminalState, EXIT_SKIPPED,
};
use crate::deps::{self, DependencyValidator, RemediationContext, ValidationResult};
use crate::error::Result;
use crate::generate::dispatcher::ScriptRunner;
use crate::generate::{PlatformDispatcher, PlatformKind};
use crate::shell::CommandResult;
use crate::ui::UserInterface;
use crate::version::{ProbeError, ProbeSpec, VersionInfo, VersionProbe};

/// Injected collaborators for one run.
///
/// Everything the sequence does to the host goes through these seams, so
/// tests can run the whole orchestration against counters and stubs.
pub struct ExecutionContext<'a> {
    /// Version probe execution.
    pub probe: &'a dyn Fn(&ProbeSpec) -> std::result::Result<VersionInfo, ProbeError>,
    /// Remediation actions.
    pub remediation: RemediationContext<'a>,
    /// Submodule synchronization.
    pub sync_submodules: &'a dyn Fn(&Path) -> io::Result<CommandResult>,
    /// Generation entry point launcher.
    pub run_script: ScriptRunner<'a>,
    /// Root environment variable persistence.
    pub persist_env: &'a dyn Fn(&str, &Path) -> Result<PersistOutcome>,
}

/// Build the default `ExecutionContext` for production use.
pub fn default_context() -> ExecutionContext<'static> {
    ExecutionContext {
        probe: &|spec| VersionProbe::new().run(spec),
        remediation: deps::default_context(),
        sync_submodules: &|root| crate::vcs::sync_submodules(root),
        run_script: &|script, args, cwd| crate::shell::run_script(script, args, cwd),
        persist_env: &|name, root| crate::bootstrap::env::persist_root_env(name, root),
    }
}

/// Runs the fixed bootstrap sequence against a resolved plan.
///
/// `ValidatingDependencies → SynchronizingSubmodules → (gate) →
/// Dispatching | Skipped → PersistingEnvironment → Done`. No phase ever
/// runs twice and nothing carries over between runs.
pub struct BootstrapOrchestrator<'a> {
    plan: &'a BootstrapPlan,
}

impl<'a> BootstrapOrchestrator<'a> {
    /// Create an orchestrator over a resolved plan.
    pub fn new(plan: &'a BootstrapPlan) -> Self {
        Self { plan }
    }

    /// Run the sequence to its terminal state.
    pub fn run(
        &self,
        root: &Path,
        platform: PlatformKind,
        ui: &mut dyn UserInterface,
        ctx: &ExecutionContext<'_>,
    ) -> RunOutcome {
        let plan = self.plan;
        let total = if plan.root_env.is_some() { 4 } else { 3 };
        let mut warnings: Vec<String> = Vec::new();

        let results = self.validate_dependencies(root, total, ui, ctx, &mut warnings);
        let submodules = self.synchronize_submodules(root, total, ui, ctx, &mut warnings);

        // Generation gate: the one fatal decision of the sequence.
        let gate_open = match &plan.generator {
            Some(name) => results
                .iter()
                .find(|r| &r.dependency == name)
                .is_some_and(|r| r.satisfied),
            None => true,
        };

        ui.show_step(3, total, "Generating project files");
        if !gate_open {
            let generator = plan.generator.as_deref().unwrap_or_default();
            warn!(generator, "generation gate closed");
            ui.error(&format!(
                "{} is required to generate project files; install it and re-run",
                generator
            ));
            return RunOutcome {
                results,
                terminal: TerminalState::Skipped,
                submodules,
                generation: PhaseStatus::Skipped,
                persistence: PhaseStatus::Skipped,
                generation_invoked: false,
                warnings,
                exit_code: EXIT_SKIPPED,
            };
        }

        let (generation, generation_invoked) =
            self.dispatch_generation(root, platform, ui, ctx, &mut warnings);
        let persistence = self.persist_environment(root, total, ui, ctx, &mut warnings);

        let exit_code = i32::from(
            (plan.policy.strict_submodules && submodules == PhaseStatus::Failed)
                || (plan.policy.strict_generation && generation == PhaseStatus::Failed),
        );

        if warnings.is_empty() {
            ui.success(&format!("{} is ready to build", plan.project));
        } else {
            ui.success(&format!(
                "{} bootstrap finished with {} warning(s)",
                plan.project,
                warnings.len()
            ));
        }
        info!(exit_code, warnings = warnings.len(), "bootstrap done");

        RunOutcome {
            results,
            terminal: TerminalState::Done,
            submodules,
            generation,
            persistence,
            generation_invoked,
            warnings,
            exit_code,
        }
    }

    fn validate_dependencies(
        &self,
        root: &Path,
        total: usize,
        ui: &mut dyn UserInterface,
        ctx: &ExecutionContext<'_>,
        warnings: &mut Vec<String>,
    ) -> Vec<ValidationResult> {
        let _span = info_span!("validate_dependencies").entered();
        ui.show_step(1, total, "Validating dependencies");

        let validator = DependencyValidator::new(ctx.probe);
        let mut results = Vec::with_capacity(self.plan.dependencies.len());
        for dep in &self.plan.dependencies {
            let result = validator.validate(dep, root, ui, &ctx.remediation);
            if !result.satisfied {
                warnings.push(format!("{} is not satisfied", dep.requirement()));
            }
            results.push(result);
        }
        results
    }

    fn synchronize_submodules(
        &self,
        root: &Path,
        total: usize,
        ui: &mut dyn UserInterface,
        ctx: &ExecutionContext<'_>,
        warnings: &mut Vec<String>,
    ) -> PhaseStatus {
        let _span = info_span!("synchronize_submodules").entered();
        ui.show_step(2, total, "Synchronizing submodules");

        if !self.plan.sync_submodules {
            ui.message("Submodule synchronization is disabled");
            return PhaseStatus::Skipped;
        }

        match (ctx.sync_submodules)(root) {
            Ok(result) if result.success => {
                ui.command_output(&result.stdout);
                ui.success("Submodules up to date");
                PhaseStatus::Succeeded
            }
            Ok(result) => {
                let excerpt = result.stderr_excerpt(2);
                let warning = if excerpt.is_empty() {
                    format!("Submodule sync failed (exit {:?})", result.exit_code)
                } else {
                    format!("Submodule sync failed: {excerpt}")
                };
                warn!(exit_code = ?result.exit_code, "submodule sync failed");
                ui.warning(&warning);
                warnings.push(warning);
                PhaseStatus::Failed
            }
            Err(e) => {
                let warning = format!("Submodule sync could not run: {e}");
                warn!(error = %e, "submodule sync unavailable");
                ui.warning(&warning);
                warnings.push(warning);
                PhaseStatus::Failed
            }
        }
    }

    fn dispatch_generation(
        &self,
        root: &Path,
        platform: PlatformKind,
        ui: &mut dyn UserInterface,
        ctx: &ExecutionContext<'_>,
        warnings: &mut Vec<String>,
    ) -> (PhaseStatus, bool) {
        let _span = info_span!("dispatch_generation").entered();

        if self.plan.generator.is_none() {
            ui.message("No generator is configured; skipping generation");
            return (PhaseStatus::Skipped, false);
        }

        let dispatcher = PlatformDispatcher::new(ctx.run_script);
        let report = dispatcher.dispatch(&self.plan.generation, platform, root, ui);

        let status = if report.unsupported() {
            PhaseStatus::Skipped
        } else if report.all_succeeded() {
            ui.success("Project files generated");
            PhaseStatus::Succeeded
        } else {
            warnings.push("Generation did not complete successfully".to_string());
            PhaseStatus::Failed
        };
        (status, report.invoked())
    }

    fn persist_environment(
        &self,
        root: &Path,
        total: usize,
        ui: &mut dyn UserInterface,
        ctx: &ExecutionContext<'_>,
        warnings: &mut Vec<String>,
    ) -> PhaseStatus {
        let Some(var) = &self.plan.root_env else {
            return PhaseStatus::Skipped;
        };

        let _span = info_span!("persist_environment").entered();
        ui.show_step(4, total, "Persisting environment");

        match (ctx.persist_env)(var, root) {
            Ok(PersistOutcome::Appended { profile }) => {
                ui.message(&format!(
                    "Added {} to {} (takes effect in new sessions)",
                    var,
                    profile.display()
                ));
                PhaseStatus::Succeeded
            }
            Ok(PersistOutcome::AlreadyPresent { profile }) => {
                ui.message(&format!("{} already set in {}", var, profile.display()));
                PhaseStatus::Succeeded
            }
            Ok(PersistOutcome::Registered) => {
                ui.message(&format!(
                    "Registered {} in the user environment (takes effect in new sessions)",
                    var
                ));
                PhaseStatus::Succeeded
            }
            Err(e) => {
                let warning = format!("Could not persist {var}: {e}");
                warn!(variable = var, error = %e, "environment persistence failed");
                ui.warning(&warning);
                warnings.push(warning);
                PhaseStatus::Failed
            }
        }
    }
}
