//! Bootstrap orchestration.
//!
//! This module owns the top-level sequence: validate every dependency in
//! declaration order, synchronize submodules, gate on the generator
//! dependency, dispatch the platform entry point, and persist the root
//! environment variable. The sequence is strictly linear; a failed run is
//! re-invoked from the start, never resumed.

pub mod env;
pub mod orchestrator;
pub mod report;

pub use env::{persist_root_env, PersistOutcome};
pub use orchestrator::{default_context, BootstrapOrchestrator, ExecutionContext};
pub use report::PreflightReport;

use crate::deps::{Dependency, ValidationResult};
use crate::generate::GenerationPlan;

/// Exit code when the generation gate stops the run.
///
/// Distinct from 1, which covers strict-policy violations and internal
/// errors, so scripts can tell "generator missing" apart from everything
/// else.
pub const EXIT_SKIPPED: i32 = 2;

/// Everything one run needs, resolved from config before the run starts.
///
/// Read-only for the run and discarded at the end; no state survives an
/// invocation except the optional host environment variable.
#[derive(Debug, Clone)]
pub struct BootstrapPlan {
    /// Project name for display.
    pub project: String,
    /// Required tools in validation order.
    pub dependencies: Vec<Dependency>,
    /// Name of the dependency that gates generation.
    pub generator: Option<String>,
    /// Whether to run the submodule phase.
    pub sync_submodules: bool,
    /// Dispatch table for generation entry points.
    pub generation: GenerationPlan,
    /// Environment variable persisted with the workspace root.
    pub root_env: Option<String>,
    /// Exit-code policy for non-fatal failures.
    pub policy: Policy,
}

/// Whether non-fatal failures flip the exit code.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Policy {
    pub strict_submodules: bool,
    pub strict_generation: bool,
}

impl Policy {
    /// Both strictness switches on, as forced by `--strict`.
    pub fn strict() -> Self {
        Self {
            strict_submodules: true,
            strict_generation: true,
        }
    }
}

/// How one phase of the sequence ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhaseStatus {
    Succeeded,
    Failed,
    Skipped,
}

/// The run's terminal state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TerminalState {
    /// The sequence completed, possibly with non-fatal warnings.
    Done,
    /// The generation gate stopped the run.
    Skipped,
}

/// Final aggregate of one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunOutcome {
    /// Per-dependency results in validation order.
    pub results: Vec<ValidationResult>,
    /// Terminal state of the sequence.
    pub terminal: TerminalState,
    /// Submodule phase status.
    pub submodules: PhaseStatus,
    /// Generation phase status.
    pub generation: PhaseStatus,
    /// Environment persistence phase status.
    pub persistence: PhaseStatus,
    /// Whether any generation entry point process was launched.
    pub generation_invoked: bool,
    /// Non-fatal problems reported along the way.
    pub warnings: Vec<String>,
    /// Process exit code under the run's policy.
    pub exit_code: i32,
}

impl RunOutcome {
    /// Whether every declared dependency validated successfully.
    pub fn all_required_satisfied(&self) -> bool {
        self.results.iter().all(|r| r.satisfied)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn outcome(results: Vec<ValidationResult>) -> RunOutcome {
        RunOutcome {
            results,
            terminal: TerminalState::Done,
            submodules: PhaseStatus::Succeeded,
            generation: PhaseStatus::Succeeded,
            persistence: PhaseStatus::Skipped,
            generation_invoked: true,
            warnings: vec![],
            exit_code: 0,
        }
    }

    fn result(name: &str, satisfied: bool) -> ValidationResult {
        ValidationResult {
            dependency: name.to_string(),
            found: satisfied,
            version: None,
            satisfied,
            remediated: false,
        }
    }

    #[test]
    fn all_required_satisfied_over_results() {
        assert!(outcome(vec![]).all_required_satisfied());
        assert!(outcome(vec![result("a", true), result("b", true)]).all_required_satisfied());
        assert!(!outcome(vec![result("a", true), result("b", false)]).all_required_satisfied());
    }

    #[test]
    fn strict_policy_enables_both_switches() {
        let policy = Policy::strict();
        assert!(policy.strict_submodules);
        assert!(policy.strict_generation);
        assert_eq!(Policy::default(), Policy { strict_submodules: false, strict_generation: false });
    }
}
