//! Ordered dependency validation.

use std::path::Path;

use tracing::{debug, info};

use crate::deps::remediation::{self, RemediationContext};
use crate::deps::{Dependency, ValidationResult};
use crate::ui::{ConfirmPrompt, UserInterface};
use crate::version::{ProbeError, ProbeSpec, VersionInfo, VersionProbe};

/// Validates dependencies against their version floors.
///
/// The probe seam exists so tests can model tools appearing, vanishing,
/// or reporting garbage without touching the host system.
pub struct DependencyValidator<'a> {
    probe: &'a dyn Fn(&ProbeSpec) -> Result<VersionInfo, ProbeError>,
}

struct ProbeOutcome {
    found: bool,
    version: Option<VersionInfo>,
    /// Probe error display when the probe did not yield a version.
    note: Option<String>,
}

impl<'a> DependencyValidator<'a> {
    /// Create a validator with an injected probe.
    pub fn new(probe: &'a dyn Fn(&ProbeSpec) -> Result<VersionInfo, ProbeError>) -> Self {
        Self { probe }
    }

    /// Create a validator that probes the live system.
    pub fn system() -> DependencyValidator<'static> {
        DependencyValidator {
            probe: &|spec| VersionProbe::new().run(spec),
        }
    }

    /// Validate one dependency, applying its remediation at most once.
    ///
    /// Never aborts the run: the caller decides what an unsatisfied
    /// result means. A remediation runs only with the user's consent and
    /// is followed by exactly one re-probe.
    pub fn validate(
        &self,
        dep: &Dependency,
        root: &Path,
        ui: &mut dyn UserInterface,
        ctx: &RemediationContext<'_>,
    ) -> ValidationResult {
        let mut spinner = ui.start_spinner(&format!("Checking {}", dep.requirement()));
        let outcome = self.probe_once(dep);

        if outcome.satisfies(dep) {
            spinner.finish_success(&describe_ok(dep, &outcome));
            return outcome.into_result(dep, false);
        }
        spinner.finish_error(&describe_gap(dep, &outcome));

        let Some(remediation) = &dep.remediation else {
            return outcome.into_result(dep, false);
        };

        let mut prompt = ConfirmPrompt::new(
            format!("remediate.{}", dep.name),
            format!("Apply remediation for {} ({})?", dep.name, remediation),
        );
        if !ui.is_interactive() {
            // No one is watching; never run installers unless opted in.
            prompt = prompt.default_no();
        }

        let consented = ui.confirm(&prompt).unwrap_or(false);
        if !consented {
            ui.message(&format!("Skipping remediation for {}", dep.name));
            return outcome.into_result(dep, false);
        }

        info!(dependency = %dep.name, "remediation accepted");
        if let Err(e) = remediation::apply(remediation, &dep.name, root, ui, ctx) {
            ui.warning(&e.to_string());
            return outcome.into_result(dep, false);
        }

        // Single re-verification after the remediation.
        let mut spinner = ui.start_spinner(&format!("Rechecking {}", dep.requirement()));
        let outcome = self.probe_once(dep);
        if outcome.satisfies(dep) {
            spinner.finish_success(&describe_ok(dep, &outcome));
        } else {
            spinner.finish_error(&describe_gap(dep, &outcome));
        }
        outcome.into_result(dep, true)
    }

    fn probe_once(&self, dep: &Dependency) -> ProbeOutcome {
        let outcome = match (self.probe)(&dep.probe) {
            Ok(version) => ProbeOutcome {
                found: true,
                version: Some(version),
                note: None,
            },
            // The tool ran but its output carried no recognizable version;
            // that still proves presence.
            Err(e @ ProbeError::VersionUnparseable { .. }) => ProbeOutcome {
                found: true,
                version: None,
                note: Some(e.to_string()),
            },
            Err(e @ ProbeError::DependencyMissing { .. }) => ProbeOutcome {
                found: false,
                version: None,
                note: Some(e.to_string()),
            },
        };
        debug!(
            dependency = %dep.name,
            found = outcome.found,
            version = ?outcome.version,
            "probe finished"
        );
        outcome
    }
}

impl ProbeOutcome {
    fn satisfies(&self, dep: &Dependency) -> bool {
        self.found && ValidationResult::meets(self.version, dep.minimum_version)
    }

    fn into_result(self, dep: &Dependency, remediated: bool) -> ValidationResult {
        let satisfied = self.satisfies(dep);
        ValidationResult {
            dependency: dep.name.clone(),
            found: self.found,
            version: self.version,
            satisfied,
            remediated,
        }
    }
}

fn describe_ok(dep: &Dependency, outcome: &ProbeOutcome) -> String {
    match outcome.version {
        Some(v) => format!("{} {}", dep.name, v),
        None => format!("{} found", dep.name),
    }
}

fn describe_gap(dep: &Dependency, outcome: &ProbeOutcome) -> String {
    if let Some(note) = &outcome.note {
        if outcome.found {
            if let Some(min) = dep.minimum_version {
                return format!("{} (need >= {})", note, min);
            }
        }
        return note.clone();
    }
    match (outcome.version, dep.minimum_version) {
        (Some(v), Some(min)) => format!("{} {} found, need >= {}", dep.name, v, min),
        _ => format!("{} is unsatisfied", dep.name),
    }
}
