//! Dependency model and validation.
//!
//! A [`Dependency`] describes one external tool the workspace needs: how to
//! probe it, the minimum acceptable version, and what to do when it is
//! missing. The [`DependencyValidator`] turns each descriptor into an
//! immutable [`ValidationResult`] for the run.

use serde::Serialize;
use std::fmt;
use std::path::PathBuf;

use crate::version::{ProbeSpec, VersionInfo};

pub mod remediation;
pub mod validator;

pub use remediation::{default_context, RemediationContext};
pub use validator::DependencyValidator;

/// One external tool the workspace requires.
///
/// Immutable for the run; the set and order come from configuration.
#[derive(Debug, Clone)]
pub struct Dependency {
    /// Display and lookup name, e.g. "python".
    pub name: String,
    /// Version query invocation.
    pub probe: ProbeSpec,
    /// Minimum acceptable version. None means presence alone satisfies.
    pub minimum_version: Option<VersionInfo>,
    /// Configured action when the tool is missing or outdated.
    pub remediation: Option<Remediation>,
}

impl Dependency {
    /// Human-readable requirement, e.g. "python >= 3.3.0" or "vulkan-sdk".
    pub fn requirement(&self) -> String {
        match self.minimum_version {
            Some(min) => format!("{} >= {}", self.name, min),
            None => self.name.clone(),
        }
    }
}

/// What to do about a missing or outdated dependency.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Remediation {
    /// Run a shell command (package manager, bundled install script).
    Command { run: String },
    /// Open a download page in the browser.
    Open { url: String },
    /// Fetch a file to a workspace-relative path, with optional integrity
    /// check, and mark it executable on Unix.
    Download {
        url: String,
        dest: PathBuf,
        sha256: Option<String>,
    },
    /// No automatic action; print instructions.
    Hint { text: String },
}

impl fmt::Display for Remediation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Remediation::Command { run } => write!(f, "run `{run}`"),
            Remediation::Open { url } => write!(f, "open {url}"),
            Remediation::Download { url, dest, .. } => {
                write!(f, "download {} to {}", url, dest.display())
            }
            Remediation::Hint { text } => write!(f, "{text}"),
        }
    }
}

/// The outcome of validating one dependency.
///
/// Produced once per run per dependency and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationResult {
    /// Dependency name.
    pub dependency: String,
    /// Whether the probe located the tool at all.
    pub found: bool,
    /// Parsed version when one was reported.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<VersionInfo>,
    /// found AND version >= minimum (or found alone when no minimum).
    pub satisfied: bool,
    /// Whether a remediation action ran during validation.
    #[serde(skip_serializing_if = "is_false")]
    pub remediated: bool,
}

fn is_false(v: &bool) -> bool {
    !v
}

impl ValidationResult {
    /// Check a probed version against an optional minimum.
    pub fn meets(version: Option<VersionInfo>, minimum: Option<VersionInfo>) -> bool {
        match (version, minimum) {
            (_, None) => true,
            (Some(v), Some(min)) => v >= min,
            (None, Some(_)) => false,
        }
    }
}
