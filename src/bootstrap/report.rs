//! Serializable preflight report for `cairn check`.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::deps::ValidationResult;
use crate::generate::PlatformKind;

/// Read-only snapshot of the toolchain state.
#[derive(Debug, Clone, Serialize)]
pub struct PreflightReport {
    /// Project name from config.
    pub project: String,
    /// Platform the check ran on.
    pub platform: PlatformKind,
    /// When the report was generated.
    pub generated_at: DateTime<Utc>,
    /// Per-dependency results in declaration order.
    pub results: Vec<ValidationResult>,
    /// Whether every declared dependency is satisfied.
    pub all_satisfied: bool,
}

impl PreflightReport {
    /// Build a report from probe results.
    pub fn new(project: String, platform: PlatformKind, results: Vec<ValidationResult>) -> Self {
        let all_satisfied = results.iter().all(|r| r.satisfied);
        Self {
            project,
            platform,
            generated_at: Utc::now(),
            results,
            all_satisfied,
        }
    }
}
