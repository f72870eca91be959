//! Configuration schema definitions.
//!
//! These structs map one-to-one to the YAML in `.cairn/config.yml`.
//! Resolution into runtime types (and all cross-field validation) happens
//! in [`CairnConfig::resolve`], so a config that deserializes cleanly can
//! still be rejected before the run starts.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::bootstrap::{BootstrapPlan, Policy};
use crate::deps::{Dependency, Remediation};
use crate::error::{CairnError, Result};
use crate::generate::{EntryPoint, GenerationPlan, PlatformKind};
use crate::version::{ProbeSpec, VersionInfo};

/// Root configuration structure for `.cairn/config.yml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CairnConfig {
    /// Project name (for display purposes).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project: Option<String>,

    /// Environment variable persisted with the workspace root after a
    /// successful run, e.g. `EPPO_DIR`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub root_env: Option<String>,

    /// Required tools, validated in declaration order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub dependencies: Vec<DependencyConfig>,

    /// Name of the dependency that gates generation. Must be declared in
    /// `dependencies`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generator: Option<String>,

    /// Whether to synchronize git submodules.
    #[serde(default = "default_true", skip_serializing_if = "is_true")]
    pub submodules: bool,

    /// Per-platform generation entry points.
    #[serde(default)]
    pub generate: GenerateConfig,

    /// Exit-code policy for non-fatal failures.
    #[serde(default)]
    pub policy: PolicyConfig,
}

/// One required tool as declared in config.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DependencyConfig {
    /// Display and lookup name.
    pub name: String,

    /// Version query command line, split on whitespace.
    pub probe: String,

    /// Minimum acceptable version. Absent means presence alone satisfies.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub minimum_version: Option<String>,

    /// What to do when the tool is missing or outdated.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remediation: Option<RemediationConfig>,
}

/// Remediation action as declared in config.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum RemediationConfig {
    /// Run a shell command line.
    Command { run: String },
    /// Open a download page in the browser.
    Open { url: String },
    /// Fetch a file to a workspace-relative path.
    Download {
        url: String,
        dest: PathBuf,
        #[serde(skip_serializing_if = "Option::is_none")]
        sha256: Option<String>,
    },
    /// Print instructions only.
    Hint { text: String },
}

/// Per-platform generation entry points plus forwarded arguments.
///
/// The platform set is closed: an unrecognized key here is a parse error,
/// not a silently ignored row.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GenerateConfig {
    /// Entry point invoked on Windows hosts.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub windows: Option<PathBuf>,

    /// Entry point invoked on Linux hosts.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub linux: Option<PathBuf>,

    /// Arguments forwarded verbatim to every entry point.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub args: Vec<String>,
}

/// Whether non-fatal failures flip the exit code.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PolicyConfig {
    /// A failed submodule sync makes the run exit non-zero.
    #[serde(skip_serializing_if = "is_false")]
    pub strict_submodules: bool,

    /// A failed generation invocation makes the run exit non-zero.
    #[serde(skip_serializing_if = "is_false")]
    pub strict_generation: bool,
}

fn default_true() -> bool {
    true
}

fn is_true(v: &bool) -> bool {
    *v
}

fn is_false(v: &bool) -> bool {
    !*v
}

impl CairnConfig {
    /// Project name for display, falling back to a generic label.
    pub fn project_name(&self) -> &str {
        self.project.as_deref().unwrap_or("project")
    }

    /// Validate the config and resolve it into a runtime plan.
    ///
    /// Checks everything deserialization cannot: probe strings parse,
    /// minimum versions parse, dependency names are unique, `generator`
    /// names a declared dependency, and a configured generator has at
    /// least one entry point to dispatch to.
    pub fn resolve(&self) -> Result<BootstrapPlan> {
        let mut dependencies = Vec::with_capacity(self.dependencies.len());
        for dep in &self.dependencies {
            if dependencies
                .iter()
                .any(|d: &Dependency| d.name == dep.name)
            {
                return Err(invalid(format!(
                    "dependency '{}' is declared more than once",
                    dep.name
                )));
            }
            dependencies.push(dep.resolve()?);
        }

        if let Some(generator) = &self.generator {
            if !dependencies.iter().any(|d| &d.name == generator) {
                return Err(invalid(format!(
                    "generator '{}' does not name a declared dependency",
                    generator
                )));
            }
            if self.generate.windows.is_none() && self.generate.linux.is_none() {
                return Err(invalid(
                    "a generator is configured but 'generate' maps no platform entry point"
                        .to_string(),
                ));
            }
        }

        Ok(BootstrapPlan {
            project: self.project_name().to_string(),
            dependencies,
            generator: self.generator.clone(),
            sync_submodules: self.submodules,
            generation: self.generate.resolve(),
            root_env: self.root_env.clone(),
            policy: Policy {
                strict_submodules: self.policy.strict_submodules,
                strict_generation: self.policy.strict_generation,
            },
        })
    }
}

impl DependencyConfig {
    fn resolve(&self) -> Result<Dependency> {
        let probe = ProbeSpec::parse(&self.probe).ok_or_else(|| {
            invalid(format!("dependency '{}' has a blank probe", self.name))
        })?;

        let minimum_version = match &self.minimum_version {
            Some(raw) => Some(raw.parse::<VersionInfo>().map_err(|_| {
                invalid(format!(
                    "dependency '{}' has an unparseable minimum_version '{}'",
                    self.name, raw
                ))
            })?),
            None => None,
        };

        Ok(Dependency {
            name: self.name.clone(),
            probe,
            minimum_version,
            remediation: self.remediation.as_ref().map(RemediationConfig::resolve),
        })
    }
}

impl RemediationConfig {
    fn resolve(&self) -> Remediation {
        match self {
            RemediationConfig::Command { run } => Remediation::Command { run: run.clone() },
            RemediationConfig::Open { url } => Remediation::Open { url: url.clone() },
            RemediationConfig::Download { url, dest, sha256 } => Remediation::Download {
                url: url.clone(),
                dest: dest.clone(),
                sha256: sha256.clone(),
            },
            RemediationConfig::Hint { text } => Remediation::Hint { text: text.clone() },
        }
    }
}

impl GenerateConfig {
    fn resolve(&self) -> GenerationPlan {
        let mut entry_points = Vec::new();
        if let Some(script) = &self.windows {
            entry_points.push(EntryPoint {
                platform: PlatformKind::Windows,
                script: script.clone(),
            });
        }
        if let Some(script) = &self.linux {
            entry_points.push(EntryPoint {
                platform: PlatformKind::Linux,
                script: script.clone(),
            });
        }
        GenerationPlan {
            entry_points,
            args: self.args.clone(),
        }
    }
}

fn invalid(message: String) -> CairnError {
    CairnError::ConfigValidationError { message }
}
