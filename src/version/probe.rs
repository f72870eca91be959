//! Tool version probing.
//!
//! A probe runs a tool's "print your version" invocation and parses the
//! output. Probe failures are deliberately recoverable: the validator turns
//! them into an unsatisfied result instead of aborting the run.

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;
use tracing::debug;

use super::VersionInfo;
use crate::shell;

/// How to ask a tool for its version, e.g. `python3 --version`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeSpec {
    pub command: String,
    pub args: Vec<String>,
}

impl ProbeSpec {
    /// Split a config probe string into command and arguments.
    ///
    /// Returns None for blank strings. No shell quoting is interpreted;
    /// probes are plain whitespace-separated invocations.
    pub fn parse(spec: &str) -> Option<Self> {
        let mut parts = spec.split_whitespace();
        let command = parts.next()?.to_string();
        let args = parts.map(String::from).collect();
        Some(Self { command, args })
    }
}

impl fmt::Display for ProbeSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.command)?;
        for arg in &self.args {
            write!(f, " {}", arg)?;
        }
        Ok(())
    }
}

/// Why a probe produced no version.
///
/// Both variants are caller-recoverable: a missing or unreadable tool means
/// "not satisfied", never a crashed run.
#[derive(Debug, Error)]
pub enum ProbeError {
    /// The probe executable could not be located or launched.
    #[error("`{command}` is not installed or not on PATH")]
    DependencyMissing { command: String },

    /// The tool ran but its output contained no recognizable version.
    #[error("no version number in the output of `{command}`")]
    VersionUnparseable { command: String, output: String },
}

/// Executes version probes against the host.
#[derive(Debug, Default)]
pub struct VersionProbe;

impl VersionProbe {
    pub fn new() -> Self {
        Self
    }

    /// Run a probe and parse a version out of its output.
    ///
    /// stdout is matched first, then stderr — several tools (older Pythons,
    /// JDKs) report versions on stderr. A non-zero exit with parseable
    /// output still counts: version flags are not uniformly well-behaved.
    pub fn run(&self, spec: &ProbeSpec) -> Result<VersionInfo, ProbeError> {
        let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));

        let result = shell::execute(&spec.command, &spec.args, &cwd).map_err(|e| {
            debug!(command = %spec.command, error = %e, "probe launch failed");
            ProbeError::DependencyMissing {
                command: spec.command.clone(),
            }
        })?;

        let version = VersionInfo::parse(&result.stdout)
            .or_else(|| VersionInfo::parse(&result.stderr))
            .ok_or_else(|| ProbeError::VersionUnparseable {
                command: spec.command.clone(),
                output: excerpt(&result.stdout, &result.stderr),
            })?;

        debug!(command = %spec.command, %version, "probe succeeded");
        Ok(version)
    }
}

/// Compact sample of probe output for error messages.
fn excerpt(stdout: &str, stderr: &str) -> String {
    let combined = if stdout.trim().is_empty() {
        stderr
    } else {
        stdout
    };
    let mut text: String = combined.trim().chars().take(120).collect();
    if combined.trim().chars().count() > 120 {
        text.push_str("...");
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_splits_command_and_args() {
        let spec = ProbeSpec::parse("python3 --version").unwrap();
        assert_eq!(spec.command, "python3");
        assert_eq!(spec.args, vec!["--version".to_string()]);
    }

    #[test]
    fn parse_handles_bare_command() {
        let spec = ProbeSpec::parse("vulkaninfo").unwrap();
        assert_eq!(spec.command, "vulkaninfo");
        assert!(spec.args.is_empty());
    }

    #[test]
    fn parse_rejects_blank() {
        assert!(ProbeSpec::parse("").is_none());
        assert!(ProbeSpec::parse("   ").is_none());
    }

    #[test]
    fn display_round_trips() {
        let spec = ProbeSpec::parse("premake5 --version").unwrap();
        assert_eq!(spec.to_string(), "premake5 --version");
    }

    #[test]
    fn missing_executable_is_dependency_missing() {
        let spec = ProbeSpec::parse("this-command-does-not-exist-12345 --version").unwrap();
        let err = VersionProbe::new().run(&spec).unwrap_err();
        assert!(matches!(err, ProbeError::DependencyMissing { .. }));
    }

    #[cfg(unix)]
    #[test]
    fn parseable_stdout_yields_version() {
        let spec = ProbeSpec::parse("echo tool version 3.4.1").unwrap();
        let version = VersionProbe::new().run(&spec).unwrap();
        assert_eq!(version, VersionInfo::new(3, 4, 1));
    }

    #[cfg(unix)]
    #[test]
    fn output_without_digits_is_unparseable() {
        let spec = ProbeSpec::parse("echo no digits here").unwrap();
        let err = VersionProbe::new().run(&spec).unwrap_err();
        match err {
            ProbeError::VersionUnparseable { command, output } => {
                assert_eq!(command, "echo");
                assert!(output.contains("no digits here"));
            }
            other => panic!("expected VersionUnparseable, got {other:?}"),
        }
    }

    #[cfg(unix)]
    #[test]
    fn stderr_is_probed_when_stdout_is_silent() {
        let spec = ProbeSpec {
            command: "sh".to_string(),
            args: vec!["-c".to_string(), "echo openjdk 17.0.2 >&2".to_string()],
        };
        let version = VersionProbe::new().run(&spec).unwrap();
        assert_eq!(version, VersionInfo::new(17, 0, 2));
    }

    #[test]
    fn excerpt_prefers_stdout_and_truncates() {
        let long = "x".repeat(200);
        let text = excerpt(&long, "");
        assert!(text.ends_with("..."));
        assert!(text.chars().count() <= 123);
        assert_eq!(excerpt("", "stderr text 1.2"), "stderr text 1.2");
    }
}
