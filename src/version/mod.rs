//! Version parsing and comparison.
//!
//! Tools report their versions in wildly different shapes ("Python 3.11.4",
//! "premake5 (Premake Build Script Generator) 5.0.0-beta2", "v1.2"). This
//! module extracts a comparable `major.minor.patch` triple from such output
//! and defines the ordering every minimum-version check relies on.

use serde::{Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

pub mod probe;

pub use probe::{ProbeError, ProbeSpec, VersionProbe};

/// A parsed tool version.
///
/// Ordering is lexicographic over (major, minor, patch); components missing
/// from the source string default to 0, so "3.4" compares as 3.4.0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct VersionInfo {
    pub major: u32,
    pub minor: u32,
    pub patch: u32,
}

impl VersionInfo {
    /// Create a version from explicit components.
    pub fn new(major: u32, minor: u32, patch: u32) -> Self {
        Self {
            major,
            minor,
            patch,
        }
    }

    /// Extract the first version-looking token from arbitrary text.
    ///
    /// Tries full `x.y.z` first so that "5.0.0-beta2" yields 5.0.0 rather
    /// than a partial match, then falls back to `x.y`. Returns None when no
    /// dotted digit sequence is present.
    pub fn parse(text: &str) -> Option<Self> {
        let patterns = [r"(\d+)\.(\d+)\.(\d+)", r"(\d+)\.(\d+)"];

        for pattern in patterns {
            if let Ok(re) = regex::Regex::new(pattern) {
                if let Some(caps) = re.captures(text) {
                    let component = |i: usize| -> u32 {
                        caps.get(i)
                            .and_then(|m| m.as_str().parse().ok())
                            .unwrap_or(0)
                    };
                    return Some(Self::new(component(1), component(2), component(3)));
                }
            }
        }

        None
    }
}

impl fmt::Display for VersionInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

impl FromStr for VersionInfo {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("not a version: {s}"))
    }
}

impl Serialize for VersionInfo {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}
