//! Platform identification for generation dispatch.

use std::fmt;

use serde::Serialize;

/// The platforms the dispatch table distinguishes.
///
/// Deliberately closed: anything that is not Windows or Linux maps to
/// `Other`, for which generation is skipped with an informational note
/// rather than guessed at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PlatformKind {
    Windows,
    Linux,
    Other,
}

impl PlatformKind {
    /// Detect the current platform.
    pub fn current() -> Self {
        if cfg!(target_os = "windows") {
            PlatformKind::Windows
        } else if cfg!(target_os = "linux") {
            PlatformKind::Linux
        } else {
            PlatformKind::Other
        }
    }
}

impl fmt::Display for PlatformKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PlatformKind::Windows => "windows",
            PlatformKind::Linux => "linux",
            PlatformKind::Other => "other",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_names_are_lowercase() {
        assert_eq!(PlatformKind::Windows.to_string(), "windows");
        assert_eq!(PlatformKind::Linux.to_string(), "linux");
        assert_eq!(PlatformKind::Other.to_string(), "other");
    }

    #[test]
    fn current_platform_is_detectable() {
        // Whichever host runs the tests must land in the closed set.
        let platform = PlatformKind::current();
        assert!(matches!(
            platform,
            PlatformKind::Windows | PlatformKind::Linux | PlatformKind::Other
        ));
    }

    #[test]
    fn serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&PlatformKind::Linux).unwrap(),
            "\"linux\""
        );
    }
}
