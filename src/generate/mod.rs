//! Build system generation dispatch.
//!
//! The workspace's generator (premake, CMake, or similar) is launched
//! through per-platform entry point scripts. This module holds the
//! dispatch table model and the dispatcher that walks it.

pub mod dispatcher;
pub mod platform;

pub use dispatcher::{AttemptStatus, DispatchAttempt, DispatchReport, PlatformDispatcher};
pub use platform::PlatformKind;

use std::path::PathBuf;

/// One platform row in the dispatch table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryPoint {
    /// Platform this row applies to.
    pub platform: PlatformKind,
    /// Generation script, relative to the workspace root unless absolute.
    pub script: PathBuf,
}

/// The resolved dispatch table plus arguments forwarded to every entry point.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenerationPlan {
    pub entry_points: Vec<EntryPoint>,
    /// Forwarded verbatim to each script, e.g. a pause-suppression flag.
    pub args: Vec<String>,
}

impl GenerationPlan {
    /// Whether any row matches `platform`.
    pub fn supports(&self, platform: PlatformKind) -> bool {
        self.entry_points.iter().any(|e| e.platform == platform)
    }
}
