//! Cairn - Workspace bootstrap and toolchain preflight.
//!
//! Cairn verifies that a project's external toolchain (scripting runtime,
//! project generator, optional SDKs) is present and new enough,
//! synchronizes git submodules, and dispatches the platform-specific
//! project-generation script declared in `.cairn/config.yml`.
//!
//! # Modules
//!
//! - [`bootstrap`] - Orchestration sequence and environment persistence
//! - [`cli`] - Command-line interface and argument parsing
//! - [`config`] - Configuration loading, parsing, and validation
//! - [`deps`] - Dependency model, validation, and remediation
//! - [`error`] - Error types and result aliases
//! - [`generate`] - Platform detection and generation dispatch
//! - [`net`] - Artifact downloads for remediations
//! - [`shell`] - External process execution and host helpers
//! - [`ui`] - Interactive prompts, spinners, and terminal output
//! - [`vcs`] - Git submodule synchronization
//! - [`version`] - Version parsing, comparison, and probing
//!
//! # Example
//!
//! ```
//! use cairn::version::VersionInfo;
//!
//! // Versions are extracted from arbitrary tool output
//! let version = VersionInfo::parse("Python 3.11.4").unwrap();
//! assert!(version >= VersionInfo::new(3, 3, 0));
//! ```
//!
//! For the full sequence, see [`bootstrap::BootstrapOrchestrator`].

pub mod bootstrap;
pub mod cli;
pub mod config;
pub mod deps;
pub mod error;
pub mod generate;
pub mod net;
pub mod shell;
pub mod ui;
pub mod vcs;
pub mod version;

pub use error::{CairnError, Result};
