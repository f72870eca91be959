//! Configuration loading and schema.
//!
//! The project's toolchain lives in `.cairn/config.yml`: which tools to
//! probe, which one gates generation, the per-platform entry points, and
//! the failure policy. The config is loaded once, validated, resolved into
//! a [`BootstrapPlan`](crate::bootstrap::BootstrapPlan), and read-only for
//! the rest of the run.

pub mod loader;
pub mod schema;

pub use loader::{config_path, find_project_root, load_config, parse_config};
pub use schema::{
    CairnConfig, DependencyConfig, GenerateConfig, PolicyConfig, RemediationConfig,
};
