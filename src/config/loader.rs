//! Configuration file discovery and loading.

use std::fs;
use std::path::{Path, PathBuf};

use crate::config::schema::CairnConfig;
use crate::error::{CairnError, Result};

/// Path of the project config under a workspace root.
pub fn config_path(project_root: &Path) -> PathBuf {
    project_root.join(".cairn").join("config.yml")
}

/// Find the workspace root by walking up from `start`.
///
/// Looks for a `.cairn` directory first, then a `.git` entry as a
/// fallback so `cairn init` can be run from anywhere inside a checkout.
pub fn find_project_root(start: &Path) -> Option<PathBuf> {
    let mut current = start.to_path_buf();

    loop {
        if current.join(".cairn").is_dir() {
            return Some(current);
        }
        if current.join(".git").exists() {
            return Some(current);
        }
        if !current.pop() {
            return None;
        }
    }
}

/// Load and parse the project config under `project_root`.
///
/// # Errors
///
/// Returns `ConfigNotFound` if the file doesn't exist and
/// `ConfigParseError` if the YAML is invalid. Cross-field validation is
/// left to [`CairnConfig::resolve`].
pub fn load_config(project_root: &Path) -> Result<CairnConfig> {
    let path = config_path(project_root);
    let content = fs::read_to_string(&path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            CairnError::ConfigNotFound { path: path.clone() }
        } else {
            CairnError::Io(e)
        }
    })?;

    parse_config(&content, &path)
}

/// Parse YAML content into a [`CairnConfig`].
pub fn parse_config(content: &str, source_path: &Path) -> Result<CairnConfig> {
    serde_yaml::from_str(content).map_err(|e| CairnError::ConfigParseError {
        path: source_path.to_path_buf(),
        message: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write_config(root: &Path, content: &str) {
        let dir = root.join(".cairn");
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("config.yml"), content).unwrap();
    }

    #[test]
    fn load_reads_project_config() {
        let temp = TempDir::new().unwrap();
        write_config(temp.path(), "project: Test\n");

        let config = load_config(temp.path()).unwrap();
        assert_eq!(config.project.as_deref(), Some("Test"));
    }

    #[test]
    fn missing_config_is_config_not_found() {
        let temp = TempDir::new().unwrap();
        let err = load_config(temp.path()).unwrap_err();
        assert!(matches!(err, CairnError::ConfigNotFound { .. }));
    }

    #[test]
    fn invalid_yaml_is_parse_error_with_path() {
        let temp = TempDir::new().unwrap();
        write_config(temp.path(), "project: [unclosed\n");

        let err = load_config(temp.path()).unwrap_err();
        match err {
            CairnError::ConfigParseError { path, .. } => {
                assert!(path.ends_with(".cairn/config.yml"));
            }
            other => panic!("expected ConfigParseError, got {other:?}"),
        }
    }

    #[test]
    fn find_root_by_cairn_directory() {
        let temp = TempDir::new().unwrap();
        write_config(temp.path(), "project: Test\n");
        let nested = temp.path().join("src").join("engine");
        fs::create_dir_all(&nested).unwrap();

        let root = find_project_root(&nested).unwrap();
        assert_eq!(root, temp.path());
    }

    #[test]
    fn find_root_falls_back_to_git() {
        let temp = TempDir::new().unwrap();
        fs::create_dir_all(temp.path().join(".git")).unwrap();
        let nested = temp.path().join("docs");
        fs::create_dir_all(&nested).unwrap();

        let root = find_project_root(&nested).unwrap();
        assert_eq!(root, temp.path());
    }

    #[test]
    fn find_root_prefers_cairn_over_outer_git() {
        let temp = TempDir::new().unwrap();
        fs::create_dir_all(temp.path().join(".git")).unwrap();
        let inner = temp.path().join("engine");
        write_config(&inner, "project: Inner\n");

        let root = find_project_root(&inner).unwrap();
        assert_eq!(root, inner);
    }

    #[test]
    fn config_path_is_under_dot_cairn() {
        assert_eq!(
            config_path(Path::new("/proj")),
            PathBuf::from("/proj/.cairn/config.yml")
        );
    }
}
