//! Artifact downloads for remediation.

use std::fs;
use std::path::Path;
use std::time::Duration;

use reqwest::blocking::Client;
use sha2::{Digest, Sha256};
use tracing::debug;

use crate::error::{CairnError, Result};

/// Installer downloads can be large; allow well beyond the usual API timeout.
const DOWNLOAD_TIMEOUT: Duration = Duration::from_secs(300);

fn download_err(url: &str, message: impl Into<String>) -> CairnError {
    CairnError::DownloadFailed {
        url: url.to_string(),
        message: message.into(),
    }
}

/// Download `url` to `dest`, optionally verifying a SHA-256 checksum.
///
/// Parent directories are created as needed. Nothing is written to `dest`
/// unless the body arrives intact and the checksum (when given) matches.
/// On Unix the file is made executable since download remediations
/// typically fetch installer binaries.
pub fn download_file(url: &str, dest: &Path, sha256: Option<&str>) -> Result<()> {
    let client = Client::builder()
        .user_agent("cairn")
        .timeout(DOWNLOAD_TIMEOUT)
        .build()
        .map_err(|e| download_err(url, e.to_string()))?;

    debug!(url, dest = %dest.display(), "downloading artifact");

    let response = client
        .get(url)
        .send()
        .map_err(|e| download_err(url, e.to_string()))?;

    if !response.status().is_success() {
        return Err(download_err(url, format!("HTTP {}", response.status())));
    }

    let bytes = response
        .bytes()
        .map_err(|e| download_err(url, e.to_string()))?;

    if let Some(expected) = sha256 {
        let actual = hex::encode(Sha256::digest(&bytes));
        if !actual.eq_ignore_ascii_case(expected) {
            return Err(download_err(
                url,
                format!("checksum mismatch: expected {}, got {}", expected, actual),
            ));
        }
    }

    if let Some(parent) = dest.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(dest, &bytes)?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let mut perms = fs::metadata(dest)?.permissions();
        perms.set_mode(0o755);
        fs::set_permissions(dest, perms)?;
    }

    debug!(dest = %dest.display(), bytes = bytes.len(), "download complete");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;
    use tempfile::TempDir;

    #[test]
    fn downloads_to_nested_destination() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/installer.sh");
            then.status(200).body("#!/bin/sh\nexit 0\n");
        });

        let temp = TempDir::new().unwrap();
        let dest = temp.path().join("tools").join("installer.sh");

        download_file(&server.url("/installer.sh"), &dest, None).unwrap();

        assert_eq!(
            fs::read_to_string(&dest).unwrap(),
            "#!/bin/sh\nexit 0\n"
        );
    }

    #[test]
    fn verifies_matching_checksum() {
        let body = "premake installer payload";
        let expected = hex::encode(Sha256::digest(body.as_bytes()));

        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/premake");
            then.status(200).body(body);
        });

        let temp = TempDir::new().unwrap();
        let dest = temp.path().join("premake");

        download_file(&server.url("/premake"), &dest, Some(&expected)).unwrap();
        assert!(dest.exists());
    }

    #[test]
    fn rejects_checksum_mismatch_without_writing() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/premake");
            then.status(200).body("tampered payload");
        });

        let temp = TempDir::new().unwrap();
        let dest = temp.path().join("premake");

        let err = download_file(
            &server.url("/premake"),
            &dest,
            Some("0000000000000000000000000000000000000000000000000000000000000000"),
        )
        .unwrap_err();

        assert!(err.to_string().contains("checksum mismatch"));
        assert!(!dest.exists());
    }

    #[test]
    fn checksum_comparison_is_case_insensitive() {
        let body = "payload";
        let expected = hex::encode(Sha256::digest(body.as_bytes())).to_uppercase();

        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/artifact");
            then.status(200).body(body);
        });

        let temp = TempDir::new().unwrap();
        let dest = temp.path().join("artifact");

        download_file(&server.url("/artifact"), &dest, Some(&expected)).unwrap();
    }

    #[test]
    fn reports_http_errors() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/missing");
            then.status(404).body("Not Found");
        });

        let temp = TempDir::new().unwrap();
        let dest = temp.path().join("missing");

        let err = download_file(&server.url("/missing"), &dest, None).unwrap_err();
        assert!(err.to_string().contains("404"));
        assert!(!dest.exists());
    }

    #[cfg(unix)]
    #[test]
    fn downloaded_file_is_executable() {
        use std::os::unix::fs::PermissionsExt;

        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/tool");
            then.status(200).body("binary");
        });

        let temp = TempDir::new().unwrap();
        let dest = temp.path().join("tool");

        download_file(&server.url("/tool"), &dest, None).unwrap();

        let mode = fs::metadata(&dest).unwrap().permissions().mode();
        assert_eq!(mode & 0o111, 0o111);
    }
}
