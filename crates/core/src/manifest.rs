//! Version resolution from the daemon's Cargo manifest
//!
//! A pure read: the version names the release archive and nothing else.
//! It is resolved once per run and treated as immutable afterwards.

use std::fs;
use std::path::Path;

use semver::Version;
use serde::Deserialize;

use crate::error::ManifestError;

#[derive(Debug, Deserialize)]
struct CargoManifest {
    package: Option<PackageSection>,
}

#[derive(Debug, Deserialize)]
struct PackageSection {
    version: Option<String>,
}

/// Read `package.version` from a Cargo manifest.
pub fn read_version(path: &Path) -> Result<Version, ManifestError> {
    let raw = fs::read_to_string(path).map_err(|source| ManifestError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let manifest: CargoManifest =
        toml::from_str(&raw).map_err(|source| ManifestError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

    let value = manifest
        .package
        .and_then(|package| package.version)
        .ok_or_else(|| ManifestError::MissingVersion {
            path: path.to_path_buf(),
        })?;

    Version::parse(&value).map_err(|source| ManifestError::Version {
        path: path.to_path_buf(),
        value,
        source,
    })
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use tempfile::NamedTempFile;

    use super::*;

    fn manifest_file(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{}", content).unwrap();
        file
    }

    #[test]
    fn reads_package_version() {
        let file = manifest_file(
            r#"
            [package]
            name = "journald-to-cloudwatch"
            version = "1.2.3"
            edition = "2021"
            "#,
        );

        let version = read_version(file.path()).unwrap();
        assert_eq!(version, Version::new(1, 2, 3));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = read_version(Path::new("/nonexistent/Cargo.toml")).unwrap_err();
        assert!(matches!(err, ManifestError::Io { .. }));
    }

    #[test]
    fn malformed_toml_is_a_parse_error() {
        let file = manifest_file("[package\nversion = ");
        let err = read_version(file.path()).unwrap_err();
        assert!(matches!(err, ManifestError::Parse { .. }));
    }

    #[test]
    fn missing_version_field_is_rejected() {
        let file = manifest_file("[package]\nname = \"jtc\"\n");
        let err = read_version(file.path()).unwrap_err();
        assert!(matches!(err, ManifestError::MissingVersion { .. }));
    }

    #[test]
    fn missing_package_section_is_rejected() {
        let file = manifest_file("[workspace]\nmembers = []\n");
        let err = read_version(file.path()).unwrap_err();
        assert!(matches!(err, ManifestError::MissingVersion { .. }));
    }

    #[test]
    fn non_semver_version_is_rejected() {
        let file = manifest_file("[package]\nversion = \"one.two\"\n");
        let err = read_version(file.path()).unwrap_err();
        assert!(matches!(err, ManifestError::Version { .. }));
    }
}
