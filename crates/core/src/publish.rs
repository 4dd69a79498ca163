//! Artifact staging and release archiving
//!
//! Copies the release binary and the service unit into the staging
//! directory, then packs them into the version-named tarball. The archive
//! is replaced, never appended to or backed up: the previous archive is
//! gone once publishing starts, even if a later step fails.

use std::fs::{self, File};
use std::path::{Path, PathBuf};

use flate2::Compression;
use flate2::write::GzEncoder;
use semver::Version;
use tracing::{debug, info};

use crate::config::PipelineConfig;
use crate::error::PublishError;

/// Delete `path` if a file is already there.
pub fn replace_if_exists(path: &Path) -> Result<(), PublishError> {
    if path.exists() {
        debug!(path = %path.display(), "removing previous archive");
        fs::remove_file(path)?;
    }
    Ok(())
}

/// Stage the compiled artifacts and write the release archive.
///
/// Expects a prior release-mode build to have produced the binary under
/// the host output directory. Returns the archive path on success.
pub fn publish(config: &PipelineConfig, version: &Version) -> Result<PathBuf, PublishError> {
    let archive = config.archive_path(version);
    replace_if_exists(&archive)?;

    fs::create_dir_all(&config.dist_dir)?;

    let binary = config.binary_path(true);
    if !binary.exists() {
        return Err(PublishError::MissingBinary { path: binary });
    }

    let service_name = config.service_name();
    let staged_binary = config.dist_dir.join(&config.product);
    let staged_unit = config.dist_dir.join(&service_name);

    copy_into(&binary, &staged_binary)?;
    copy_into(&config.service_file(), &staged_unit)?;

    write_archive(
        &archive,
        &config.dist_dir,
        &[config.product.as_str(), service_name.as_str()],
    )?;

    info!(archive = %archive.display(), "release archive written");
    Ok(archive)
}

/// Copy preserving mode bits, so the staged binary stays executable.
fn copy_into(src: &Path, dest: &Path) -> Result<(), PublishError> {
    debug!(src = %src.display(), dest = %dest.display(), "staging");
    fs::copy(src, dest).map_err(|source| PublishError::Copy {
        src: src.to_path_buf(),
        dest: dest.to_path_buf(),
        source,
    })?;
    Ok(())
}

/// Write a gzip tarball containing `entries` from `staging_root`, named
/// relative to the archive root.
///
/// The archive is written directly at its final path; a crash mid-write
/// leaves a truncated file there rather than a stale-but-complete one.
fn write_archive(
    dest: &Path,
    staging_root: &Path,
    entries: &[&str],
) -> Result<(), PublishError> {
    let archive_err = |source: std::io::Error| PublishError::Archive {
        path: dest.to_path_buf(),
        source,
    };

    let file = File::create(dest).map_err(archive_err)?;
    let encoder = GzEncoder::new(file, Compression::default());
    let mut builder = tar::Builder::new(encoder);

    for name in entries {
        builder
            .append_path_with_name(staging_root.join(name), name)
            .map_err(archive_err)?;
    }

    let encoder = builder.into_inner().map_err(archive_err)?;
    encoder.finish().map_err(archive_err)?;
    Ok(())
}
