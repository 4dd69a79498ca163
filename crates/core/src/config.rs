//! Process-wide pipeline configuration
//!
//! All paths and names are resolved once from the repository root and the
//! resulting config is passed by reference into every component. Nothing
//! in the pipeline reads ambient global state.

use std::path::PathBuf;

use semver::Version;

use crate::target::BuildTarget;

/// Name of the binary produced by the daemon's build, and of the product
/// as it appears in archive and service-unit names.
pub const PRODUCT: &str = "journald-to-cloudwatch";

/// Image repository holding the per-target build images.
pub const IMAGE_NAME: &str = "build-jtc-image";

/// Named volume for toolchain state (registry cache, git checkouts).
pub const CARGO_VOLUME: &str = "jtc-cargo-volume";

/// Named volume for compiled intermediates.
pub const CACHE_VOLUME: &str = "jtc-cache-volume";

/// Fixed in-container mount points, shared with the image entrypoint.
pub mod container {
    pub const CARGO_HOME: &str = "/cargo";
    pub const TARGET_DIR: &str = "/cache";
    pub const HOST_OUT: &str = "/host";
    pub const SRC: &str = "/build/src";
    pub const TOOLS: &str = "/build/tools";
    pub const CARGO_TOML: &str = "/build/Cargo.toml";
    pub const CARGO_LOCK: &str = "/build/Cargo.lock";
}

/// Resolved paths and names for one pipeline run.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Root of the daemon checkout being built.
    pub repo_dir: PathBuf,
    pub src_dir: PathBuf,
    /// Image definitions, service unit, and in-container entrypoint.
    pub tools_dir: PathBuf,
    pub cargo_toml: PathBuf,
    pub cargo_lock: PathBuf,
    /// Host-visible build output, mounted at `/host` in the container.
    pub output_dir: PathBuf,
    /// Staging directory for files going into the release archive.
    pub dist_dir: PathBuf,
    pub image_name: String,
    pub product: String,
}

impl PipelineConfig {
    /// Resolve the standard layout under a repository root.
    pub fn from_repo(repo_dir: impl Into<PathBuf>) -> Self {
        let repo_dir = repo_dir.into();
        Self {
            src_dir: repo_dir.join("src"),
            tools_dir: repo_dir.join("tools"),
            cargo_toml: repo_dir.join("Cargo.toml"),
            cargo_lock: repo_dir.join("Cargo.lock"),
            output_dir: repo_dir.join("target"),
            dist_dir: repo_dir.join("dist"),
            image_name: IMAGE_NAME.to_string(),
            product: PRODUCT.to_string(),
            repo_dir,
        }
    }

    /// `<image_name>:<tag>` reference for a target's build image.
    pub fn image_ref(&self, target: BuildTarget) -> String {
        format!("{}:{}", self.image_name, target.tag())
    }

    /// Image definition file for a target.
    pub fn dockerfile(&self, target: BuildTarget) -> PathBuf {
        self.tools_dir.join(target.dockerfile())
    }

    /// Path of the compiled binary for a profile.
    pub fn binary_path(&self, release: bool) -> PathBuf {
        let profile = if release { "release" } else { "debug" };
        self.output_dir.join(profile).join(&self.product)
    }

    /// The service unit shipped alongside the binary.
    pub fn service_file(&self) -> PathBuf {
        self.tools_dir.join(self.service_name())
    }

    /// File name of the service unit.
    pub fn service_name(&self) -> String {
        format!("{}.service", self.product)
    }

    /// Destination archive path for a resolved version.
    pub fn archive_path(&self, version: &Version) -> PathBuf {
        self.dist_dir
            .join(format!("{}-{}.tar.gz", self.product, version))
    }
}
