//! Docker CLI invocation builders
//!
//! Every interaction with the container runtime is expressed as an
//! argument vector built here; nothing in the pipeline formats a shell
//! string. The builders are pure, so tests assert on the exact argv.

use std::path::Path;

use crate::command::Invocation;
use crate::config::{self, PipelineConfig, container};
use crate::target::BuildTarget;

/// Access mode for a mount, rendered as the `-v` suffix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    ReadOnly,
    ReadWrite,
    /// Read-write with SELinux relabeling (`:z`), for host directories the
    /// container writes into.
    ReadWriteRelabel,
}

/// One `-v` mount: a named volume or a host path bound into the container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mount {
    source: String,
    container_path: String,
    access: Access,
}

impl Mount {
    /// A named persistent volume, always read-write.
    pub fn volume(name: &str, container_path: &str) -> Self {
        Self {
            source: name.to_string(),
            container_path: container_path.to_string(),
            access: Access::ReadWrite,
        }
    }

    /// A host path bound into the container.
    pub fn bind(host_path: &Path, container_path: &str, access: Access) -> Self {
        Self {
            source: host_path.display().to_string(),
            container_path: container_path.to_string(),
            access,
        }
    }

    /// Render as a `-v` argument value.
    fn render(&self) -> String {
        let suffix = match self.access {
            Access::ReadOnly => "ro",
            Access::ReadWrite => "rw",
            Access::ReadWriteRelabel => "z",
        };
        format!("{}:{}:{}", self.source, self.container_path, suffix)
    }
}

/// `docker images -q <image>:<tag>`; non-empty stdout means present.
pub fn image_query(config: &PipelineConfig, target: BuildTarget) -> Invocation {
    Invocation::new("docker")
        .args(["images", "-q"])
        .arg(config.image_ref(target))
}

/// `docker buildx build --load` of a target's image definition, tagging
/// it in place. The build context is the repository root.
pub fn image_build(config: &PipelineConfig, target: BuildTarget) -> Invocation {
    Invocation::new("docker")
        .args(["buildx", "build", "--load", "-t"])
        .arg(config.image_ref(target))
        .arg("-f")
        .arg(config.dockerfile(target).display().to_string())
        .arg(config.repo_dir.display().to_string())
}

/// The containerized compile: cache volumes, source and manifest mounts,
/// host-visible output, and the in-image `build` entrypoint.
///
/// `Cargo.lock` is mounted read-write so the toolchain may update it in
/// place; everything else from the host is read-only except the output
/// directory.
pub fn container_build(
    config: &PipelineConfig,
    target: BuildTarget,
    release: bool,
) -> Invocation {
    let mounts = [
        Mount::volume(config::CARGO_VOLUME, container::CARGO_HOME),
        Mount::volume(config::CACHE_VOLUME, container::TARGET_DIR),
        Mount::bind(&config.output_dir, container::HOST_OUT, Access::ReadWriteRelabel),
        Mount::bind(&config.src_dir, container::SRC, Access::ReadOnly),
        Mount::bind(&config.tools_dir, container::TOOLS, Access::ReadOnly),
        Mount::bind(&config.cargo_toml, container::CARGO_TOML, Access::ReadOnly),
        Mount::bind(&config.cargo_lock, container::CARGO_LOCK, Access::ReadWrite),
    ];

    let mut invocation = Invocation::new("docker")
        .args(["run", "--rm"])
        .arg("-e")
        .arg(format!("CARGO_HOME={}", container::CARGO_HOME))
        .arg("-e")
        .arg(format!("CARGO_TARGET_DIR={}", container::TARGET_DIR));

    for mount in &mounts {
        invocation = invocation.arg("-v").arg(mount.render());
    }

    invocation = invocation.arg(config.image_ref(target)).arg("build");
    if release {
        invocation = invocation.arg("--release");
    }
    invocation
}

/// `docker volume rm <name>`.
pub fn volume_remove(name: &str) -> Invocation {
    Invocation::new("docker").args(["volume", "rm"]).arg(name)
}
