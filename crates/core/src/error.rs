//! Error types for the release pipeline

use std::path::PathBuf;

use thiserror::Error;

use crate::target::BuildTarget;

/// Errors while resolving the version from the daemon's Cargo manifest.
#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("failed to read manifest {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse manifest {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("manifest {path} has no package.version field")]
    MissingVersion { path: PathBuf },

    #[error("manifest {path} declares non-semver version {value:?}")]
    Version {
        path: PathBuf,
        value: String,
        #[source]
        source: semver::Error,
    },
}

/// Failure of a spawned subprocess.
///
/// Carries the rendered command line so the failing invocation is visible
/// without re-deriving it from pipeline state.
#[derive(Debug, Error)]
pub enum CommandError {
    #[error("failed to spawn `{command}`: {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("`{command}` exited with code {code:?}")]
    ExitStatus { command: String, code: Option<i32> },
}

/// Errors while staging artifacts or writing the release archive.
#[derive(Debug, Error)]
pub enum PublishError {
    #[error("compiled binary not found at {path}; run a release build first")]
    MissingBinary { path: PathBuf },

    #[error("failed to copy {src} to {dest}: {source}")]
    Copy {
        src: PathBuf,
        dest: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write archive {path}: {source}")]
    Archive {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Workflow-level errors surfaced to the CLI.
///
/// Every variant is fatal: the first failure halts the remaining task
/// order, and there are no retries anywhere in the pipeline.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("manifest error: {0}")]
    Manifest(#[from] ManifestError),

    #[error("image build failed for {target}: {source}")]
    ImageBuild {
        target: BuildTarget,
        #[source]
        source: CommandError,
    },

    #[error("containerized build failed for {target} (release: {release}): {source}")]
    Compile {
        target: BuildTarget,
        release: bool,
        #[source]
        source: CommandError,
    },

    #[error("publish failed: {0}")]
    Publish(#[from] PublishError),

    #[error("cache clean failed: {0}")]
    Clean(#[source] CommandError),

    #[error("task graph cycle involving {0}")]
    Cycle(String),
}
