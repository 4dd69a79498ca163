//! Build image provisioning
//!
//! Decides whether a target's tagged image already exists and builds it
//! from the image definition when absent or forced. Docker builds into
//! fresh layers and retags only on success, so a failed build leaves the
//! previous tag in place.

use tracing::info;

use crate::command::CommandRunner;
use crate::config::PipelineConfig;
use crate::docker;
use crate::error::PipelineError;
use crate::target::BuildTarget;

/// Check whether the tagged build image exists locally.
pub fn image_exists(
    config: &PipelineConfig,
    runner: &dyn CommandRunner,
    target: BuildTarget,
) -> Result<bool, PipelineError> {
    let output = runner
        .run_captured(&docker::image_query(config, target))
        .map_err(|source| PipelineError::ImageBuild { target, source })?;
    Ok(!output.stdout.trim().is_empty())
}

/// Ensure the build image for `target` exists, building it if needed.
///
/// With `force` the build always runs and overwrites the tag in place.
pub fn ensure_image(
    config: &PipelineConfig,
    runner: &dyn CommandRunner,
    target: BuildTarget,
    force: bool,
) -> Result<(), PipelineError> {
    if !force && image_exists(config, runner, target)? {
        info!(target = %target, "build image present, skipping");
        return Ok(());
    }

    info!(target = %target, image = %config.image_ref(target), "building image");
    runner
        .run(&docker::image_build(config, target))
        .map_err(|source| PipelineError::ImageBuild { target, source })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::RecordingRunner;

    fn config() -> PipelineConfig {
        PipelineConfig::from_repo("/work/jtc")
    }

    #[test]
    fn existing_image_skips_the_build() {
        let runner = RecordingRunner::with_stdout("f2a9b1c8d7e6\n");

        ensure_image(&config(), &runner, BuildTarget::Ubuntu, false).unwrap();

        let calls = runner.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].argv(), ["images", "-q", "build-jtc-image:ubuntu"]);
    }

    #[test]
    fn absent_image_triggers_the_build() {
        let runner = RecordingRunner::new();

        ensure_image(&config(), &runner, BuildTarget::Ubuntu, false).unwrap();

        let calls = runner.calls();
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[1].argv()[..4], ["buildx", "build", "--load", "-t"]);
    }

    #[test]
    fn force_always_builds() {
        let runner = RecordingRunner::with_stdout("f2a9b1c8d7e6\n");

        ensure_image(&config(), &runner, BuildTarget::AmazonLinux2, true).unwrap();

        let calls = runner.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].argv()[..2], ["buildx", "build"]);
    }

    #[test]
    fn build_failure_names_the_target() {
        let runner = RecordingRunner::failing();

        let err = ensure_image(&config(), &runner, BuildTarget::Ubuntu, true).unwrap_err();
        match err {
            PipelineError::ImageBuild { target, .. } => assert_eq!(target, BuildTarget::Ubuntu),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn image_exists_trims_probe_output() {
        let runner = RecordingRunner::with_stdout("\n");
        assert!(!image_exists(&config(), &runner, BuildTarget::Ubuntu).unwrap());

        let runner = RecordingRunner::with_stdout("abc123\n");
        assert!(image_exists(&config(), &runner, BuildTarget::Ubuntu).unwrap());
    }
}
