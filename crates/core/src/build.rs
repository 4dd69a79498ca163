//! Containerized compilation
//!
//! Runs the in-image `build` entrypoint against a provisioned build
//! image. The image must already exist for the target; the orchestrator
//! enforces that ordering, it is not re-checked here.

use tracing::info;

use crate::command::CommandRunner;
use crate::config::PipelineConfig;
use crate::docker;
use crate::error::PipelineError;
use crate::target::BuildTarget;

/// Compile the daemon inside the target's build image.
///
/// Re-running is safe: the cache volumes persist across invocations and
/// shorten subsequent builds, but source changes always recompile.
pub fn build_binary(
    config: &PipelineConfig,
    runner: &dyn CommandRunner,
    target: BuildTarget,
    release: bool,
) -> Result<(), PipelineError> {
    let invocation = docker::container_build(config, target, release);
    info!(target = %target, release, "compiling in container");
    runner.run(&invocation).map_err(|source| PipelineError::Compile {
        target,
        release,
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::RecordingRunner;

    fn config() -> PipelineConfig {
        PipelineConfig::from_repo("/work/jtc")
    }

    #[test]
    fn runs_exactly_one_container_invocation() {
        let runner = RecordingRunner::new();

        build_binary(&config(), &runner, BuildTarget::Ubuntu, true).unwrap();

        let calls = runner.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].program(), "docker");
        assert_eq!(calls[0].argv()[..2], ["run", "--rm"]);
        assert_eq!(calls[0].argv().last().unwrap(), "--release");
    }

    #[test]
    fn compile_failure_carries_target_and_mode() {
        let runner = RecordingRunner::failing();

        let err = build_binary(&config(), &runner, BuildTarget::AmazonLinux2, false).unwrap_err();
        match err {
            PipelineError::Compile { target, release, .. } => {
                assert_eq!(target, BuildTarget::AmazonLinux2);
                assert!(!release);
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
