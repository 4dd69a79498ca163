mod build;
mod build_image;
mod clean;
mod publish;

use std::path::Path;

use anyhow::{Result, bail};
use tracing::debug;

use jtc_release_core::pipeline::{RunOptions, Task, run_task};
use jtc_release_core::{DryRunner, PipelineConfig, SystemRunner};

pub use build::cmd_build;
pub use build_image::cmd_build_image;
pub use clean::cmd_clean;
pub use publish::cmd_publish;

/// Resolve the pipeline config for a daemon checkout, rejecting roots
/// that are clearly not one.
pub(crate) fn config_for_repo(repo: &Path) -> Result<PipelineConfig> {
    let config = PipelineConfig::from_repo(repo);
    if !config.cargo_toml.exists() {
        bail!("no Cargo.toml under {}; is this the daemon checkout?", repo.display());
    }
    Ok(config)
}

/// Run one task chain with the runner matching the dry-run flag.
pub(crate) fn run_pipeline(config: &PipelineConfig, task: Task, dry_run: bool) -> Result<()> {
    debug!(task = %task, dry_run, "dispatching pipeline task");
    let options = RunOptions { dry_run };
    if dry_run {
        run_task(config, &DryRunner, task, options)?;
        crate::output::print_info("dry run - no commands executed");
    } else {
        run_task(config, &SystemRunner, task, options)?;
    }
    Ok(())
}
