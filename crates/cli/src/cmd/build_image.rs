//! Implementation of the `jtc-release build-image` command.

use std::path::Path;

use anyhow::Result;

use jtc_release_core::pipeline::Task;
use jtc_release_core::BuildTarget;

use crate::output::print_success;

pub fn cmd_build_image(repo: &Path, target: BuildTarget, force: bool, dry_run: bool) -> Result<()> {
    let config = super::config_for_repo(repo)?;
    super::run_pipeline(&config, Task::BuildImage { target, force }, dry_run)?;

    if !dry_run {
        print_success(&format!("build image ready: {}", config.image_ref(target)));
    }
    Ok(())
}
