//! Implementation of the `jtc-release build` command.
//!
//! Ensures the target's image exists, then compiles the daemon inside it.
//! The image build is skipped when the tag is already present.

use std::path::Path;
use std::time::Instant;

use anyhow::Result;

use jtc_release_core::pipeline::Task;
use jtc_release_core::BuildTarget;

use crate::output::{format_duration, print_stat, print_success};

pub fn cmd_build(repo: &Path, target: BuildTarget, release: bool, dry_run: bool) -> Result<()> {
    let start = Instant::now();
    let config = super::config_for_repo(repo)?;
    super::run_pipeline(&config, Task::Build { target, release }, dry_run)?;

    if !dry_run {
        let profile = if release { "release" } else { "debug" };
        print_success(&format!("compiled {} ({profile})", config.product));
        print_stat("Binary", &config.binary_path(release).display().to_string());
        print_stat("Duration", &format_duration(start.elapsed()));
    }
    Ok(())
}
