//! Implementation of the `jtc-release publish` command.
//!
//! Runs the full chain: ensure the image, compile in release mode, then
//! stage and archive the versioned tarball.

use std::path::Path;
use std::time::Instant;

use anyhow::Result;

use jtc_release_core::manifest::read_version;
use jtc_release_core::pipeline::Task;
use jtc_release_core::BuildTarget;

use crate::output::{format_duration, print_stat, print_success};

pub fn cmd_publish(repo: &Path, target: BuildTarget, dry_run: bool) -> Result<()> {
    let start = Instant::now();
    let config = super::config_for_repo(repo)?;
    super::run_pipeline(&config, Task::Publish { target }, dry_run)?;

    if !dry_run {
        let version = read_version(&config.cargo_toml)?;
        print_success(&format!("published {} {}", config.product, version));
        print_stat(
            "Archive",
            &config.archive_path(&version).display().to_string(),
        );
        print_stat("Duration", &format_duration(start.elapsed()));
    }
    Ok(())
}
